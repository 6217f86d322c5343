//! Request and response types for search client operations.

use std::collections::HashMap;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::errors::SearchClientError;

/// Per-call options threaded through every facade operation.
///
/// Both fields are optional. A timeout bounds the wait for the engine's response,
/// a cancellation token aborts the wait as soon as it is cancelled. Neither is
/// retried.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Deadline for this call.
    pub timeout: Option<Duration>,
    /// Token that aborts this call when cancelled.
    pub cancel: Option<CancellationToken>,
}

impl RequestOptions {
    /// Options with no deadline and no cancellation.
    pub fn none() -> Self {
        Self::default()
    }

    /// Set the deadline for this call.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Attach a cancellation token.
    pub fn with_cancel(mut self, cancel: CancellationToken) -> Self {
        self.cancel = Some(cancel);
        self
    }
}

/// Acknowledgement returned by index, alias and template management calls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acknowledgement {
    /// Whether the master node accepted the change.
    #[serde(default)]
    pub acknowledged: bool,
    /// Whether the required shard copies started before the timeout (index creation only).
    #[serde(default)]
    pub shards_acknowledged: bool,
    /// Name of the created index (index creation only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,
}

/// A pending set of document-create operations for one index.
///
/// Obtained from `SearchClient::begin_batch` and consumed by `SearchClient::flush`,
/// so every concurrent user owns its own batch. Documents are serialized when added.
#[derive(Debug, Clone)]
pub struct BulkBatch {
    index: String,
    documents: Vec<Value>,
}

impl BulkBatch {
    pub(crate) fn new(index: impl Into<String>) -> Self {
        Self {
            index: index.into(),
            documents: Vec::new(),
        }
    }

    /// Serialize `doc` and queue a create operation for it.
    pub fn add<T: Serialize + ?Sized>(&mut self, doc: &T) -> Result<(), SearchClientError> {
        let value = serde_json::to_value(doc)
            .map_err(|e| SearchClientError::serialization(e.to_string()))?;
        self.documents.push(value);
        Ok(())
    }

    /// Target index of every operation in this batch.
    pub fn index(&self) -> &str {
        &self.index
    }

    /// Queued documents in insertion order.
    pub fn documents(&self) -> &[Value] {
        &self.documents
    }

    pub(crate) fn into_parts(self) -> (String, Vec<Value>) {
        (self.index, self.documents)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// Outcome of a single operation within a bulk request.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkItemResult {
    /// Index the document was written to.
    pub index: String,
    /// Document id (generated by the engine for create operations without an id).
    pub id: Option<String>,
    /// Per-item HTTP status.
    pub status: u16,
    /// Whether the operation succeeded.
    pub success: bool,
    /// Error reason if the operation failed.
    pub error: Option<String>,
}

/// Summary of a bulk request containing aggregate statistics and individual results.
///
/// A request that reached the engine returns a summary even when some documents were
/// rejected; callers inspect `failed` / `results` for per-document outcomes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BulkSummary {
    /// Time the engine spent on the request in milliseconds.
    pub took_ms: u64,
    /// Total number of items in the batch.
    pub total: usize,
    /// Number of successful operations.
    pub succeeded: usize,
    /// Number of failed operations.
    pub failed: usize,
    /// Individual results for each item, in request order.
    pub results: Vec<BulkItemResult>,
}

impl BulkSummary {
    /// Whether every operation in the batch succeeded.
    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }
}

/// Raw `_bulk` response body.
#[derive(Debug, Deserialize)]
pub(crate) struct BulkResponse {
    #[serde(default)]
    took: u64,
    #[serde(default)]
    items: Vec<HashMap<String, BulkResponseItem>>,
}

#[derive(Debug, Deserialize)]
struct BulkResponseItem {
    #[serde(rename = "_index", default)]
    index: String,
    #[serde(rename = "_id")]
    id: Option<String>,
    status: u16,
    error: Option<Value>,
}

impl From<BulkResponse> for BulkSummary {
    fn from(response: BulkResponse) -> Self {
        let results: Vec<BulkItemResult> = response
            .items
            .into_iter()
            // each item is keyed by its action name ("create")
            .flat_map(|item| item.into_values())
            .map(|item| {
                let error = item.error.map(|e| match e.get("reason").and_then(Value::as_str) {
                    Some(reason) => reason.to_string(),
                    None => e.to_string(),
                });
                BulkItemResult {
                    index: item.index,
                    id: item.id,
                    status: item.status,
                    success: error.is_none() && (200..300).contains(&item.status),
                    error,
                }
            })
            .collect();

        let succeeded = results.iter().filter(|r| r.success).count();
        Self {
            took_ms: response.took,
            total: results.len(),
            succeeded,
            failed: results.len() - succeeded,
            results,
        }
    }
}

/// Result of a query-string search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Time taken to execute the search in milliseconds.
    #[serde(default)]
    pub took: u64,
    #[serde(default)]
    pub timed_out: bool,
    #[serde(default)]
    pub hits: SearchHits,
}

impl SearchResult {
    /// Total number of matching documents as reported by the engine.
    ///
    /// May be greater than the number of returned hits due to pagination.
    pub fn total_hits(&self) -> u64 {
        self.hits.total.as_ref().map_or(0, |t| t.value)
    }

    /// Deserialize the `_source` of every returned hit, in relevance order.
    pub fn sources<T: DeserializeOwned>(&self) -> Result<Vec<T>, SearchClientError> {
        self.hits
            .hits
            .iter()
            .filter_map(|hit| hit.source.clone())
            .map(|source| {
                serde_json::from_value(source).map_err(|e| SearchClientError::parse(e.to_string()))
            })
            .collect()
    }
}

/// The `hits` section of a search response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchHits {
    pub total: Option<TotalHits>,
    pub max_score: Option<f64>,
    /// Returned hits, ordered by relevance.
    #[serde(default)]
    pub hits: Vec<SearchHit>,
}

/// Total hit count and whether it is exact (`eq`) or a lower bound (`gte`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalHits {
    pub value: u64,
    pub relation: String,
}

/// A single search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(rename = "_index")]
    pub index: String,
    #[serde(rename = "_id")]
    pub id: String,
    /// Relevance score; higher scores indicate better matches.
    #[serde(rename = "_score")]
    pub score: Option<f64>,
    #[serde(rename = "_source")]
    pub source: Option<Value>,
}

/// Raw `_delete_by_query` response body.
#[derive(Debug, Deserialize)]
pub(crate) struct DeleteByQueryResponse {
    #[serde(default)]
    pub deleted: u64,
}

/// Conditions that trigger a rollover of the index behind an alias.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RolloverConditions {
    /// Maximum index age, e.g. `"7d"` or `"12h"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_age: Option<String>,
    /// Maximum number of documents in the index.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_docs: Option<u64>,
}

impl RolloverConditions {
    pub fn new(max_age: impl Into<String>, max_docs: u64) -> Self {
        Self {
            max_age: Some(max_age.into()),
            max_docs: Some(max_docs),
        }
    }
}

/// Response of a rollover request.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RolloverResponse {
    #[serde(default)]
    pub acknowledged: bool,
    #[serde(default)]
    pub shards_acknowledged: bool,
    #[serde(default)]
    pub old_index: String,
    #[serde(default)]
    pub new_index: String,
    /// Whether a new index was created.
    #[serde(default)]
    pub rolled_over: bool,
    #[serde(default)]
    pub dry_run: bool,
    /// Each requested condition and whether it was met.
    #[serde(default)]
    pub conditions: HashMap<String, bool>,
}

/// Cluster health summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClusterHealth {
    pub cluster_name: String,
    /// `green`, `yellow` or `red`.
    pub status: String,
    #[serde(default)]
    pub timed_out: bool,
    #[serde(default)]
    pub number_of_nodes: u32,
    #[serde(default)]
    pub number_of_data_nodes: u32,
    #[serde(default)]
    pub active_primary_shards: u32,
    #[serde(default)]
    pub active_shards: u32,
    #[serde(default)]
    pub relocating_shards: u32,
    #[serde(default)]
    pub initializing_shards: u32,
    #[serde(default)]
    pub unassigned_shards: u32,
}
