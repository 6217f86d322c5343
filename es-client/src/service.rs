//! Client facade.
//!
//! This module provides `SearchClient`, the entry point application code uses for
//! index lifecycle management, bulk inserts, query-string search and delete-by-query.
//! Each operation validates names, shapes the request and forwards it to a
//! `SearchEngineProvider`, returning the engine's answer unchanged.

use serde::Serialize;
use tracing::debug;

use crate::config::ClientConfig;
use crate::elastic::{ElasticsearchProvider, IndexSettings, IndexTemplate};
use crate::errors::SearchClientError;
use crate::interfaces::SearchEngineProvider;
use crate::types::{
    Acknowledgement, BulkBatch, BulkSummary, ClusterHealth, RequestOptions, RolloverConditions,
    RolloverResponse, SearchResult,
};
use crate::utils::{validate_index_name, validate_template_name};

/// The facade over the search engine.
///
/// Holds nothing but the provider (and with it the connection) plus its config, so a
/// single instance can be shared across tasks. Bulk state lives in `BulkBatch`
/// values owned by the caller. Every operation takes `RequestOptions` for its own
/// deadline and cancellation; nothing is retried.
///
/// # Example
///
/// ```no_run
/// use es_client::{ClientConfig, RequestOptions, SearchClient};
/// use serde_json::json;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = SearchClient::connect(ClientConfig::new(["http://localhost:9200"])).await?;
/// let opts = RequestOptions::none();
///
/// client.create_index("orders", 1, 0, &opts).await?;
/// client.add_alias("orders", "orders-current", &opts).await?;
///
/// let docs = vec![json!({"item": "book"}), json!({"item": "pen"})];
/// let summary = client.insert_bulk("orders", &docs, &opts).await?;
/// assert_eq!(summary.failed, 0);
///
/// let result = client.query("orders", "item:book", &opts).await?;
/// println!("{} hits", result.total_hits());
/// # Ok(())
/// # }
/// ```
pub struct SearchClient {
    provider: Box<dyn SearchEngineProvider>,
    config: ClientConfig,
}

impl SearchClient {
    /// Connect to the nodes listed in `config` using the Elasticsearch provider.
    ///
    /// The cluster is pinged once before the facade is returned, bounded by
    /// `config.request_timeout` when set.
    ///
    /// # Returns
    ///
    /// * `Ok(SearchClient)` - A facade holding the new connection
    /// * `Err(SearchClientError::ConnectionError)` - If no address was given, an
    ///   address is malformed, the transport cannot be built, or no node answered
    ///   the ping with a success status
    pub async fn connect(config: ClientConfig) -> Result<Self, SearchClientError> {
        let provider = ElasticsearchProvider::connect(&config).await?;
        Ok(Self::with_config(Box::new(provider), config))
    }

    /// Create a new SearchClient over an existing provider with default configuration.
    pub fn new(provider: Box<dyn SearchEngineProvider>) -> Self {
        Self {
            provider,
            config: ClientConfig::default(),
        }
    }

    /// Create a new SearchClient over an existing provider with custom configuration.
    pub fn with_config(provider: Box<dyn SearchEngineProvider>, config: ClientConfig) -> Self {
        Self { provider, config }
    }

    /// Check if batch size exceeds the configured limit.
    fn validate_batch_size(&self, size: usize) -> Result<(), SearchClientError> {
        if let Some(max) = self.config.max_batch_size {
            if size > max {
                return Err(SearchClientError::batch_size_exceeded(size, max));
            }
        }
        Ok(())
    }

    fn validate_shards(shards: u32) -> Result<(), SearchClientError> {
        if shards == 0 {
            return Err(SearchClientError::validation(
                "number of shards must be at least 1",
            ));
        }
        Ok(())
    }

    /// Create an index with the given shard and replica counts.
    ///
    /// # Arguments
    ///
    /// * `index` - Name of the index to create
    /// * `shards` - Number of primary shards (at least 1)
    /// * `replicas` - Number of replicas per primary shard
    /// * `opts` - Per-call timeout and cancellation
    ///
    /// # Returns
    ///
    /// * `Ok(Acknowledgement)` - The engine's acknowledgement
    /// * `Err(SearchClientError::ValidationError)` - If the name or shard count is invalid
    /// * `Err(SearchClientError)` - If the index already exists or the request fails
    pub async fn create_index(
        &self,
        index: &str,
        shards: u32,
        replicas: u32,
        opts: &RequestOptions,
    ) -> Result<Acknowledgement, SearchClientError> {
        validate_index_name("index", index)?;
        Self::validate_shards(shards)?;

        let settings = IndexSettings::new(shards, replicas);
        self.provider.create_index(index, &settings, opts).await
    }

    /// Point `alias` at `index`.
    pub async fn add_alias(
        &self,
        index: &str,
        alias: &str,
        opts: &RequestOptions,
    ) -> Result<Acknowledgement, SearchClientError> {
        validate_index_name("index", index)?;
        validate_index_name("alias", alias)?;

        self.provider.add_alias(index, alias, opts).await
    }

    /// Check whether an index exists. The answer always comes from the engine.
    pub async fn index_exists(
        &self,
        index: &str,
        opts: &RequestOptions,
    ) -> Result<bool, SearchClientError> {
        validate_index_name("index", index)?;

        self.provider.index_exists(index, opts).await
    }

    /// Delete an index.
    pub async fn delete_index(
        &self,
        index: &str,
        opts: &RequestOptions,
    ) -> Result<Acknowledgement, SearchClientError> {
        validate_index_name("index", index)?;

        self.provider.delete_index(index, opts).await
    }

    /// Start an empty bulk batch targeting `index`.
    ///
    /// Fill it with `BulkBatch::add` and send it with `flush`. The batch is never
    /// flushed automatically.
    pub fn begin_batch(&self, index: &str) -> Result<BulkBatch, SearchClientError> {
        validate_index_name("index", index)?;
        Ok(BulkBatch::new(index))
    }

    /// Send a batch as one bulk request.
    ///
    /// The batch is consumed whatever the outcome. Per-document failures are
    /// reported in the summary rather than as an error. An empty batch is not sent
    /// and yields an empty summary; Elasticsearch would reject it as a request.
    ///
    /// # Returns
    ///
    /// * `Ok(BulkSummary)` - Contains total count, succeeded count, failed count,
    ///   and individual results for each document
    /// * `Err(SearchClientError::BatchSizeExceeded)` - If the batch exceeds the configured limit
    /// * `Err(SearchClientError)` - If the request as a whole fails
    pub async fn flush(
        &self,
        batch: BulkBatch,
        opts: &RequestOptions,
    ) -> Result<BulkSummary, SearchClientError> {
        self.validate_batch_size(batch.len())?;

        debug!(index = %batch.index(), documents = batch.len(), "Flushing bulk batch");
        self.provider.bulk(batch, opts).await
    }

    /// Insert `docs` into `index` with a single bulk request.
    ///
    /// Every document is serialized before anything is sent; if one fails to
    /// serialize, no request is made and the error is returned. An empty `docs`
    /// slice returns an empty summary without a request, unlike a raw bulk call
    /// which Elasticsearch rejects.
    ///
    /// # Arguments
    ///
    /// * `index` - Target index
    /// * `docs` - Documents to create, in order
    /// * `opts` - Per-call timeout and cancellation
    ///
    /// # Returns
    ///
    /// * `Ok(BulkSummary)` - Per-document outcomes
    /// * `Err(SearchClientError::SerializationError)` - If any document fails to serialize
    /// * `Err(SearchClientError)` - If the bulk request fails
    pub async fn insert_bulk<T: Serialize>(
        &self,
        index: &str,
        docs: &[T],
        opts: &RequestOptions,
    ) -> Result<BulkSummary, SearchClientError> {
        self.validate_batch_size(docs.len())?;

        let mut batch = self.begin_batch(index)?;
        for doc in docs {
            batch.add(doc)?;
        }
        self.flush(batch, opts).await
    }

    /// Delete every document in `index` matching a query string.
    ///
    /// The query string is passed through verbatim; a malformed query is reported by
    /// the engine.
    ///
    /// # Returns
    ///
    /// * `Ok(u64)` - Number of deleted documents
    /// * `Err(SearchClientError)` - If the query is rejected or the request fails
    pub async fn delete_by_query(
        &self,
        index: &str,
        query: &str,
        opts: &RequestOptions,
    ) -> Result<u64, SearchClientError> {
        validate_index_name("index", index)?;

        self.provider.delete_by_query(index, query, opts).await
    }

    /// Search `index` with a query string. Hits come back in relevance order.
    pub async fn query(
        &self,
        index: &str,
        query: &str,
        opts: &RequestOptions,
    ) -> Result<SearchResult, SearchClientError> {
        validate_index_name("index", index)?;

        self.provider.search(index, query, opts).await
    }

    /// Roll the index behind `alias` over once it is older than `max_age` or holds
    /// more than `max_docs` documents.
    ///
    /// The conditions are evaluated by the engine at the time of the call.
    ///
    /// # Arguments
    ///
    /// * `alias` - Alias whose write index is rolled over
    /// * `max_age` - Maximum index age, e.g. `"7d"`
    /// * `max_docs` - Maximum number of documents
    /// * `opts` - Per-call timeout and cancellation
    pub async fn rollover(
        &self,
        alias: &str,
        max_age: &str,
        max_docs: u64,
        opts: &RequestOptions,
    ) -> Result<RolloverResponse, SearchClientError> {
        validate_index_name("alias", alias)?;
        if max_age.is_empty() {
            return Err(SearchClientError::validation("max_age is required"));
        }

        let conditions = RolloverConditions::new(max_age, max_docs);
        self.provider.rollover(alias, &conditions, opts).await
    }

    /// Create or replace an index template applied to every new index whose name
    /// starts with `index_prefix`.
    ///
    /// # Arguments
    ///
    /// * `name` - Template name
    /// * `index_prefix` - Prefix of matching index names; the pattern is `<index_prefix>*`
    /// * `alias` - Alias every matching index is added to
    /// * `shards` - Number of primary shards (at least 1)
    /// * `replicas` - Number of replicas per primary shard
    /// * `opts` - Per-call timeout and cancellation
    pub async fn create_template(
        &self,
        name: &str,
        index_prefix: &str,
        alias: &str,
        shards: u32,
        replicas: u32,
        opts: &RequestOptions,
    ) -> Result<Acknowledgement, SearchClientError> {
        validate_template_name(name)?;
        validate_index_name("index prefix", index_prefix)?;
        validate_index_name("alias", alias)?;
        Self::validate_shards(shards)?;

        let template = IndexTemplate::new(index_prefix, alias, shards, replicas);
        self.provider.put_template(name, &template, opts).await
    }

    /// Delete an index template.
    pub async fn delete_template(
        &self,
        name: &str,
        opts: &RequestOptions,
    ) -> Result<Acknowledgement, SearchClientError> {
        validate_template_name(name)?;

        self.provider.delete_template(name, opts).await
    }

    /// Check whether an index template exists.
    pub async fn template_exists(
        &self,
        name: &str,
        opts: &RequestOptions,
    ) -> Result<bool, SearchClientError> {
        validate_template_name(name)?;

        self.provider.template_exists(name, opts).await
    }

    /// Fetch cluster health.
    pub async fn cluster_health(
        &self,
        opts: &RequestOptions,
    ) -> Result<ClusterHealth, SearchClientError> {
        self.provider.cluster_health(opts).await
    }
}
