//! Elasticsearch provider implementation.
//!
//! This module provides the concrete implementation of `SearchEngineProvider`
//! using the Elasticsearch Rust crate.

use std::future::Future;

use async_trait::async_trait;
use elasticsearch::{
    cluster::ClusterHealthParts,
    http::{
        request::JsonBody,
        response::Response,
        transport::{MultiNodeConnectionPool, SingleNodeConnectionPool, TransportBuilder},
    },
    indices::{
        IndicesCreateParts, IndicesDeleteParts, IndicesDeleteTemplateParts, IndicesExistsParts,
        IndicesExistsTemplateParts, IndicesPutAliasParts, IndicesPutTemplateParts,
        IndicesRolloverParts,
    },
    BulkParts, DeleteByQueryParts, Elasticsearch, SearchParts,
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{debug, error, info};
use url::Url;

use crate::config::ClientConfig;
use crate::elastic::index_config::{IndexSettings, IndexTemplate};
use crate::errors::SearchClientError;
use crate::interfaces::SearchEngineProvider;
use crate::types::{
    Acknowledgement, BulkBatch, BulkResponse, BulkSummary, ClusterHealth, DeleteByQueryResponse,
    RequestOptions, RolloverConditions, RolloverResponse, SearchResult,
};

/// Elasticsearch provider implementation.
///
/// Holds the long-lived connection to the cluster. Every trait method issues exactly
/// one request and returns the engine's answer; nothing is retried or cached.
///
/// # Example
///
/// ```ignore
/// use es_client::{ClientConfig, ElasticsearchProvider, RequestOptions, SearchEngineProvider};
///
/// let provider = ElasticsearchProvider::connect(&ClientConfig::new(["http://localhost:9200"])).await?;
/// let exists = provider.index_exists("orders", &RequestOptions::none()).await?;
/// ```
pub struct ElasticsearchProvider {
    client: Elasticsearch,
}

impl ElasticsearchProvider {
    /// Build a provider for the configured node addresses without contacting them.
    ///
    /// One address uses a single-node connection pool; several addresses are used
    /// round-robin without sniffing the cluster for more nodes. Use `connect` to
    /// also verify that the cluster answers.
    ///
    /// # Arguments
    ///
    /// * `config` - The client configuration containing node addresses and transport options
    ///
    /// # Returns
    ///
    /// * `Ok(ElasticsearchProvider)` - A new provider instance
    /// * `Err(SearchClientError)` - If no address was given, an address is malformed,
    ///   or the transport cannot be built
    pub fn new(config: &ClientConfig) -> Result<Self, SearchClientError> {
        let mut urls = config
            .addresses
            .iter()
            .map(|address| {
                Url::parse(address).map_err(|e| {
                    SearchClientError::connection(format!("Invalid address '{}': {}", address, e))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut builder = match urls.len() {
            0 => {
                return Err(SearchClientError::connection(
                    "At least one address is required",
                ))
            }
            1 => TransportBuilder::new(SingleNodeConnectionPool::new(urls.remove(0))),
            _ => TransportBuilder::new(MultiNodeConnectionPool::round_robin(urls, None)),
        };

        if config.disable_proxy {
            builder = builder.disable_proxy();
        }
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        let transport = builder
            .build()
            .map_err(|e| SearchClientError::connection(e.to_string()))?;

        info!(
            addresses = ?config.addresses,
            request_timeout = ?config.request_timeout,
            "Created Elasticsearch provider"
        );

        Ok(Self {
            client: Elasticsearch::new(transport),
        })
    }

    /// Build a provider and ping the cluster once.
    ///
    /// The ping is bounded by `config.request_timeout` when one is set.
    ///
    /// # Returns
    ///
    /// * `Ok(ElasticsearchProvider)` - A provider whose cluster answered the ping
    /// * `Err(SearchClientError::ConnectionError)` - If the configuration is invalid,
    ///   no node could be reached, or the ping was answered with a non-success status
    pub async fn connect(config: &ClientConfig) -> Result<Self, SearchClientError> {
        let provider = Self::new(config)?;

        let opts = RequestOptions {
            timeout: config.request_timeout,
            cancel: None,
        };
        provider.ping(&opts).await.map_err(|e| {
            error!(addresses = ?config.addresses, error = %e, "Elasticsearch is not reachable");
            SearchClientError::connection(format!("No active connection: {}", e))
        })?;

        info!(addresses = ?config.addresses, "Connected to Elasticsearch");
        Ok(provider)
    }

    /// Send `HEAD /` and require a success status.
    pub async fn ping(&self, opts: &RequestOptions) -> Result<(), SearchClientError> {
        Self::dispatch(
            "ping",
            opts,
            Self::checked("ping", self.client.ping().send()),
        )
        .await
        .map(|_| ())
    }

    /// Run one whole call (send, status check and body read) under the per-call
    /// timeout and cancellation token.
    async fn dispatch<T, F>(
        operation: &'static str,
        opts: &RequestOptions,
        call: F,
    ) -> Result<T, SearchClientError>
    where
        F: Future<Output = Result<T, SearchClientError>>,
    {
        let bounded = async {
            match opts.timeout {
                Some(limit) => match tokio::time::timeout(limit, call).await {
                    Ok(result) => result,
                    Err(_) => {
                        error!(operation, timeout = ?limit, "Request timed out");
                        Err(SearchClientError::Timeout(limit))
                    }
                },
                None => call.await,
            }
        };

        match &opts.cancel {
            Some(token) => tokio::select! {
                biased;
                _ = token.cancelled() => {
                    debug!(operation, "Request cancelled");
                    Err(SearchClientError::Cancelled)
                }
                result = bounded => result,
            },
            None => bounded.await,
        }
    }

    /// Await the request, mapping a failure to send into a `TransportError`.
    async fn send<R>(operation: &'static str, request: R) -> Result<Response, SearchClientError>
    where
        R: Future<Output = Result<Response, elasticsearch::Error>>,
    {
        request.await.map_err(|e| {
            error!(operation, error = %e, "Request could not be sent");
            SearchClientError::transport(e.to_string())
        })
    }

    /// Turn a non-success response into a `ResponseError` carrying the body text.
    async fn ensure_success(
        operation: &'static str,
        response: Response,
    ) -> Result<Response, SearchClientError> {
        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(operation, status = %status, body = %error_body, "Request failed");
            return Err(SearchClientError::response(status.as_u16(), error_body));
        }
        Ok(response)
    }

    /// Send the request and require a success status.
    async fn checked<R>(operation: &'static str, request: R) -> Result<Response, SearchClientError>
    where
        R: Future<Output = Result<Response, elasticsearch::Error>>,
    {
        let response = Self::send(operation, request).await?;
        Self::ensure_success(operation, response).await
    }

    /// Send the request, check the status and deserialize the body.
    async fn parse<T, R>(operation: &'static str, request: R) -> Result<T, SearchClientError>
    where
        T: DeserializeOwned,
        R: Future<Output = Result<Response, elasticsearch::Error>>,
    {
        let response = Self::checked(operation, request).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| SearchClientError::parse(format!("{} response: {}", operation, e)))
    }

    /// Send an existence check: 200 is `true`, 404 is `false`.
    async fn exists<R>(operation: &'static str, request: R) -> Result<bool, SearchClientError>
    where
        R: Future<Output = Result<Response, elasticsearch::Error>>,
    {
        let response = Self::send(operation, request).await?;
        match response.status_code().as_u16() {
            200 => Ok(true),
            404 => Ok(false),
            _ => Self::ensure_success(operation, response).await.map(|_| true),
        }
    }

    /// Build the NDJSON lines of a bulk request: a `create` action line per document.
    fn bulk_body(documents: Vec<Value>) -> Vec<Value> {
        let mut body = Vec::with_capacity(documents.len() * 2);
        for doc in documents {
            body.push(json!({ "create": {} }));
            body.push(doc);
        }
        body
    }

    fn query_string_body(query: &str) -> Value {
        json!({
            "query": {
                "query_string": {
                    "query": query
                }
            }
        })
    }
}

#[async_trait]
impl SearchEngineProvider for ElasticsearchProvider {
    async fn create_index(
        &self,
        index: &str,
        settings: &IndexSettings,
        opts: &RequestOptions,
    ) -> Result<Acknowledgement, SearchClientError> {
        let ack: Acknowledgement = Self::dispatch(
            "create_index",
            opts,
            Self::parse(
                "create_index",
                self.client
                    .indices()
                    .create(IndicesCreateParts::Index(index))
                    .body(settings)
                    .send(),
            ),
        )
        .await?;

        debug!(index = %index, acknowledged = ack.acknowledged, "Index created");
        Ok(ack)
    }

    async fn add_alias(
        &self,
        index: &str,
        alias: &str,
        opts: &RequestOptions,
    ) -> Result<Acknowledgement, SearchClientError> {
        let ack: Acknowledgement = Self::dispatch(
            "add_alias",
            opts,
            Self::parse(
                "add_alias",
                self.client
                    .indices()
                    .put_alias(IndicesPutAliasParts::IndexName(&[index], alias))
                    .send(),
            ),
        )
        .await?;

        debug!(index = %index, alias = %alias, "Alias added");
        Ok(ack)
    }

    async fn index_exists(
        &self,
        index: &str,
        opts: &RequestOptions,
    ) -> Result<bool, SearchClientError> {
        Self::dispatch(
            "index_exists",
            opts,
            Self::exists(
                "index_exists",
                self.client
                    .indices()
                    .exists(IndicesExistsParts::Index(&[index]))
                    .send(),
            ),
        )
        .await
    }

    async fn delete_index(
        &self,
        index: &str,
        opts: &RequestOptions,
    ) -> Result<Acknowledgement, SearchClientError> {
        let ack: Acknowledgement = Self::dispatch(
            "delete_index",
            opts,
            Self::parse(
                "delete_index",
                self.client
                    .indices()
                    .delete(IndicesDeleteParts::Index(&[index]))
                    .send(),
            ),
        )
        .await?;

        debug!(index = %index, "Index deleted");
        Ok(ack)
    }

    /// Send the batch as `create` operations to `/<index>/_bulk`.
    ///
    /// Documents carry no id, so the engine generates one per document. An empty batch
    /// is not sent and yields an empty summary, where Elasticsearch itself would
    /// reject an empty bulk body.
    ///
    /// # Arguments
    ///
    /// * `batch` - The batch to send; it is consumed whatever the outcome
    /// * `opts` - Per-call timeout and cancellation
    ///
    /// # Returns
    ///
    /// * `Ok(BulkSummary)` - Contains total count, succeeded count, failed count,
    ///   and individual results for each document in request order
    /// * `Err(SearchClientError)` - If the request as a whole failed
    async fn bulk(
        &self,
        batch: BulkBatch,
        opts: &RequestOptions,
    ) -> Result<BulkSummary, SearchClientError> {
        if batch.is_empty() {
            return Ok(BulkSummary::default());
        }

        let (index, documents) = batch.into_parts();
        let body: Vec<JsonBody<Value>> = Self::bulk_body(documents)
            .into_iter()
            .map(JsonBody::new)
            .collect();

        let raw: BulkResponse = Self::dispatch(
            "bulk",
            opts,
            Self::parse(
                "bulk",
                self.client.bulk(BulkParts::Index(&index)).body(body).send(),
            ),
        )
        .await?;
        let summary = BulkSummary::from(raw);

        if summary.all_succeeded() {
            debug!(index = %index, total = summary.total, "Bulk request completed");
        } else {
            error!(
                index = %index,
                total = summary.total,
                failed = summary.failed,
                "Bulk request completed with failures"
            );
        }
        Ok(summary)
    }

    async fn delete_by_query(
        &self,
        index: &str,
        query: &str,
        opts: &RequestOptions,
    ) -> Result<u64, SearchClientError> {
        let raw: DeleteByQueryResponse = Self::dispatch(
            "delete_by_query",
            opts,
            Self::parse(
                "delete_by_query",
                self.client
                    .delete_by_query(DeleteByQueryParts::Index(&[index]))
                    .body(Self::query_string_body(query))
                    .send(),
            ),
        )
        .await?;

        debug!(index = %index, query = %query, deleted = raw.deleted, "Documents deleted by query");
        Ok(raw.deleted)
    }

    async fn search(
        &self,
        index: &str,
        query: &str,
        opts: &RequestOptions,
    ) -> Result<SearchResult, SearchClientError> {
        let result: SearchResult = Self::dispatch(
            "search",
            opts,
            Self::parse(
                "search",
                self.client
                    .search(SearchParts::Index(&[index]))
                    .body(Self::query_string_body(query))
                    .send(),
            ),
        )
        .await?;

        debug!(
            index = %index,
            query = %query,
            total_hits = result.total_hits(),
            took_ms = result.took,
            "Search completed"
        );
        Ok(result)
    }

    async fn rollover(
        &self,
        alias: &str,
        conditions: &RolloverConditions,
        opts: &RequestOptions,
    ) -> Result<RolloverResponse, SearchClientError> {
        let result: RolloverResponse = Self::dispatch(
            "rollover",
            opts,
            Self::parse(
                "rollover",
                self.client
                    .indices()
                    .rollover(IndicesRolloverParts::Alias(alias))
                    .body(json!({ "conditions": conditions }))
                    .send(),
            ),
        )
        .await?;

        debug!(
            alias = %alias,
            rolled_over = result.rolled_over,
            new_index = %result.new_index,
            "Rollover evaluated"
        );
        Ok(result)
    }

    async fn put_template(
        &self,
        name: &str,
        template: &IndexTemplate,
        opts: &RequestOptions,
    ) -> Result<Acknowledgement, SearchClientError> {
        let ack: Acknowledgement = Self::dispatch(
            "put_template",
            opts,
            Self::parse(
                "put_template",
                self.client
                    .indices()
                    .put_template(IndicesPutTemplateParts::Name(name))
                    .body(template)
                    .send(),
            ),
        )
        .await?;

        debug!(template = %name, patterns = ?template.index_patterns, "Index template stored");
        Ok(ack)
    }

    async fn delete_template(
        &self,
        name: &str,
        opts: &RequestOptions,
    ) -> Result<Acknowledgement, SearchClientError> {
        let ack: Acknowledgement = Self::dispatch(
            "delete_template",
            opts,
            Self::parse(
                "delete_template",
                self.client
                    .indices()
                    .delete_template(IndicesDeleteTemplateParts::Name(name))
                    .send(),
            ),
        )
        .await?;

        debug!(template = %name, "Index template deleted");
        Ok(ack)
    }

    async fn template_exists(
        &self,
        name: &str,
        opts: &RequestOptions,
    ) -> Result<bool, SearchClientError> {
        Self::dispatch(
            "template_exists",
            opts,
            Self::exists(
                "template_exists",
                self.client
                    .indices()
                    .exists_template(IndicesExistsTemplateParts::Name(&[name]))
                    .send(),
            ),
        )
        .await
    }

    async fn cluster_health(
        &self,
        opts: &RequestOptions,
    ) -> Result<ClusterHealth, SearchClientError> {
        Self::dispatch(
            "cluster_health",
            opts,
            Self::parse(
                "cluster_health",
                self.client.cluster().health(ClusterHealthParts::None).send(),
            ),
        )
        .await
    }
}
