//! Search engine provider trait definition.
//!
//! This module defines the abstract interface for the remote operations the facade
//! forwards to the search engine.

use async_trait::async_trait;

use crate::elastic::{IndexSettings, IndexTemplate};
use crate::errors::SearchClientError;
use crate::types::{
    Acknowledgement, BulkBatch, BulkSummary, ClusterHealth, RequestOptions, RolloverConditions,
    RolloverResponse, SearchResult,
};

/// Abstracts the underlying search engine client.
///
/// Implementations perform exactly one remote call per method and surface the engine's
/// answer without retrying. Inputs arrive already validated and shaped by
/// `SearchClient`; every method honours the timeout and cancellation token in
/// `opts`.
#[async_trait]
pub trait SearchEngineProvider: Send + Sync {
    /// Create `index` with the given settings body.
    async fn create_index(
        &self,
        index: &str,
        settings: &IndexSettings,
        opts: &RequestOptions,
    ) -> Result<Acknowledgement, SearchClientError>;

    /// Point `alias` at `index`.
    async fn add_alias(
        &self,
        index: &str,
        alias: &str,
        opts: &RequestOptions,
    ) -> Result<Acknowledgement, SearchClientError>;

    /// Check whether `index` exists. A missing index is `Ok(false)`, not an error.
    async fn index_exists(&self, index: &str, opts: &RequestOptions)
        -> Result<bool, SearchClientError>;

    /// Delete `index`.
    async fn delete_index(
        &self,
        index: &str,
        opts: &RequestOptions,
    ) -> Result<Acknowledgement, SearchClientError>;

    /// Send every operation in `batch` as one bulk request.
    ///
    /// Per-document failures are reported in the returned summary; only a request
    /// that failed as a whole is an `Err`.
    async fn bulk(
        &self,
        batch: BulkBatch,
        opts: &RequestOptions,
    ) -> Result<BulkSummary, SearchClientError>;

    /// Delete every document in `index` matching the query string and return the
    /// number of deleted documents.
    async fn delete_by_query(
        &self,
        index: &str,
        query: &str,
        opts: &RequestOptions,
    ) -> Result<u64, SearchClientError>;

    /// Run a query-string search against `index`.
    async fn search(
        &self,
        index: &str,
        query: &str,
        opts: &RequestOptions,
    ) -> Result<SearchResult, SearchClientError>;

    /// Roll the index behind `alias` over if any of `conditions` is met.
    async fn rollover(
        &self,
        alias: &str,
        conditions: &RolloverConditions,
        opts: &RequestOptions,
    ) -> Result<RolloverResponse, SearchClientError>;

    /// Create or replace the index template `name`.
    async fn put_template(
        &self,
        name: &str,
        template: &IndexTemplate,
        opts: &RequestOptions,
    ) -> Result<Acknowledgement, SearchClientError>;

    /// Delete the index template `name`.
    async fn delete_template(
        &self,
        name: &str,
        opts: &RequestOptions,
    ) -> Result<Acknowledgement, SearchClientError>;

    /// Check whether the index template `name` exists.
    async fn template_exists(
        &self,
        name: &str,
        opts: &RequestOptions,
    ) -> Result<bool, SearchClientError>;

    /// Fetch cluster health.
    async fn cluster_health(&self, opts: &RequestOptions)
        -> Result<ClusterHealth, SearchClientError>;
}
