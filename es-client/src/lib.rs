//! # es-client
//!
//! A thin facade over the Elasticsearch client. It covers index lifecycle
//! management (create, delete, aliases, templates, rollover), bulk document
//! inserts, query-string search and delete-by-query. Every operation forwards to a
//! `SearchEngineProvider` and returns the engine's answer or error unchanged.

pub mod config;
pub mod elastic;
pub mod errors;
pub mod interfaces;
pub mod service;
pub mod types;
pub mod utils;

pub use config::ClientConfig;
pub use elastic::ElasticsearchProvider;
pub use errors::SearchClientError;
pub use interfaces::SearchEngineProvider;
pub use service::SearchClient;
pub use types::{
    Acknowledgement, BulkBatch, BulkItemResult, BulkSummary, ClusterHealth, RequestOptions,
    RolloverConditions, RolloverResponse, SearchHit, SearchHits, SearchResult, TotalHits,
};
pub use utils::{validate_index_name, validate_template_name};
