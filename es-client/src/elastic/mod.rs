//! Elasticsearch implementation of the search engine provider.
//!
//! This module provides a concrete implementation of `SearchEngineProvider`
//! on top of the `elasticsearch` crate.

mod index_config;
mod provider;

pub use index_config::{index_pattern, AliasDefinition, IndexSettings, IndexTemplate, ShardSettings};
pub use provider::ElasticsearchProvider;
