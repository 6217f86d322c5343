//! Error types for the Elasticsearch client facade.
//!
//! This module provides a unified error type for all facade operations.

mod search_client_error;

pub use search_client_error::SearchClientError;
