//! Interface definitions for the search engine provider.
//!
//! This module defines the abstract `SearchEngineProvider` trait that the facade
//! delegates to, allowing the backend to be swapped or mocked.

mod search_engine_provider;

pub use search_engine_provider::SearchEngineProvider;
