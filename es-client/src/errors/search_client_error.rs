//! Search client error types.
//!
//! This module defines the unified error type returned by the facade and by every
//! `SearchEngineProvider` implementation.

use std::time::Duration;

use thiserror::Error;

/// Unified errors from search client operations.
///
/// Remote failures keep the status code and the body text the engine returned, so
/// callers see exactly what Elasticsearch reported. No variant is retried internally.
#[derive(Debug, Clone, Error)]
pub enum SearchClientError {
    /// Input rejected before anything was sent (empty or malformed names).
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Failed to set up the connection to the search engine.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The request could not be sent or no response was received.
    #[error("Transport error: {0}")]
    TransportError(String),

    /// The search engine answered with a non-success status.
    #[error("Request failed with status {status}: {reason}")]
    ResponseError { status: u16, reason: String },

    /// Failed to parse a response from the search engine.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Failed to serialize a document or request body.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// The per-call deadline elapsed before the engine responded.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// The per-call cancellation token fired before the engine responded.
    #[error("Request cancelled")]
    Cancelled,

    /// Batch size exceeds configured maximum.
    #[error("Batch size {provided} exceeds maximum {max}")]
    BatchSizeExceeded { provided: usize, max: usize },
}

impl SearchClientError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create a transport error.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::TransportError(msg.into())
    }

    /// Create a response error from a status code and the response body.
    pub fn response(status: u16, reason: impl Into<String>) -> Self {
        Self::ResponseError {
            status,
            reason: reason.into(),
        }
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }

    /// Create a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::SerializationError(msg.into())
    }

    /// Create a batch size exceeded error.
    pub fn batch_size_exceeded(provided: usize, max: usize) -> Self {
        Self::BatchSizeExceeded { provided, max }
    }

    /// The HTTP status the engine answered with, if this is a remote failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ResponseError { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the engine reported the target resource as missing.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_error_display() {
        let err = SearchClientError::response(404, "index_not_found_exception");
        assert_eq!(
            err.to_string(),
            "Request failed with status 404: index_not_found_exception"
        );
        assert_eq!(err.status(), Some(404));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_non_response_errors_have_no_status() {
        let err = SearchClientError::transport("connection refused");
        assert_eq!(err.status(), None);
        assert!(!err.is_not_found());
        assert!(!SearchClientError::Cancelled.is_not_found());
    }

    #[test]
    fn test_batch_size_exceeded_display() {
        let err = SearchClientError::batch_size_exceeded(5, 2);
        assert_eq!(err.to_string(), "Batch size 5 exceeds maximum 2");
    }
}
