//! Search index error types.
//!
//! This module defines the error types that can occur while talking to the
//! search backend.

use thiserror::Error;

/// Errors that can occur during search index operations.
#[derive(Debug, Clone, Error)]
pub enum SearchIndexError {
    /// Failed to reach the search engine, or the cluster reported itself unhealthy.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Unusable client configuration, e.g. a URL without a host.
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Failed to create the target index.
    #[error("Index creation error: {0}")]
    IndexCreationError(String),

    /// The bulk request as a whole failed.
    #[error("Bulk operation error: {0}")]
    BulkOperationError(String),

    /// A single document was rejected by the search engine.
    #[error("Document rejected with status {status}: {reason}")]
    DocumentRejected { status: u16, reason: String },

    /// Batch size exceeds configured maximum.
    #[error("Batch size {provided} exceeds maximum {max}")]
    BatchSizeExceeded { provided: usize, max: usize },

    /// Failed to parse a response from the search engine.
    #[error("Parse error: {0}")]
    ParseError(String),
}

impl SearchIndexError {
    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    /// Create an index creation error.
    pub fn index_creation(msg: impl Into<String>) -> Self {
        Self::IndexCreationError(msg.into())
    }

    /// Create a bulk operation error.
    pub fn bulk_operation(msg: impl Into<String>) -> Self {
        Self::BulkOperationError(msg.into())
    }

    /// Create a document rejected error.
    pub fn rejected(status: u16, reason: impl Into<String>) -> Self {
        Self::DocumentRejected {
            status,
            reason: reason.into(),
        }
    }

    /// Create a batch size exceeded error.
    pub fn batch_size_exceeded(provided: usize, max: usize) -> Self {
        Self::BatchSizeExceeded { provided, max }
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            SearchIndexError::connection("refused").to_string(),
            "Connection error: refused"
        );
        assert_eq!(
            SearchIndexError::rejected(409, "version_conflict_engine_exception").to_string(),
            "Document rejected with status 409: version_conflict_engine_exception"
        );
        assert_eq!(
            SearchIndexError::batch_size_exceeded(20_000, 10_000).to_string(),
            "Batch size 20000 exceeds maximum 10000"
        );
    }
}
