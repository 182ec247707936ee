//! # Song Seeder Repository
//!
//! This crate provides the trait the seeder submits documents through, the
//! error and result types of a bulk submission, and a concrete
//! implementation for OpenSearch (compatible with the Elasticsearch `_bulk`
//! API).

pub mod config;
pub mod errors;
pub mod interfaces;
pub mod opensearch;
pub mod types;

pub use config::{SearchIndexConfig, DEFAULT_MAX_BATCH_SIZE};
pub use errors::SearchIndexError;
pub use interfaces::SearchIndexProvider;
pub use opensearch::OpenSearchClient;
pub use types::{BatchOperationResult, BatchOperationSummary};
