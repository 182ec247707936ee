//! Search index provider trait definition.
//!
//! This module defines the abstract interface the seeder submits through,
//! allowing for different backend implementations (OpenSearch, Elasticsearch,
//! or a mock in tests).

use async_trait::async_trait;

use crate::errors::SearchIndexError;
use crate::types::BatchOperationSummary;
use song_seeder_shared::SongAction;

/// Abstracts the underlying search index implementation.
///
/// Implementations are shared read-only across the bulk driver's workers, so
/// they must be `Send + Sync` and hold no per-request mutable state.
#[async_trait]
pub trait SearchIndexProvider: Send + Sync {
    /// Check whether the search engine is reachable and healthy.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - The cluster answered and reported a usable status
    /// * `Ok(false)` - The cluster answered but is unhealthy
    /// * `Err(SearchIndexError)` - The cluster could not be reached
    async fn health_check(&self) -> Result<bool, SearchIndexError>;

    /// Create the target index with the song mapping if it does not exist yet.
    ///
    /// An existing index, and every document already in it, is left untouched.
    async fn ensure_index_exists(&self, index: &str) -> Result<(), SearchIndexError>;

    /// Submit a batch of actions in one bulk request.
    ///
    /// Per-document rejections are reported in the returned summary and do not
    /// fail the call. An `Err` means the request as a whole failed.
    ///
    /// # Arguments
    ///
    /// * `actions` - The actions to submit
    ///
    /// # Returns
    ///
    /// * `Ok(BatchOperationSummary)` - Aggregate statistics and one result per action
    /// * `Err(SearchIndexError)` - If the bulk request fails entirely
    async fn bulk_index_documents(
        &self,
        actions: &[SongAction],
    ) -> Result<BatchOperationSummary, SearchIndexError>;
}
