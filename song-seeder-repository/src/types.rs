//! Result types for bulk submissions.

use crate::errors::SearchIndexError;

/// Result of a bulk submission for a single document.
///
/// Indicates whether the document was accepted and carries the backend's
/// reason when it was not.
#[derive(Debug, Clone)]
pub struct BatchOperationResult {
    /// The document key (`_id`).
    pub document_id: String,
    /// Whether the document was accepted.
    pub success: bool,
    /// HTTP status reported for this item, when the backend sent one.
    pub status: Option<u16>,
    /// Error if the document was rejected.
    pub error: Option<SearchIndexError>,
}

impl BatchOperationResult {
    /// A successful result.
    pub fn succeeded(document_id: impl Into<String>, status: Option<u16>) -> Self {
        Self {
            document_id: document_id.into(),
            success: true,
            status,
            error: None,
        }
    }

    /// A failed result.
    pub fn failed(
        document_id: impl Into<String>,
        status: Option<u16>,
        error: SearchIndexError,
    ) -> Self {
        Self {
            document_id: document_id.into(),
            success: false,
            status,
            error: Some(error),
        }
    }
}

/// Summary of a bulk submission containing aggregate statistics and
/// individual results.
#[derive(Debug, Clone, Default)]
pub struct BatchOperationSummary {
    /// Total number of documents in the batch.
    pub total: usize,
    /// Number of accepted documents.
    pub succeeded: usize,
    /// Number of rejected documents.
    pub failed: usize,
    /// Individual results for each document.
    pub results: Vec<BatchOperationResult>,
}

impl BatchOperationSummary {
    /// Build a summary from per-document results, counting outcomes.
    pub fn from_results(results: Vec<BatchOperationResult>) -> Self {
        let succeeded = results.iter().filter(|r| r.success).count();
        Self {
            total: results.len(),
            succeeded,
            failed: results.len() - succeeded,
            results,
        }
    }

    /// Iterate over the rejected documents.
    pub fn failures(&self) -> impl Iterator<Item = &BatchOperationResult> {
        self.results.iter().filter(|r| !r.success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_counts() {
        let summary = BatchOperationSummary::from_results(vec![
            BatchOperationResult::succeeded("a", Some(201)),
            BatchOperationResult::failed(
                "b",
                Some(409),
                SearchIndexError::rejected(409, "conflict"),
            ),
            BatchOperationResult::succeeded("c", Some(201)),
        ]);

        assert_eq!(summary.total, 3);
        assert_eq!(summary.succeeded, 2);
        assert_eq!(summary.failed, 1);

        let failures: Vec<_> = summary.failures().map(|r| r.document_id.as_str()).collect();
        assert_eq!(failures, vec!["b"]);
    }

    #[test]
    fn test_empty_summary() {
        let summary = BatchOperationSummary::from_results(vec![]);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.succeeded, 0);
        assert_eq!(summary.failed, 0);
    }
}
