//! Configuration types for the OpenSearch client.

use std::time::Duration;

/// Largest bulk request the client accepts by default.
pub const DEFAULT_MAX_BATCH_SIZE: usize = 10_000;

/// Default per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Configuration for the OpenSearch client.
#[derive(Debug, Clone)]
pub struct SearchIndexConfig {
    /// Maximum number of documents allowed in a single bulk request.
    /// Set to None to disable the limit.
    pub max_batch_size: Option<usize>,
    /// Timeout applied to every request sent through the transport.
    pub request_timeout: Duration,
    /// Basic auth credentials as `(username, password)`.
    pub credentials: Option<(String, String)>,
}

impl Default for SearchIndexConfig {
    fn default() -> Self {
        Self {
            max_batch_size: Some(DEFAULT_MAX_BATCH_SIZE),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            credentials: None,
        }
    }
}

impl SearchIndexConfig {
    /// Create a config with no batch size limit (use with caution).
    pub fn unlimited() -> Self {
        Self {
            max_batch_size: None,
            ..Default::default()
        }
    }

    /// Set a custom batch size limit.
    pub fn with_max_batch_size(mut self, max_batch_size: usize) -> Self {
        self.max_batch_size = Some(max_batch_size);
        self
    }

    /// Set the request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Authenticate with basic auth.
    pub fn with_basic_auth(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.credentials = Some((username.into(), password.into()));
        self
    }
}
