//! OpenSearch client implementation.
//!
//! This module provides the concrete implementation of `SearchIndexProvider`
//! using the OpenSearch Rust client.

use async_trait::async_trait;
use opensearch::{
    auth::Credentials,
    cluster::ClusterHealthParts,
    http::request::JsonBody,
    http::transport::{SingleNodeConnectionPool, TransportBuilder},
    indices::{IndicesCreateParts, IndicesExistsParts},
    BulkParts, OpenSearch,
};
use serde_json::Value;
use tracing::{debug, error, info, instrument};
use url::Url;

use crate::config::SearchIndexConfig;
use crate::errors::SearchIndexError;
use crate::interfaces::SearchIndexProvider;
use crate::opensearch::bulk::{bulk_lines, parse_bulk_response};
use crate::opensearch::index_config::get_index_settings;
use crate::types::BatchOperationSummary;
use song_seeder_shared::SongAction;

/// OpenSearch client implementation.
///
/// Holds a single-node transport that is shared by every worker of the bulk
/// driver. Requests are stateless, so no locking is needed.
///
/// # Example
///
/// ```ignore
/// use song_seeder_repository::{OpenSearchClient, SearchIndexConfig, SearchIndexProvider};
///
/// let client = OpenSearchClient::new("http://localhost:9200", SearchIndexConfig::default())?;
/// if client.health_check().await? {
///     let summary = client.bulk_index_documents(&actions).await?;
///     println!("{} accepted", summary.succeeded);
/// }
/// ```
pub struct OpenSearchClient {
    client: OpenSearch,
    config: SearchIndexConfig,
}

impl OpenSearchClient {
    /// Create a new OpenSearch client for the specified URL.
    ///
    /// No request is sent here; use `health_check` to verify the cluster is
    /// reachable.
    ///
    /// # Arguments
    ///
    /// * `url` - The server URL (e.g., "http://localhost:9200")
    /// * `config` - Timeout, credentials and batch size limit
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchClient)` - A new client instance
    /// * `Err(SearchIndexError)` - If the URL is invalid or the transport cannot be built
    pub fn new(url: &str, config: SearchIndexConfig) -> Result<Self, SearchIndexError> {
        let parsed_url = Url::parse(url)
            .map_err(|e| SearchIndexError::connection(format!("Invalid URL {}: {}", url, e)))?;
        if !matches!(parsed_url.scheme(), "http" | "https") || parsed_url.host().is_none() {
            return Err(SearchIndexError::validation(format!(
                "URL {} must be http(s) with a host",
                url
            )));
        }

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let mut builder = TransportBuilder::new(conn_pool)
            .disable_proxy()
            .timeout(config.request_timeout);
        if let Some((username, password)) = &config.credentials {
            builder = builder.auth(Credentials::Basic(username.clone(), password.clone()));
        }
        let transport = builder
            .build()
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let client = OpenSearch::new(transport);

        info!(
            url = %url,
            timeout_secs = config.request_timeout.as_secs(),
            authenticated = config.credentials.is_some(),
            "Created OpenSearch client"
        );

        Ok(Self { client, config })
    }

    /// Check if batch size exceeds the configured limit.
    fn validate_batch_size(&self, size: usize) -> Result<(), SearchIndexError> {
        if let Some(max) = self.config.max_batch_size {
            if size > max {
                return Err(SearchIndexError::batch_size_exceeded(size, max));
            }
        }
        Ok(())
    }
}

/// Interpret the status of an index `HEAD` request. Only 404 means absent.
fn index_present(status: u16) -> Result<bool, SearchIndexError> {
    match status {
        200..=299 => Ok(true),
        404 => Ok(false),
        other => Err(SearchIndexError::connection(format!(
            "Index existence check failed with status {}",
            other
        ))),
    }
}

#[async_trait]
impl SearchIndexProvider for OpenSearchClient {
    /// Query cluster health. `green` and `yellow` count as healthy.
    #[instrument(skip(self))]
    async fn health_check(&self) -> Result<bool, SearchIndexError> {
        let response = self
            .client
            .cluster()
            .health(ClusterHealthParts::None)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Health check request failed");
                SearchIndexError::connection(e.to_string())
            })?;

        let status_code = response.status_code();
        if !status_code.is_success() {
            error!(status = %status_code, "Health check returned an error status");
            return Ok(false);
        }

        let health: Value = response
            .json()
            .await
            .map_err(|e| SearchIndexError::parse(e.to_string()))?;
        let status = health
            .get("status")
            .and_then(|s| s.as_str())
            .unwrap_or("unknown");

        info!(cluster_status = %status, "Cluster health");

        Ok(status == "green" || status == "yellow")
    }

    #[instrument(skip(self))]
    async fn ensure_index_exists(&self, index: &str) -> Result<(), SearchIndexError> {
        let exists = self
            .client
            .indices()
            .exists(IndicesExistsParts::Index(&[index]))
            .send()
            .await
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        if index_present(exists.status_code().as_u16())? {
            debug!(index = %index, "Index already exists");
            return Ok(());
        }

        let response = self
            .client
            .indices()
            .create(IndicesCreateParts::Index(index))
            .body(get_index_settings())
            .send()
            .await
            .map_err(|e| SearchIndexError::index_creation(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            // Another writer created it between the two calls.
            if error_body.contains("resource_already_exists_exception") {
                debug!(index = %index, "Index created concurrently");
                return Ok(());
            }
            error!(status = %status, body = %error_body, "Index creation failed");
            return Err(SearchIndexError::index_creation(format!(
                "Create index failed with status {}: {}",
                status, error_body
            )));
        }

        info!(index = %index, "Created index");
        Ok(())
    }

    /// Submit the batch as one `_bulk` request.
    ///
    /// Each action names its own target index, so the request is sent to the
    /// root bulk endpoint.
    #[instrument(skip(self, actions), fields(count = actions.len()))]
    async fn bulk_index_documents(
        &self,
        actions: &[SongAction],
    ) -> Result<BatchOperationSummary, SearchIndexError> {
        if actions.is_empty() {
            return Ok(BatchOperationSummary::default());
        }

        self.validate_batch_size(actions.len())?;

        let body: Vec<JsonBody<Value>> = bulk_lines(actions)?
            .into_iter()
            .map(JsonBody::from)
            .collect();

        let response = self
            .client
            .bulk(BulkParts::None)
            .body(body)
            .send()
            .await
            .map_err(|e| SearchIndexError::bulk_operation(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Bulk request failed");
            return Err(SearchIndexError::bulk_operation(format!(
                "Bulk request failed with status {}: {}",
                status, error_body
            )));
        }

        let response_body: Value = response
            .json()
            .await
            .map_err(|e| SearchIndexError::parse(e.to_string()))?;

        let summary = parse_bulk_response(actions, &response_body)?;

        debug!(
            succeeded = summary.succeeded,
            failed = summary.failed,
            "Bulk request completed"
        );

        Ok(summary)
    }
}
