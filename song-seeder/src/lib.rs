//! # Song Seeder
//!
//! Main library for the song seeder.
//!
//! This crate provides the configuration, logging setup and the single
//! entry point that runs a seeding pass.

pub mod config;
pub mod logging;

pub use config::{parse_error_exit_code, Dependencies, LogFormat, SeederConfig};

use thiserror::Error;
use tracing::info;

use song_seeder_pipeline::DriverReport;

/// Errors that can occur during seeder initialization or execution.
#[derive(Error, Debug)]
pub enum SeederError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Pipeline error.
    #[error("Pipeline error: {0}")]
    PipelineError(#[from] song_seeder_pipeline::PipelineError),

    /// Search error.
    #[error("Search error: {0}")]
    SearchError(#[from] song_seeder_repository::SearchIndexError),
}

impl SeederError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}

/// Run one seeding pass with the given configuration.
///
/// Returns the driver's totals on completion, including runs where some
/// documents were rejected.
pub async fn run(config: &SeederConfig) -> Result<DriverReport, SeederError> {
    config.validate()?;

    info!(
        url = %config.url,
        index = %config.index,
        total = config.total,
        batch_size = config.batch_size,
        workers = config.workers,
        queue_size = config.queue_size,
        seeded = config.seed.is_some(),
        "Starting song seeder"
    );

    let Dependencies {
        mut orchestrator,
        generator,
    } = Dependencies::new(config)?;

    let report = orchestrator.run(generator).await?;

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use song_seeder_pipeline::PipelineError;

    #[tokio::test]
    async fn test_unreachable_endpoint_is_connectivity_error() {
        // Nothing listens on port 1.
        let config = SeederConfig::try_parse_args([
            "song-seeder",
            "--url",
            "http://127.0.0.1:1",
            "--total",
            "10",
            "--request-timeout-secs",
            "2",
        ])
        .unwrap();

        let result = run(&config).await;

        assert!(matches!(
            result,
            Err(SeederError::PipelineError(PipelineError::ConnectivityError(_)))
        ));
    }

    #[tokio::test]
    async fn test_invalid_config_rejected_before_connecting() {
        let config = SeederConfig::try_parse_args(["song-seeder", "--workers", "0"]).unwrap();

        let result = run(&config).await;

        assert!(matches!(result, Err(SeederError::ConfigError(_))));
    }

    #[tokio::test]
    async fn test_invalid_url_is_search_error() {
        let config =
            SeederConfig::try_parse_args(["song-seeder", "--url", "::not a url::"]).unwrap();

        let result = run(&config).await;

        assert!(matches!(result, Err(SeederError::SearchError(_))));
    }

    #[test]
    fn test_error_message_carries_cause_once() {
        let err = SeederError::from(PipelineError::connectivity("connection refused"));
        let message = err.to_string();

        assert_eq!(message, "Pipeline error: Connectivity error: connection refused");
        assert_eq!(message.matches("connection refused").count(), 1);
    }
}
