//! Error types for the song seeder pipeline.

use song_seeder_repository::SearchIndexError;
use thiserror::Error;

use crate::orchestrator::RunState;

/// Errors that can occur in the seeding pipeline.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The search engine could not be reached or reported itself unhealthy.
    #[error("Connectivity error: {0}")]
    ConnectivityError(String),

    /// A bulk request failed as a whole while submitting.
    #[error("Submission error: {0}")]
    SubmissionError(String),

    /// Invalid pipeline configuration.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// A pipeline task or channel failed unexpectedly.
    #[error("Channel error: {0}")]
    ChannelError(String),

    /// The run was driven through a transition its state does not allow.
    #[error("Invalid run state transition from {from:?} to {to:?}")]
    InvalidTransition { from: RunState, to: RunState },

    /// Error from the search backend.
    #[error("Search error: {0}")]
    SearchError(#[from] SearchIndexError),
}

impl PipelineError {
    /// Create a connectivity error.
    pub fn connectivity(msg: impl Into<String>) -> Self {
        Self::ConnectivityError(msg.into())
    }

    /// Create a submission error.
    pub fn submission(msg: impl Into<String>) -> Self {
        Self::SubmissionError(msg.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    /// Create a channel error.
    pub fn channel(msg: impl Into<String>) -> Self {
        Self::ChannelError(msg.into())
    }
}
