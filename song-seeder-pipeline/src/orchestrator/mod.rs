//! Orchestrator module for the song seeder pipeline.
//!
//! Verifies the backend, optionally creates the index, and hands the
//! generator to the bulk driver while tracking the run state.

mod state;

pub use state::RunState;

use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::driver::{BulkDriver, DriverReport};
use crate::errors::PipelineError;
use song_seeder_repository::SearchIndexProvider;
use song_seeder_shared::SongAction;

/// Configuration for the orchestrator.
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Target index, used when bootstrapping.
    pub index: String,
    /// Create the index with the song mapping if it is missing.
    pub create_index: bool,
}

/// Orchestrator that drives a single seeding run.
pub struct Orchestrator {
    provider: Arc<dyn SearchIndexProvider>,
    driver: BulkDriver,
    config: OrchestratorConfig,
    state: RunState,
}

impl Orchestrator {
    /// Create a new orchestrator in the `Idle` state.
    pub fn new(
        provider: Arc<dyn SearchIndexProvider>,
        driver: BulkDriver,
        config: OrchestratorConfig,
    ) -> Self {
        Self {
            provider,
            driver,
            config,
            state: RunState::Idle,
        }
    }

    /// The current run state.
    pub fn state(&self) -> RunState {
        self.state
    }

    fn transition(&mut self, next: RunState) -> Result<(), PipelineError> {
        if !self.state.can_transition_to(next) {
            return Err(PipelineError::InvalidTransition {
                from: self.state,
                to: next,
            });
        }
        info!(from = ?self.state, to = ?next, "Run state changed");
        self.state = next;
        Ok(())
    }

    /// Run the seeding pipeline to completion.
    ///
    /// Connectivity is checked before anything is generated or submitted. A
    /// run can only be started once.
    #[instrument(skip(self, actions), fields(index = %self.config.index))]
    pub async fn run<I>(&mut self, actions: I) -> Result<DriverReport, PipelineError>
    where
        I: Iterator<Item = SongAction> + Send + 'static,
    {
        self.transition(RunState::Connecting)?;

        match self.provider.health_check().await {
            Ok(true) => {}
            Ok(false) => {
                self.transition(RunState::ConnectFailed)?;
                error!("Search cluster is unhealthy");
                return Err(PipelineError::connectivity("Search cluster is unhealthy"));
            }
            Err(e) => {
                self.transition(RunState::ConnectFailed)?;
                error!(error = %e, "Search cluster is unreachable");
                return Err(PipelineError::connectivity(e.to_string()));
            }
        }

        self.transition(RunState::Connected)?;

        if self.config.create_index {
            if let Err(e) = self.provider.ensure_index_exists(&self.config.index).await {
                self.transition(RunState::Aborted)?;
                error!(error = %e, "Failed to prepare index");
                return Err(e.into());
            }
        }

        self.transition(RunState::Submitting)?;

        match self.driver.run(actions).await {
            Ok(report) => {
                self.transition(RunState::Done)?;
                info!(
                    succeeded = report.succeeded,
                    failed = report.failed,
                    batches = report.batches,
                    elapsed_secs = report.elapsed.as_secs_f64(),
                    docs_per_sec = report.docs_per_second(),
                    "Seeding complete"
                );
                Ok(report)
            }
            Err(e) => {
                self.transition(RunState::Aborted)?;
                error!(error = %e, "Seeding aborted");
                Err(e)
            }
        }
    }
}
