//! Dependency initialization and wiring for the song seeder.

use std::sync::Arc;
use tracing::info;

use crate::config::SeederConfig;
use crate::SeederError;
use song_seeder_pipeline::{BulkDriver, Orchestrator, SongGenerator};
use song_seeder_repository::{OpenSearchClient, SearchIndexProvider};

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The configured orchestrator ready to run.
    pub orchestrator: Orchestrator,
    /// The document source handed to the orchestrator.
    pub generator: SongGenerator,
}

impl Dependencies {
    /// Build the search client, generator, driver and orchestrator.
    ///
    /// No network request is made here; connectivity is verified when the
    /// orchestrator runs.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(SeederError)` - If the URL or pipeline settings are invalid
    pub fn new(config: &SeederConfig) -> Result<Self, SeederError> {
        let client = OpenSearchClient::new(&config.url, config.search_config())?;
        let provider: Arc<dyn SearchIndexProvider> = Arc::new(client);

        let driver = BulkDriver::new(Arc::clone(&provider), config.driver_config())?;
        let orchestrator = Orchestrator::new(provider, driver, config.orchestrator_config());
        let generator = SongGenerator::new(config.generator_config());

        info!(url = %config.url, "Dependencies initialized");

        Ok(Self {
            orchestrator,
            generator,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use song_seeder_pipeline::RunState;

    #[test]
    fn test_wires_configured_components() {
        let config =
            SeederConfig::try_parse_args(["song-seeder", "--total", "12", "--seed", "1"]).unwrap();

        let deps = Dependencies::new(&config).unwrap();

        assert_eq!(deps.generator.len(), 12);
        assert_eq!(deps.orchestrator.state(), RunState::Idle);
    }
}
