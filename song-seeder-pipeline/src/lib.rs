//! # Song Seeder Pipeline
//!
//! This crate provides the components that turn a document count into
//! indexed songs.
//!
//! ## Architecture
//!
//! 1. **Generator**: Produces synthetic song actions lazily
//! 2. **Driver**: Cuts actions into batches and fans them out to a pool of
//!    bulk-submitting workers through a bounded queue
//! 3. **Orchestrator**: Verifies connectivity, optionally bootstraps the
//!    index, runs the driver and tracks the run state

pub mod driver;
pub mod errors;
pub mod generator;
pub mod orchestrator;

pub use driver::{BulkDriver, DriverConfig, DriverReport};
pub use errors::PipelineError;
pub use generator::{GeneratorConfig, SongGenerator};
pub use orchestrator::{Orchestrator, OrchestratorConfig, RunState};
