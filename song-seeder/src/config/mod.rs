//! Configuration and dependency wiring for the song seeder.

mod dependencies;
mod settings;

pub use dependencies::Dependencies;
pub use settings::{parse_error_exit_code, LogFormat, SeederConfig};
