//! Startup configuration.
//!
//! Every option can be given as a flag or an environment variable (a `.env`
//! file is loaded first). The defaults seed one million songs into
//! `music_id3` on a local node.

use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::SeederError;
use song_seeder_pipeline::{DriverConfig, GeneratorConfig, OrchestratorConfig};
use song_seeder_repository::{SearchIndexConfig, DEFAULT_MAX_BATCH_SIZE};
use song_seeder_shared::DEFAULT_INDEX;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines.
    Pretty,
    /// One JSON object per line.
    Json,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "song-seeder")]
#[command(about = "Generate synthetic songs and bulk-load them into a search index")]
#[command(long_about = None)]
pub struct SeederConfig {
    /// Search engine URL
    #[arg(long, env = "ELASTICSEARCH_URL", default_value = "http://localhost:9200")]
    pub url: String,

    /// Target index name
    #[arg(long, env = "SEED_INDEX", default_value = DEFAULT_INDEX)]
    pub index: String,

    /// Number of songs to generate
    #[arg(long, env = "SEED_TOTAL", default_value_t = 1_000_000)]
    pub total: usize,

    /// Documents per bulk request
    #[arg(long, env = "SEED_BATCH_SIZE", default_value_t = 5_000)]
    pub batch_size: usize,

    /// Number of concurrent bulk workers
    #[arg(long, env = "SEED_WORKERS", default_value_t = 4)]
    pub workers: usize,

    /// Batches prepared ahead of the workers
    #[arg(long, env = "SEED_QUEUE_SIZE", default_value_t = 8)]
    pub queue_size: usize,

    /// RNG seed for reproducible output
    #[arg(long, env = "SEED_RNG_SEED")]
    pub seed: Option<u64>,

    /// Fill the optional email field
    #[arg(long, env = "SEED_WITH_EMAIL")]
    pub with_email: bool,

    /// Create the index with the song mapping if it is missing
    #[arg(long, env = "SEED_CREATE_INDEX")]
    pub create_index: bool,

    /// Per-request timeout in seconds
    #[arg(long, env = "SEED_REQUEST_TIMEOUT_SECS", default_value_t = 60)]
    pub request_timeout_secs: u64,

    /// Basic auth username
    #[arg(long, env = "ELASTICSEARCH_USERNAME", requires = "password")]
    pub username: Option<String>,

    /// Basic auth password
    #[arg(long, env = "ELASTICSEARCH_PASSWORD", hide_env_values = true, requires = "username")]
    pub password: Option<String>,

    /// Log output format
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
}

impl SeederConfig {
    /// Check the values clap cannot check on its own.
    pub fn validate(&self) -> Result<(), SeederError> {
        if self.index.trim().is_empty() {
            return Err(SeederError::config("index must not be empty"));
        }
        if self.batch_size == 0 || self.batch_size > DEFAULT_MAX_BATCH_SIZE {
            return Err(SeederError::config(format!(
                "batch_size must be between 1 and {}",
                DEFAULT_MAX_BATCH_SIZE
            )));
        }
        if self.workers == 0 {
            return Err(SeederError::config("workers must be at least 1"));
        }
        if self.queue_size == 0 {
            return Err(SeederError::config("queue_size must be at least 1"));
        }
        if self.request_timeout_secs == 0 {
            return Err(SeederError::config("request_timeout_secs must be at least 1"));
        }
        Ok(())
    }

    pub fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig {
            index: self.index.clone(),
            total: self.total,
            seed: self.seed,
            include_email: self.with_email,
        }
    }

    pub fn driver_config(&self) -> DriverConfig {
        DriverConfig {
            workers: self.workers,
            batch_size: self.batch_size,
            queue_size: self.queue_size,
        }
    }

    pub fn orchestrator_config(&self) -> OrchestratorConfig {
        OrchestratorConfig {
            index: self.index.clone(),
            create_index: self.create_index,
        }
    }

    pub fn search_config(&self) -> SearchIndexConfig {
        let config = SearchIndexConfig::default()
            .with_request_timeout(Duration::from_secs(self.request_timeout_secs));
        match (&self.username, &self.password) {
            (Some(username), Some(password)) => config.with_basic_auth(username, password),
            _ => config,
        }
    }
}

/// Exit status for an argument error: 0 for `--help` and `--version`, 1 for
/// anything clap rejects.
pub fn parse_error_exit_code(err: &clap::Error) -> i32 {
    if err.use_stderr() {
        1
    } else {
        0
    }
}

#[cfg(test)]
impl SeederConfig {
    /// Parse `argv` with every environment fallback switched off.
    pub(crate) fn try_parse_args<I, T>(argv: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        use clap::{CommandFactory, FromArgMatches};

        let matches = Self::command()
            .mut_args(|arg| arg.env(None::<&'static str>))
            .try_get_matches_from(argv)?;
        Self::from_arg_matches(&matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> SeederConfig {
        let mut argv = vec!["song-seeder"];
        argv.extend_from_slice(args);
        SeederConfig::try_parse_args(argv).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = parse(&[]);

        assert_eq!(config.url, "http://localhost:9200");
        assert_eq!(config.index, "music_id3");
        assert_eq!(config.total, 1_000_000);
        assert_eq!(config.batch_size, 5_000);
        assert_eq!(config.workers, 4);
        assert_eq!(config.queue_size, 8);
        assert_eq!(config.seed, None);
        assert!(!config.with_email);
        assert!(!config.create_index);
        assert_eq!(config.request_timeout_secs, 60);
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_flags() {
        let config = parse(&[
            "--url",
            "https://search.internal:9200",
            "--index",
            "songs",
            "--total",
            "10",
            "--batch-size",
            "3",
            "--workers",
            "2",
            "--queue-size",
            "1",
            "--seed",
            "42",
            "--with-email",
            "--create-index",
            "--log-format",
            "json",
        ]);

        assert_eq!(config.url, "https://search.internal:9200");
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.log_format, LogFormat::Json);

        let generator = config.generator_config();
        assert_eq!(generator.index, "songs");
        assert_eq!(generator.total, 10);
        assert!(generator.include_email);

        let driver = config.driver_config();
        assert_eq!(driver.workers, 2);
        assert_eq!(driver.batch_size, 3);
        assert_eq!(driver.queue_size, 1);

        assert!(config.orchestrator_config().create_index);
    }

    #[test]
    fn test_credentials_require_each_other() {
        let mut argv = vec!["song-seeder", "--username", "elastic"];
        assert!(SeederConfig::try_parse_args(argv.clone()).is_err());

        argv.extend_from_slice(&["--password", "changeme"]);
        let config = SeederConfig::try_parse_args(argv.clone()).unwrap();
        assert_eq!(
            config.search_config().credentials,
            Some(("elastic".to_string(), "changeme".to_string()))
        );
    }

    #[test]
    fn test_unparseable_arguments_exit_with_one() {
        for argv in [
            vec!["song-seeder", "--workers", "abc"],
            vec!["song-seeder", "--total", "-5"],
            vec!["song-seeder", "--log-format", "xml"],
            vec!["song-seeder", "--bogus"],
        ] {
            let err = SeederConfig::try_parse_args(argv.clone()).unwrap_err();
            assert_eq!(parse_error_exit_code(&err), 1, "{:?}", argv);
        }
    }

    #[test]
    fn test_help_exits_with_zero() {
        let err = SeederConfig::try_parse_args(["song-seeder", "--help"]).unwrap_err();
        assert_eq!(parse_error_exit_code(&err), 0);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(parse(&["--batch-size", "0"]).validate().is_err());
        assert!(parse(&["--batch-size", "10001"]).validate().is_err());
        assert!(parse(&["--workers", "0"]).validate().is_err());
        assert!(parse(&["--queue-size", "0"]).validate().is_err());
        assert!(parse(&["--index", " "]).validate().is_err());
        assert!(parse(&["--request-timeout-secs", "0"]).validate().is_err());
    }

    #[test]
    fn test_search_config_timeout() {
        let config = parse(&["--request-timeout-secs", "5"]);
        assert_eq!(config.search_config().request_timeout, Duration::from_secs(5));
        assert!(config.search_config().credentials.is_none());
    }
}
