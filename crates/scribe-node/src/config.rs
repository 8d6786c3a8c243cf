//! Configuration loading for the Scribe node.
//!
//! The configuration lives in `scribe-config.yaml` (or the path named by
//! `SCRIBE_CONFIG`). Every section is optional; a missing file means all
//! defaults.
//!
//! ```yaml
//! seed:
//!   users: 10
//!   posts: 50
//!   comments: 100
//!   published_ratio: 0.5
//!   rng_seed: 42
//! logging:
//!   level: info
//!   json: false
//! ```

use std::path::Path;

use scribe_seed::SeedConfig;
use serde::Deserialize;

/// Environment variable that overrides `seed.rng_seed`.
pub const RNG_SEED_ENV: &str = "SCRIBE_RNG_SEED";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        #[from]
        source: serde_yml::Error,
    },

    /// An environment override held a value that could not be parsed.
    #[error("invalid value for {var}: {value:?}")]
    InvalidEnv {
        /// The variable name.
        var: &'static str,
        /// The rejected value.
        value: String,
    },
}

/// Top-level node configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NodeConfig {
    /// Sample data generated at startup.
    #[serde(default)]
    pub seed: SeedConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl NodeConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// `SCRIBE_RNG_SEED` overrides `seed.rng_seed` when set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::InvalidEnv`] if the override is not a `u64`.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string, then apply environment
    /// overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::InvalidEnv`] if the override is not a `u64`.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yml::from_str(yaml)?
        };
        config.apply_env_overrides(std::env::var(RNG_SEED_ENV).ok())?;
        Ok(config)
    }

    /// Apply the `SCRIBE_RNG_SEED` override, given the variable's value.
    fn apply_env_overrides(&mut self, rng_seed: Option<String>) -> Result<(), ConfigError> {
        if let Some(value) = rng_seed {
            let parsed = value.trim().parse().map_err(|_parse_err| ConfigError::InvalidEnv {
                var: RNG_SEED_ENV,
                value: value.clone(),
            })?;
            self.seed.rng_seed = Some(parsed);
        }
        Ok(())
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit logs as JSON lines instead of human-readable text.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    String::from("info")
}
