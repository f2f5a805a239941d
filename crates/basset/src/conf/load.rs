//! Load — config loading from file and environment variables.

use std::fs;
use std::path::Path;

use super::model::{AnalyzerConfig, ConfigError};
use crate::filter::Policy;

/// Config file picked up from the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "basset.toml";

impl AnalyzerConfig {
    /// Load configuration from file and environment variables
    /// Priority: Environment Variables > Config File > Defaults
    ///
    /// An explicit `path` must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(p) => {
                tracing::info!("Loading configuration from: {}", p.display());
                Self::from_file(p)?
            }
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                tracing::info!("Loading configuration from: {}", DEFAULT_CONFIG_FILE);
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => {
                tracing::debug!("No config file, using defaults");
                Self::default()
            }
        };

        config.apply_env();
        Ok(config)
    }

    /// Load configuration from TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Override settings from `BASSET_*` variables resolved through `lookup`.
    /// Unparseable values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(methods) = lookup("BASSET_METHODS") {
            self.methods = Policy::parse_list(&methods);
        }
        if let Some(status) = lookup("BASSET_STATUS") {
            self.status = Policy::parse_list(&status);
        }
        if let Some(max) = lookup("BASSET_MAX_LOGS").and_then(|s| s.parse().ok()) {
            self.max_logs = max;
        }
        if let Some(verbose) = lookup("BASSET_VERBOSE").and_then(|s| s.parse().ok()) {
            self.verbose = verbose;
        }
    }
}
