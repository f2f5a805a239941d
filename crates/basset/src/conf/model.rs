//! Model — AnalyzerConfig and related enums.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_METHODS: &[&str] = &["GET"];
pub const DEFAULT_STATUS: &[&str] = &["200", "301"];
pub const DEFAULT_MAX_LOGS: usize = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Which reports to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Analysis {
    #[default]
    All,
    Methods,
    Status,
    Paths,
}

impl Analysis {
    pub fn includes(self, other: Analysis) -> bool {
        self == Analysis::All || self == other
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Approved HTTP methods.
    pub methods: Vec<String>,
    /// Approved HTTP status codes, compared as strings.
    pub status: Vec<String>,
    pub analysis: Analysis,
    /// Print raw lines instead of `ip - method - path` summaries.
    pub verbose: bool,
    /// Summaries shown per report before truncating (non-verbose only).
    pub max_logs: usize,
    pub format: OutputFormat,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            methods: DEFAULT_METHODS.iter().map(|s| s.to_string()).collect(),
            status: DEFAULT_STATUS.iter().map(|s| s.to_string()).collect(),
            analysis: Analysis::All,
            verbose: false,
            max_logs: DEFAULT_MAX_LOGS,
            format: OutputFormat::Text,
        }
    }
}

impl AnalyzerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.methods.is_empty() {
            return Err(ConfigError::Invalid("methods must not be empty".to_string()));
        }
        if self.status.is_empty() {
            return Err(ConfigError::Invalid("status must not be empty".to_string()));
        }
        if self.max_logs == 0 {
            return Err(ConfigError::Invalid("max_logs must be > 0".to_string()));
        }
        Ok(())
    }
}
