//! Conf module — configuration model and loading.

pub mod load;
pub mod model;

pub use load::DEFAULT_CONFIG_FILE;
pub use model::{AnalyzerConfig, Analysis, ConfigError, OutputFormat};
