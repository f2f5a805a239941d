//! Run — one analysis pass from CLI arguments to rendered output.

use thiserror::Error;
use tracing::{debug, info};

use super::input::{read_lines, InputError};
use crate::cli::Cli;
use crate::conf::{AnalyzerConfig, ConfigError, OutputFormat};
use crate::report::{build_reports, render_json, render_text};

#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to encode report: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Resolve configuration, read the log and render every selected report.
///
/// Nothing is rendered unless the whole file was read.
pub fn run(cli: &Cli) -> Result<String, RunError> {
    let mut config = AnalyzerConfig::load(cli.config.as_deref())?;
    cli.apply_to(&mut config);
    config.validate()?;

    debug!("Config - Analysis: {:?}", config.analysis);
    debug!("Config - Approved status: {:?}", config.status);
    debug!("Config - Approved methods: {:?}", config.methods);
    debug!("Config - Verbose: {}", config.verbose);
    debug!("Config - Debug: {}", cli.debug);

    let lines = read_lines(&cli.file)?;
    info!(file = %cli.file.display(), lines = lines.len(), "Loaded access log");

    let reports = build_reports(&lines, &config);
    for report in &reports {
        info!(report = %report.title, matched = report.lines.len(), "Report built");
    }

    let output = match config.format {
        OutputFormat::Text => render_text(&reports, lines.len(), config.max_logs, config.verbose),
        OutputFormat::Json => render_json(&reports, lines.len(), config.verbose)?,
    };
    Ok(output)
}
