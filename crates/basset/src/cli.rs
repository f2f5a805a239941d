//! CLI argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::conf::{AnalyzerConfig, Analysis, OutputFormat};
use crate::filter::Policy;

/// Basset - flag suspicious requests in Nginx/Apache access logs.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "basset")]
#[command(version, about = "Analyze your Nginx logs", long_about = None)]
pub struct Cli {
    /// Path to the log file.
    #[arg(short = 'f', long)]
    pub file: PathBuf,

    /// The type of analysis to perform (defaults to 'all').
    #[arg(short = 'a', long, value_enum)]
    pub analysis: Option<Analysis>,

    /// Normal HTTP status codes, comma-separated (default: 200,301).
    #[arg(short = 's', long)]
    pub status: Option<String>,

    /// Normal HTTP methods, comma-separated (default: GET).
    #[arg(short = 'm', long)]
    pub methods: Option<String>,

    /// Show extensive reports.
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Show debug logs.
    #[arg(short = 'd', long)]
    pub debug: bool,

    /// Output format.
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Entries shown per report before truncating.
    #[arg(long)]
    pub max_logs: Option<usize>,

    /// TOML config file.
    #[arg(short = 'c', long, env = "BASSET_CONFIG_FILE")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Apply flags given on the command line on top of `config`.
    pub fn apply_to(&self, config: &mut AnalyzerConfig) {
        if let Some(analysis) = self.analysis {
            config.analysis = analysis;
        }
        if let Some(status) = &self.status {
            config.status = Policy::parse_list(status);
        }
        if let Some(methods) = &self.methods {
            config.methods = Policy::parse_list(methods);
        }
        if self.verbose {
            config.verbose = true;
        }
        if let Some(format) = self.format {
            config.format = format;
        }
        if let Some(max_logs) = self.max_logs {
            config.max_logs = max_logs;
        }
    }
}
