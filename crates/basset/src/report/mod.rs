//! Report — human-readable and JSON rendering of classification results.

use serde::Serialize;

use crate::conf::{AnalyzerConfig, Analysis};
use crate::filter::{filter_by_method, filter_by_status, find_suspicious_paths};
use crate::parser::LogRecord;

const SEPARATOR: &str = "==================";

/// One titled set of flagged lines, borrowed from the input batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report<'a> {
    pub title: String,
    pub description: String,
    pub lines: Vec<&'a str>,
}

impl<'a> Report<'a> {
    /// Lines whose method is not in `approved`.
    pub fn suspicious_methods<S: AsRef<str>>(lines: &'a [S], approved: &[String]) -> Self {
        Self {
            title: "Suspicious Methods".to_string(),
            description: format!("Logs with HTTP methods that are not {}", approved.join(",")),
            lines: filter_by_method(lines, approved, true),
        }
    }

    /// Lines whose status code is not in `approved`.
    pub fn suspicious_status<S: AsRef<str>>(lines: &'a [S], approved: &[String]) -> Self {
        Self {
            title: "Suspicious Status".to_string(),
            description: format!(
                "Logs with HTTP status codes that are not {}",
                approved.join(",")
            ),
            lines: filter_by_status(lines, approved, true),
        }
    }

    pub fn suspicious_paths<S: AsRef<str>>(lines: &'a [S]) -> Self {
        Self {
            title: "Suspicious Paths".to_string(),
            description: "Logs with suspicious paths".to_string(),
            lines: find_suspicious_paths(lines),
        }
    }

    /// Render as `Title/Description/Logs` text.
    ///
    /// Non-verbose output summarises each line and truncates after `max_logs`;
    /// verbose output prints every raw line followed by a total.
    pub fn render_text(&self, max_logs: usize, verbose: bool) -> String {
        let count = self.lines.len();

        let body = if count == 0 {
            "No logs found".to_string()
        } else {
            let mut entries: Vec<String> = if verbose {
                self.lines.iter().map(|l| l.to_string()).collect()
            } else {
                self.lines
                    .iter()
                    .take(max_logs)
                    .map(|l| LogRecord::from_line(l).summary())
                    .collect()
            };

            if verbose {
                entries.push(format!("\n\n(Total: {})", format_count(count)));
            } else if count > max_logs {
                entries.push(format!("... ({} more)", format_count(count - max_logs)));
            }

            format!("Logs:\n{}", entries.join("\n"))
        };

        format!(
            "Title: {}\nDescription: {}\n\n{}",
            self.title, self.description, body
        )
    }
}

/// Build the reports selected by `config.analysis`, in fixed order.
pub fn build_reports<'a, S: AsRef<str>>(lines: &'a [S], config: &AnalyzerConfig) -> Vec<Report<'a>> {
    let mut reports = Vec::new();

    if config.analysis.includes(Analysis::Methods) {
        reports.push(Report::suspicious_methods(lines, &config.methods));
    }
    if config.analysis.includes(Analysis::Status) {
        reports.push(Report::suspicious_status(lines, &config.status));
    }
    if config.analysis.includes(Analysis::Paths) {
        reports.push(Report::suspicious_paths(lines));
    }

    reports
}

/// Full stdout text for a run: separated reports then the input total.
pub fn render_text(reports: &[Report<'_>], total: usize, max_logs: usize, verbose: bool) -> String {
    let mut out = String::new();
    for report in reports {
        out.push('\n');
        out.push_str(SEPARATOR);
        out.push('\n');
        out.push_str(&report.render_text(max_logs, verbose));
        out.push('\n');
    }
    out.push_str(&format!("\n\nTotal logs: {}\n", format_count(total)));
    out
}

#[derive(Debug, Serialize)]
struct JsonReport<'r> {
    title: &'r str,
    description: &'r str,
    count: usize,
    records: Vec<LogRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    raw: Option<&'r [&'r str]>,
}

#[derive(Debug, Serialize)]
struct JsonOutput<'r> {
    total: usize,
    reports: Vec<JsonReport<'r>>,
}

/// JSON document with one entry per report. Verbose output also carries raw lines.
pub fn render_json(
    reports: &[Report<'_>],
    total: usize,
    verbose: bool,
) -> Result<String, serde_json::Error> {
    let output = JsonOutput {
        total,
        reports: reports
            .iter()
            .map(|r| JsonReport {
                title: &r.title,
                description: &r.description,
                count: r.lines.len(),
                records: r.lines.iter().map(|l| LogRecord::from_line(l)).collect(),
                raw: verbose.then_some(r.lines.as_slice()),
            })
            .collect(),
    };
    serde_json::to_string_pretty(&output)
}

/// Format a count with `,` thousands separators.
pub fn format_count(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
