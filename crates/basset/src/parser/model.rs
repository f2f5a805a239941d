use std::fmt;

use serde::Serialize;

use super::{agent, extract};

/// Structured view of one access-log line.
///
/// Every field is extracted independently; a missing field never blocks the
/// others and no cross-field validation is done.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LogRecord {
    pub ip: Option<String>,
    pub time: Option<String>,
    pub method: Option<String>,
    pub path: Option<String>,
    pub status_code: Option<String>,
    pub response_size: Option<String>,
    pub user_agent: Option<String>,
}

impl LogRecord {
    pub fn from_line(line: &str) -> Self {
        Self {
            ip: extract::extract_ip(line).map(str::to_string),
            time: extract::extract_time(line).map(str::to_string),
            method: extract::extract_method(line).map(str::to_string),
            path: extract::extract_path(line),
            status_code: extract::extract_status_code(line).map(str::to_string),
            response_size: extract::extract_response_size(line).map(str::to_string),
            user_agent: agent::extract_user_agent_class(line),
        }
    }

    /// One-line `ip - method - path` summary used by the text report.
    pub fn summary(&self) -> String {
        format!(
            "{} - {} - {}",
            or_none(&self.ip),
            or_none(&self.method),
            or_none(&self.path)
        )
    }
}

fn or_none(field: &Option<String>) -> &str {
    field.as_deref().unwrap_or("None")
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}
