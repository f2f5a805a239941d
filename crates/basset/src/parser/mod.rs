/// Access-log field extraction
///
/// Turns one raw combined-log-format line into typed fields:
///
/// `IP - - [TIMESTAMP] "METHOD PATH HTTP/VERSION" STATUS SIZE "REFERER" "USER-AGENT"`
///
/// # Architecture
///
/// - `extract.rs`: per-field extractors (ip, time, method, path, status, size)
/// - `agent.rs`: user-agent device classification
/// - `model.rs`: the aggregated `LogRecord`
///
/// Every extractor is total over `&str`: malformed lines never error, the
/// affected field is simply `None`. Fields are extracted independently.

pub mod agent;
pub mod extract;
pub mod model;

use std::sync::LazyLock;

use grep_matcher::{Captures, Matcher};
use grep_regex::{RegexMatcher, RegexMatcherBuilder};

pub use agent::extract_user_agent_class;
pub use extract::{
    extract_ip, extract_method, extract_path, extract_response_size, extract_status_code,
    extract_time,
};
pub use model::LogRecord;

/// HTTP methods recognised in the request line.
pub const HTTP_METHODS: &[&str] = &["GET", "POST", "PUT", "DELETE", "HEAD", "OPTIONS", "TRACE"];

/// Compile one of the fixed extraction patterns.
///
/// Patterns are compile-time constants, so a failure here is a programming error.
pub(crate) fn compile(pattern: &str) -> RegexMatcher {
    RegexMatcherBuilder::new()
        .multi_line(false)
        .build(pattern)
        .unwrap_or_else(|e| panic!("invalid built-in pattern {pattern:?}: {e}"))
}

/// Return capture group `group` of the first match of `matcher` in `text`.
pub(crate) fn first_capture<'a>(
    matcher: &LazyLock<RegexMatcher>,
    text: &'a str,
    group: usize,
) -> Option<&'a str> {
    let matcher: &RegexMatcher = matcher;
    let mut caps = matcher.new_captures().ok()?;
    if !matcher.captures(text.as_bytes(), &mut caps).ok()? {
        return None;
    }
    let m = caps.get(group)?;
    // Every pattern anchors its groups on ASCII bytes, so the bounds are char boundaries.
    text.get(m.start()..m.end())
}
