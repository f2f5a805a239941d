use std::sync::LazyLock;

use grep_matcher::Matcher;
use grep_regex::RegexMatcher;

use super::{compile, first_capture, HTTP_METHODS};

static IP: LazyLock<RegexMatcher> =
    LazyLock::new(|| compile(r"^(\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3})"));

static TIME: LazyLock<RegexMatcher> = LazyLock::new(|| compile(r"\[(.*?)\]"));

static METHOD: LazyLock<RegexMatcher> =
    LazyLock::new(|| compile(&format!("({}) /", HTTP_METHODS.join("|"))));

// Everything between `] "` and the last quote that precedes a status digit.
static REQUEST: LazyLock<RegexMatcher> = LazyLock::new(|| compile(r#"\] "(.+)" \d"#));

static PROTOCOL: LazyLock<RegexMatcher> = LazyLock::new(|| compile(r"^HTTP/\d+\.\d+$"));

static STATUS_AFTER_PROTOCOL: LazyLock<RegexMatcher> =
    LazyLock::new(|| compile(r#"(?:HTTP/1\.0|HTTP/1\.1|HTTP/2\.0)" ([0-9]+)"#));

static STATUS_AFTER_QUOTE: LazyLock<RegexMatcher> = LazyLock::new(|| compile(r#"" ([0-9]+)"#));

static SIZE_AFTER_PROTOCOL: LazyLock<RegexMatcher> =
    LazyLock::new(|| compile(r#"(?:HTTP/1\.0|HTTP/1\.1|HTTP/2\.0)" [0-9]+ ([0-9]+)"#));

static SIZE_AFTER_QUOTE: LazyLock<RegexMatcher> =
    LazyLock::new(|| compile(r#"" [0-9]+ ([0-9]+)"#));

/// Leading dotted quad. Octets are not range-checked.
pub fn extract_ip(line: &str) -> Option<&str> {
    first_capture(&IP, line, 1)
}

/// Content of the first `[...]` block, usually the request timestamp.
pub fn extract_time(line: &str) -> Option<&str> {
    first_capture(&TIME, line, 1)
}

/// First recognised method token that is followed by ` /`.
///
/// The search is not restricted to the request line, so a method-like token
/// earlier in the line wins.
pub fn extract_method(line: &str) -> Option<&str> {
    first_capture(&METHOD, line, 1)
}

/// Request target from the quoted request line, without method or protocol.
///
/// The request is anchored on the closing quote before the status code rather
/// than on the protocol token, so paths carrying quotes or unusual protocol
/// strings still resolve.
pub fn extract_path(line: &str) -> Option<String> {
    let request = first_capture(&REQUEST, line, 1)?;

    let upper = request.to_ascii_uppercase();
    let without_method = if HTTP_METHODS.iter().any(|m| upper.starts_with(m)) {
        request.split(' ').skip(1).collect::<Vec<_>>().join(" ")
    } else {
        request.to_string()
    };

    let mut tokens: Vec<&str> = without_method.split(' ').collect();
    if let Some(last) = tokens.last() {
        if PROTOCOL.is_match(last.as_bytes()).unwrap_or(false) {
            tokens.pop();
        }
    }

    Some(tokens.join(" ").trim().to_string())
}

/// Status code: digits after `HTTP/x.x" `, falling back to digits after any `" `.
pub fn extract_status_code(line: &str) -> Option<&str> {
    first_capture(&STATUS_AFTER_PROTOCOL, line, 1)
        .or_else(|| first_capture(&STATUS_AFTER_QUOTE, line, 1))
}

/// Response size: the digit run following the status code.
pub fn extract_response_size(line: &str) -> Option<&str> {
    first_capture(&SIZE_AFTER_PROTOCOL, line, 1)
        .or_else(|| first_capture(&SIZE_AFTER_QUOTE, line, 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMBINED: &str = r#"10.0.0.1 - - [01/Jan/2024:00:00:00 +0000] "GET /index.html HTTP/1.1" 200 512 "-" "Mozilla/5.0 (Windows NT 10.0)""#;

    #[test]
    fn test_extract_all_fields_from_combined_line() {
        assert_eq!(extract_ip(COMBINED), Some("10.0.0.1"));
        assert_eq!(extract_time(COMBINED), Some("01/Jan/2024:00:00:00 +0000"));
        assert_eq!(extract_method(COMBINED), Some("GET"));
        assert_eq!(extract_path(COMBINED).as_deref(), Some("/index.html"));
        assert_eq!(extract_status_code(COMBINED), Some("200"));
        assert_eq!(extract_response_size(COMBINED), Some("512"));
    }

    #[test]
    fn test_ip_must_lead_the_line() {
        assert_eq!(extract_ip("client 10.0.0.1 connected"), None);
        assert_eq!(extract_ip("::1 - - [x]"), None);
    }

    #[test]
    fn test_ip_octets_not_range_checked() {
        assert_eq!(extract_ip("999.300.1.2 - -"), Some("999.300.1.2"));
    }

    #[test]
    fn test_time_is_non_greedy() {
        assert_eq!(extract_time("a [first] b [second]"), Some("first"));
        assert_eq!(extract_time("no brackets here"), None);
        assert_eq!(extract_time("[]"), Some(""));
    }

    #[test]
    fn test_method_requires_space_slash() {
        assert_eq!(extract_method(r#""POST /api HTTP/1.1""#), Some("POST"));
        assert_eq!(extract_method(r#""PATCH /api HTTP/1.1""#), None);
        assert_eq!(extract_method(r#""GET index.html""#), None);
    }

    #[test]
    fn test_method_first_occurrence_wins() {
        let line = r#"1.2.3.4 - - [t] "DELETE /x HTTP/1.1" 200 1 "GET /ref" "ua""#;
        assert_eq!(extract_method(line), Some("DELETE"));
    }

    #[test]
    fn test_method_is_always_recognised_or_absent() {
        let lines = [
            COMBINED,
            "",
            "garbage",
            r#""OPTIONS * HTTP/1.1""#,
            r#"x "TRACE /a" y "HEAD /b""#,
        ];
        for line in lines {
            if let Some(m) = extract_method(line) {
                assert!(HTTP_METHODS.contains(&m), "unexpected method {m}");
            }
        }
    }

    #[test]
    fn test_path_strips_method_and_protocol() {
        let line = r#"1.2.3.4 - - [t] "POST /api/v1/data?x=1 HTTP/2.0" 201 10 "-" "ua""#;
        assert_eq!(extract_path(line).as_deref(), Some("/api/v1/data?x=1"));
    }

    #[test]
    fn test_path_without_method_or_protocol() {
        let line = r#"1.2.3.4 - - [t] "/bare/path" 400 0 "-" "-""#;
        assert_eq!(extract_path(line).as_deref(), Some("/bare/path"));
    }

    #[test]
    fn test_path_keeps_embedded_quotes() {
        let line = r#"1.2.3.4 - - [t] "GET /q?name="x" HTTP/1.1" 200 5 "-" "ua""#;
        assert_eq!(extract_path(line).as_deref(), Some(r#"/q?name="x""#));
    }

    #[test]
    fn test_path_with_atypical_protocol() {
        let line = r#"1.2.3.4 - - [t] "GET /legacy HTTP/0.9x" 200 5 "-" "ua""#;
        assert_eq!(extract_path(line).as_deref(), Some("/legacy HTTP/0.9x"));
    }

    #[test]
    fn test_path_method_match_is_case_insensitive() {
        let line = r#"1.2.3.4 - - [t] "get /lower HTTP/1.1" 200 5 "-" "ua""#;
        assert_eq!(extract_path(line).as_deref(), Some("/lower"));
    }

    #[test]
    fn test_path_absent_without_request_block() {
        assert_eq!(extract_path("1.2.3.4 - - no request here"), None);
        assert_eq!(extract_path(r#"[t] "GET /x HTTP/1.1" -"#), None);
    }

    #[test]
    fn test_path_blank_request() {
        let line = r#"1.2.3.4 - - [t] " " 400 0 "-" "-""#;
        assert_eq!(extract_path(line).as_deref(), Some(""));
    }

    #[test]
    fn test_status_falls_back_to_quote_anchor() {
        let line = r#"1.2.3.4 - - [t] "\x16\x03\x01" 400 157 "-" "-""#;
        assert_eq!(extract_status_code(line), Some("400"));
        assert_eq!(extract_response_size(line), Some("157"));
    }

    #[test]
    fn test_status_prefers_protocol_anchor() {
        let line = r#"1.2.3.4 - - [t] "GET /a?b=" 1" HTTP/1.1" 404 0 "-" "-""#;
        assert_eq!(extract_status_code(line), Some("404"));
        assert_eq!(extract_response_size(line), Some("0"));
    }

    #[test]
    fn test_size_absent_when_dash() {
        let line = r#"1.2.3.4 - - [t] "GET / HTTP/1.1" 304 - "-" "ua""#;
        assert_eq!(extract_status_code(line), Some("304"));
        assert_eq!(extract_response_size(line), None);
    }

    #[test]
    fn test_empty_line_yields_nothing() {
        assert_eq!(extract_ip(""), None);
        assert_eq!(extract_time(""), None);
        assert_eq!(extract_method(""), None);
        assert_eq!(extract_path(""), None);
        assert_eq!(extract_status_code(""), None);
        assert_eq!(extract_response_size(""), None);
    }
}
