use std::sync::LazyLock;

use grep_regex::RegexMatcher;

use super::{compile, first_capture};

// Final quoted field, running to a quote at end of line.
static USER_AGENT: LazyLock<RegexMatcher> = LazyLock::new(|| compile(r#"" "(.+)"$"#));

// First parenthesised comment, e.g. `(X11; Linux x86_64)`.
static COMMENT: LazyLock<RegexMatcher> =
    LazyLock::new(|| compile(r"\(([a-zA-Z0-9\s.:;\-/_]+)\)"));

/// Classify the client device from the trailing user-agent field.
///
/// Returns `None` only when the line has no trailing quoted field. Otherwise
/// the first matching rule wins:
///
/// | contains            | class       |
/// |---------------------|-------------|
/// | `Android`           | `Android`   |
/// | `iPhone` / `iPad`   | `iOS`       |
/// | `Windows`           | `Windows`   |
/// | `Mac`               | `Mac`       |
/// | exactly `-`         | `N/A`       |
/// | `(comment)`         | the comment |
/// | anything else       | `Unknown`   |
pub fn extract_user_agent_class(line: &str) -> Option<String> {
    let agent = first_capture(&USER_AGENT, line, 1)?;
    Some(classify_user_agent(agent))
}

/// Device class for a bare user-agent string.
pub fn classify_user_agent(agent: &str) -> String {
    let class = if agent.contains("Android") {
        "Android"
    } else if agent.contains("iPhone") || agent.contains("iPad") {
        "iOS"
    } else if agent.contains("Windows") {
        "Windows"
    } else if agent.contains("Mac") {
        "Mac"
    } else if agent == "-" {
        "N/A"
    } else {
        first_capture(&COMMENT, agent, 1).unwrap_or("Unknown")
    };
    class.to_string()
}
