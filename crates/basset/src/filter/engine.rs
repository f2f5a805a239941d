use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

use crate::parser::{extract_method, extract_status_code};

/// Whether a filter keeps approved lines or their complement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    /// Keep lines whose value is approved.
    Include,
    /// Keep lines whose value is not approved (inverse filtering).
    Exclude,
}

impl FilterMode {
    pub fn from_inverse(inverse: bool) -> Self {
        if inverse {
            FilterMode::Exclude
        } else {
            FilterMode::Include
        }
    }
}

/// The line field a policy is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyField {
    Method,
    Status,
}

impl PolicyField {
    fn extract(self, line: &str) -> Option<&str> {
        match self {
            PolicyField::Method => extract_method(line),
            PolicyField::Status => extract_status_code(line),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyField::Method => "method",
            PolicyField::Status => "status",
        }
    }
}

/// Approved values plus the inverse flag.
///
/// Order and duplicates are kept as given; membership is exact string equality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Policy {
    pub approved: Vec<String>,
    pub inverse: bool,
}

impl Policy {
    pub fn new<I, S>(approved: I, inverse: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            approved: approved.into_iter().map(Into::into).collect(),
            inverse,
        }
    }

    /// Split a comma-separated list such as `200,301`. Blank entries are dropped.
    pub fn parse_list(list: &str) -> Vec<String> {
        list.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// An absent value is never approved.
    pub fn is_approved(&self, value: Option<&str>) -> bool {
        value.is_some_and(|v| self.approved.iter().any(|a| a == v))
    }

    pub fn mode(&self) -> FilterMode {
        FilterMode::from_inverse(self.inverse)
    }
}

#[derive(Debug, Default)]
pub struct FilterStats {
    pub lines_scanned: AtomicU64,
    pub lines_matched: AtomicU64,
}

/// Applies a [`Policy`] to one extracted field of each line.
pub struct PolicyFilter {
    policy: Policy,
    field: PolicyField,
    stats: FilterStats,
}

impl PolicyFilter {
    pub fn new(policy: Policy, field: PolicyField) -> Self {
        Self {
            policy,
            field,
            stats: FilterStats::default(),
        }
    }

    #[inline]
    pub fn should_include(&self, line: &str) -> bool {
        self.stats.lines_scanned.fetch_add(1, Ordering::Relaxed);

        let approved = self.policy.is_approved(self.field.extract(line));

        let include = match self.policy.mode() {
            FilterMode::Include => approved,
            FilterMode::Exclude => !approved,
        };

        if include {
            self.stats.lines_matched.fetch_add(1, Ordering::Relaxed);
        }

        include
    }

    /// Matching lines in their original order.
    pub fn apply<'a, S: AsRef<str>>(&self, lines: &'a [S]) -> Vec<&'a str> {
        let matched: Vec<&str> = lines
            .iter()
            .map(|line| line.as_ref())
            .filter(|line| self.should_include(line))
            .collect();

        let (scanned, total_matched) = self.stats();
        debug!(
            field = self.field.as_str(),
            mode = ?self.policy.mode(),
            scanned,
            matched = total_matched,
            "policy filter applied"
        );

        matched
    }

    pub fn stats(&self) -> (u64, u64) {
        (
            self.stats.lines_scanned.load(Ordering::Relaxed),
            self.stats.lines_matched.load(Ordering::Relaxed),
        )
    }
}

/// Lines whose method membership in `approved_methods` equals `!inverse`.
pub fn filter_by_method<'a, S, A>(lines: &'a [S], approved_methods: &[A], inverse: bool) -> Vec<&'a str>
where
    S: AsRef<str>,
    A: AsRef<str>,
{
    let policy = Policy::new(approved_methods.iter().map(|m| m.as_ref()), inverse);
    PolicyFilter::new(policy, PolicyField::Method).apply(lines)
}

/// Lines whose status membership in `approved_codes` equals `!inverse`.
pub fn filter_by_status<'a, S, A>(lines: &'a [S], approved_codes: &[A], inverse: bool) -> Vec<&'a str>
where
    S: AsRef<str>,
    A: AsRef<str>,
{
    let policy = Policy::new(approved_codes.iter().map(|c| c.as_ref()), inverse);
    PolicyFilter::new(policy, PolicyField::Status).apply(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(method: &str, status: &str) -> String {
        format!(r#"10.0.0.1 - - [01/Jan/2024:00:00:00 +0000] "{method} /x HTTP/1.1" {status} 10 "-" "curl/8""#)
    }

    fn sample() -> Vec<String> {
        vec![
            line("GET", "200"),
            line("POST", "404"),
            "garbage without fields".to_string(),
            line("GET", "301"),
            line("DELETE", "500"),
        ]
    }

    #[test]
    fn test_include_mode_keeps_approved() {
        let lines = sample();
        let out = filter_by_method(&lines, &["GET"], false);
        assert_eq!(out, vec![lines[0].as_str(), lines[3].as_str()]);
    }

    #[test]
    fn test_exclude_mode_keeps_unapproved_and_absent() {
        let lines = sample();
        let out = filter_by_method(&lines, &["GET"], true);
        assert_eq!(
            out,
            vec![lines[1].as_str(), lines[2].as_str(), lines[4].as_str()]
        );
    }

    #[test]
    fn test_method_partition_is_disjoint_and_complete() {
        let lines = sample();
        let approved = ["GET", "POST"];
        let kept = filter_by_method(&lines, &approved, false);
        let rejected = filter_by_method(&lines, &approved, true);
        assert_eq!(kept.len() + rejected.len(), lines.len());
        assert!(kept.iter().all(|l| !rejected.contains(l)));
    }

    #[test]
    fn test_filters_are_idempotent() {
        let lines = sample();
        let once = filter_by_status(&lines, &["200", "301"], true);
        let twice = filter_by_status(&once, &["200", "301"], true);
        assert_eq!(once, twice);

        let once = filter_by_method(&lines, &["GET"], false);
        let twice = filter_by_method(&once, &["GET"], false);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        let lines: Vec<String> = Vec::new();
        assert!(filter_by_method(&lines, &["GET"], true).is_empty());
        assert!(filter_by_status(&lines, &["200"], false).is_empty());
    }

    #[test]
    fn test_unapproved_status_included_under_inverse() {
        let lines = vec![line("GET", "404")];
        let out = filter_by_status(&lines, &["200", "301"], true);
        assert_eq!(out, vec![lines[0].as_str()]);
    }

    #[test]
    fn test_status_match_is_exact_string() {
        let lines = vec![line("GET", "2000")];
        assert!(filter_by_status(&lines, &["200"], false).is_empty());
    }

    #[test]
    fn test_duplicate_input_lines_preserved() {
        let lines = vec![line("PUT", "200"), line("PUT", "200")];
        assert_eq!(filter_by_method(&lines, &["GET"], true).len(), 2);
    }

    #[test]
    fn test_duplicate_approved_values_tolerated() {
        let lines = sample();
        let out = filter_by_method(&lines, &["GET", "GET"], false);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_stats_tracking() {
        let lines = sample();
        let filter = PolicyFilter::new(Policy::new(["GET"], true), PolicyField::Method);
        filter.apply(&lines);
        assert_eq!(filter.stats(), (5, 3));
    }

    #[test]
    fn test_policy_parse_list() {
        assert_eq!(Policy::parse_list("200,301"), vec!["200", "301"]);
        assert_eq!(Policy::parse_list(" GET , POST ,,"), vec!["GET", "POST"]);
        assert!(Policy::parse_list("").is_empty());
    }

    #[test]
    fn test_absent_value_never_approved() {
        let policy = Policy::new(["GET"], false);
        assert!(!policy.is_approved(None));
        assert!(policy.is_approved(Some("GET")));
    }
}
