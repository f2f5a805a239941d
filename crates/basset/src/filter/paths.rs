//! Paths — file-extension heuristic for suspicious request paths.
//!
//! A path is judged by the first filename-like token it contains
//! (`/name.ext`). Known page, media and bundler assets pass; everything
//! else with an extension is flagged.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use grep_regex::RegexMatcher;
use tracing::debug;

use crate::parser::{compile, extract_path, first_capture};

/// Static-asset extensions that are never flagged.
pub const SAFE_MEDIA_EXTENSIONS: &[&str] = &[
    ".jpg", ".jpeg", ".png", ".svg", ".webp", ".ico", ".gif", ".mp3", ".mp4", ".mov", ".avi",
    ".pdf", ".doc", ".docx", ".xls", ".xlsx", ".zip",
];

/// Path prefixes served by the Nuxt bundler.
pub const BUNDLER_PREFIXES: &[&str] = &["/_nuxt/", "/api/_nuxt/", "/api/_nuxt_icon"];

/// Extensions allowed under [`BUNDLER_PREFIXES`].
pub const BUNDLER_EXTENSIONS: &[&str] = &[".js", ".json", ".css"];

/// PHP scripts commonly probed by scanners.
pub const UNSAFE_PHP_FILES: &[&str] = &[
    "config.php",
    "db.php",
    "auth.php",
    "shell.php",
    "cmd.php",
    "backup.php",
    "connect.php",
    "index_backup.php",
    "main.php",
    "upload.php",
    "reset.php",
    "install.php",
];

// First `name.ext` token directly after a slash.
static FILE_TOKEN: LazyLock<RegexMatcher> = LazyLock::new(|| compile(r"/([\w\d]*\.[\w\d]*)"));

/// The rule that decided a path's classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PathVerdict {
    /// No path, or a blank one.
    MissingPath,
    /// No `name.ext` token to judge.
    NoFileToken,
    HtmlPage,
    SafeMedia,
    BundlerAsset,
    /// A `.php` script not on the unsafe list.
    OrdinaryPhp,
    /// Token contains a backslash.
    Backslash,
    /// Any other extension.
    UnrecognizedExtension,
}

impl PathVerdict {
    pub fn is_suspicious(self) -> bool {
        matches!(
            self,
            PathVerdict::MissingPath | PathVerdict::Backslash | PathVerdict::UnrecognizedExtension
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PathVerdict::MissingPath => "missing_path",
            PathVerdict::NoFileToken => "no_file_token",
            PathVerdict::HtmlPage => "html_page",
            PathVerdict::SafeMedia => "safe_media",
            PathVerdict::BundlerAsset => "bundler_asset",
            PathVerdict::OrdinaryPhp => "ordinary_php",
            PathVerdict::Backslash => "backslash",
            PathVerdict::UnrecognizedExtension => "unrecognized_extension",
        }
    }
}

/// Run the rule chain on a single path. The first matching rule wins.
pub fn classify_path(path: Option<&str>) -> PathVerdict {
    let path = match path {
        Some(p) if !p.trim().is_empty() => p,
        _ => return PathVerdict::MissingPath,
    };

    let token = match first_capture(&FILE_TOKEN, path, 1) {
        Some(t) => t.trim().to_lowercase(),
        None => return PathVerdict::NoFileToken,
    };

    if token.ends_with(".html") {
        return PathVerdict::HtmlPage;
    }

    if ends_with_any(&token, SAFE_MEDIA_EXTENSIONS) {
        return PathVerdict::SafeMedia;
    }

    if BUNDLER_PREFIXES.iter().any(|p| path.starts_with(p))
        && ends_with_any(&token, BUNDLER_EXTENSIONS)
    {
        return PathVerdict::BundlerAsset;
    }

    if token.ends_with(".php") && !UNSAFE_PHP_FILES.contains(&token.as_str()) {
        return PathVerdict::OrdinaryPhp;
    }

    // The token pattern admits no backslash today; kept so a wider pattern stays flagged.
    if token.contains('\\') {
        return PathVerdict::Backslash;
    }

    PathVerdict::UnrecognizedExtension
}

pub fn is_suspicious_path(path: Option<&str>) -> bool {
    classify_path(path).is_suspicious()
}

/// Lines whose request path is suspicious, in their original order.
pub fn find_suspicious_paths<S: AsRef<str>>(lines: &[S]) -> Vec<&str> {
    let mut verdicts: BTreeMap<PathVerdict, u64> = BTreeMap::new();

    let matched: Vec<&str> = lines
        .iter()
        .map(|line| line.as_ref())
        .filter(|line| {
            let verdict = classify_path(extract_path(line).as_deref());
            *verdicts.entry(verdict).or_default() += 1;
            verdict.is_suspicious()
        })
        .collect();

    debug!(
        scanned = lines.len(),
        matched = matched.len(),
        verdicts = ?verdicts
            .iter()
            .map(|(v, n)| (v.as_str(), *n))
            .collect::<Vec<_>>(),
        "path heuristic applied"
    );

    matched
}

fn ends_with_any(token: &str, suffixes: &[&str]) -> bool {
    suffixes.iter().any(|s| token.ends_with(s))
}
