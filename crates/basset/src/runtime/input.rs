//! Input — reading the access log into raw lines.

use std::fs;
use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("File {0} does not exist")]
    NotFound(String),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Read `path` into lines without their `\n` / `\r\n` terminators.
///
/// Invalid UTF-8 is replaced rather than rejected; malformed lines are left
/// for the extractors to degrade on.
pub fn read_lines(path: &Path) -> Result<Vec<String>, InputError> {
    if !path.exists() {
        return Err(InputError::NotFound(path.display().to_string()));
    }

    let bytes = fs::read(path).map_err(|source| InputError::Io {
        path: path.display().to_string(),
        source,
    })?;

    Ok(String::from_utf8_lossy(&bytes)
        .lines()
        .map(str::to_string)
        .collect())
}
