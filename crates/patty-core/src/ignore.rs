//! Idempotent ignore-file entries.

use std::io::Write;
use std::path::Path;

/// Append `line` to the ignore file at `path` unless an identical line is
/// already present. Creates the file if needed.
///
/// Returns `true` if the line was appended.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read, or cannot be
/// opened for appending.
pub fn ensure_line(path: &Path, line: &str) -> std::io::Result<bool> {
    let existing = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(e) => return Err(e),
    };

    if existing.lines().any(|l| l.trim() == line) {
        return Ok(false);
    }

    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;

    if !existing.is_empty() && !existing.ends_with('\n') {
        writeln!(file)?;
    }
    writeln!(file, "{line}")?;

    Ok(true)
}
