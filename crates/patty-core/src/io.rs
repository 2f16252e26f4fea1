//! Filesystem helpers shared by the stores.

use std::io::Write;
use std::path::Path;

/// Mode requested for files that do not exist yet, before the umask.
#[cfg(unix)]
const NEW_FILE_MODE: u32 = 0o666;

/// Replace `path` with `contents` in one step.
///
/// The data is written to a temporary sibling and then renamed over the
/// target, so readers never observe a partially written file and a failed
/// write leaves the previous contents in place.
///
/// An existing target keeps its permissions. A new file gets the same mode
/// `fs::write` would give it, so the process umask applies.
///
/// # Errors
///
/// Returns an error if the temporary file cannot be created or written, or if
/// the final rename fails.
pub fn write_atomic(path: &Path, contents: &str) -> std::io::Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let existing = std::fs::metadata(path).ok().map(|m| m.permissions());

    let mut builder = tempfile::Builder::new();
    builder.prefix(".patty-").suffix(".tmp");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if existing.is_none() {
            builder.permissions(std::fs::Permissions::from_mode(NEW_FILE_MODE));
        }
    }

    let mut tmp = builder.tempfile_in(dir)?;
    tmp.write_all(contents.as_bytes())?;
    if let Some(permissions) = existing {
        tmp.as_file().set_permissions(permissions)?;
    }
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;

    Ok(())
}
