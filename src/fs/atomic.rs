//! Atomic file writes.
//!
//! All writes follow this pattern:
//! 1. Write content to a temporary file in the same directory
//! 2. Sync the file to disk
//! 3. Rename it over the target
//!
//! The temporary file lives next to the target so the rename never crosses
//! filesystems. On failure the temporary file is removed by `tempfile`.

use crate::error::{ReleaseError, Result};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Atomically write bytes to a file, creating parent directories as needed.
///
/// Any existing file at `path` is replaced.
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &[u8]) -> Result<()> {
    let path = path.as_ref();

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    fs::create_dir_all(parent).map_err(|e| {
        ReleaseError::io(
            format!("failed to create directory '{}'", parent.display()),
            e,
        )
    })?;

    let mut temp = NamedTempFile::new_in(parent).map_err(|e| {
        ReleaseError::io(
            format!("failed to create temp file in '{}'", parent.display()),
            e,
        )
    })?;

    temp.write_all(content)
        .and_then(|()| temp.as_file().sync_all())
        .map_err(|e| {
            ReleaseError::io(
                format!("failed to write temp file for '{}'", path.display()),
                e,
            )
        })?;

    temp.persist(path).map_err(|e| {
        ReleaseError::io(format!("failed to replace '{}'", path.display()), e.error)
    })?;

    Ok(())
}
