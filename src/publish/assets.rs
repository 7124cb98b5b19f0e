//! Release asset discovery and staging.

use crate::error::{ReleaseError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Files directly inside `dir` whose name ends with `extension`.
///
/// The match is case-insensitive and results are sorted by path. A missing
/// directory yields no assets.
pub fn collect_assets(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let wanted = extension.to_lowercase();
    let entries = fs::read_dir(dir)
        .map_err(|e| ReleaseError::io(format!("failed to list '{}'", dir.display()), e))?;

    let mut assets = Vec::new();
    for entry in entries {
        let entry =
            entry.map_err(|e| ReleaseError::io(format!("failed to list '{}'", dir.display()), e))?;
        let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
        let matches = entry
            .file_name()
            .to_string_lossy()
            .to_lowercase()
            .ends_with(&wanted);
        if is_file && matches {
            assets.push(entry.path());
        }
    }

    assets.sort();
    Ok(assets)
}

/// Stable download name for a single asset: `{slug}{original extension}`.
pub fn renamed_asset_name(asset: &Path, slug: &str) -> String {
    let extension = asset
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    format!("{}{}", slug, extension)
}

/// Copy `asset` into a fresh temp dir as [`renamed_asset_name`].
///
/// The returned `TempDir` must outlive the upload.
pub fn stage_renamed(asset: &Path, slug: &str) -> Result<(TempDir, PathBuf)> {
    let staging = TempDir::new()
        .map_err(|e| ReleaseError::io("failed to create asset staging directory", e))?;
    let target = staging.path().join(renamed_asset_name(asset, slug));

    fs::copy(asset, &target).map_err(|e| {
        ReleaseError::io(
            format!(
                "failed to copy '{}' to '{}'",
                asset.display(),
                target.display()
            ),
            e,
        )
    })?;

    Ok((staging, target))
}
