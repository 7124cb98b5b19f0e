//! Locating the `git` and `gh` executables.

use crate::config::Config;
use crate::error::{ReleaseError, Result};
use std::path::PathBuf;

/// Resolved program paths for the publish phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    pub git: PathBuf,
    pub gh: PathBuf,
}

impl Toolchain {
    /// Bare program names, resolved by the OS at spawn time.
    ///
    /// Used under dry-run, where availability is not checked.
    pub fn unchecked() -> Self {
        Self {
            git: PathBuf::from("git"),
            gh: PathBuf::from("gh"),
        }
    }

    /// Verify both tools are installed.
    ///
    /// # Returns
    ///
    /// * `Err(ReleaseError::ToolUnavailable)` - `git` or `gh` could not be found
    pub fn locate(config: &Config) -> Result<Self> {
        Ok(Self {
            git: locate_git()?,
            gh: locate_gh(&config.gh_paths)?,
        })
    }
}

/// Find `git` on PATH.
pub fn locate_git() -> Result<PathBuf> {
    which::which("git").map_err(|_| ReleaseError::ToolUnavailable {
        tool: "git",
        hint: "git was not found on PATH. Install git and try again.".to_string(),
    })
}

/// Find `gh` on PATH, then in `extra` and the usual install locations.
pub fn locate_gh(extra: &[String]) -> Result<PathBuf> {
    if let Ok(path) = which::which("gh") {
        return Ok(path);
    }

    let mut candidates: Vec<PathBuf> = extra.iter().map(PathBuf::from).collect();
    candidates.extend(known_gh_locations());

    first_existing(&candidates).ok_or_else(|| ReleaseError::ToolUnavailable {
        tool: "gh",
        hint: format!(
            "GitHub CLI was not found on PATH or in: {}\n\
             Install it from https://cli.github.com/ or list its path under gh_paths in .repo/release.yaml.",
            candidates
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", ")
        ),
    })
}

/// First candidate that exists as a file.
pub fn first_existing(candidates: &[PathBuf]) -> Option<PathBuf> {
    candidates.iter().find(|p| p.is_file()).cloned()
}

#[cfg(windows)]
fn known_gh_locations() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    for var in ["ProgramFiles", "ProgramFiles(x86)"] {
        if let Some(dir) = std::env::var_os(var) {
            paths.push(PathBuf::from(dir).join("GitHub CLI").join("gh.exe"));
        }
    }
    if let Some(dir) = std::env::var_os("LOCALAPPDATA") {
        paths.push(
            PathBuf::from(dir)
                .join("Programs")
                .join("GitHub CLI")
                .join("gh.exe"),
        );
    }
    paths
}

#[cfg(not(windows))]
fn known_gh_locations() -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = [
        "/usr/local/bin/gh",
        "/opt/homebrew/bin/gh",
        "/home/linuxbrew/.linuxbrew/bin/gh",
        "/usr/bin/gh",
        "/snap/bin/gh",
    ]
    .iter()
    .map(PathBuf::from)
    .collect();
    if let Some(home) = std::env::var_os("HOME") {
        paths.push(PathBuf::from(home).join(".local").join("bin").join("gh"));
    }
    paths
}
