//! Repository context resolution for relnotes.
//!
//! Finds the repository root from any working directory and resolves the
//! `.repo/` layout paths relative to it. All commands resolve paths through
//! this module so they behave the same from any subdirectory.

use crate::config::Config;
use crate::error::{ReleaseError, Result};
use crate::git;
use crate::naming::ReleaseNames;
use std::env;
use std::path::{Path, PathBuf};

/// Settings file path relative to the repo root.
pub const CONFIG_FILE: &str = ".repo/release.yaml";

/// Resolved paths for a relnotes invocation.
#[derive(Debug, Clone)]
pub struct RepoContext {
    /// Absolute path to the repository root.
    pub repo_root: PathBuf,

    /// Directory the command was invoked from.
    pub cwd: PathBuf,
}

impl RepoContext {
    /// Resolve the context from the current working directory.
    pub fn resolve() -> Result<Self> {
        let cwd = env::current_dir()
            .map_err(|e| ReleaseError::io("failed to get current working directory", e))?;

        Ok(Self::resolve_from(&cwd))
    }

    /// Resolve the context from a specific directory.
    ///
    /// Outside a git repository (or without git installed) the directory
    /// itself is used as the root so notes can still be rendered.
    pub fn resolve_from<P: AsRef<Path>>(cwd: P) -> Self {
        let cwd = cwd.as_ref().to_path_buf();

        let repo_root = match git::get_repo_root(&cwd) {
            Ok(root) => root,
            Err(e) => {
                log::warn!(
                    "could not determine repository root ({}); using {}",
                    e,
                    cwd.display()
                );
                cwd.clone()
            }
        };

        Self { repo_root, cwd }
    }

    pub fn config_path(&self) -> PathBuf {
        self.repo_root.join(CONFIG_FILE)
    }

    /// Path of a repo-relative setting such as `config.manifest`.
    pub fn repo_path(&self, relative: &str) -> PathBuf {
        self.repo_root.join(relative)
    }

    /// Path given on the command line, relative to the invocation directory.
    pub fn user_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        }
    }

    /// Default notes location: `{releases_dir}/{slug}/{tag}.md`.
    pub fn notes_path(&self, config: &Config, names: &ReleaseNames) -> PathBuf {
        self.repo_path(&config.releases_dir)
            .join(&names.slug)
            .join(names.notes_file_name())
    }

    /// Directory holding a project's built assets: `{repo_root}/{slug}`.
    pub fn assets_dir(&self, names: &ReleaseNames) -> PathBuf {
        self.repo_root.join(&names.slug)
    }
}
