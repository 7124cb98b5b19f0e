//! GitHub release probing, creation, and asset upload via `gh`.

use super::Publisher;
use crate::error::Result;
use crate::exec::{Probe, execution_error};
use std::path::{Path, PathBuf};

/// Whether a release was created or updated in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseAction {
    Created,
    Edited,
}

impl Publisher<'_> {
    /// Check whether a release exists for `tag`.
    ///
    /// Only gh's "release not found" answer counts as absent; auth or network
    /// failures come back as `Probe::Error`.
    pub fn release_exists(&self, tag: &str) -> Probe {
        let inv = self.gh().args(["release", "view"]).arg(tag);

        match self.exec.execute(&inv) {
            Ok(output) if output.simulated => Probe::NotFound,
            Ok(output) if output.success() => Probe::Found(tag.to_string()),
            Ok(output) if output.diagnostic().to_lowercase().contains("not found") => {
                Probe::NotFound
            }
            Ok(output) => Probe::Error(execution_error(&inv, &output)),
            Err(err) => Probe::Error(err),
        }
    }

    /// Create the release for `tag` targeting `commit`, or edit its title and
    /// notes if it exists.
    pub fn ensure_release(
        &self,
        tag: &str,
        commit: &str,
        exists: bool,
        title: &str,
        notes_path: &Path,
    ) -> Result<ReleaseAction> {
        if exists {
            let inv = self
                .gh()
                .args(["release", "edit"])
                .arg(tag)
                .arg("--title")
                .arg(title)
                .arg("--notes-file")
                .arg(notes_path);
            self.exec.run(&inv)?;
            log::info!("Updated release {}", tag);
            Ok(ReleaseAction::Edited)
        } else {
            let inv = self
                .gh()
                .args(["release", "create"])
                .arg(tag)
                .arg("--title")
                .arg(title)
                .arg("--notes-file")
                .arg(notes_path)
                .arg("--target")
                .arg(commit)
                .arg("--verify-tag");
            self.exec.run(&inv)?;
            log::info!("Created release {}", tag);
            Ok(ReleaseAction::Created)
        }
    }

    /// Upload files to the release for `tag`, replacing same-named assets.
    pub fn upload_assets(&self, tag: &str, assets: &[PathBuf]) -> Result<()> {
        let inv = self
            .gh()
            .args(["release", "upload"])
            .arg(tag)
            .args(assets.iter().map(|p| p.as_os_str().to_os_string()))
            .arg("--clobber");
        self.exec.run(&inv)?;
        log::info!("Uploaded {} asset(s) to {}", assets.len(), tag);
        Ok(())
    }
}
