//! Tag lookup, reconciliation, and push.

use super::Publisher;
use crate::error::{ReleaseError, Result};
use crate::exec::{Probe, execution_error};

/// How to treat an existing tag that points at a different commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagPolicy {
    /// Leave it where it is.
    KeepDivergent,
    /// Move it to the target commit.
    Force,
}

/// What reconciling a tag did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagAction {
    /// The tag did not exist and was created.
    Created,
    /// The tag already pointed at the target commit.
    Unchanged,
    /// The tag points elsewhere and was left alone.
    Diverged { existing: String },
    /// The tag was moved from `previous` to the target commit.
    Moved { previous: String },
}

impl Publisher<'_> {
    /// Resolve a ref to a full commit SHA.
    ///
    /// Under dry-run the ref itself is returned.
    pub fn resolve_commit(&self, reference: &str) -> Result<String> {
        let inv = self
            .git()
            .args(["rev-parse", "--verify"])
            .arg(format!("{}^{{commit}}", reference));
        let output = self.exec.execute(&inv)?;

        if output.simulated {
            return Ok(reference.to_string());
        }
        if output.success() && !output.stdout.is_empty() {
            return Ok(output.stdout);
        }

        Err(ReleaseError::RefResolution {
            reference: reference.to_string(),
            message: output.diagnostic().to_string(),
        })
    }

    /// Commit a local tag points at.
    pub fn lookup_tag(&self, tag: &str) -> Probe {
        let inv = self
            .git()
            .args(["rev-parse", "-q", "--verify"])
            .arg(format!("refs/tags/{}^{{commit}}", tag));

        match self.exec.execute(&inv) {
            Ok(output) if output.simulated => Probe::NotFound,
            Ok(output) if output.success() => Probe::Found(output.stdout),
            // `rev-parse -q --verify` exits 1 with no output for a missing ref.
            Ok(output) if output.exit_code == Some(1) => Probe::NotFound,
            Ok(output) => Probe::Error(execution_error(&inv, &output)),
            Err(err) => Probe::Error(err),
        }
    }

    /// Make `tag` point at `commit` according to `policy`.
    pub fn reconcile_tag(&self, tag: &str, commit: &str, policy: TagPolicy) -> Result<TagAction> {
        match self.lookup_tag(tag).into_result()? {
            None => {
                self.exec.run(&self.git().arg("tag").arg(tag).arg(commit))?;
                log::info!("Created tag {}", tag);
                Ok(TagAction::Created)
            }
            Some(existing) if existing == commit => {
                log::debug!("tag {} already at {}", tag, commit);
                Ok(TagAction::Unchanged)
            }
            Some(existing) => match policy {
                TagPolicy::KeepDivergent => Ok(TagAction::Diverged { existing }),
                TagPolicy::Force => {
                    self.exec
                        .run(&self.git().args(["tag", "--force"]).arg(tag).arg(commit))?;
                    log::info!("Moved tag {} from {} to {}", tag, existing, commit);
                    Ok(TagAction::Moved { previous: existing })
                }
            },
        }
    }

    /// Push a single tag to the configured remote.
    pub fn push_tag(&self, tag: &str, force: bool) -> Result<()> {
        let mut inv = self.git().arg("push");
        if force {
            inv = inv.arg("--force");
        }
        inv = inv.arg(self.remote).arg(format!("refs/tags/{}", tag));

        self.exec.run(&inv)?;
        log::info!(
            "Pushed tag {} to {}{}",
            tag,
            self.remote,
            if force { " (forced)" } else { "" }
        );
        Ok(())
    }
}
