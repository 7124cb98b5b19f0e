//! Publishing a rendered release note to GitHub.
//!
//! # Sequence
//!
//! 1. Probe whether a release for the version tag exists
//! 2. Resolve the source ref to a commit
//! 3. Reconcile and push the version tag (and optionally the series tag)
//! 4. Create or edit the release, then upload assets
//! 5. Optionally move `{slug}-latest`, ensure its release, upload assets
//!
//! Every step is safe to repeat, so a failed run is recovered by running it
//! again. Nothing already pushed is rolled back on failure.

mod assets;
mod release;
mod tags;

#[cfg(test)]
mod tests;

pub use assets::{collect_assets, renamed_asset_name, stage_renamed};
pub use release::ReleaseAction;
pub use tags::{TagAction, TagPolicy};

use crate::error::Result;
use crate::exec::{CommandExecutor, Invocation};
use crate::naming::ReleaseNames;
use crate::tools::Toolchain;
use std::fmt;
use std::path::{Path, PathBuf};

/// Flags controlling the publish phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishOptions {
    /// Ref the tags should point at (default `HEAD`).
    pub reference: String,
    /// Re-point an existing version tag that points elsewhere.
    pub force_tag: bool,
    /// Also move the `{slug}` series tag.
    pub series_tag: bool,
    /// Also move `{slug}-latest` and publish its release.
    pub latest: bool,
}

impl Default for PublishOptions {
    fn default() -> Self {
        Self {
            reference: "HEAD".to_string(),
            force_tag: false,
            series_tag: false,
            latest: false,
        }
    }
}

/// Everything the publish phase needs about one release.
#[derive(Debug, Clone)]
pub struct PublishRequest<'a> {
    pub names: &'a ReleaseNames,
    /// Title of the versioned release.
    pub title: String,
    /// Title of the `{slug}-latest` release.
    pub latest_title: String,
    /// Rendered markdown used as the release body.
    pub notes_path: &'a Path,
    /// Directory scanned for assets.
    pub assets_dir: PathBuf,
    /// Asset extension filter, with leading dot.
    pub asset_extension: &'a str,
    pub options: &'a PublishOptions,
}

/// Progress through the publish phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishStage {
    Idle,
    TagReconciled,
    TagPushed,
    ReleaseEnsured,
    AssetsUploaded,
    LatestReconciled,
    LatestPushed,
    LatestReleaseEnsured,
    LatestAssetsUploaded,
    Done,
}

impl fmt::Display for PublishStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PublishStage::Idle => "idle",
            PublishStage::TagReconciled => "tag reconciled",
            PublishStage::TagPushed => "tag pushed",
            PublishStage::ReleaseEnsured => "release ensured",
            PublishStage::AssetsUploaded => "assets uploaded",
            PublishStage::LatestReconciled => "latest tag reconciled",
            PublishStage::LatestPushed => "latest tag pushed",
            PublishStage::LatestReleaseEnsured => "latest release ensured",
            PublishStage::LatestAssetsUploaded => "latest assets uploaded",
            PublishStage::Done => "done",
        };
        f.write_str(name)
    }
}

/// What a successful publish did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishReport {
    /// Stages reached, in order, starting with `Idle`.
    pub stages: Vec<PublishStage>,
    /// Commit the tags were reconciled against.
    pub commit: String,
    pub tag_action: Option<TagAction>,
    pub release_action: Option<ReleaseAction>,
    /// Assets uploaded to the versioned release.
    pub assets: Vec<PathBuf>,
    /// Non-fatal problems, also logged as warnings.
    pub warnings: Vec<String>,
}

impl Default for PublishReport {
    fn default() -> Self {
        Self {
            stages: vec![PublishStage::Idle],
            commit: String::new(),
            tag_action: None,
            release_action: None,
            assets: Vec::new(),
            warnings: Vec::new(),
        }
    }
}

impl PublishReport {
    /// The most recently reached stage.
    pub fn stage(&self) -> PublishStage {
        self.stages.last().copied().unwrap_or(PublishStage::Idle)
    }

    fn advance(&mut self, stage: PublishStage) {
        log::debug!("publish stage: {}", stage);
        self.stages.push(stage);
    }

    fn warn(&mut self, message: String) {
        log::warn!("{}", message);
        self.warnings.push(message);
    }
}

/// Drives `git` and `gh` through a [`CommandExecutor`].
pub struct Publisher<'a> {
    exec: &'a dyn CommandExecutor,
    tools: &'a Toolchain,
    repo_root: &'a Path,
    remote: &'a str,
}

impl<'a> Publisher<'a> {
    pub fn new(
        exec: &'a dyn CommandExecutor,
        tools: &'a Toolchain,
        repo_root: &'a Path,
        remote: &'a str,
    ) -> Self {
        Self {
            exec,
            tools,
            repo_root,
            remote,
        }
    }

    fn git(&self) -> Invocation {
        Invocation::new(&self.tools.git, self.repo_root)
    }

    fn gh(&self) -> Invocation {
        Invocation::new(&self.tools.gh, self.repo_root)
    }

    /// Run the full publish sequence.
    ///
    /// On failure the error is returned as-is after logging the last stage
    /// that completed.
    pub fn publish(&self, request: &PublishRequest<'_>) -> Result<PublishReport> {
        let mut report = PublishReport::default();

        match self.run_stages(request, &mut report) {
            Ok(()) => {
                report.advance(PublishStage::Done);
                Ok(report)
            }
            Err(err) => {
                log::error!(
                    "publishing {} failed after stage '{}'; already pushed tags and releases are left in place",
                    request.names.tag,
                    report.stage()
                );
                Err(err)
            }
        }
    }

    fn run_stages(&self, request: &PublishRequest<'_>, report: &mut PublishReport) -> Result<()> {
        let names = request.names;
        let options = request.options;

        let release_exists = self.release_exists(&names.tag).into_result()?.is_some();
        let commit = self.resolve_commit(&options.reference)?;
        log::info!("Publishing {} at {}", names.tag, commit);
        report.commit = commit.clone();

        // Version tag
        let policy = if options.force_tag {
            TagPolicy::Force
        } else {
            TagPolicy::KeepDivergent
        };
        let action = self.reconcile_tag(&names.tag, &commit, policy)?;
        if let TagAction::Diverged { existing } = &action {
            report.warn(format!(
                "tag {} already points at {} (not {}); leaving it unchanged. Use --force-tag to move it.",
                names.tag, existing, commit
            ));
        }
        let force_push = matches!(action, TagAction::Moved { .. });
        report.tag_action = Some(action);
        report.advance(PublishStage::TagReconciled);

        self.push_tag(&names.tag, force_push)?;
        report.advance(PublishStage::TagPushed);

        if options.series_tag {
            let series = names.series_tag();
            self.reconcile_tag(&series, &commit, TagPolicy::Force)?;
            self.push_tag(&series, true)?;
        }

        // Versioned release
        let release_action = self.ensure_release(
            &names.tag,
            &commit,
            release_exists,
            &request.title,
            request.notes_path,
        )?;
        report.release_action = Some(release_action);
        report.advance(PublishStage::ReleaseEnsured);

        let assets = collect_assets(&request.assets_dir, request.asset_extension)?;
        if assets.is_empty() {
            report.warn(format!(
                "no *{} files found in {}; skipping asset upload",
                request.asset_extension,
                request.assets_dir.display()
            ));
        } else {
            self.upload_assets(&names.tag, &assets)?;
        }
        report.assets = assets.clone();
        report.advance(PublishStage::AssetsUploaded);

        if options.latest {
            self.publish_latest(request, &commit, &assets, report)?;
        }

        Ok(())
    }

    fn publish_latest(
        &self,
        request: &PublishRequest<'_>,
        commit: &str,
        assets: &[PathBuf],
        report: &mut PublishReport,
    ) -> Result<()> {
        let latest = request.names.latest_tag();

        self.reconcile_tag(&latest, commit, TagPolicy::Force)?;
        report.advance(PublishStage::LatestReconciled);

        self.push_tag(&latest, true)?;
        report.advance(PublishStage::LatestPushed);

        let exists = self.release_exists(&latest).into_result()?.is_some();
        self.ensure_release(
            &latest,
            commit,
            exists,
            &request.latest_title,
            request.notes_path,
        )?;
        report.advance(PublishStage::LatestReleaseEnsured);

        match assets {
            [] => {}
            [single] if self.exec.simulates() => {
                log::info!(
                    "[dry-run] {} would be uploaded as {}",
                    single.display(),
                    renamed_asset_name(single, &request.names.slug)
                );
                self.upload_assets(&latest, std::slice::from_ref(single))?;
            }
            [single] => {
                // Stable download name; the staging dir lives until upload returns.
                let (_staging, renamed) = stage_renamed(single, &request.names.slug)?;
                self.upload_assets(&latest, std::slice::from_ref(&renamed))?;
            }
            many => self.upload_assets(&latest, many)?,
        }
        report.advance(PublishStage::LatestAssetsUploaded);

        Ok(())
    }
}
