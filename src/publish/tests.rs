//! Tests for the publish sequence.

use super::*;
use crate::error::ReleaseError;
use crate::exec::{DryRunExecutor, Probe, SystemExecutor};
use crate::test_support::{ScriptedExecutor, create_test_repo_with_remote, failed, git, ok};
use std::fs;
use tempfile::TempDir;

const SHA_A: &str = "1111111111111111111111111111111111111111";
const SHA_B: &str = "2222222222222222222222222222222222222222";

fn names() -> ReleaseNames {
    ReleaseNames {
        project_id: "Sailor Events".to_string(),
        slug: "sailor-events".to_string(),
        version: "2.0.0.0".to_string(),
        tag: "sailor-events-v2.0.0.0".to_string(),
    }
}

/// Scratch repo root with a notes file and an assets directory.
struct Fixture {
    root: TempDir,
    names: ReleaseNames,
    tools: Toolchain,
}

impl Fixture {
    fn new() -> Self {
        let root = TempDir::new().unwrap();
        let names = names();
        fs::create_dir_all(root.path().join(&names.slug)).unwrap();
        fs::write(root.path().join("notes.md"), "# Notes\n").unwrap();
        Self {
            root,
            names,
            tools: Toolchain::unchecked(),
        }
    }

    fn add_asset(&self, name: &str) {
        fs::write(self.root.path().join(&self.names.slug).join(name), "bin").unwrap();
    }

    fn notes_path(&self) -> PathBuf {
        self.root.path().join("notes.md")
    }

    fn publish(
        &self,
        exec: &dyn CommandExecutor,
        options: &PublishOptions,
    ) -> Result<PublishReport> {
        let notes_path = self.notes_path();
        let request = PublishRequest {
            names: &self.names,
            title: "Sailor Events v2.0.0.0".to_string(),
            latest_title: "Sailor Events (latest)".to_string(),
            notes_path: &notes_path,
            assets_dir: self.root.path().join(&self.names.slug),
            asset_extension: ".exe",
            options,
        };
        Publisher::new(exec, &self.tools, self.root.path(), "origin").publish(&request)
    }
}

/// Fresh remote: no releases, no tags, HEAD resolves to SHA_B.
fn fresh_remote() -> ScriptedExecutor {
    ScriptedExecutor::new()
        .respond("gh release view", failed(1, "release not found"))
        .respond("git rev-parse -q --verify", failed(1, ""))
        .respond("git rev-parse --verify", ok(SHA_B))
}

fn position(calls: &[String], prefix: &str) -> usize {
    calls
        .iter()
        .position(|c| c.starts_with(prefix))
        .unwrap_or_else(|| panic!("no call starting with '{prefix}' in {calls:#?}"))
}

#[test]
fn test_first_publish_runs_full_sequence() {
    let fx = Fixture::new();
    fx.add_asset("setup.exe");
    let exec = fresh_remote();

    let report = fx.publish(&exec, &PublishOptions::default()).unwrap();

    let calls = exec.calls();
    let view = position(&calls, "gh release view sailor-events-v2.0.0.0");
    let resolve = position(&calls, "git rev-parse --verify");
    let tag = position(&calls, &format!("git tag sailor-events-v2.0.0.0 {SHA_B}"));
    let push = position(&calls, "git push origin refs/tags/sailor-events-v2.0.0.0");
    let create = position(&calls, "gh release create sailor-events-v2.0.0.0");
    let upload = position(&calls, "gh release upload sailor-events-v2.0.0.0");
    assert!(view < resolve && resolve < tag && tag < push && push < create && create < upload);

    assert!(calls[create].contains("--title 'Sailor Events v2.0.0.0'"));
    assert!(calls[create].contains(&format!("--target {SHA_B} --verify-tag")));
    assert!(calls[upload].ends_with("setup.exe --clobber"));

    assert_eq!(report.commit, SHA_B);
    assert_eq!(report.tag_action, Some(TagAction::Created));
    assert_eq!(report.release_action, Some(ReleaseAction::Created));
    assert_eq!(
        report.stages,
        vec![
            PublishStage::Idle,
            PublishStage::TagReconciled,
            PublishStage::TagPushed,
            PublishStage::ReleaseEnsured,
            PublishStage::AssetsUploaded,
            PublishStage::Done,
        ]
    );
    assert!(report.warnings.is_empty());
}

#[test]
fn test_existing_release_is_edited() {
    let fx = Fixture::new();
    fx.add_asset("setup.exe");
    let exec = ScriptedExecutor::new()
        .respond("gh release view", ok("title:\tSailor Events"))
        .respond("git rev-parse -q --verify", ok(SHA_B))
        .respond("git rev-parse --verify", ok(SHA_B));

    let report = fx.publish(&exec, &PublishOptions::default()).unwrap();

    let calls = exec.calls();
    assert!(calls.iter().any(|c| c.starts_with("gh release edit sailor-events-v2.0.0.0")));
    assert!(!calls.iter().any(|c| c.starts_with("gh release create")));
    assert!(!calls.iter().any(|c| c.starts_with("git tag")));
    assert_eq!(report.tag_action, Some(TagAction::Unchanged));
    assert_eq!(report.release_action, Some(ReleaseAction::Edited));
}

#[test]
fn test_divergent_tag_without_force_warns_and_keeps_tag() {
    let fx = Fixture::new();
    fx.add_asset("setup.exe");
    let exec = ScriptedExecutor::new()
        .respond("gh release view", failed(1, "release not found"))
        .respond("git rev-parse -q --verify", ok(SHA_A))
        .respond("git rev-parse --verify", ok(SHA_B));

    let report = fx.publish(&exec, &PublishOptions::default()).unwrap();

    let calls = exec.calls();
    assert!(!calls.iter().any(|c| c.starts_with("git tag")));
    assert!(calls.contains(&"git push origin refs/tags/sailor-events-v2.0.0.0".to_string()));
    assert_eq!(
        report.tag_action,
        Some(TagAction::Diverged {
            existing: SHA_A.to_string()
        })
    );
    assert_eq!(report.warnings.len(), 1);
    assert!(report.warnings[0].contains("--force-tag"));
}

#[test]
fn test_divergent_tag_with_force_moves_and_force_pushes() {
    let fx = Fixture::new();
    fx.add_asset("setup.exe");
    let exec = ScriptedExecutor::new()
        .respond("gh release view", failed(1, "release not found"))
        .respond("git rev-parse -q --verify", ok(SHA_A))
        .respond("git rev-parse --verify", ok(SHA_B));
    let options = PublishOptions {
        force_tag: true,
        ..Default::default()
    };

    let report = fx.publish(&exec, &options).unwrap();

    let calls = exec.calls();
    assert!(calls.contains(&format!("git tag --force sailor-events-v2.0.0.0 {SHA_B}")));
    assert!(calls.contains(&"git push --force origin refs/tags/sailor-events-v2.0.0.0".to_string()));
    assert_eq!(
        report.tag_action,
        Some(TagAction::Moved {
            previous: SHA_A.to_string()
        })
    );
    assert!(report.warnings.is_empty());
}

#[test]
fn test_series_tag_is_always_force_pushed() {
    let fx = Fixture::new();
    fx.add_asset("setup.exe");
    let exec = fresh_remote();
    let options = PublishOptions {
        series_tag: true,
        ..Default::default()
    };

    fx.publish(&exec, &options).unwrap();

    let calls = exec.calls();
    let series_tag = position(&calls, &format!("git tag sailor-events {SHA_B}"));
    let series_push = position(&calls, "git push --force origin refs/tags/sailor-events");
    let create = position(&calls, "gh release create");
    assert!(series_tag < series_push && series_push < create);
}

#[test]
fn test_no_assets_warns_and_skips_upload() {
    let fx = Fixture::new();
    let exec = fresh_remote();

    let report = fx.publish(&exec, &PublishOptions::default()).unwrap();

    assert!(!exec.calls().iter().any(|c| c.starts_with("gh release upload")));
    assert!(report.assets.is_empty());
    assert_eq!(report.warnings.len(), 1);
    assert!(report.warnings[0].contains("no *.exe files"));
    assert_eq!(report.stage(), PublishStage::Done);
}

#[test]
fn test_latest_with_single_asset_renames_upload() {
    let fx = Fixture::new();
    fx.add_asset("SailorEvents-Setup.exe");
    let exec = fresh_remote();
    let options = PublishOptions {
        latest: true,
        ..Default::default()
    };

    let report = fx.publish(&exec, &options).unwrap();

    let calls = exec.calls();
    let latest_push = position(&calls, "git push --force origin refs/tags/sailor-events-latest");
    let latest_create = position(&calls, "gh release create sailor-events-latest");
    let latest_upload = position(&calls, "gh release upload sailor-events-latest");
    assert!(latest_push < latest_create && latest_create < latest_upload);
    assert!(calls[latest_create].contains("--title 'Sailor Events (latest)'"));
    assert!(calls[latest_upload].ends_with("/sailor-events.exe --clobber"));

    assert_eq!(
        &report.stages[report.stages.len() - 5..],
        &[
            PublishStage::LatestReconciled,
            PublishStage::LatestPushed,
            PublishStage::LatestReleaseEnsured,
            PublishStage::LatestAssetsUploaded,
            PublishStage::Done,
        ]
    );
}

#[test]
fn test_latest_with_many_assets_keeps_names() {
    let fx = Fixture::new();
    fx.add_asset("a.exe");
    fx.add_asset("b.exe");
    let exec = fresh_remote();
    let options = PublishOptions {
        latest: true,
        ..Default::default()
    };

    fx.publish(&exec, &options).unwrap();

    let calls = exec.calls();
    let upload = &calls[position(&calls, "gh release upload sailor-events-latest")];
    assert!(upload.contains("a.exe"));
    assert!(upload.contains("b.exe"));
    assert!(!upload.contains("/sailor-events.exe"));
}

#[test]
fn test_release_probe_failure_is_fatal() {
    let fx = Fixture::new();
    let exec = ScriptedExecutor::new().respond("gh release view", failed(4, "HTTP 401: Bad credentials"));

    let err = fx.publish(&exec, &PublishOptions::default()).unwrap_err();

    assert!(matches!(err, ReleaseError::ToolExecution { exit_code: Some(4), .. }));
    assert_eq!(exec.calls().len(), 1);
}

#[test]
fn test_unresolvable_ref_is_ref_resolution_error() {
    let fx = Fixture::new();
    let exec = ScriptedExecutor::new()
        .respond("gh release view", failed(1, "release not found"))
        .respond("git rev-parse --verify", failed(128, "fatal: Needed a single revision"));
    let options = PublishOptions {
        reference: "no-such-branch".to_string(),
        ..Default::default()
    };

    let err = fx.publish(&exec, &options).unwrap_err();

    match err {
        ReleaseError::RefResolution { reference, .. } => assert_eq!(reference, "no-such-branch"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_push_failure_stops_before_release() {
    let fx = Fixture::new();
    let exec = fresh_remote().respond("git push", failed(1, "rejected"));

    let err = fx.publish(&exec, &PublishOptions::default()).unwrap_err();

    assert!(matches!(err, ReleaseError::ToolExecution { exit_code: Some(1), .. }));
    assert!(!exec.calls().iter().any(|c| c.starts_with("gh release create")));
}

#[test]
fn test_dry_run_reports_every_command_without_running() {
    let fx = Fixture::new();
    fx.add_asset("setup.exe");
    let exec = DryRunExecutor::new();
    let options = PublishOptions {
        series_tag: true,
        latest: true,
        ..Default::default()
    };

    let report = fx.publish(&exec, &options).unwrap();

    let planned = exec.planned();
    // Ref resolution echoes the ref; tags look new.
    assert_eq!(report.commit, "HEAD");
    assert!(planned.contains(&"git tag sailor-events-v2.0.0.0 HEAD".to_string()));
    assert!(planned.iter().any(|c| c.starts_with("gh release create sailor-events-v2.0.0.0")));
    assert!(planned.iter().any(|c| c.starts_with("gh release upload sailor-events-latest")));
    assert_eq!(report.stage(), PublishStage::Done);
}

#[test]
fn test_dry_run_latest_single_asset_is_not_staged() {
    let fx = Fixture::new();
    fx.add_asset("SailorEvents-Setup.exe");
    let exec = DryRunExecutor::new();
    let options = PublishOptions {
        latest: true,
        ..Default::default()
    };

    fx.publish(&exec, &options).unwrap();

    let planned = exec.planned();
    let upload = &planned[position(&planned, "gh release upload sailor-events-latest")];
    let asset = fx
        .root
        .path()
        .join("sailor-events")
        .join("SailorEvents-Setup.exe");
    // The planned command names a file that still exists after the run.
    assert!(upload.contains(&asset.display().to_string()));
    assert!(asset.is_file());
}

#[test]
fn test_stage_display() {
    assert_eq!(PublishStage::TagPushed.to_string(), "tag pushed");
    assert_eq!(PublishStage::LatestAssetsUploaded.to_string(), "latest assets uploaded");
}

// ============================================================================
// Against real git
// ============================================================================

fn local_tags(repo: &Path) -> Vec<String> {
    git(repo, &["tag", "--list"])
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_reconcile_tag_against_real_repo() {
    let (work, bare) = create_test_repo_with_remote();
    let repo = work.path();
    let commit_a = git(repo, &["rev-parse", "HEAD~1"]);
    let commit_b = git(repo, &["rev-parse", "HEAD"]);
    git(repo, &["tag", "demo-v1", &commit_a]);

    let tools = Toolchain::unchecked();
    let publisher = Publisher::new(&SystemExecutor, &tools, repo, "origin");

    assert_eq!(publisher.resolve_commit("HEAD").unwrap(), commit_b);

    // Without force the tag stays at A.
    let action = publisher
        .reconcile_tag("demo-v1", &commit_b, TagPolicy::KeepDivergent)
        .unwrap();
    assert_eq!(
        action,
        TagAction::Diverged {
            existing: commit_a.clone()
        }
    );
    assert_eq!(git(repo, &["rev-parse", "demo-v1^{commit}"]), commit_a);

    // With force it moves to B and can be force-pushed.
    let action = publisher
        .reconcile_tag("demo-v1", &commit_b, TagPolicy::Force)
        .unwrap();
    assert_eq!(action, TagAction::Moved { previous: commit_a });
    assert_eq!(git(repo, &["rev-parse", "demo-v1^{commit}"]), commit_b);

    publisher.push_tag("demo-v1", true).unwrap();
    assert_eq!(git(bare.path(), &["rev-parse", "demo-v1^{commit}"]), commit_b);

    // Reconciling again is a no-op.
    let action = publisher
        .reconcile_tag("demo-v1", &commit_b, TagPolicy::KeepDivergent)
        .unwrap();
    assert_eq!(action, TagAction::Unchanged);
    assert_eq!(local_tags(repo), vec!["demo-v1".to_string()]);
}

#[test]
fn test_lookup_and_resolve_against_real_repo() {
    let (work, _bare) = create_test_repo_with_remote();
    let repo = work.path();
    let tools = Toolchain::unchecked();
    let publisher = Publisher::new(&SystemExecutor, &tools, repo, "origin");

    assert!(matches!(publisher.lookup_tag("missing-v1"), Probe::NotFound));

    let err = publisher.resolve_commit("no-such-branch").unwrap_err();
    assert!(matches!(err, ReleaseError::RefResolution { .. }));
}
