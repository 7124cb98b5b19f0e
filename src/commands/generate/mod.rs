//! Implementation of the `relnotes generate` command.
//!
//! # What `relnotes generate <PROJECT>` does
//!
//! 1. Loads the manifest and the project's entry
//! 2. Derives slug, version, and tag
//! 3. Detects the GitHub owner/repo and default branch (best effort)
//! 4. Renders the template and writes `.repo/releases/<slug>/<tag>.md`
//! 5. With `--publish`, tags, pushes, and creates/updates the GitHub release


use crate::cli::GenerateArgs;
use crate::config::Config;
use crate::context::RepoContext;
use crate::error::{ReleaseError, Result};
use crate::exec::{CommandExecutor, DryRunExecutor, SystemExecutor};
use crate::fs::atomic_write;
use crate::git;
use crate::manifest::Manifest;
use crate::naming::ReleaseNames;
use crate::publish::{PublishOptions, PublishReport, PublishRequest, Publisher};
use crate::render::{RenderContext, render_template};
use crate::tools::Toolchain;
use chrono::{Local, NaiveDate};
use std::path::{Path, PathBuf};

/// A note written to disk, with the values it was rendered from.
#[derive(Debug, Clone)]
pub struct RenderedNotes {
    pub names: ReleaseNames,
    pub context: RenderContext,
    pub path: PathBuf,
}

/// Execute the `relnotes generate` command.
pub fn cmd_generate(args: GenerateArgs) -> Result<()> {
    let ctx = RepoContext::resolve()?;
    let config = Config::load_or_default(ctx.config_path())?;

    let rendered = render_notes(&ctx, &config, &args, Local::now().date_naive())?;
    println!("Wrote {}", rendered.path.display());

    if !args.publish {
        return Ok(());
    }

    let report = publish_notes(&ctx, &config, &args, &rendered)?;
    print_report(&rendered, &report, args.dry_run);
    Ok(())
}

/// Render the project's notes and write them to their output path.
///
/// Nothing is written unless every input (manifest, project entry, version,
/// template) is present.
pub fn render_notes(
    ctx: &RepoContext,
    config: &Config,
    args: &GenerateArgs,
    release_date: NaiveDate,
) -> Result<RenderedNotes> {
    let manifest_path = args
        .manifest
        .as_deref()
        .map(|p| ctx.user_path(p))
        .unwrap_or_else(|| ctx.repo_path(&config.manifest));
    let manifest = Manifest::load(&manifest_path)?;
    let record = manifest.project(&args.project)?;
    let names = ReleaseNames::derive(&args.project, record)?;
    log::debug!("{} -> slug {}, tag {}", names.project_id, names.slug, names.tag);

    let repo = git::detect_repo_info(&ctx.repo_root, &config.remote);
    if !repo.is_github() {
        log::warn!(
            "could not detect a GitHub repository from remote '{}'; imageUrl will be empty",
            config.remote
        );
    }

    let context = RenderContext::new(&names, record, &repo, config, release_date);

    let template_path = args
        .template
        .as_deref()
        .map(|p| ctx.user_path(p))
        .unwrap_or_else(|| ctx.repo_path(&config.template));
    let template = load_template(&template_path)?;
    let content = render_template(&template, &context.to_variables());

    let path = args
        .output
        .as_deref()
        .map(|p| ctx.user_path(p))
        .unwrap_or_else(|| ctx.notes_path(config, &names));
    atomic_write(&path, content.as_bytes())?;
    log::info!("Rendered release notes for {} {}", context.project_name, names.version);

    Ok(RenderedNotes {
        names,
        context,
        path,
    })
}

fn load_template(path: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(ReleaseError::NotFound {
            what: "template",
            path: path.to_path_buf(),
        });
    }

    std::fs::read_to_string(path)
        .map_err(|e| ReleaseError::io(format!("failed to read template '{}'", path.display()), e))
}

/// Run the publish phase for already rendered notes.
pub fn publish_notes(
    ctx: &RepoContext,
    config: &Config,
    args: &GenerateArgs,
    rendered: &RenderedNotes,
) -> Result<PublishReport> {
    let tools = if args.dry_run {
        Toolchain::unchecked()
    } else {
        Toolchain::locate(config)?
    };

    let dry_run = DryRunExecutor::new();
    let exec: &dyn CommandExecutor = if args.dry_run {
        &dry_run
    } else {
        &SystemExecutor
    };

    let options = PublishOptions {
        reference: args.reference.clone(),
        force_tag: args.force_tag,
        series_tag: args.series_tag,
        latest: args.latest,
    };
    let request = PublishRequest {
        names: &rendered.names,
        title: rendered.context.release_title(),
        latest_title: format!("{} (latest)", rendered.context.project_name),
        notes_path: &rendered.path,
        assets_dir: ctx.assets_dir(&rendered.names),
        asset_extension: &config.asset_extension,
        options: &options,
    };

    let report = Publisher::new(exec, &tools, &ctx.repo_root, &config.remote).publish(&request)?;

    if args.dry_run {
        log::info!("[dry-run] {} command(s) skipped", dry_run.planned().len());
    }
    Ok(report)
}

fn print_report(rendered: &RenderedNotes, report: &PublishReport, dry_run: bool) {
    let verb = if dry_run { "Would publish" } else { "Published" };
    println!("{} {} at {}", verb, rendered.names.tag, report.commit);
    if !report.assets.is_empty() {
        println!("Assets:");
        for asset in &report.assets {
            println!("  {}", asset.display());
        }
    }
    for warning in &report.warnings {
        println!("Warning: {}", warning);
    }
}
