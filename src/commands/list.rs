//! Implementation of the `relnotes list` command.

use crate::cli::ListArgs;
use crate::config::Config;
use crate::context::RepoContext;
use crate::error::Result;
use crate::manifest::Manifest;
use crate::naming::{ReleaseNames, slugify};

/// Execute the `relnotes list` command.
pub fn cmd_list(args: ListArgs) -> Result<()> {
    let ctx = RepoContext::resolve()?;
    let config = Config::load_or_default(ctx.config_path())?;

    let manifest_path = args
        .manifest
        .as_deref()
        .map(|p| ctx.user_path(p))
        .unwrap_or_else(|| ctx.repo_path(&config.manifest));
    let manifest = Manifest::load(&manifest_path)?;

    if manifest.projects.is_empty() {
        println!("No projects in {}", manifest_path.display());
        return Ok(());
    }

    for line in format_projects(&manifest) {
        println!("{}", line);
    }
    Ok(())
}

/// One tab-separated line per project: identifier, slug, tag.
fn format_projects(manifest: &Manifest) -> Vec<String> {
    manifest
        .projects
        .iter()
        .map(|(id, record)| match ReleaseNames::derive(id, record) {
            Ok(names) => format!("{}\t{}\t{}", id, names.slug, names.tag),
            Err(_) => format!("{}\t{}\t(missing version)", id, slugify(id)),
        })
        .collect()
}
