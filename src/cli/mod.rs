//! CLI argument parsing for relnotes.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Relnotes: render release notes for projects in a shared manifest and
/// publish them as GitHub releases.
///
/// Notes are rendered from `.repo/release-template.md` into
/// `.repo/releases/<slug>/<tag>.md`. With `--publish`, the version tag is
/// pushed and a GitHub release is created or updated with the project's assets.
#[derive(Parser, Debug)]
#[command(name = "relnotes")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Show debug output, including every external command run.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Available commands for relnotes.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render release notes for a project and optionally publish them.
    Generate(GenerateArgs),

    /// List projects in the manifest with their slug and tag.
    List(ListArgs),
}

/// Arguments for the `generate` command.
#[derive(Parser, Debug, Clone)]
pub struct GenerateArgs {
    /// Project identifier as written in the manifest (e.g. "Sailor Events").
    pub project: String,

    /// Write the notes here instead of `.repo/releases/<slug>/<tag>.md`.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Tag the commit, push the tag, and create or update the GitHub release.
    #[arg(long)]
    pub publish: bool,

    /// Print the git/gh commands publishing would run without running them.
    ///
    /// Read-only git queries used while rendering (repository root, remote
    /// URL, default branch) still run.
    #[arg(long)]
    pub dry_run: bool,

    /// Commit-ish to tag when publishing.
    #[arg(long = "ref", value_name = "REF", default_value = "HEAD")]
    pub reference: String,

    /// Move the version tag if it already points at a different commit.
    #[arg(long)]
    pub force_tag: bool,

    /// Also force-move a `<slug>` tag to the published commit.
    #[arg(long)]
    pub series_tag: bool,

    /// Also move `<slug>-latest` and publish a release for it.
    #[arg(long)]
    pub latest: bool,

    /// Manifest path (default from .repo/release.yaml, else versions.json).
    #[arg(long)]
    pub manifest: Option<PathBuf>,

    /// Template path (default .repo/release-template.md).
    #[arg(long)]
    pub template: Option<PathBuf>,
}

/// Arguments for the `list` command.
#[derive(Parser, Debug, Clone)]
pub struct ListArgs {
    /// Manifest path (default from .repo/release.yaml, else versions.json).
    #[arg(long)]
    pub manifest: Option<PathBuf>,
}
