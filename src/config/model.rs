//! Config struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};

/// Settings for release note generation and publishing.
///
/// This struct represents the contents of `.repo/release.yaml`.
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // =========================================================================
    // Layout
    // =========================================================================
    /// Manifest path relative to the repo root (default: "versions.json").
    #[serde(default = "default_manifest")]
    pub manifest: String,

    /// Template path relative to the repo root.
    #[serde(default = "default_template")]
    pub template: String,

    /// Output directory for rendered notes relative to the repo root.
    #[serde(default = "default_releases_dir")]
    pub releases_dir: String,

    /// Resource directory referenced by the image URL.
    #[serde(default = "default_resources_dir")]
    pub resources_dir: String,

    // =========================================================================
    // Publishing
    // =========================================================================
    /// Name of the remote tags are pushed to (default: "origin").
    #[serde(default = "default_remote")]
    pub remote: String,

    /// Extension of uploaded assets, with leading dot (default: ".exe").
    #[serde(default = "default_asset_extension")]
    pub asset_extension: String,

    /// Branch used in image URLs when the remote HEAD is unknown.
    #[serde(default = "default_branch")]
    pub default_branch: String,

    /// Extra locations to probe for the `gh` binary, tried after PATH.
    #[serde(default)]
    pub gh_paths: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            manifest: default_manifest(),
            template: default_template(),
            releases_dir: default_releases_dir(),
            resources_dir: default_resources_dir(),
            remote: default_remote(),
            asset_extension: default_asset_extension(),
            default_branch: default_branch(),
            gh_paths: Vec::new(),
        }
    }
}
