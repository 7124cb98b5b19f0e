//! Slug and tag naming for released projects.
//!
//! Project identifiers in the manifest are free-form ("Sailor Events"); every
//! path and git ref derived from them goes through [`slugify`].

use crate::error::{ReleaseError, Result};
use crate::manifest::ProjectRecord;
use regex::Regex;
use std::sync::LazyLock;

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("static regex is valid"));

/// Suffix of the moving tag that always points at the newest release.
pub const LATEST_SUFFIX: &str = "-latest";

/// Derive the path-safe slug for a project identifier.
///
/// Lowercases the identifier and replaces each whitespace run with a single
/// hyphen. Leading and trailing runs are replaced too, not trimmed.
pub fn slugify(project_id: &str) -> String {
    WHITESPACE_RUN
        .replace_all(&project_id.to_lowercase(), "-")
        .into_owned()
}

/// Versioned release tag: `{slug}-v{version}`.
pub fn version_tag(slug: &str, version: &str) -> String {
    format!("{}-v{}", slug, version)
}

/// Moving latest tag: `{slug}-latest`.
pub fn latest_tag(slug: &str) -> String {
    format!("{}{}", slug, LATEST_SUFFIX)
}

/// Series tag grouping all releases of a project; equal to the slug.
pub fn series_tag(slug: &str) -> String {
    slug.to_string()
}

/// Names derived once per run for the project being released.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseNames {
    /// Identifier as written in the manifest.
    pub project_id: String,
    pub slug: String,
    pub version: String,
    /// `{slug}-v{version}`.
    pub tag: String,
}

impl ReleaseNames {
    /// Derive names for a manifest entry.
    ///
    /// Fails with `MissingVersion` when the record has no usable version.
    pub fn derive(project_id: &str, record: &ProjectRecord) -> Result<Self> {
        let version = record
            .version()
            .ok_or_else(|| ReleaseError::MissingVersion(project_id.to_string()))?
            .to_string();
        let slug = slugify(project_id);
        let tag = version_tag(&slug, &version);

        Ok(Self {
            project_id: project_id.to_string(),
            slug,
            version,
            tag,
        })
    }

    pub fn latest_tag(&self) -> String {
        latest_tag(&self.slug)
    }

    pub fn series_tag(&self) -> String {
        series_tag(&self.slug)
    }

    /// File name of the rendered note: `{tag}.md`.
    pub fn notes_file_name(&self) -> String {
        format!("{}.md", self.tag)
    }
}
