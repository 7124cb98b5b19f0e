//! Token values for a single release note.

use crate::config::Config;
use crate::git::RepoInfo;
use crate::manifest::ProjectRecord;
use crate::naming::ReleaseNames;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Notes used when the manifest entry has none.
pub const DEFAULT_NOTES: &str =
    "The author has not provided specific release notes for this version.";

/// Resolved values for every recognized template token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderContext {
    pub project_name: String,
    pub version: String,
    pub tag: String,
    /// Empty when the GitHub owner/repo could not be detected.
    pub image_url: String,
    pub release_date: String,
    pub notes: String,
    pub company_name: String,
    pub copyright: String,
    pub asset_ext: String,
}

impl RenderContext {
    /// Build the context for a project release.
    pub fn new(
        names: &ReleaseNames,
        record: &ProjectRecord,
        repo: &RepoInfo,
        config: &Config,
        release_date: NaiveDate,
    ) -> Self {
        Self {
            project_name: record
                .name
                .clone()
                .unwrap_or_else(|| names.project_id.clone()),
            version: names.version.clone(),
            tag: names.tag.clone(),
            image_url: image_url(repo, config, &names.slug).unwrap_or_default(),
            release_date: release_date.format("%Y-%m-%d").to_string(),
            notes: record
                .notes
                .clone()
                .unwrap_or_else(|| DEFAULT_NOTES.to_string()),
            company_name: record.company_name.clone().unwrap_or_default(),
            copyright: record.copyright.clone().unwrap_or_default(),
            asset_ext: config.asset_extension.clone(),
        }
    }

    /// Convert to the token map consumed by `render_template`.
    pub fn to_variables(&self) -> BTreeMap<String, String> {
        [
            ("projectName", &self.project_name),
            ("version", &self.version),
            ("tag", &self.tag),
            ("imageUrl", &self.image_url),
            ("releaseDate", &self.release_date),
            ("notes", &self.notes),
            ("companyName", &self.company_name),
            ("copyright", &self.copyright),
            ("assetExt", &self.asset_ext),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
    }

    /// Release title shown on GitHub.
    pub fn release_title(&self) -> String {
        format!("{} v{}", self.project_name, self.version)
    }
}

/// Raw URL of the project's card image on the default branch.
fn image_url(repo: &RepoInfo, config: &Config, slug: &str) -> Option<String> {
    let owner = repo.owner.as_deref()?;
    let name = repo.name.as_deref()?;
    let branch = repo
        .default_branch
        .as_deref()
        .unwrap_or(config.default_branch.as_str());
    let resources = config.resources_dir.trim_matches('/');

    Some(format!(
        "https://raw.githubusercontent.com/{}/{}/{}/{}/{}/card.png",
        owner, name, branch, resources, slug
    ))
}
