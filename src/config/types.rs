//! Default values for the Config struct.

/// Manifest path relative to the repository root.
pub fn default_manifest() -> String {
    "versions.json".to_string()
}

/// Template path relative to the repository root.
pub fn default_template() -> String {
    ".repo/release-template.md".to_string()
}

/// Directory holding rendered notes, one subdirectory per slug.
pub fn default_releases_dir() -> String {
    ".repo/releases".to_string()
}

/// Directory holding per-project resources such as `card.png`.
pub fn default_resources_dir() -> String {
    ".repo/resources".to_string()
}

pub fn default_remote() -> String {
    "origin".to_string()
}

/// Extension of the release assets uploaded for each project.
pub fn default_asset_extension() -> String {
    ".exe".to_string()
}

/// Branch used for image URLs when the remote HEAD cannot be detected.
pub fn default_branch() -> String {
    "main".to_string()
}
