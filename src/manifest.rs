//! Project manifest model.
//!
//! The manifest is a JSON object keyed by project identifier:
//!
//! ```json
//! {
//!   "Sailor Events": {
//!     "name": "Sailor Events",
//!     "file-version": "2.0.0.0",
//!     "product-version": "2.0",
//!     "notes": "Bug fixes.",
//!     "company-name": "Example Co",
//!     "copyright": "(c) Example Co"
//!   }
//! }
//! ```
//!
//! Unknown fields are ignored so the same file can carry build metadata.

use crate::error::{ReleaseError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Metadata for one releasable project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ProjectRecord {
    /// Display name; falls back to the project identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
}

impl ProjectRecord {
    /// The release version: file-version, else product-version.
    ///
    /// Blank strings are treated as absent.
    pub fn version(&self) -> Option<&str> {
        non_blank(&self.file_version).or_else(|| non_blank(&self.product_version))
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// All projects in the manifest, ordered by identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    pub projects: BTreeMap<String, ProjectRecord>,
}

impl Manifest {
    /// Load the manifest from disk.
    ///
    /// # Returns
    ///
    /// * `Err(ReleaseError::NotFound)` - The file does not exist
    /// * `Err(ReleaseError::Parse)` - The file is not a valid manifest
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.is_file() {
            return Err(ReleaseError::NotFound {
                what: "manifest",
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            ReleaseError::io(format!("failed to read manifest '{}'", path.display()), e)
        })?;

        serde_json::from_str(&content).map_err(|e| ReleaseError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Look up a project by its exact identifier.
    pub fn project(&self, project_id: &str) -> Result<&ProjectRecord> {
        self.projects
            .get(project_id)
            .ok_or_else(|| ReleaseError::ProjectNotFound(project_id.to_string()))
    }
}
