//! Config loading and validation.

use super::model::Config;
use crate::error::{ReleaseError, Result};
use std::path::Path;

impl Config {
    /// Load config from a YAML file, or defaults when the file is absent.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.is_file() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load config from a YAML file.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded and validated config
    /// * `Err(ReleaseError::Config)` - Parse error or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            ReleaseError::io(format!("failed to read config file '{}'", path.display()), e)
        })?;

        Self::from_yaml(&content)
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty document deserializes to unit, not a mapping.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| ReleaseError::Config(format!("failed to parse YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate config values.
    ///
    /// Validation rules:
    /// - `remote` must be non-empty
    /// - `asset_extension` must start with a dot and have a name after it
    pub fn validate(&self) -> Result<()> {
        if self.remote.trim().is_empty() {
            return Err(ReleaseError::Config("remote must not be empty".to_string()));
        }

        if !self.asset_extension.starts_with('.') || self.asset_extension.len() < 2 {
            return Err(ReleaseError::Config(format!(
                "asset_extension must look like '.exe' (found '{}')",
                self.asset_extension
            )));
        }

        Ok(())
    }
}
