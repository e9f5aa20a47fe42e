//! core::config::schema
//!
//! Configuration schema types.
//!
//! Global and workspace files share one schema. Every key is optional so a
//! workspace file can override a single value from the global file.
//!
//! # Validation
//!
//! Values are validated after parsing: the manifest file name must be a bare
//! file name and the tag-ref prefix must be non-empty.

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// A configuration file (global or workspace scope).
///
/// # Example
///
/// ```toml
/// manifest_file = "package.json"
/// tag_ref_prefix = "refs/tags/"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Name of the manifest file inside the manifest directory
    pub manifest_file: Option<String>,

    /// Namespace prefix identifying tag references
    pub tag_ref_prefix: Option<String>,
}

impl FileConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(name) = &self.manifest_file {
            if name.is_empty() {
                return Err(ConfigError::InvalidValue(
                    "manifest_file cannot be empty".to_string(),
                ));
            }
            if name.contains(['/', '\\']) || name == "." || name == ".." {
                return Err(ConfigError::InvalidValue(format!(
                    "manifest_file '{}' must be a file name, not a path",
                    name
                )));
            }
        }

        if let Some(prefix) = &self.tag_ref_prefix {
            if prefix.is_empty() {
                return Err(ConfigError::InvalidValue(
                    "tag_ref_prefix cannot be empty".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Overlay `other` on top of `self`; values set in `other` win.
    pub fn merge(self, other: FileConfig) -> FileConfig {
        FileConfig {
            manifest_file: other.manifest_file.or(self.manifest_file),
            tag_ref_prefix: other.tag_ref_prefix.or(self.tag_ref_prefix),
        }
    }
}
