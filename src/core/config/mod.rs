//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! release-stamp has two configuration scopes:
//! - **Global**: User-level settings
//! - **Workspace**: Per-workspace overrides
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Global config file
//! 3. Workspace config file
//!
//! # Global Config Locations
//!
//! Searched in order:
//! 1. `$RELEASE_STAMP_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/release-stamp/config.toml`
//! 3. `~/.release-stamp/config.toml`
//!
//! # Workspace Config Location
//!
//! `<workspace>/.release-stamp.toml`, read only when the workspace path is
//! a directory. A bad workspace path is reported by parameter validation,
//! not here.
//!
//! # Example
//!
//! ```no_run
//! use release_stamp::core::config::Config;
//! use std::path::Path;
//!
//! let result = Config::load(Some(Path::new("/path/to/workspace"))).unwrap();
//! let config = result.config;
//!
//! println!("Manifest file: {}", config.manifest_file());
//! println!("Tag ref prefix: {}", config.tag_ref_prefix());
//! ```

pub mod schema;

pub use schema::FileConfig;

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::manifest::DEFAULT_MANIFEST_FILE;

/// Namespace prefix of Git tag references.
pub const DEFAULT_TAG_REF_PREFIX: &str = "refs/tags/";

/// File name of the workspace config.
pub const WORKSPACE_CONFIG_FILE: &str = ".release-stamp.toml";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Warnings generated during config loading.
#[derive(Debug, Clone)]
pub struct ConfigWarning {
    /// The warning message.
    pub message: String,
    /// The path that triggered the warning.
    pub path: PathBuf,
}

/// Result of loading configuration.
#[derive(Debug)]
pub struct ConfigLoadResult {
    /// The loaded configuration.
    pub config: Config,
    /// Any warnings generated during loading.
    pub warnings: Vec<ConfigWarning>,
}

/// Merged configuration from all sources.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Global configuration
    pub global: FileConfig,
    /// Workspace configuration (if present)
    pub workspace: Option<FileConfig>,
    /// Paths of the files that were loaded, global first
    pub sources: Vec<PathBuf>,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// If `workspace` is provided and is a directory, also loads the
    /// workspace config file.
    ///
    /// # Errors
    ///
    /// Returns an error if config files exist but cannot be read or parsed.
    /// Missing config files are not an error (defaults are used).
    pub fn load(workspace: Option<&Path>) -> Result<ConfigLoadResult, ConfigError> {
        let mut warnings = Vec::new();
        let mut sources = Vec::new();

        let global = match Self::find_global(&mut warnings) {
            Some(path) => {
                let config = Self::read_config(&path)?;
                sources.push(path);
                config
            }
            None => FileConfig::default(),
        };

        let workspace_path = workspace
            .filter(|dir| dir.is_dir())
            .map(|dir| dir.join(WORKSPACE_CONFIG_FILE))
            .filter(|path| path.is_file());

        let workspace_config = match workspace_path {
            Some(path) => {
                let config = Self::read_config(&path)?;
                sources.push(path);
                Some(config)
            }
            None => None,
        };

        global.validate()?;
        if let Some(ref w) = workspace_config {
            w.validate()?;
        }

        Ok(ConfigLoadResult {
            config: Config {
                global,
                workspace: workspace_config,
                sources,
            },
            warnings,
        })
    }

    /// Locate the global config file, if any.
    fn find_global(warnings: &mut Vec<ConfigWarning>) -> Option<PathBuf> {
        // 1. Check $RELEASE_STAMP_CONFIG
        if let Ok(path) = std::env::var("RELEASE_STAMP_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
            warnings.push(ConfigWarning {
                message: "RELEASE_STAMP_CONFIG points to a missing file; ignoring it".to_string(),
                path,
            });
        }

        // 2. Check $XDG_CONFIG_HOME/release-stamp/config.toml
        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("release-stamp/config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        // 3. Check ~/.release-stamp/config.toml
        dirs::home_dir()
            .map(|home| home.join(".release-stamp/config.toml"))
            .filter(|path| path.exists())
    }

    /// Read and parse a config file.
    fn read_config(path: &Path) -> Result<FileConfig, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Global and workspace values merged, workspace winning.
    fn effective(&self) -> FileConfig {
        match &self.workspace {
            Some(w) => self.global.clone().merge(w.clone()),
            None => self.global.clone(),
        }
    }

    // =========================================================================
    // Accessor methods with precedence
    // =========================================================================

    /// Get the manifest file name.
    ///
    /// Defaults to "package.json" if not configured.
    pub fn manifest_file(&self) -> String {
        self.effective()
            .manifest_file
            .unwrap_or_else(|| DEFAULT_MANIFEST_FILE.to_string())
    }

    /// Get the tag reference prefix.
    ///
    /// Defaults to "refs/tags/" if not configured.
    pub fn tag_ref_prefix(&self) -> String {
        self.effective()
            .tag_ref_prefix
            .unwrap_or_else(|| DEFAULT_TAG_REF_PREFIX.to_string())
    }
}
