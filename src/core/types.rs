//! core::types
//!
//! Strong types for the values that flow through a stamping run.
//!
//! # Types
//!
//! - [`SourceKind`] - Whether the version came from a tag ref or a bare tag
//! - [`VersionSource`] - The raw version identifier plus its kind
//! - [`Invocation`] - The complete parameter record for one run
//! - [`Field`] - Names of the validated parameter fields
//!
//! # Example
//!
//! ```
//! use release_stamp::core::types::{Invocation, SourceKind, VersionSource};
//!
//! let invocation = Invocation::new(
//!     VersionSource::from_ref("refs/tags/v2.0.1"),
//!     "/repo",
//!     "",
//! );
//!
//! assert_eq!(invocation.source.kind, SourceKind::Ref);
//! assert!(invocation.targets_workspace_root());
//! ```

use std::fmt;
use std::path::PathBuf;

/// Where a version identifier came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// A version-control reference such as `refs/tags/v1.2.3`.
    Ref,
    /// A bare semantic-version string such as `1.2.3`.
    Tag,
}

impl SourceKind {
    /// The external option name carrying this kind of source.
    pub fn option_name(self) -> &'static str {
        match self {
            SourceKind::Ref => "Ref",
            SourceKind::Tag => "Tag",
        }
    }
}

/// A raw, not yet validated, version identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionSource {
    pub kind: SourceKind,
    pub raw: String,
}

impl VersionSource {
    /// A version source supplied as a tag reference.
    pub fn from_ref(raw: impl Into<String>) -> Self {
        Self {
            kind: SourceKind::Ref,
            raw: raw.into(),
        }
    }

    /// A version source supplied as a bare version string.
    pub fn from_tag(raw: impl Into<String>) -> Self {
        Self {
            kind: SourceKind::Tag,
            raw: raw.into(),
        }
    }
}

impl fmt::Display for VersionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.kind.option_name(), self.raw)
    }
}

/// The parameter record for a single stamping run.
///
/// Built once at the process boundary and passed by reference into the
/// engine. Nothing downstream reads process arguments directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// The version identifier to resolve.
    pub source: VersionSource,
    /// Workspace root; must be an existing directory.
    pub workspace_path: PathBuf,
    /// Manifest directory relative to the workspace. Empty means the root.
    pub manifest_dir: String,
}

impl Invocation {
    pub fn new(
        source: VersionSource,
        workspace_path: impl Into<PathBuf>,
        manifest_dir: impl Into<String>,
    ) -> Self {
        Self {
            source,
            workspace_path: workspace_path.into(),
            manifest_dir: manifest_dir.into(),
        }
    }

    /// True when the manifest lives directly in the workspace root.
    pub fn targets_workspace_root(&self) -> bool {
        self.manifest_dir.is_empty()
    }
}

/// A validated parameter field.
///
/// Rendered with the external option names so violations read the same
/// way the options were supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    VersionSource(SourceKind),
    WorkspacePath,
    PackageJsonDirPath,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::VersionSource(kind) => f.write_str(kind.option_name()),
            Field::WorkspacePath => f.write_str("WorkspacePath"),
            Field::PackageJsonDirPath => f.write_str("PackageJsonDirPath"),
        }
    }
}
