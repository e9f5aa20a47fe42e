//! engine::gate
//!
//! Parameter validation before any mutation.
//!
//! # Architecture
//!
//! Gating checks every field of an [`Invocation`] against its format
//! contract and produces either a [`ValidatedInvocation`] or a single
//! [`ValidationError`] listing every violated field. Nothing is written
//! while gating; the only I/O is read-only probing of the workspace and a
//! trial load of the manifest.
//!
//! # Field Contracts
//!
//! | Field                | Contract                                                   |
//! |----------------------|------------------------------------------------------------|
//! | `Ref`                | starts with the tag-ref prefix; remainder is a valid semver |
//! | `Tag`                | is a valid semver                                          |
//! | `WorkspacePath`      | an existing directory (symlinks are not followed)          |
//! | `PackageJsonDirPath` | the joined directory holds a manifest that loads           |
//!
//! # Invariants
//!
//! - All fields are checked; violations are aggregated, not short-circuited
//! - Gating never produces a `ValidatedInvocation` when any field is invalid
//! - The trial manifest load is discarded; the commit step loads again

use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::fs;
use tracing::debug;

use super::resolve::strip_tag_ref;
use super::Rules;
use crate::core::manifest::ManifestStore;
use crate::core::paths;
use crate::core::types::{Field, Invocation, SourceKind, VersionSource};
use crate::core::version;

/// A single violated field contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: Field,
    pub reason: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

/// Parameters failed validation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid parameters: {}", summarize(.violations))]
pub struct ValidationError {
    /// Every violated contract, in field order.
    pub violations: Vec<Violation>,
}

impl ValidationError {
    /// Names of the violated fields.
    pub fn fields(&self) -> Vec<Field> {
        self.violations.iter().map(|v| v.field).collect()
    }
}

fn summarize(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// An invocation whose fields all passed validation.
#[derive(Debug, Clone)]
pub struct ValidatedInvocation {
    pub invocation: Invocation,
    /// Directory holding the manifest.
    pub manifest_dir: PathBuf,
}

/// Validate every field of `invocation`.
///
/// # Errors
///
/// Returns a `ValidationError` naming each field whose contract failed.
pub async fn gate(
    invocation: &Invocation,
    rules: &Rules,
    store: &dyn ManifestStore,
) -> Result<ValidatedInvocation, ValidationError> {
    let mut violations = Vec::new();

    debug!(source = %invocation.source, "checking version source");
    if let Err(reason) = check_version_source(&invocation.source, rules) {
        violations.push(Violation {
            field: Field::VersionSource(invocation.source.kind),
            reason,
        });
    }

    debug!(path = %invocation.workspace_path.display(), "checking workspace");
    if let Err(reason) = check_workspace(invocation).await {
        violations.push(Violation {
            field: Field::WorkspacePath,
            reason,
        });
    }

    let manifest_dir = paths::manifest_dir(&invocation.workspace_path, &invocation.manifest_dir);
    debug!(dir = %manifest_dir.display(), "checking manifest directory");
    if let Err(reason) = check_manifest_dir(&manifest_dir, store).await {
        violations.push(Violation {
            field: Field::PackageJsonDirPath,
            reason,
        });
    }

    if !violations.is_empty() {
        return Err(ValidationError { violations });
    }

    Ok(ValidatedInvocation {
        invocation: invocation.clone(),
        manifest_dir,
    })
}

/// Validate only the version source.
///
/// Used where no workspace is involved, such as printing the resolved
/// version.
pub fn gate_source(source: &VersionSource, rules: &Rules) -> Result<(), ValidationError> {
    check_version_source(source, rules).map_err(|reason| ValidationError {
        violations: vec![Violation {
            field: Field::VersionSource(source.kind),
            reason,
        }],
    })
}

fn check_version_source(source: &VersionSource, rules: &Rules) -> Result<(), String> {
    let raw = source.raw.as_str();
    let candidate = match source.kind {
        SourceKind::Ref => strip_tag_ref(raw, &rules.tag_ref_prefix).ok_or_else(|| {
            format!(
                "'{}' is not a tag reference (expected prefix '{}')",
                raw, rules.tag_ref_prefix
            )
        })?,
        SourceKind::Tag => raw,
    };

    version::parse(candidate)
        .map(|_| ())
        .map_err(|e| e.to_string())
}

async fn check_workspace(invocation: &Invocation) -> Result<(), String> {
    let path = &invocation.workspace_path;
    match fs::symlink_metadata(path).await {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(format!("'{}' is not a directory", path.display())),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            Err(format!("'{}' does not exist", path.display()))
        }
        Err(e) => Err(format!("cannot inspect '{}': {}", path.display(), e)),
    }
}

async fn check_manifest_dir(dir: &Path, store: &dyn ManifestStore) -> Result<(), String> {
    if !store.exists(dir).await.map_err(|e| e.to_string())? {
        return Err(format!(
            "no manifest found at '{}'",
            store.manifest_path(dir).display()
        ));
    }

    store.load(dir).await.map(|_| ()).map_err(|e| e.to_string())
}
