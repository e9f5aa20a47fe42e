//! engine
//!
//! Orchestrates a stamping run: Gate -> Resolve -> Commit.
//!
//! # Architecture
//!
//! 1. **Gate**: Validate every parameter field ([`gate`])
//! 2. **Resolve**: Derive the canonical version ([`resolve`])
//! 3. **Commit**: Load, mutate, and save the manifest ([`exec`])
//!
//! Gating is the *Validating* state; resolve and commit together are the
//! *Committing* state. There are no other states and no retries: the first
//! failure ends the run.
//!
//! # Concurrency
//!
//! Every step is awaited before the next begins. The engine is meant to be
//! driven from a current-thread runtime and takes no locks; concurrent runs
//! against the same manifest are not supported.
//!
//! # Example
//!
//! ```no_run
//! use release_stamp::core::manifest::FsManifestStore;
//! use release_stamp::core::types::{Invocation, VersionSource};
//! use release_stamp::engine::{self, Context, Rules};
//!
//! # async fn example() -> Result<(), release_stamp::engine::EngineError> {
//! let invocation = Invocation::new(VersionSource::from_ref("refs/tags/v2.0.1"), "/repo", "");
//! let outcome = engine::run(
//!     &invocation,
//!     &Rules::default(),
//!     &FsManifestStore::default(),
//!     &Context::default(),
//! )
//! .await?;
//! assert_eq!(outcome.version, "2.0.1");
//! # Ok(())
//! # }
//! ```

pub mod exec;
pub mod gate;
pub mod resolve;

pub use exec::{commit, StampOutcome};
pub use gate::{gate, gate_source, ValidatedInvocation, ValidationError, Violation};
pub use resolve::resolve;

use tracing::debug;

use crate::core::config::{Config, DEFAULT_TAG_REF_PREFIX};
use crate::core::manifest::{ManifestError, ManifestStore};
use crate::core::types::Invocation;
use crate::core::version::VersionError;

/// Execution context for a run.
///
/// Contains settings derived from CLI flags.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Quiet mode (minimal output).
    pub quiet: bool,
    /// Validate and resolve, but do not save.
    pub dry_run: bool,
}

/// Format rules applied while gating and resolving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rules {
    /// Namespace prefix identifying tag references.
    pub tag_ref_prefix: String,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            tag_ref_prefix: DEFAULT_TAG_REF_PREFIX.to_string(),
        }
    }
}

impl From<&Config> for Rules {
    fn from(config: &Config) -> Self {
        Self {
            tag_ref_prefix: config.tag_ref_prefix(),
        }
    }
}

/// Errors from engine operations.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Parameters failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The version could not be resolved.
    #[error("version resolution failed: {0}")]
    Version(#[from] VersionError),

    /// The manifest could not be loaded or saved.
    #[error(transparent)]
    Manifest(#[from] ManifestError),
}

/// Run the full pipeline for one invocation.
///
/// # Errors
///
/// Returns `EngineError::Validation` before anything is written if any
/// parameter is invalid, otherwise the first load, resolve, or save failure.
pub async fn run(
    invocation: &Invocation,
    rules: &Rules,
    store: &dyn ManifestStore,
    ctx: &Context,
) -> Result<StampOutcome, EngineError> {
    // 1. Gate
    let validated = gate(invocation, rules, store).await?;

    // 2. Resolve
    let version = resolve(&validated.invocation.source, &rules.tag_ref_prefix)?;
    debug!(%version, "resolved version");

    // 3. Commit
    let outcome = commit(&validated, &version, store, ctx).await?;
    debug!(written = outcome.written, "commit finished");

    Ok(outcome)
}
