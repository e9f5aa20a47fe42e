//! release-stamp - Stamp a package manifest with the version of a release tag
//!
//! Release pipelines are usually triggered by a tag. release-stamp takes
//! that tag (as a ref such as `refs/tags/v2.0.1`, or as a bare version),
//! turns it into a canonical semantic version, and writes it into the
//! `version` field of a `package.json` inside a workspace.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to engine)
//! - [`engine`] - Orchestrates Gate → Resolve → Commit
//! - [`core`] - Domain types, version and manifest collaborators, config
//!
//! # Correctness Invariants
//!
//! 1. Every parameter is validated before the manifest is written
//! 2. Only the `version` field of the manifest changes
//! 3. A failed run never leaves a partially written manifest

pub mod cli;
pub mod core;
pub mod engine;
