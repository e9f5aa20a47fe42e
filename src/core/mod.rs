//! core
//!
//! Core domain types, collaborators, and configuration for release-stamp.
//!
//! # Modules
//!
//! - [`types`] - Strong types: SourceKind, VersionSource, Invocation, Field
//! - [`version`] - Semantic-version checks and canonicalization
//! - [`manifest`] - Manifest document, formatting, and storage
//! - [`config`] - Configuration schema and loading
//! - [`paths`] - Manifest location routing
//!
//! # Design Principles
//!
//! - Nothing in `core` reads process arguments
//! - Collaborators report failures as typed errors, never panics

pub mod config;
pub mod manifest;
pub mod paths;
pub mod types;
pub mod version;
