//! engine::resolve
//!
//! Resolve a version source into the canonical version string.
//!
//! A `Ref` source has the tag-ref prefix removed first; a `Tag` source is
//! used as given. Both then go through [`version::clean`].

use crate::core::types::{SourceKind, VersionSource};
use crate::core::version::{self, VersionError};

/// Remove the tag-ref prefix from the start of `raw`.
///
/// Returns `None` if `raw` does not start with `prefix`. Only the leading
/// occurrence is removed.
pub fn strip_tag_ref<'a>(raw: &'a str, prefix: &str) -> Option<&'a str> {
    raw.strip_prefix(prefix)
}

/// The part of the source that holds the version text.
pub fn version_text<'a>(source: &'a VersionSource, prefix: &str) -> &'a str {
    match source.kind {
        SourceKind::Ref => strip_tag_ref(&source.raw, prefix).unwrap_or(&source.raw),
        SourceKind::Tag => &source.raw,
    }
}

/// Resolve `source` to its canonical version.
///
/// # Errors
///
/// Returns a `VersionError` if the version text does not parse. Sources
/// that passed gating always resolve.
pub fn resolve(source: &VersionSource, prefix: &str) -> Result<String, VersionError> {
    version::clean(version_text(source, prefix))
}
