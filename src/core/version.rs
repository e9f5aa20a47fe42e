//! core::version
//!
//! Semantic-version checks and canonicalization.
//!
//! # Grammar
//!
//! Versions follow `MAJOR.MINOR.PATCH[-PRERELEASE][+BUILD]`, parsed by the
//! `semver` crate. Two entry points sit on top of it:
//!
//! - [`parse`] is the strict check: surrounding whitespace is ignored and a
//!   single leading `v` is tolerated, nothing else.
//! - [`clean`] canonicalizes: any run of leading `=` or `v` characters is
//!   dropped and the result is printed without build metadata.
//!
//! # Example
//!
//! ```
//! use release_stamp::core::version;
//!
//! assert!(version::is_valid("v1.2.3"));
//! assert!(!version::is_valid("1.2"));
//!
//! assert_eq!(version::clean(" =v1.2.3 ").unwrap(), "1.2.3");
//! assert_eq!(version::clean("1.2.3-rc.1+build.5").unwrap(), "1.2.3-rc.1");
//! ```

use semver::{BuildMetadata, Version};
use thiserror::Error;

/// Inputs longer than this are rejected before parsing.
pub const MAX_LENGTH: usize = 256;

/// Largest component value that survives a round trip through a JSON number.
pub const MAX_SAFE_COMPONENT: u64 = (1 << 53) - 1;

/// Errors from version parsing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VersionError {
    #[error("version string is longer than {} characters", MAX_LENGTH)]
    TooLong,

    #[error("invalid semantic version '{input}': {message}")]
    Invalid { input: String, message: String },

    #[error("version component {0} exceeds the maximum safe integer")]
    ComponentTooLarge(u64),
}

/// Parse a version strictly.
///
/// Leading and trailing whitespace is ignored, as is one leading `v`.
pub fn parse(input: &str) -> Result<Version, VersionError> {
    if input.len() > MAX_LENGTH {
        return Err(VersionError::TooLong);
    }

    let trimmed = input.trim();
    let body = trimmed.strip_prefix('v').unwrap_or(trimmed);

    let version = Version::parse(body).map_err(|e| VersionError::Invalid {
        input: input.to_string(),
        message: e.to_string(),
    })?;

    for component in [version.major, version.minor, version.patch] {
        if component > MAX_SAFE_COMPONENT {
            return Err(VersionError::ComponentTooLarge(component));
        }
    }

    Ok(version)
}

/// Check whether `input` is a valid semantic version.
pub fn is_valid(input: &str) -> bool {
    parse(input).is_ok()
}

/// Produce the canonical string form of a version.
///
/// Idempotent: cleaning an already clean version returns it unchanged.
pub fn clean(input: &str) -> Result<String, VersionError> {
    let stripped = input.trim().trim_start_matches(['=', 'v']);
    let mut version = parse(stripped)?;
    version.build = BuildMetadata::EMPTY;
    Ok(version.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_plain_and_prefixed() {
        assert_eq!(parse("1.2.3").unwrap(), Version::new(1, 2, 3));
        assert_eq!(parse("v1.2.3").unwrap(), Version::new(1, 2, 3));
        assert_eq!(parse("  1.2.3\n").unwrap(), Version::new(1, 2, 3));
    }

    #[test]
    fn parse_rejects_malformed() {
        for input in ["", "1", "1.2", "1.2.3.4", "vv1.2.3", "=1.2.3", "01.2.3", "1.2.3-", "x.y.z"] {
            assert!(parse(input).is_err(), "{input:?} should be rejected");
        }
    }

    #[test]
    fn parse_rejects_overlong_input() {
        let input = format!("1.2.3-{}", "a".repeat(MAX_LENGTH));
        assert_eq!(parse(&input), Err(VersionError::TooLong));
    }

    #[test]
    fn parse_rejects_unsafe_components() {
        let input = format!("{}.0.0", MAX_SAFE_COMPONENT + 1);
        assert_eq!(
            parse(&input),
            Err(VersionError::ComponentTooLarge(MAX_SAFE_COMPONENT + 1))
        );
    }

    #[test]
    fn clean_strips_prefix_and_build() {
        assert_eq!(clean("v2.0.1").unwrap(), "2.0.1");
        assert_eq!(clean("==vv2.0.1").unwrap(), "2.0.1");
        assert_eq!(clean("3.1.0-beta.2").unwrap(), "3.1.0-beta.2");
        assert_eq!(clean("1.0.0+20240101").unwrap(), "1.0.0");
    }

    #[test]
    fn clean_is_idempotent() {
        for input in ["v1.2.3", "1.2.3-alpha.1+sha.abc", " 0.0.1 "] {
            let once = clean(input).unwrap();
            assert_eq!(clean(&once).unwrap(), once);
        }
    }

    #[test]
    fn clean_rejects_garbage() {
        assert!(clean("release-1").is_err());
    }
}
