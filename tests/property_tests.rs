//! Property-based tests for version resolution.
//!
//! These tests use proptest to verify invariants hold across
//! randomly generated versions.

use proptest::prelude::*;

use release_stamp::core::config::DEFAULT_TAG_REF_PREFIX;
use release_stamp::core::types::VersionSource;
use release_stamp::core::version;
use release_stamp::engine::{gate_source, resolve, Rules};

/// Strategy for numeric identifiers without leading zeros.
fn numeric() -> impl Strategy<Value = u64> {
    0u64..100_000
}

/// Strategy for a single pre-release or build identifier.
fn identifier() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z][a-zA-Z0-9-]{0,8}",
        numeric().prop_map(|n| n.to_string()),
    ]
}

/// Strategy for canonical versions (no build metadata).
fn canonical_version() -> impl Strategy<Value = String> {
    (
        numeric(),
        numeric(),
        numeric(),
        prop::collection::vec(identifier(), 0..3),
    )
        .prop_map(|(major, minor, patch, pre)| {
            if pre.is_empty() {
                format!("{major}.{minor}.{patch}")
            } else {
                format!("{major}.{minor}.{patch}-{}", pre.join("."))
            }
        })
}

proptest! {
    #[test]
    fn ref_resolves_to_clean_version(v in canonical_version(), prefixed in any::<bool>()) {
        let tag = if prefixed { format!("v{v}") } else { v.clone() };
        let source = VersionSource::from_ref(format!("refs/tags/{tag}"));

        prop_assert!(gate_source(&source, &Rules::default()).is_ok());
        prop_assert_eq!(resolve(&source, DEFAULT_TAG_REF_PREFIX).unwrap(), v);
    }

    #[test]
    fn tag_resolves_to_clean_version(v in canonical_version()) {
        let source = VersionSource::from_tag(v.clone());

        prop_assert!(gate_source(&source, &Rules::default()).is_ok());
        prop_assert_eq!(resolve(&source, DEFAULT_TAG_REF_PREFIX).unwrap(), v);
    }

    #[test]
    fn clean_is_idempotent(
        v in canonical_version(),
        build in prop::collection::vec("[a-zA-Z0-9]{1,6}", 0..3),
    ) {
        let input = if build.is_empty() { v.clone() } else { format!("{v}+{}", build.join(".")) };
        let once = version::clean(&input).unwrap();

        prop_assert_eq!(&once, &v);
        prop_assert_eq!(version::clean(&once).unwrap(), once);
    }

    #[test]
    fn bare_version_as_ref_is_rejected(v in canonical_version()) {
        let source = VersionSource::from_ref(format!("v{v}"));
        prop_assert!(gate_source(&source, &Rules::default()).is_err());
    }
}
