//! engine::exec
//!
//! The commit step: the only place a manifest is written.
//!
//! # Executor Contract
//!
//! The executor MUST:
//! 1. Run only with a [`ValidatedInvocation`]
//! 2. Load the manifest itself (the trial load made while gating is not reused)
//! 3. Replace `version` and nothing else
//! 4. Persist through the [`ManifestStore`], or skip persisting on a dry run
//!
//! There is no retry and no backup step. A failed load or save ends the run.

use std::path::PathBuf;

use tracing::debug;

use super::gate::ValidatedInvocation;
use super::Context;
use crate::core::manifest::{ManifestError, ManifestStore};

/// Result of a commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StampOutcome {
    /// Manifest file that was (or on a dry run, would be) written.
    pub manifest_path: PathBuf,
    /// `version` before stamping, if the manifest had one.
    pub previous_version: Option<String>,
    /// The version now in the manifest.
    pub version: String,
    /// Whether the manifest file was rewritten.
    pub written: bool,
}

/// Write `version` into the manifest located by `validated`.
///
/// # Errors
///
/// Returns a `ManifestError` if the manifest cannot be loaded or saved.
pub async fn commit(
    validated: &ValidatedInvocation,
    version: &str,
    store: &dyn ManifestStore,
    ctx: &Context,
) -> Result<StampOutcome, ManifestError> {
    debug!(dir = %validated.manifest_dir.display(), "loading manifest");
    let mut manifest = store.load(&validated.manifest_dir).await?;

    let previous_version = manifest.version().map(str::to_string);
    manifest.set_version(version);

    let written = if ctx.dry_run {
        debug!("dry run, skipping save");
        false
    } else {
        debug!(path = %manifest.path().display(), "saving manifest");
        store.save(&manifest).await?
    };

    Ok(StampOutcome {
        manifest_path: manifest.path().to_path_buf(),
        previous_version,
        version: version.to_string(),
        written,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::manifest::{FsManifestStore, Manifest};
    use crate::core::types::{Invocation, VersionSource};
    use async_trait::async_trait;
    use std::io;
    use std::path::Path;
    use tempfile::TempDir;

    /// Store whose saves always fail.
    struct ReadOnlyStore(FsManifestStore);

    #[async_trait]
    impl ManifestStore for ReadOnlyStore {
        fn manifest_path(&self, dir: &Path) -> PathBuf {
            self.0.manifest_path(dir)
        }

        async fn exists(&self, dir: &Path) -> Result<bool, ManifestError> {
            self.0.exists(dir).await
        }

        async fn load(&self, dir: &Path) -> Result<Manifest, ManifestError> {
            self.0.load(dir).await
        }

        async fn save(&self, manifest: &Manifest) -> Result<bool, ManifestError> {
            Err(ManifestError::WriteError {
                path: manifest.path().to_path_buf(),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "read-only"),
            })
        }
    }

    const ORIGINAL: &str = "{\n  \"name\": \"pkg\",\n  \"version\": \"1.0.0\"\n}\n";

    fn validated(ws: &TempDir) -> ValidatedInvocation {
        ValidatedInvocation {
            invocation: Invocation::new(VersionSource::from_tag("2.0.0"), ws.path(), ""),
            manifest_dir: ws.path().to_path_buf(),
        }
    }

    fn setup() -> TempDir {
        let ws = TempDir::new().unwrap();
        std::fs::write(ws.path().join("package.json"), ORIGINAL).unwrap();
        ws
    }

    #[tokio::test]
    async fn commit_rewrites_version() {
        let ws = setup();
        let outcome = commit(&validated(&ws), "2.0.0", &FsManifestStore::default(), &Context::default())
            .await
            .unwrap();

        assert!(outcome.written);
        assert_eq!(outcome.previous_version.as_deref(), Some("1.0.0"));
        assert_eq!(outcome.manifest_path, ws.path().join("package.json"));
        assert_eq!(
            std::fs::read_to_string(ws.path().join("package.json")).unwrap(),
            "{\n  \"name\": \"pkg\",\n  \"version\": \"2.0.0\"\n}\n"
        );
    }

    #[tokio::test]
    async fn dry_run_leaves_manifest_alone() {
        let ws = setup();
        let ctx = Context {
            dry_run: true,
            ..Context::default()
        };

        let outcome = commit(&validated(&ws), "2.0.0", &FsManifestStore::default(), &ctx)
            .await
            .unwrap();

        assert!(!outcome.written);
        assert_eq!(outcome.version, "2.0.0");
        assert_eq!(
            std::fs::read_to_string(ws.path().join("package.json")).unwrap(),
            ORIGINAL
        );
    }

    #[tokio::test]
    async fn same_version_is_not_rewritten() {
        let ws = setup();
        let outcome = commit(&validated(&ws), "1.0.0", &FsManifestStore::default(), &Context::default())
            .await
            .unwrap();

        assert!(!outcome.written);
    }

    #[tokio::test]
    async fn manifest_removed_after_gating_fails_load() {
        let ws = setup();
        let validated = validated(&ws);
        std::fs::remove_file(ws.path().join("package.json")).unwrap();

        let err = commit(&validated, "2.0.0", &FsManifestStore::default(), &Context::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ManifestError::NotFound { .. }));
    }

    #[tokio::test]
    async fn save_failure_is_reported() {
        let ws = setup();
        let store = ReadOnlyStore(FsManifestStore::default());

        let err = commit(&validated(&ws), "2.0.0", &store, &Context::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ManifestError::WriteError { .. }));
        assert_eq!(
            std::fs::read_to_string(ws.path().join("package.json")).unwrap(),
            ORIGINAL
        );
    }
}
