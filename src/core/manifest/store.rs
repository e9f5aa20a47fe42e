//! core::manifest::store
//!
//! Loading and saving manifests.
//!
//! # Design
//!
//! The `ManifestStore` trait is async because every operation is file I/O.
//! The pipeline awaits each call before starting the next, so there is never
//! more than one outstanding operation against a manifest.
//!
//! [`FsManifestStore`] saves through a temp file in the same directory
//! followed by a rename, so a failed save leaves the previous file intact.
//! A symlinked manifest is resolved first so the rename lands on the link
//! target, and the target's permissions are copied onto the temp file.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use super::{Manifest, ManifestError};

/// File name used when configuration does not override it.
pub const DEFAULT_MANIFEST_FILE: &str = "package.json";

/// Access to manifests stored in directories.
#[async_trait]
pub trait ManifestStore: Send + Sync {
    /// Path of the manifest file inside `dir`.
    fn manifest_path(&self, dir: &Path) -> PathBuf;

    /// Whether something exists at the manifest path inside `dir`.
    ///
    /// An I/O failure while checking is an error, not `false`.
    async fn exists(&self, dir: &Path) -> Result<bool, ManifestError>;

    /// Load the manifest stored in `dir`.
    async fn load(&self, dir: &Path) -> Result<Manifest, ManifestError>;

    /// Persist `manifest` to the path it was loaded from.
    ///
    /// Returns `false` when the rendered document matches what was loaded
    /// and nothing was written.
    async fn save(&self, manifest: &Manifest) -> Result<bool, ManifestError>;
}

/// Filesystem-backed manifest store.
#[derive(Debug, Clone)]
pub struct FsManifestStore {
    file_name: String,
}

impl FsManifestStore {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }
}

impl Default for FsManifestStore {
    fn default() -> Self {
        Self::new(DEFAULT_MANIFEST_FILE)
    }
}

#[async_trait]
impl ManifestStore for FsManifestStore {
    fn manifest_path(&self, dir: &Path) -> PathBuf {
        dir.join(&self.file_name)
    }

    async fn exists(&self, dir: &Path) -> Result<bool, ManifestError> {
        let path = self.manifest_path(dir);
        fs::try_exists(&path)
            .await
            .map_err(|e| ManifestError::ReadError { path, source: e })
    }

    async fn load(&self, dir: &Path) -> Result<Manifest, ManifestError> {
        let path = self.manifest_path(dir);
        let text = match fs::read_to_string(&path).await {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(ManifestError::NotFound { path });
            }
            Err(e) => return Err(ManifestError::ReadError { path, source: e }),
        };

        Manifest::parse(path, &text)
    }

    async fn save(&self, manifest: &Manifest) -> Result<bool, ManifestError> {
        if !manifest.is_modified() {
            return Ok(false);
        }

        let path = manifest.path();
        let target = match fs::canonicalize(path).await {
            Ok(target) => target,
            Err(e) if e.kind() == ErrorKind::NotFound => path.to_path_buf(),
            Err(e) => {
                return Err(ManifestError::WriteError {
                    path: path.to_path_buf(),
                    source: e,
                })
            }
        };
        let permissions = fs::metadata(&target).await.ok().map(|m| m.permissions());

        let mut temp_name = target.file_name().unwrap_or_default().to_os_string();
        temp_name.push(".tmp");
        let temp_path = target.with_file_name(temp_name);

        let result: std::io::Result<()> = async {
            fs::write(&temp_path, manifest.render()).await?;
            fs::File::open(&temp_path).await?.sync_all().await?;
            if let Some(permissions) = permissions {
                fs::set_permissions(&temp_path, permissions).await?;
            }
            fs::rename(&temp_path, &target).await
        }
        .await;

        if let Err(e) = result {
            let _ = fs::remove_file(&temp_path).await;
            return Err(ManifestError::WriteError {
                path: path.to_path_buf(),
                source: e,
            });
        }

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_missing_manifest_is_not_found() {
        let dir = TempDir::new().unwrap();
        let store = FsManifestStore::default();

        assert!(!store.exists(dir.path()).await.unwrap());
        let err = store.load(dir.path()).await.unwrap_err();
        assert!(matches!(err, ManifestError::NotFound { .. }));
    }

    #[tokio::test]
    async fn save_writes_changed_manifest() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("package.json");
        std::fs::write(&path, "{\n  \"name\": \"pkg\",\n  \"version\": \"1.0.0\"\n}\n").unwrap();

        let store = FsManifestStore::default();
        let mut manifest = store.load(dir.path()).await.unwrap();
        manifest.set_version("1.0.1");

        assert!(store.save(&manifest).await.unwrap());
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "{\n  \"name\": \"pkg\",\n  \"version\": \"1.0.1\"\n}\n"
        );
        assert!(!dir.path().join("package.json.tmp").exists());
    }

    #[tokio::test]
    async fn save_skips_unchanged_manifest() {
        let dir = TempDir::new().unwrap();
        // Trailing whitespace differences alone do not trigger a write.
        let original = "{\n  \"version\": \"1.0.0\"\n}\n\n";
        std::fs::write(dir.path().join("package.json"), original).unwrap();

        let store = FsManifestStore::default();
        let manifest = store.load(dir.path()).await.unwrap();

        assert!(!store.save(&manifest).await.unwrap());
        assert_eq!(
            std::fs::read_to_string(dir.path().join("package.json")).unwrap(),
            original
        );
    }

    #[tokio::test]
    async fn custom_file_name() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("manifest.json"), "{\"version\":\"0.1.0\"}").unwrap();

        let store = FsManifestStore::new("manifest.json");
        assert!(store.exists(dir.path()).await.unwrap());
        let manifest = store.load(dir.path()).await.unwrap();
        assert_eq!(manifest.version(), Some("0.1.0"));
    }

    #[tokio::test]
    async fn exists_reports_io_failure() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("not-a-dir");
        std::fs::write(&file, "").unwrap();

        // `not-a-dir/package.json` cannot be inspected because its parent is a file.
        let err = FsManifestStore::default().exists(&file).await.unwrap_err();
        assert!(matches!(err, ManifestError::ReadError { .. }));
    }

    #[tokio::test]
    async fn save_keeps_bom_manifest_with_same_version() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("package.json");
        let original = "\u{feff}{\n  \"version\": \"1.0.0\"\n}\n";
        std::fs::write(&path, original).unwrap();

        let store = FsManifestStore::default();
        let mut manifest = store.load(dir.path()).await.unwrap();
        manifest.set_version("1.0.0");

        assert!(!store.save(&manifest).await.unwrap());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), original);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn save_writes_through_symlink() {
        let dir = TempDir::new().unwrap();
        let real = dir.path().join("real.json");
        let link = dir.path().join("package.json");
        std::fs::write(&real, "{\"version\":\"1.0.0\"}").unwrap();
        std::os::unix::fs::symlink(&real, &link).unwrap();

        let store = FsManifestStore::default();
        let mut manifest = store.load(dir.path()).await.unwrap();
        manifest.set_version("2.0.0");
        assert!(store.save(&manifest).await.unwrap());

        assert!(std::fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(std::fs::read_to_string(&real).unwrap(), "{\"version\":\"2.0.0\"}");
        assert!(!dir.path().join("real.json.tmp").exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn save_keeps_file_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("package.json");
        std::fs::write(&path, "{\"version\":\"1.0.0\"}").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o664)).unwrap();

        let store = FsManifestStore::default();
        let mut manifest = store.load(dir.path()).await.unwrap();
        manifest.set_version("1.1.0");
        assert!(store.save(&manifest).await.unwrap());

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o664);
    }
}
