//! core::paths
//!
//! Path routing for manifest locations.
//!
//! The manifest directory is always computed here so that validation and
//! the commit step agree on where the manifest lives.
//!
//! # Example
//!
//! ```
//! use release_stamp::core::paths::manifest_dir;
//! use std::path::{Path, PathBuf};
//!
//! assert_eq!(manifest_dir(Path::new("/repo"), ""), PathBuf::from("/repo"));
//! assert_eq!(
//!     manifest_dir(Path::new("/repo"), "packages/core"),
//!     PathBuf::from("/repo/packages/core")
//! );
//! ```

use std::path::{Path, PathBuf};

/// Directory holding the manifest: the workspace itself when `relative` is
/// empty, otherwise `relative` below it.
///
/// `relative` is always treated as relative. Leading separators are
/// dropped, so `/packages/core` names the same directory as
/// `packages/core`.
pub fn manifest_dir(workspace: &Path, relative: &str) -> PathBuf {
    let relative = relative.trim_start_matches(['/', '\\']);
    if relative.is_empty() {
        workspace.to_path_buf()
    } else {
        workspace.join(relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_relative_is_workspace_root() {
        assert_eq!(manifest_dir(Path::new("ws"), ""), PathBuf::from("ws"));
    }

    #[test]
    fn leading_separator_stays_inside_workspace() {
        assert_eq!(
            manifest_dir(Path::new("/repo"), "/packages/a"),
            PathBuf::from("/repo/packages/a")
        );
        assert_eq!(manifest_dir(Path::new("/repo"), "/"), PathBuf::from("/repo"));
    }
}
