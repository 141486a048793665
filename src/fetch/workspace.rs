//! Per-run scratch workspace.
//!
//! Layout:
//!
//! ```text
//! <root>/
//!   <crate>/      one shallow clone per manifest entry
//!   diagrams/     generator output and index.html
//! ```

use std::io;
use std::path::{Component, Path, PathBuf};

use tracing::debug;

use crate::error::WorkspaceError;

/// Name of the output directory inside the workspace.
pub const DIAGRAMS_DIR: &str = "diagrams";

/// Default workspace root.
pub const DEFAULT_WORKSPACE: &str = "/tmp/gen_diagrams_remote";

/// An initialized, empty scratch workspace with an absolute root.
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    /// Wipes `root` (file or directory) and recreates it empty.
    ///
    /// # Errors
    ///
    /// Returns `WorkspaceError::Init` if the path cannot be made absolute,
    /// contains `..`, is the filesystem root, or cannot be removed or
    /// created.
    pub fn init(root: &Path) -> Result<Self, WorkspaceError> {
        let init_err = |source| WorkspaceError::Init {
            path: root.to_path_buf(),
            source,
        };

        // `absolute` keeps `..`, so `/tmp/..` would otherwise wipe `/`.
        if root.components().any(|c| c == Component::ParentDir) {
            return Err(init_err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "workspace path must not contain '..'",
            )));
        }

        let root = std::path::absolute(root).map_err(init_err)?;
        if root.parent().is_none() {
            return Err(init_err(io::Error::other(
                "refusing to use the filesystem root as a workspace",
            )));
        }

        match std::fs::symlink_metadata(&root) {
            Ok(meta) if meta.is_dir() => std::fs::remove_dir_all(&root).map_err(init_err)?,
            Ok(_) => std::fs::remove_file(&root).map_err(init_err)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(init_err(e)),
        }
        std::fs::create_dir_all(&root).map_err(init_err)?;

        debug!(root = %root.display(), "workspace initialized");
        Ok(Self { root })
    }

    /// Absolute workspace root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Clone destination for the crate named `name`.
    #[must_use]
    pub fn clone_dir(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Directory the diagram generator writes into.
    #[must_use]
    pub fn diagrams_dir(&self) -> PathBuf {
        self.root.join(DIAGRAMS_DIR)
    }

    /// Creates the output directory.
    ///
    /// # Errors
    ///
    /// Returns `WorkspaceError::OutputDir` if it cannot be created.
    pub fn create_diagrams_dir(&self) -> Result<PathBuf, WorkspaceError> {
        let dir = self.diagrams_dir();
        std::fs::create_dir_all(&dir).map_err(|source| WorkspaceError::OutputDir {
            path: dir.clone(),
            source,
        })?;
        Ok(dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_creates_missing_root() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("a/b/work");
        let ws = Workspace::init(&root).unwrap();
        assert!(ws.root().is_dir());
        assert!(ws.root().is_absolute());
    }

    #[test]
    fn init_wipes_previous_contents() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("work");
        std::fs::create_dir_all(root.join("old/nested")).unwrap();
        std::fs::write(root.join("old/nested/file.txt"), "stale").unwrap();

        let ws = Workspace::init(&root).unwrap();
        assert_eq!(std::fs::read_dir(ws.root()).unwrap().count(), 0);
    }

    #[test]
    fn init_replaces_plain_file() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("work");
        std::fs::write(&root, "not a dir").unwrap();

        let ws = Workspace::init(&root).unwrap();
        assert!(ws.root().is_dir());
    }

    #[test]
    fn init_refuses_filesystem_root() {
        let err = Workspace::init(Path::new("/")).unwrap_err();
        assert!(matches!(err, WorkspaceError::Init { .. }));
    }

    #[test]
    fn init_refuses_parent_of_tmp() {
        let err = Workspace::init(Path::new("/tmp/..")).unwrap_err();
        assert!(matches!(err, WorkspaceError::Init { .. }));
        assert!(Path::new("/tmp").is_dir());
    }

    #[test]
    fn init_refuses_parent_dir_components() {
        let tmp = tempfile::tempdir().unwrap();
        let keep = tmp.path().join("a");
        std::fs::create_dir_all(keep.join("b")).unwrap();
        std::fs::write(keep.join("precious.txt"), "keep me").unwrap();

        let err = Workspace::init(&keep.join("b/..")).unwrap_err();
        assert!(err.to_string().contains("must not contain '..'"));
        assert!(keep.join("precious.txt").exists());
        assert!(keep.join("b").is_dir());
    }

    #[test]
    fn layout_paths() {
        let tmp = tempfile::tempdir().unwrap();
        let ws = Workspace::init(tmp.path()).unwrap();
        assert_eq!(ws.clone_dir("log"), ws.root().join("log"));
        assert_eq!(ws.diagrams_dir(), ws.root().join("diagrams"));

        let out = ws.create_diagrams_dir().unwrap();
        assert!(out.is_dir());
    }
}
