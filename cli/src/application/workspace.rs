//! On-disk layout of the data directory and per-request workspaces.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::TempDir;

use crate::application::ports::ProjectFs;

/// `<root>/projects`, `<root>/downloads` and `<root>/repos`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataDirs {
    pub root: PathBuf,
    pub projects: PathBuf,
    pub downloads: PathBuf,
    pub repos: PathBuf,
}

impl DataDirs {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            projects: root.join("projects"),
            downloads: root.join("downloads"),
            repos: root.join("repos"),
            root,
        }
    }

    /// Create every directory of the layout.
    ///
    /// # Errors
    ///
    /// Returns an error if any directory cannot be created.
    pub fn ensure(&self, fs: &impl ProjectFs) -> Result<()> {
        for dir in [&self.projects, &self.downloads, &self.repos] {
            fs.create_dir_all(dir)?;
        }
        Ok(())
    }

    /// Where `<name>.zip` is written.
    #[must_use]
    pub fn archive_path(&self, agent_name: &str) -> PathBuf {
        self.downloads
            .join(starter_common::archive_file_name(agent_name))
    }

    /// Persistent target of a local-only publish.
    #[must_use]
    pub fn local_repo_path(&self, agent_name: &str) -> PathBuf {
        self.repos.join(agent_name)
    }
}

/// Scratch directory owning one request's generated project.
///
/// Removed when dropped, on success and on every error path.
#[derive(Debug)]
pub struct ProjectWorkspace {
    dir: TempDir,
}

impl ProjectWorkspace {
    /// Create a fresh workspace under `parent`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn acquire(fs: &impl ProjectFs, parent: &Path) -> Result<Self> {
        fs.create_dir_all(parent)?;
        let dir = tempfile::Builder::new()
            .prefix("project-")
            .tempdir_in(parent)
            .with_context(|| format!("creating workspace in {}", parent.display()))?;
        Ok(Self { dir })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}
