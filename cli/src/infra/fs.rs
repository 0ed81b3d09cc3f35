//! Filesystem infrastructure — implements `ProjectFs`.
//!
//! Tree walks and copies run on the blocking thread pool.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::application::ports::ProjectFs;
use crate::domain::template::has_placeholder;

/// Production filesystem implementation of `ProjectFs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFs;

/// Every regular file under `root`, recursively.
fn regular_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    let mut pending = vec![root.to_path_buf()];
    while let Some(dir) = pending.pop() {
        for entry in std::fs::read_dir(&dir).with_context(|| format!("reading {}", dir.display()))? {
            let entry = entry.with_context(|| format!("reading {}", dir.display()))?;
            let kind = entry
                .file_type()
                .with_context(|| format!("stat {}", entry.path().display()))?;
            if kind.is_dir() {
                pending.push(entry.path());
            } else if kind.is_file() {
                out.push(entry.path());
            }
        }
    }
    out.sort();
    Ok(out)
}

fn copy_dir(src: &Path, dst: &Path, skip: &[&str]) -> Result<()> {
    std::fs::create_dir_all(dst).with_context(|| format!("creating directory {}", dst.display()))?;
    for entry in std::fs::read_dir(src).with_context(|| format!("reading {}", src.display()))? {
        let entry = entry.with_context(|| format!("reading {}", src.display()))?;
        if skip.iter().any(|s| entry.file_name() == *s) {
            continue;
        }
        let from = entry.path();
        let to = dst.join(entry.file_name());
        if entry
            .file_type()
            .with_context(|| format!("stat {}", from.display()))?
            .is_dir()
        {
            copy_dir(&from, &to, &[])?;
        } else {
            std::fs::copy(&from, &to)
                .with_context(|| format!("copying {} to {}", from.display(), to.display()))?;
        }
    }
    Ok(())
}

impl ProjectFs for LocalFs {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        std::fs::create_dir_all(path)
            .with_context(|| format!("creating directory {}", path.display()))
    }

    fn remove_dir_all(&self, path: &Path) -> Result<()> {
        std::fs::remove_dir_all(path)
            .with_context(|| format!("removing directory {}", path.display()))
    }

    fn write(&self, path: &Path, content: &str) -> Result<()> {
        std::fs::write(path, content).with_context(|| format!("writing file {}", path.display()))
    }

    async fn copy_tree(&self, src: &Path, dst: &Path, skip: &[&str]) -> Result<()> {
        let src = src.to_path_buf();
        let dst = dst.to_path_buf();
        let skip: Vec<String> = skip.iter().map(ToString::to_string).collect();
        tokio::task::spawn_blocking(move || {
            let skip: Vec<&str> = skip.iter().map(String::as_str).collect();
            copy_dir(&src, &dst, &skip)
        })
        .await
        .context("spawn_blocking for copy_tree")?
    }

    async fn count_files(&self, root: &Path) -> Result<usize> {
        let root = root.to_path_buf();
        tokio::task::spawn_blocking(move || regular_files(&root).map(|files| files.len()))
            .await
            .context("spawn_blocking for count_files")?
    }

    async fn unrendered_files(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let root = root.to_path_buf();
        tokio::task::spawn_blocking(move || {
            let mut hits = Vec::new();
            for path in regular_files(&root)? {
                let bytes =
                    std::fs::read(&path).with_context(|| format!("reading {}", path.display()))?;
                let in_body = std::str::from_utf8(&bytes).is_ok_and(has_placeholder);
                if in_body || has_placeholder(&path.to_string_lossy()) {
                    hits.push(path);
                }
            }
            Ok(hits)
        })
        .await
        .context("spawn_blocking for unrendered_files")?
    }
}
