//! Zip packaging — implements `ProjectArchiver`.

use std::fs::File;
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::application::ports::ProjectArchiver;

/// Deflate-compressed zip archives rooted at the project folder name.
///
/// Entries are written in sorted path order with explicit directory entries.
/// The archive is assembled in a temporary file next to the destination and
/// renamed into place, so a reader never sees a partial archive.
#[derive(Debug, Default, Clone, Copy)]
pub struct ZipArchiver;

impl ProjectArchiver for ZipArchiver {
    async fn archive(&self, project_dir: &Path, archive_path: &Path) -> Result<()> {
        let project_dir = project_dir.to_path_buf();
        let archive_path = archive_path.to_path_buf();
        tokio::task::spawn_blocking(move || write_archive(&project_dir, &archive_path))
            .await
            .context("spawn_blocking for archive")?
    }
}

/// Every path under `root`, sorted, directories before their contents.
fn walk_sorted(root: &Path) -> Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    let mut entries: Vec<PathBuf> = std::fs::read_dir(root)
        .with_context(|| format!("reading {}", root.display()))?
        .map(|e| e.map(|e| e.path()))
        .collect::<io::Result<_>>()
        .with_context(|| format!("reading {}", root.display()))?;
    entries.sort();
    for path in entries {
        let is_dir = std::fs::symlink_metadata(&path)
            .with_context(|| format!("stat {}", path.display()))?
            .is_dir();
        out.push(path.clone());
        if is_dir {
            out.extend(walk_sorted(&path)?);
        }
    }
    Ok(out)
}

#[cfg(unix)]
fn mode_of(meta: &std::fs::Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt as _;
    meta.permissions().mode() & 0o7777
}

#[cfg(not(unix))]
fn mode_of(meta: &std::fs::Metadata) -> u32 {
    if meta.is_dir() { 0o755 } else { 0o644 }
}

fn entry_options(mode: u32) -> SimpleFileOptions {
    SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(mode)
}

fn entry_name(base: &str, rel: &Path) -> String {
    let mut name = base.to_string();
    for part in rel.iter() {
        name.push('/');
        name.push_str(&part.to_string_lossy());
    }
    name
}

fn write_archive(project_dir: &Path, archive_path: &Path) -> Result<()> {
    let base = project_dir
        .file_name()
        .with_context(|| format!("{} has no folder name", project_dir.display()))?
        .to_string_lossy()
        .into_owned();
    let parent = archive_path
        .parent()
        .with_context(|| format!("{} has no parent directory", archive_path.display()))?;
    std::fs::create_dir_all(parent)
        .with_context(|| format!("creating directory {}", parent.display()))?;

    let tmp = tempfile::NamedTempFile::new_in(parent)
        .with_context(|| format!("creating temp file in {}", parent.display()))?;
    let mut zip = ZipWriter::new(tmp.reopen().context("reopening temp archive")?);

    let root_meta = std::fs::metadata(project_dir)
        .with_context(|| format!("stat {}", project_dir.display()))?;
    zip.add_directory(format!("{base}/"), entry_options(mode_of(&root_meta)))
        .context("adding root directory entry")?;

    for path in walk_sorted(project_dir)? {
        let rel = path
            .strip_prefix(project_dir)
            .with_context(|| format!("{} is outside the project", path.display()))?;
        let name = entry_name(&base, rel);
        let meta = std::fs::metadata(&path).with_context(|| format!("stat {}", path.display()))?;
        let opts = entry_options(mode_of(&meta));
        if meta.is_dir() {
            zip.add_directory(format!("{name}/"), opts)
                .with_context(|| format!("adding directory {name}"))?;
        } else {
            zip.start_file(name.clone(), opts)
                .with_context(|| format!("adding file {name}"))?;
            let mut src = File::open(&path).with_context(|| format!("opening {}", path.display()))?;
            io::copy(&mut src, &mut zip).with_context(|| format!("compressing {name}"))?;
        }
    }

    let mut file = zip.finish().context("finalizing archive")?;
    file.flush().context("flushing archive")?;
    tmp.persist(archive_path)
        .with_context(|| format!("moving archive to {}", archive_path.display()))?;
    Ok(())
}
