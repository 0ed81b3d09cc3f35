//! Project skeleton compiled into the binary — implements `Scaffolder`.
//!
//! At compile time, `include_dir!` embeds everything under `templates/`:
//!   - `base/`                        — files every project gets
//!   - `deployment/<target>/`         — overlay for one deployment target
//!
//! Both file contents and path segments may hold `{{ key }}` placeholders.
//! Overlay files replace base files with the same rendered path.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use include_dir::{Dir, DirEntry, File, include_dir};

use crate::application::ports::Scaffolder;
use crate::domain::ProjectError;
use crate::domain::template::{ScaffoldContext, render};

static SKELETON: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/templates");

/// Production `Scaffolder` backed by the embedded skeleton.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmbeddedSkeleton;

impl EmbeddedSkeleton {
    /// Render every skeleton file for `ctx`, keyed by path relative to the
    /// destination directory. Performs no I/O.
    ///
    /// # Errors
    ///
    /// Returns an error if the deployment target has no overlay or a file
    /// references an unknown template key.
    pub fn render_files(ctx: &ScaffoldContext) -> Result<BTreeMap<PathBuf, Vec<u8>>> {
        let overlay = format!("deployment/{}", ctx.deployment_target);
        let layers = [
            SKELETON
                .get_dir("base")
                .context("embedded skeleton has no base layer")?,
            SKELETON
                .get_dir(&overlay)
                .with_context(|| format!("unknown deployment target '{}'", ctx.deployment_target))?,
        ];

        let vars = ctx.vars();
        let mut rendered = BTreeMap::new();
        for layer in layers {
            let mut files = Vec::new();
            collect_files(layer, &mut files);
            for file in files {
                let rel = file.path().strip_prefix(layer.path()).with_context(|| {
                    format!("{} is outside {}", file.path().display(), layer.path().display())
                })?;
                let mut out = PathBuf::new();
                for part in rel.iter() {
                    let part = render(&part.to_string_lossy(), &vars)
                        .with_context(|| format!("rendering path {}", file.path().display()))?;
                    out.push(part);
                }
                let body = match file.contents_utf8() {
                    Some(text) => render(text, &vars)
                        .with_context(|| format!("rendering {}", file.path().display()))?
                        .into_bytes(),
                    None => file.contents().to_vec(),
                };
                rendered.insert(out, body);
            }
        }
        Ok(rendered)
    }
}

fn collect_files<'a>(dir: &'a Dir<'a>, out: &mut Vec<&'a File<'a>>) {
    for entry in dir.entries() {
        match entry {
            DirEntry::Dir(d) => collect_files(d, out),
            DirEntry::File(f) => out.push(f),
        }
    }
}

impl Scaffolder for EmbeddedSkeleton {
    async fn expand(&self, ctx: &ScaffoldContext, dest: &Path) -> Result<PathBuf> {
        let project_dir = dest.join(&ctx.project_name);
        if project_dir.exists() {
            return Err(ProjectError::AlreadyExists(project_dir.display().to_string()).into());
        }
        let files = Self::render_files(ctx)?;
        let dest = dest.to_path_buf();
        tokio::task::spawn_blocking(move || {
            for (rel, body) in &files {
                let path = dest.join(rel);
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent)
                        .with_context(|| format!("creating directory {}", parent.display()))?;
                }
                std::fs::write(&path, body)
                    .with_context(|| format!("writing {}", path.display()))?;
            }
            Ok::<(), anyhow::Error>(())
        })
        .await
        .context("spawn_blocking for skeleton expansion")??;
        Ok(project_dir)
    }
}
