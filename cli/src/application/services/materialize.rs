//! Application service — turn a validated request into a project tree.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through injected port traits.

use std::path::{Path, PathBuf};

use anyhow::Result;
use starter_common::ProjectRequest;

use crate::application::ports::{ProgressReporter, ProjectFs, Scaffolder};
use crate::domain::{AgentSource, ProjectError, ScaffoldContext, TemplateError};

/// A fully rendered project tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterializedProject {
    pub root: PathBuf,
    pub files: usize,
}

/// Scaffold `<dest>/<agent_name>`, write its `agent.py`, and count its files.
///
/// Steps:
/// 1. Refuse an existing project directory
/// 2. Expand the skeleton via `Scaffolder`
/// 3. Verify no placeholder was left unrendered
/// 4. Write the agent document rendered from the request
/// 5. Count every regular file under the tree
///
/// # Errors
///
/// Returns [`ProjectError::AlreadyExists`] or [`ProjectError::ScaffoldFailed`]
/// (carrying the underlying diagnostic), or any filesystem error.
pub async fn materialize(
    scaffolder: &impl Scaffolder,
    fs: &impl ProjectFs,
    reporter: &impl ProgressReporter,
    request: &ProjectRequest,
    dest: &Path,
) -> Result<MaterializedProject> {
    let ctx = ScaffoldContext::for_project(&request.agent_name);
    let project_dir = dest.join(&ctx.project_name);
    if fs.exists(&project_dir) {
        return Err(ProjectError::AlreadyExists(project_dir.display().to_string()).into());
    }

    reporter.step(&format!("scaffolding '{}'...", ctx.project_name));
    let root = scaffolder
        .expand(&ctx, dest)
        .await
        .map_err(|e| ProjectError::ScaffoldFailed(format!("{e:#}")))?;

    let leftovers = fs.unrendered_files(&root).await?;
    if let Some(first) = leftovers.first() {
        let unrendered = TemplateError::Unrendered(first.display().to_string());
        return Err(ProjectError::ScaffoldFailed(unrendered.to_string()).into());
    }

    reporter.step("rendering agent source...");
    let agent_dir = root.join(&ctx.agent_directory);
    fs.create_dir_all(&agent_dir)?;
    fs.write(
        &agent_dir.join("agent.py"),
        &AgentSource::from_request(request).render(),
    )?;

    let files = fs.count_files(&root).await?;
    reporter.success(&format!("project '{}' created ({files} files)", ctx.project_name));
    Ok(MaterializedProject { root, files })
}
