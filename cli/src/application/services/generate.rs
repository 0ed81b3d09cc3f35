//! Application service — the full generate use-case.
//!
//! validate → workspace → materialize → archive → publish (optional) → respond.
//! Shared by the `starter generate` command and the HTTP service.

use anyhow::{Context, Result};
use starter_common::{GenerateProjectResponse, ProjectRequest, download_url};

use crate::application::ports::{
    AccountLookup, CommandRunner, ProgressReporter, ProjectArchiver, ProjectFs, Scaffolder,
};
use crate::application::services::materialize::materialize;
use crate::application::services::publish::{
    RemoteTarget, publish_local, publish_to_remote_folder,
};
use crate::application::workspace::{DataDirs, ProjectWorkspace};
use crate::domain::validate_request;

/// The adapters a generation run is composed from.
pub struct Generator<R, S, A, F, L> {
    pub runner: R,
    pub scaffolder: S,
    pub archiver: A,
    pub fs: F,
    pub accounts: L,
}

impl<R, S, A, F, L> Generator<R, S, A, F, L>
where
    R: CommandRunner,
    S: Scaffolder,
    A: ProjectArchiver,
    F: ProjectFs,
    L: AccountLookup,
{
    /// Generate, package and optionally publish the project `request`
    /// describes.
    ///
    /// `fallback_token` is the host-configured token used for a remote
    /// publish when the request carries none. When `create_git_repo` is set
    /// and no token resolves, a local-only repository is created instead.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::domain::ProjectError`] validation variant before any
    /// side effect, or the first failure of scaffolding, archiving or a
    /// remote publish. Local publish failures never surface here.
    pub async fn generate(
        &self,
        reporter: &impl ProgressReporter,
        dirs: &DataDirs,
        request: &ProjectRequest,
        fallback_token: Option<&str>,
    ) -> Result<GenerateProjectResponse> {
        validate_request(request)?;
        let name = request.agent_name.as_str();
        tracing::info!(agent_name = %name, tools = request.tools.len(), "generating project");

        let workspace = ProjectWorkspace::acquire(&self.fs, &dirs.projects)?;
        let project = materialize(
            &self.scaffolder,
            &self.fs,
            reporter,
            request,
            workspace.path(),
        )
        .await?;

        reporter.step("packaging archive...");
        let archive_path = dirs.archive_path(name);
        self.archiver
            .archive(&project.root, &archive_path)
            .await
            .with_context(|| format!("archiving {}", project.root.display()))?;
        reporter.success(&format!("archive written to {}", archive_path.display()));

        let (git_repo_url, git_folder_name) = if request.create_git_repo {
            let target = RemoteTarget::from_request(request, fallback_token);
            if target.token.is_some() {
                let published = publish_to_remote_folder(
                    &self.runner,
                    &self.accounts,
                    &self.fs,
                    reporter,
                    &project.root,
                    &target,
                )
                .await?;
                (Some(published.remote_url), Some(published.folder_name))
            } else {
                let url = publish_local(
                    &self.runner,
                    &self.fs,
                    reporter,
                    &project.root,
                    &dirs.local_repo_path(name),
                )
                .await;
                (url, None)
            }
        } else {
            (None, None)
        };

        tracing::info!(agent_name = %name, files = project.files, "project generated");
        Ok(GenerateProjectResponse {
            project_name: name.to_string(),
            download_url: download_url(name),
            git_repo_url,
            git_folder_name,
            files_generated: project.files,
            message: format!("Project '{name}' generated successfully!"),
        })
    }
}
