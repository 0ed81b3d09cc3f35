//! Application service — publish a generated project to a git repository.
//!
//! Two variants:
//! - [`publish_local`]: best-effort standalone repository on disk. Failures
//!   are logged and become `None`.
//! - [`publish_to_remote_folder`]: push the project as a new folder of an
//!   existing GitHub repository. Failures propagate.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use std::path::Path;

use anyhow::{Context, Result};
use rand::Rng as _;
use starter_common::{ProjectRequest, publish_folder_name};

use crate::application::ports::{AccountLookup, CommandRunner, ProgressReporter, ProjectFs};
use crate::domain::publish::{
    GIT_USER_EMAIL, GIT_USER_NAME, INITIAL_COMMIT_MESSAGE, SKIPPED_ENTRIES, authenticated_url,
    folder_commit_message, redact, resolve_token,
};
use crate::domain::{PublishError, PublishResult, RemoteHost, RemoteRepo};

/// Where and how a remote-folder publish pushes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteTarget {
    pub agent_name: String,
    pub repo_name: String,
    pub org: Option<String>,
    pub host: RemoteHost,
    pub branch: String,
    pub token: Option<String>,
}

impl RemoteTarget {
    /// Target described by `request`, with `fallback_token` used when the
    /// request carries none.
    #[must_use]
    pub fn from_request(request: &ProjectRequest, fallback_token: Option<&str>) -> Self {
        Self {
            agent_name: request.agent_name.clone(),
            repo_name: request.repo_name().to_string(),
            org: request
                .github_org
                .clone()
                .filter(|o| !o.trim().is_empty()),
            host: RemoteHost::new(request.github_enterprise_url.as_deref()),
            branch: request.branch().to_string(),
            token: resolve_token(request.github_token.as_deref(), fallback_token),
        }
    }
}

/// Random `<agent_name>-<NNNN>` folder name.
#[must_use]
pub fn random_folder_name(agent_name: &str) -> String {
    publish_folder_name(agent_name, rand::rng().random_range(0..10_000_u16))
}

/// Run `git` with `args`, failing with [`PublishError::GitFailed`] on a
/// non-zero exit. `token` is scrubbed from the captured stderr.
async fn git(
    runner: &impl CommandRunner,
    args: &[&str],
    step: &'static str,
    token: Option<&str>,
) -> Result<()> {
    let out = runner
        .run("git", args)
        .await
        .with_context(|| format!("git {step}"))?;
    if !out.status.success() {
        let stderr = String::from_utf8_lossy(&out.stderr);
        let stderr = redact(stderr.trim(), token.unwrap_or_default());
        return Err(PublishError::GitFailed { step, stderr }.into());
    }
    Ok(())
}

async fn configure_identity(runner: &impl CommandRunner, dir: &str) -> Result<()> {
    git(
        runner,
        &["-C", dir, "config", "user.name", GIT_USER_NAME],
        "config",
        None,
    )
    .await?;
    git(
        runner,
        &["-C", dir, "config", "user.email", GIT_USER_EMAIL],
        "config",
        None,
    )
    .await
}

async fn init_local_repo(
    runner: &impl CommandRunner,
    fs: &impl ProjectFs,
    project_dir: &Path,
    repo_dir: &Path,
) -> Result<String> {
    if fs.exists(repo_dir) {
        fs.remove_dir_all(repo_dir)?;
    }
    fs.create_dir_all(repo_dir)?;
    fs.copy_tree(project_dir, repo_dir, SKIPPED_ENTRIES).await?;

    let dir = repo_dir.to_string_lossy();
    git(runner, &["-C", &dir, "init"], "init", None).await?;
    configure_identity(runner, &dir).await?;
    git(runner, &["-C", &dir, "add", "."], "add", None).await?;
    git(
        runner,
        &["-C", &dir, "commit", "-m", INITIAL_COMMIT_MESSAGE],
        "commit",
        None,
    )
    .await?;

    let absolute = std::path::absolute(repo_dir).unwrap_or_else(|_| repo_dir.to_path_buf());
    Ok(format!("file://{}", absolute.display()))
}

/// Create a standalone repository at `repo_dir` holding a copy of
/// `project_dir` with a single commit.
///
/// Any previous repository at `repo_dir` is replaced. Never fails: errors are
/// logged and reported as a warning, and `None` is returned.
pub async fn publish_local(
    runner: &impl CommandRunner,
    fs: &impl ProjectFs,
    reporter: &impl ProgressReporter,
    project_dir: &Path,
    repo_dir: &Path,
) -> Option<String> {
    reporter.step("creating local git repository...");
    match init_local_repo(runner, fs, project_dir, repo_dir).await {
        Ok(url) => {
            reporter.success(&format!("local repository at {url}"));
            Some(url)
        }
        Err(e) => {
            tracing::warn!(error = %format!("{e:#}"), repo = %repo_dir.display(), "local git repository not created");
            reporter.warn(&format!("local git repository not created: {e}"));
            None
        }
    }
}

/// Push `project_dir` as a new folder of an existing remote repository.
///
/// Steps:
/// 1. Require a token
/// 2. Resolve the owner (explicit organization, else the token's login)
/// 3. Clone into a temporary workspace, removed on every exit path
/// 4. Copy the project into `<agent_name>-<NNNN>`, commit, push
///
/// # Errors
///
/// Returns [`PublishError::MissingToken`] before any command runs when no
/// token is available, the account lookup error, or
/// [`PublishError::GitFailed`] naming the failing step.
pub async fn publish_to_remote_folder(
    runner: &impl CommandRunner,
    accounts: &impl AccountLookup,
    fs: &impl ProjectFs,
    reporter: &impl ProgressReporter,
    project_dir: &Path,
    target: &RemoteTarget,
) -> Result<PublishResult> {
    let token = target.token.as_deref().ok_or(PublishError::MissingToken)?;
    let owner = match target.org.as_deref() {
        Some(org) => org.to_string(),
        None => {
            reporter.step("resolving GitHub account...");
            accounts.authenticated_login(&target.host, token).await?
        }
    };
    let repo = RemoteRepo::new(&target.host, &owner, &target.repo_name);
    let folder_name = random_folder_name(&target.agent_name);

    let scratch = tempfile::tempdir().context("creating temp dir for clone")?;
    let clone_dir = scratch.path().join("repo");
    let clone_path = clone_dir.to_string_lossy();
    let remote = authenticated_url(&repo.clone_url(), token);

    reporter.step(&format!("cloning {}/{}...", owner, target.repo_name));
    git(
        runner,
        &["clone", &remote, &clone_path],
        "clone",
        Some(token),
    )
    .await?;

    let folder_dir = clone_dir.join(&folder_name);
    fs.create_dir_all(&folder_dir)?;
    fs.copy_tree(project_dir, &folder_dir, SKIPPED_ENTRIES).await?;

    configure_identity(runner, &clone_path).await?;
    git(
        runner,
        &["-C", &clone_path, "add", "--", &folder_name],
        "add",
        Some(token),
    )
    .await?;
    let message = folder_commit_message(&folder_name);
    git(
        runner,
        &["-C", &clone_path, "commit", "-m", &message],
        "commit",
        Some(token),
    )
    .await?;

    reporter.step(&format!("pushing to {}...", target.branch));
    let refspec = format!("HEAD:{}", target.branch);
    git(
        runner,
        &["-C", &clone_path, "push", "origin", &refspec],
        "push",
        Some(token),
    )
    .await?;

    let remote_url = repo.folder_url(&target.branch, &folder_name);
    tracing::info!(folder = %folder_name, url = %remote_url, "published agent folder");
    reporter.success(&format!("pushed {folder_name} to {remote_url}"));
    Ok(PublishResult {
        folder_name,
        remote_url,
    })
}
