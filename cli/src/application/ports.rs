//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` — never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::{Path, PathBuf};
use std::process::Output;

use anyhow::Result;

use crate::domain::{RemoteHost, ScaffoldContext};

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and capture its output.
    ///
    /// Implementations should delegate to `run_with_timeout` using the
    /// instance's configured default timeout.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;
    /// Run a program with a custom timeout override.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exceeds `timeout`.
    /// On timeout, the child process must be killed (not left orphaned).
    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: std::time::Duration,
    ) -> Result<Output>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait — no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}

// ── Scaffolding and Archiving Ports ───────────────────────────────────────────

/// Expands a project skeleton for a given context.
#[allow(async_fn_in_trait)]
pub trait Scaffolder {
    /// Expand the skeleton into `<dest>/<ctx.project_name>` and return that
    /// directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the project directory already exists, a template
    /// references an unknown key, or any write fails.
    async fn expand(&self, ctx: &ScaffoldContext, dest: &Path) -> Result<PathBuf>;
}

/// Packs a project directory into a single archive file.
#[allow(async_fn_in_trait)]
pub trait ProjectArchiver {
    /// Write `project_dir` to `archive_path`, replacing any existing file.
    async fn archive(&self, project_dir: &Path, archive_path: &Path) -> Result<()>;
}

// ── Filesystem Port ───────────────────────────────────────────────────────────

/// Filesystem operations the services need on generated trees.
#[allow(async_fn_in_trait)]
pub trait ProjectFs {
    fn exists(&self, path: &Path) -> bool;
    fn create_dir_all(&self, path: &Path) -> Result<()>;
    fn remove_dir_all(&self, path: &Path) -> Result<()>;
    fn write(&self, path: &Path, content: &str) -> Result<()>;
    /// Recursively copy the contents of `src` into `dst`, skipping top-level
    /// entries whose name is in `skip`.
    async fn copy_tree(&self, src: &Path, dst: &Path, skip: &[&str]) -> Result<()>;
    /// Number of regular files under `root`, recursively.
    async fn count_files(&self, root: &Path) -> Result<usize>;
    /// Files under `root` that still contain a `{{ key }}` placeholder.
    async fn unrendered_files(&self, root: &Path) -> Result<Vec<PathBuf>>;
}

// ── Remote Account Port ───────────────────────────────────────────────────────

/// Resolves the account that owns an access token.
#[allow(async_fn_in_trait)]
pub trait AccountLookup {
    /// Login of the token owner, via `GET` on [`RemoteHost::user_endpoint`].
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is not 200.
    async fn authenticated_login(&self, host: &RemoteHost, token: &str) -> Result<String>;
}
