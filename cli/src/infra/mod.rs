//! Infrastructure layer — concrete implementations of application port traits.
//!
//! This module contains all I/O-performing code: process execution, filesystem
//! access, skeleton expansion, archiving, and the GitHub API client.
//!
//! Imports from `crate::domain` and `crate::application::ports` are allowed.
//! Imports from `crate::commands` or `crate::output` are forbidden.

pub mod archive;
pub mod command_runner;
pub mod fs;
pub mod github;
pub mod scaffold;

pub use archive::ZipArchiver;
pub use command_runner::TokioCommandRunner;
pub use fs::LocalFs;
pub use github::GithubClient;
pub use scaffold::EmbeddedSkeleton;

use crate::application::services::generate::Generator;

/// The generator wired to production adapters.
pub type LocalGenerator =
    Generator<TokioCommandRunner, EmbeddedSkeleton, ZipArchiver, LocalFs, GithubClient>;

/// Build a [`LocalGenerator`] whose subprocesses are bounded by `timeout`.
#[must_use]
pub fn local_generator(timeout: std::time::Duration) -> LocalGenerator {
    Generator {
        runner: TokioCommandRunner::new(timeout),
        scaffolder: EmbeddedSkeleton,
        archiver: ZipArchiver,
        fs: LocalFs,
        accounts: GithubClient::default(),
    }
}
