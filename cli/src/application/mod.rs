//! Application layer — port trait definitions and use-case orchestration.
//!
//! This module depends only on `crate::domain` — never on `crate::infra`,
//! `crate::commands`, or `crate::output`. Filesystem access goes through
//! [`ProjectFs`].

pub mod ports;
pub mod services;
pub mod workspace;

pub use ports::{
    AccountLookup, CommandRunner, ProgressReporter, ProjectArchiver, ProjectFs, Scaffolder,
};
pub use workspace::{DataDirs, ProjectWorkspace};
