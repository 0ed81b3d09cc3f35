//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;

// ── Project errors ────────────────────────────────────────────────────────────

/// Errors raised while validating a request or materializing a project.
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("Invalid agent name '{name}': {reason}")]
    InvalidAgentName { name: String, reason: &'static str },

    #[error("Invalid tool name '{name}': {reason}")]
    InvalidToolName { name: String, reason: &'static str },

    #[error("Tool '{0}' is listed more than once")]
    DuplicateTool(String),

    #[error("Invalid environment variable '{name}': {reason}")]
    InvalidEnvVarName { name: String, reason: &'static str },

    #[error("Invalid GitHub Enterprise URL '{0}': only http:// and https:// are supported")]
    InvalidEnterpriseUrl(String),

    #[error("Project directory already exists: {0}")]
    AlreadyExists(String),

    #[error("Failed to create project: {0}")]
    ScaffoldFailed(String),
}

impl ProjectError {
    /// Whether this error is the caller's fault (bad input, nothing touched).
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidAgentName { .. }
                | Self::InvalidToolName { .. }
                | Self::DuplicateTool(_)
                | Self::InvalidEnvVarName { .. }
                | Self::InvalidEnterpriseUrl(_)
        )
    }
}

// ── Template errors ───────────────────────────────────────────────────────────

/// Errors raised by strict placeholder expansion.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("unknown template variable '{0}'")]
    UnknownVariable(String),

    #[error("unrendered placeholder left in {0}")]
    Unrendered(String),
}

// ── Publish errors ────────────────────────────────────────────────────────────

/// Errors raised by the remote-folder publisher. Never carry the token.
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("GitHub token is required for push (pass github_token or set GITHUB_TOKEN)")]
    MissingToken,

    #[error("Failed to get GitHub username: {status} {body}")]
    AccountLookup { status: u16, body: String },

    #[error("Failed to push to GitHub ({step}): {stderr}")]
    GitFailed { step: &'static str, stderr: String },
}
