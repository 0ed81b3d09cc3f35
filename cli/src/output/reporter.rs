//! `ProgressReporter` implementations for the two front ends.
//!
//! - [`TerminalReporter`]: `→ ✓ !` lines on stdout for the `starter` binary
//! - [`TracingReporter`]: `tracing` events for the HTTP service

use owo_colors::OwoColorize as _;

use crate::application::ports::ProgressReporter;
use crate::output::OutputContext;

/// Terminal progress reporter that wraps an `OutputContext`.
///
/// - `step()` prints `"  → {message}"` (suppressed when `ctx.quiet`)
/// - `success()` prints `"  ✓ {message}"` (suppressed when `ctx.quiet`)
/// - `warn()` prints `"  ! {message}"` to stderr (never suppressed)
pub struct TerminalReporter<'a> {
    ctx: &'a OutputContext,
}

impl<'a> TerminalReporter<'a> {
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }
}

impl ProgressReporter for TerminalReporter<'_> {
    fn step(&self, message: &str) {
        if !self.ctx.quiet {
            println!("  {} {message}", "→".style(self.ctx.styles.step));
        }
    }

    fn success(&self, message: &str) {
        if !self.ctx.quiet {
            println!("  {} {message}", "✓".style(self.ctx.styles.success));
        }
    }

    fn warn(&self, message: &str) {
        eprintln!("  {} {message}", "!".style(self.ctx.styles.warning));
    }
}

/// Reporter that turns progress into `tracing` events tagged with the agent.
#[derive(Debug, Clone)]
pub struct TracingReporter {
    agent_name: String,
}

impl TracingReporter {
    #[must_use]
    pub fn new(agent_name: impl Into<String>) -> Self {
        Self {
            agent_name: agent_name.into(),
        }
    }
}

impl ProgressReporter for TracingReporter {
    fn step(&self, message: &str) {
        tracing::debug!(agent_name = %self.agent_name, "{message}");
    }

    fn success(&self, message: &str) {
        tracing::info!(agent_name = %self.agent_name, "{message}");
    }

    fn warn(&self, message: &str) {
        tracing::warn!(agent_name = %self.agent_name, "{message}");
    }
}
