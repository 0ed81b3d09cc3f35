//! Domain layer — pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod error;
pub mod project;
pub mod publish;
pub mod source;
pub mod template;

pub use error::{ProjectError, PublishError, TemplateError};
pub use project::validate_request;
pub use publish::{PublishResult, RemoteHost, RemoteRepo};
pub use source::{AgentSource, Section, SectionKind, ToolBlock};
pub use template::ScaffoldContext;
