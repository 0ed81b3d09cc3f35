//! Strict `{{ key }}` placeholder expansion for skeleton files.
//!
//! Pure functions only. An unknown key is an error rather than an empty
//! substitution, so a skeleton can never be half-rendered silently.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::domain::error::TemplateError;

/// Matches `{{ name }}` with optional inner whitespace.
pub static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Safety: this is a compile-time constant pattern — cannot fail.
    #[allow(clippy::expect_used)]
    Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_]*)\s*\}\}").expect("valid regex")
});

/// Archetype every generated project is built from.
pub const DEFAULT_ARCHETYPE: &str = "adk_a2a_base";
/// Only deployment target shipped in the embedded skeleton.
pub const DEFAULT_DEPLOYMENT_TARGET: &str = "on_premise";
pub const DEFAULT_SESSION_TYPE: &str = "in_memory";
/// Directory (inside the project) holding the agent package.
pub const DEFAULT_AGENT_DIRECTORY: &str = "app";

/// Values available to skeleton templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldContext {
    pub project_name: String,
    pub agent_name: String,
    pub deployment_target: String,
    pub session_type: String,
    pub agent_directory: String,
}

impl ScaffoldContext {
    /// The fixed context used for every generated project.
    #[must_use]
    pub fn for_project(project_name: &str) -> Self {
        Self {
            project_name: project_name.to_string(),
            agent_name: DEFAULT_ARCHETYPE.to_string(),
            deployment_target: DEFAULT_DEPLOYMENT_TARGET.to_string(),
            session_type: DEFAULT_SESSION_TYPE.to_string(),
            agent_directory: DEFAULT_AGENT_DIRECTORY.to_string(),
        }
    }

    #[must_use]
    pub fn vars(&self) -> BTreeMap<&'static str, &str> {
        BTreeMap::from([
            ("project_name", self.project_name.as_str()),
            ("agent_name", self.agent_name.as_str()),
            ("deployment_target", self.deployment_target.as_str()),
            ("session_type", self.session_type.as_str()),
            ("agent_directory", self.agent_directory.as_str()),
        ])
    }
}

/// Replace every placeholder in `template` with its value from `vars`.
///
/// # Errors
///
/// Returns [`TemplateError::UnknownVariable`] for the first placeholder whose
/// key is not in `vars`.
pub fn render(template: &str, vars: &BTreeMap<&'static str, &str>) -> Result<String, TemplateError> {
    if let Some(missing) = PLACEHOLDER_RE
        .captures_iter(template)
        .filter_map(|c| c.get(1))
        .find(|key| !vars.contains_key(key.as_str()))
    {
        return Err(TemplateError::UnknownVariable(missing.as_str().to_string()));
    }
    let rendered = PLACEHOLDER_RE.replace_all(template, |caps: &regex::Captures<'_>| {
        vars.get(&caps[1]).copied().unwrap_or_default().to_string()
    });
    Ok(rendered.into_owned())
}

/// Returns `true` if `text` still contains a placeholder.
#[must_use]
pub fn has_placeholder(text: &str) -> bool {
    PLACEHOLDER_RE.is_match(text)
}
