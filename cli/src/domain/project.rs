//! Request validation — no I/O, no async.
//!
//! Runs before anything touches the filesystem or the network.

use std::collections::HashSet;

use starter_common::{ProjectRequest, validate_agent_name, validate_env_var_name, validate_tool_name};

use crate::domain::error::ProjectError;
use crate::domain::publish::RemoteHost;
use crate::domain::source::{DEFAULT_TOOL_NAMES, RESERVED_NAMES};

const RESERVED_REASON: &str = "name is reserved by the generated agent module";

/// Validate every user-controlled name in `request`.
///
/// # Errors
///
/// Returns the first [`ProjectError`] validation variant that applies.
pub fn validate_request(request: &ProjectRequest) -> Result<(), ProjectError> {
    validate_agent_name(&request.agent_name).map_err(|reason| ProjectError::InvalidAgentName {
        name: request.agent_name.clone(),
        reason,
    })?;

    let mut seen = HashSet::new();
    for tool in &request.tools {
        validate_tool_name(&tool.name).map_err(|reason| ProjectError::InvalidToolName {
            name: tool.name.clone(),
            reason,
        })?;
        if RESERVED_NAMES.contains(&tool.name.as_str()) {
            return Err(ProjectError::InvalidToolName {
                name: tool.name.clone(),
                reason: RESERVED_REASON,
            });
        }
        if !seen.insert(tool.name.as_str()) {
            return Err(ProjectError::DuplicateTool(tool.name.clone()));
        }
    }

    for var in &request.env_vars {
        let invalid = |reason| ProjectError::InvalidEnvVarName {
            name: var.name.clone(),
            reason,
        };
        validate_env_var_name(&var.name).map_err(invalid)?;
        let binding = var.name.to_lowercase();
        let binding = binding.as_str();
        if RESERVED_NAMES.contains(&binding) || DEFAULT_TOOL_NAMES.contains(&binding) {
            return Err(invalid(RESERVED_REASON));
        }
        if seen.contains(binding) {
            return Err(invalid("lowercased name collides with a tool name"));
        }
    }

    if let Some(url) = request.github_enterprise_url.as_deref()
        && !RemoteHost::is_valid_enterprise_url(url)
    {
        return Err(ProjectError::InvalidEnterpriseUrl(url.to_string()));
    }
    Ok(())
}
