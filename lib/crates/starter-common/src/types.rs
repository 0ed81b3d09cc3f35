use serde::{Deserialize, Serialize};

/// Agent archetype the generated project is built around.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum AgentType {
    /// ADK agent wrapped in the Agent2Agent protocol adapter.
    #[default]
    AdkA2aBase,
    /// Plain ADK agent.
    AdkBase,
}

impl AgentType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AdkA2aBase => "adk_a2a_base",
            Self::AdkBase => "adk_base",
        }
    }

    /// Whether the generated agent is exposed through the A2A adapter.
    #[must_use]
    pub fn wraps_a2a(self) -> bool {
        matches!(self, Self::AdkA2aBase)
    }
}

/// A tool the generated agent should expose, as entered in the UI.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToolSpec {
    /// Function name (must be a valid Python identifier).
    pub name: String,
    /// What the tool does; becomes the function docstring.
    pub description: String,
}

/// An extra environment variable read by the generated agent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EnvVarSpec {
    pub name: String,
    pub default_value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Request body for `POST /api/v1/generate/project`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectRequest {
    /// Project / agent name. Alphanumerics, hyphens and underscores only.
    pub agent_name: String,
    pub description: String,
    /// System prompt, used as the agent instruction.
    pub prompt: String,
    #[serde(default)]
    pub tools: Vec<ToolSpec>,
    #[serde(default)]
    pub create_git_repo: bool,
    #[serde(default)]
    pub git_repo_name: Option<String>,
    /// Access token for the version-control host. Never logged.
    #[serde(default, skip_serializing)]
    pub github_token: Option<String>,
    #[serde(default)]
    pub github_org: Option<String>,
    #[serde(default)]
    pub github_enterprise_url: Option<String>,
    #[serde(default)]
    pub git_branch: Option<String>,
    #[serde(default)]
    pub agent_type: AgentType,
    #[serde(default)]
    pub env_vars: Vec<EnvVarSpec>,
}

impl ProjectRequest {
    /// Minimal request with only the three required text fields set.
    #[must_use]
    pub fn new(
        agent_name: impl Into<String>,
        description: impl Into<String>,
        prompt: impl Into<String>,
    ) -> Self {
        Self {
            agent_name: agent_name.into(),
            description: description.into(),
            prompt: prompt.into(),
            tools: Vec::new(),
            create_git_repo: false,
            git_repo_name: None,
            github_token: None,
            github_org: None,
            github_enterprise_url: None,
            git_branch: None,
            agent_type: AgentType::default(),
            env_vars: Vec::new(),
        }
    }

    /// Repository to publish into: `git_repo_name`, falling back to the agent name.
    #[must_use]
    pub fn repo_name(&self) -> &str {
        self.git_repo_name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.agent_name)
    }

    #[must_use]
    pub fn branch(&self) -> &str {
        self.git_branch
            .as_deref()
            .filter(|b| !b.is_empty())
            .unwrap_or(crate::naming::DEFAULT_BRANCH)
    }
}

/// Response body for a successful generation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenerateProjectResponse {
    pub project_name: String,
    pub download_url: String,
    pub git_repo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git_folder_name: Option<String>,
    pub files_generated: usize,
    pub message: String,
}

/// Body of every non-2xx API response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub detail: String,
}
