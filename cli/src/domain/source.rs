//! Generated agent source (`app/agent.py`) as a structured document.
//!
//! The file is an ordered list of named sections built from typed fields and
//! serialized exactly once. Nothing downstream re-opens the text to patch it.
//!
//! Pure functions — no I/O, no async.

#![allow(clippy::format_push_string)]

use starter_common::{AgentType, EnvVarSpec, ProjectRequest, ToolSpec};

/// Used when the request leaves the description empty.
pub const DEFAULT_DESCRIPTION: &str =
    "An agent that can provide information about the weather and time.";
/// Used when the request leaves the prompt empty.
pub const DEFAULT_INSTRUCTION: &str =
    "You are a helpful AI assistant designed to provide accurate and useful information.";

/// Names of the two stub tools emitted when a request lists none.
pub const DEFAULT_TOOL_NAMES: [&str; 2] = ["get_weather", "get_current_time"];

/// Model settings every generated agent reads: `(variable, env var, default)`.
const MODEL_ENV: [(&str, &str, &str); 3] = [
    ("llm_endpoint", "LLM_ENDPOINT_URL", "http://localhost:8001/v1"),
    ("llm_model", "LLM_MODEL_NAME", "openai/llama-3.1-8b"),
    ("llm_api_key", "LLM_API_KEY", "not-needed"),
];

/// Section identifiers, in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Header,
    Imports,
    Config,
    Model,
    Tools,
    Agent,
    Export,
}

/// One rendered section of the agent source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub kind: SectionKind,
    pub body: String,
}

/// A function exposed to the agent as a tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolBlock {
    /// Stub generated from a user-supplied tool.
    Stub { name: String, description: String },
    /// Canned weather lookup.
    Weather,
    /// Canned current-time lookup.
    CurrentTime,
}

impl ToolBlock {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Stub { name, .. } => name,
            Self::Weather => DEFAULT_TOOL_NAMES[0],
            Self::CurrentTime => DEFAULT_TOOL_NAMES[1],
        }
    }

    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Stub { name, description } => tool_stub(name, description),
            Self::Weather => WEATHER_TOOL.to_string(),
            Self::CurrentTime => CURRENT_TIME_TOOL.to_string(),
        }
    }
}

/// The complete generated agent module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentSource {
    pub project_name: String,
    pub agent_type: AgentType,
    pub env_vars: Vec<EnvVarSpec>,
    pub tools: Vec<ToolBlock>,
    pub description: String,
    pub instruction: String,
}

impl AgentSource {
    /// Build the document for a (validated) request.
    #[must_use]
    pub fn from_request(request: &ProjectRequest) -> Self {
        let tools = if request.tools.is_empty() {
            vec![ToolBlock::Weather, ToolBlock::CurrentTime]
        } else {
            request
                .tools
                .iter()
                .map(|ToolSpec { name, description }| ToolBlock::Stub {
                    name: name.clone(),
                    description: description.clone(),
                })
                .collect()
        };
        Self {
            project_name: request.agent_name.clone(),
            agent_type: request.agent_type,
            env_vars: request.env_vars.clone(),
            tools,
            description: non_empty_or(&request.description, DEFAULT_DESCRIPTION),
            instruction: non_empty_or(&request.prompt, DEFAULT_INSTRUCTION),
        }
    }

    /// Tool names in the order they appear in the agent's tool list.
    #[must_use]
    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.iter().map(ToolBlock::name).collect()
    }

    fn uses_default_tools(&self) -> bool {
        self.tools
            .iter()
            .any(|t| matches!(t, ToolBlock::CurrentTime))
    }

    /// The ordered sections of the module.
    #[must_use]
    pub fn sections(&self) -> Vec<Section> {
        vec![
            Section {
                kind: SectionKind::Header,
                body: format!(
                    "\"\"\"Agent for {}, generated by Agent Starter Pack.\"\"\"",
                    self.project_name
                ),
            },
            Section {
                kind: SectionKind::Imports,
                body: self.imports(),
            },
            Section {
                kind: SectionKind::Config,
                body: self.config(),
            },
            Section {
                kind: SectionKind::Model,
                body: MODEL_BLOCK.to_string(),
            },
            Section {
                kind: SectionKind::Tools,
                body: self
                    .tools
                    .iter()
                    .map(ToolBlock::render)
                    .collect::<Vec<_>>()
                    .join("\n\n\n"),
            },
            Section {
                kind: SectionKind::Agent,
                body: self.agent(),
            },
            Section {
                kind: SectionKind::Export,
                body: self.export(),
            },
        ]
    }

    /// Serialize the document to Python source.
    #[must_use]
    pub fn render(&self) -> String {
        let body = self
            .sections()
            .into_iter()
            .map(|s| s.body)
            .collect::<Vec<_>>()
            .join("\n\n\n");
        format!("{body}\n")
    }

    fn imports(&self) -> String {
        let mut out = String::new();
        if self.uses_default_tools() {
            out.push_str("import datetime\n");
        }
        out.push_str("import os\n");
        if self.uses_default_tools() {
            out.push_str("from zoneinfo import ZoneInfo\n");
        }
        out.push('\n');
        out.push_str("from dotenv import load_dotenv\n");
        if self.agent_type.wraps_a2a() {
            out.push_str("from google.adk.a2a.utils.agent_to_a2a import to_a2a\n");
        }
        out.push_str("from google.adk.agents import Agent\n");
        out.push_str("from google.adk.models.lite_llm import LiteLlm\n");
        out.push('\n');
        out.push_str("# Load environment variables from .env file\n");
        out.push_str("load_dotenv()");
        out
    }

    fn config(&self) -> String {
        let mut lines = vec!["# LLM configuration from environment variables".to_string()];
        for (var, env, default) in MODEL_ENV {
            lines.push(format!(
                "{var} = os.getenv(\"{env}\", {})",
                env_default_literal(default)
            ));
        }
        for spec in &self.env_vars {
            let comment = spec
                .description
                .as_deref()
                .filter(|d| !d.is_empty())
                .map(|d| format!("  # {}", single_line(d)))
                .unwrap_or_default();
            lines.push(format!(
                "{} = os.getenv(\"{}\", {}){comment}",
                spec.name.to_lowercase(),
                spec.name,
                env_default_literal(&spec.default_value)
            ));
        }
        lines.join("\n")
    }

    fn agent(&self) -> String {
        let comment = if self.agent_type.wraps_a2a() {
            "# Create ADK agent with A2A protocol support"
        } else {
            "# Create ADK agent"
        };
        let mut out = String::new();
        out.push_str(comment);
        out.push('\n');
        out.push_str("root_agent = Agent(\n");
        out.push_str("    name=\"root_agent\",\n");
        out.push_str("    model=llm,\n");
        out.push_str(&format!("    description={},\n", py_string(&self.description)));
        out.push_str(&format!("    instruction={},\n", py_string(&self.instruction)));
        out.push_str(&format!("    tools=[{}],\n", self.tool_names().join(", ")));
        out.push(')');
        out
    }

    fn export(&self) -> String {
        if self.agent_type.wraps_a2a() {
            [
                "# Expose the agent over the Agent2Agent protocol",
                "a2a_app = to_a2a(root_agent, port=int(os.getenv(\"PORT\", \"8001\")))",
                "app = a2a_app",
            ]
            .join("\n")
        } else {
            "app = root_agent".to_string()
        }
    }
}

fn non_empty_or(value: &str, fallback: &str) -> String {
    if value.trim().is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}

fn single_line(text: &str) -> String {
    text.lines().collect::<Vec<_>>().join(" ")
}

/// Python literal for an environment-variable default.
///
/// Integers are emitted bare in canonical decimal form (`0123` becomes
/// `123`, `+5` becomes `5`). Exactly `True` / `False` are emitted bare;
/// anything else becomes a double-quoted string literal.
#[must_use]
pub fn env_default_literal(value: &str) -> String {
    if let Ok(n) = value.parse::<i64>() {
        return n.to_string();
    }
    if !value.is_empty() && value.chars().all(|c| c.is_ascii_digit()) {
        let digits = value.trim_start_matches('0');
        return if digits.is_empty() { "0" } else { digits }.to_string();
    }
    if value == "True" || value == "False" {
        value.to_string()
    } else {
        py_string(value)
    }
}

/// Module-level names the generated agent source binds or relies on. A tool
/// or lowercased env var with one of these names would shadow it.
pub const RESERVED_NAMES: &[&str] = &[
    "os",
    "datetime",
    "ZoneInfo",
    "load_dotenv",
    "to_a2a",
    "Agent",
    "LiteLlm",
    "llm",
    "llm_endpoint",
    "llm_model",
    "llm_api_key",
    "root_agent",
    "a2a_app",
    "app",
    "str",
    "int",
];

/// Double-quoted Python string literal. Plain text passes through verbatim.
#[must_use]
pub fn py_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    out.push('"');
    out
}

fn docstring_text(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace("\"\"\"", "\\\"\\\"\\\"")
        .lines()
        .collect::<Vec<_>>()
        .join("\n    ")
}

/// Stub function for a user-supplied tool: one `str` in, one `str` out.
#[must_use]
pub fn tool_stub(name: &str, description: &str) -> String {
    let summary = if description.trim().is_empty() {
        format!("Tool {name}.")
    } else {
        docstring_text(description.trim())
    };
    format!(
        "def {name}(query: str) -> str:\n    \"\"\"{summary}\n\n    Args:\n        query: Input query for the tool.\n\n    Returns:\n        Tool result as a string.\n    \"\"\"\n    # Replace this placeholder with the real implementation.\n    return f\"Result from {name}: {{query}}\""
    )
}

const MODEL_BLOCK: &str = "# LiteLLM routes to any OpenAI-compatible endpoint (vLLM, Ollama, hosted APIs)
llm = LiteLlm(
    model=llm_model,
    api_key=llm_api_key,
    api_base=llm_endpoint,
)";

const WEATHER_TOOL: &str = r#"def get_weather(query: str) -> str:
    """Simulates a web search. Use it to get information on weather.

    Args:
        query: A string containing the location to get weather information for.

    Returns:
        A string with the simulated weather information for the queried location.
    """
    if "sf" in query.lower() or "san francisco" in query.lower():
        return "It's 60 degrees and foggy."
    return "It's 90 degrees and sunny.""#;

const CURRENT_TIME_TOOL: &str = r#"def get_current_time(query: str) -> str:
    """Simulates getting the current time for a city.

    Args:
        query: The name of the city to get the current time for.

    Returns:
        A string with the current time information.
    """
    if "sf" in query.lower() or "san francisco" in query.lower():
        tz_identifier = "America/Los_Angeles"
    else:
        return f"Sorry, I don't have timezone information for query: {query}."

    tz = ZoneInfo(tz_identifier)
    now = datetime.datetime.now(tz)
    return f"The current time for query {query} is {now.strftime('%Y-%m-%d %H:%M:%S %Z%z')}""#;
