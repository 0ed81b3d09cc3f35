//! `starter generate` — run the full pipeline from the command line.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use starter_common::{AgentType, EnvVarSpec, GenerateProjectResponse, ProjectRequest, ToolSpec};

use crate::application::DataDirs;
use crate::infra::{LocalFs, command_runner::DEFAULT_CMD_TIMEOUT, local_generator};
use crate::output::{OutputContext, TerminalReporter, json};

/// Arguments for the generate command.
#[derive(Args, Debug, Default)]
pub struct GenerateArgs {
    /// Agent name (letters, digits, `-` and `_`)
    #[arg(long)]
    pub name: Option<String>,

    /// What the agent does
    #[arg(long)]
    pub description: Option<String>,

    /// System instruction for the agent
    #[arg(long)]
    pub prompt: Option<String>,

    /// Tool to generate, as `name=description` (repeatable)
    #[arg(long = "tool", value_name = "NAME=DESCRIPTION", value_parser = parse_tool)]
    pub tools: Vec<ToolSpec>,

    /// Environment variable read by the agent, as `NAME=default` (repeatable)
    #[arg(long = "env", value_name = "NAME=DEFAULT", value_parser = parse_env_var)]
    pub env_vars: Vec<EnvVarSpec>,

    /// Agent template: `adk_a2a_base` or `adk_base`
    #[arg(long, value_parser = parse_agent_type)]
    pub agent_type: Option<AgentType>,

    /// Read the request from a JSON or YAML file; flags override its fields
    #[arg(long, value_name = "FILE")]
    pub request: Option<PathBuf>,

    /// Data directory (archive lands in `<output>/downloads`)
    #[arg(long, default_value = "starter-out")]
    pub output: PathBuf,

    /// Publish to git (remote folder with a token, else a local repository)
    #[arg(long)]
    pub git: bool,

    /// Repository to publish into (defaults to the agent name)
    #[arg(long)]
    pub repo: Option<String>,

    /// Organization owning the repository (defaults to the token's user)
    #[arg(long)]
    pub org: Option<String>,

    /// GitHub Enterprise base URL
    #[arg(long)]
    pub enterprise_url: Option<String>,

    /// Branch to push to
    #[arg(long)]
    pub branch: Option<String>,

    /// Access token for remote publishing
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,
}

fn split_pair(raw: &str) -> Result<(&str, &str), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.trim(), v.trim()))
        .filter(|(k, _)| !k.is_empty())
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))
}

fn parse_tool(raw: &str) -> Result<ToolSpec, String> {
    let (name, description) = split_pair(raw)?;
    Ok(ToolSpec {
        name: name.to_string(),
        description: description.to_string(),
    })
}

fn parse_env_var(raw: &str) -> Result<EnvVarSpec, String> {
    let (name, default_value) = split_pair(raw)?;
    Ok(EnvVarSpec {
        name: name.to_string(),
        default_value: default_value.to_string(),
        description: None,
    })
}

fn parse_agent_type(raw: &str) -> Result<AgentType, String> {
    match raw {
        "adk_a2a_base" => Ok(AgentType::AdkA2aBase),
        "adk_base" => Ok(AgentType::AdkBase),
        other => Err(format!("unknown agent type '{other}' (expected adk_a2a_base or adk_base)")),
    }
}

fn load_request_file(path: &Path) -> Result<ProjectRequest> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        serde_json::from_str(&content).with_context(|| format!("parsing {}", path.display()))
    } else {
        serde_yaml::from_str(&content).with_context(|| format!("parsing {}", path.display()))
    }
}

/// Merge the optional request file with the command-line flags.
///
/// # Errors
///
/// Returns an error if the request file cannot be read or parsed, or no
/// agent name is given anywhere.
pub fn build_request(args: &GenerateArgs) -> Result<ProjectRequest> {
    let mut request = match &args.request {
        Some(path) => load_request_file(path)?,
        None => {
            let name = args
                .name
                .as_deref()
                .context("--name is required unless --request is given")?;
            ProjectRequest::new(name, "", "")
        }
    };

    if let Some(name) = &args.name {
        request.agent_name.clone_from(name);
    }
    if let Some(description) = &args.description {
        request.description.clone_from(description);
    }
    if let Some(prompt) = &args.prompt {
        request.prompt.clone_from(prompt);
    }
    if !args.tools.is_empty() {
        request.tools.clone_from(&args.tools);
    }
    if !args.env_vars.is_empty() {
        request.env_vars.clone_from(&args.env_vars);
    }
    if let Some(agent_type) = args.agent_type {
        request.agent_type = agent_type;
    }
    if args.git {
        request.create_git_repo = true;
    }
    if args.repo.is_some() {
        request.git_repo_name.clone_from(&args.repo);
    }
    if args.org.is_some() {
        request.github_org.clone_from(&args.org);
    }
    if args.enterprise_url.is_some() {
        request.github_enterprise_url.clone_from(&args.enterprise_url);
    }
    if args.branch.is_some() {
        request.git_branch.clone_from(&args.branch);
    }
    Ok(request)
}

fn print_summary(ctx: &OutputContext, dirs: &DataDirs, response: &GenerateProjectResponse) {
    ctx.success(&response.message);
    ctx.kv(
        "Archive:",
        &dirs.archive_path(&response.project_name).display().to_string(),
    );
    ctx.kv("Files:  ", &response.files_generated.to_string());
    if let Some(url) = &response.git_repo_url {
        ctx.kv("Git:    ", url);
    }
    if let Some(folder) = &response.git_folder_name {
        ctx.kv("Folder: ", folder);
    }
}

/// Run the generate command.
///
/// # Errors
///
/// Returns an error if the request is invalid or any pipeline step fails.
pub async fn run(ctx: &OutputContext, args: &GenerateArgs, json_output: bool) -> Result<()> {
    let request = build_request(args)?;
    let dirs = DataDirs::new(&args.output);
    dirs.ensure(&LocalFs)?;

    if !json_output {
        ctx.header(&format!("Generating '{}'", request.agent_name));
    }
    let generator = local_generator(DEFAULT_CMD_TIMEOUT);
    let reporter = TerminalReporter::new(ctx);
    let response = generator
        .generate(&reporter, &dirs, &request, args.token.as_deref())
        .await?;

    if json_output {
        println!("{}", json::to_pretty(&response)?);
    } else {
        print_summary(ctx, &dirs, &response);
    }
    Ok(())
}
