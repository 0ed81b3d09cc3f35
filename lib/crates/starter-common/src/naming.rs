//! Naming rules shared by the generator, the API server and the CLI.
//!
//! Every name that ends up in a filesystem path, a URL or generated source
//! passes through one of these validators first.

/// Branch pushed to when the request does not name one.
pub const DEFAULT_BRANCH: &str = "main";

/// Python reserved words; a tool named after one would not compile.
const PYTHON_KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class", "continue",
    "def", "del", "elif", "else", "except", "finally", "for", "from", "global", "if", "import",
    "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try", "while",
    "with", "yield",
];

/// Validate an agent name: non-empty, ASCII alphanumerics, `-` and `_` only.
///
/// SECURITY: the name becomes a directory, an archive file name and a URL
/// segment. Rejecting everything else rules out path traversal (CWE-22).
pub fn validate_agent_name(name: &str) -> Result<(), &'static str> {
    if name.is_empty() {
        return Err("agent_name must not be empty");
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(
            "Agent name must contain only alphanumeric characters, hyphens, and underscores",
        );
    }
    Ok(())
}

#[must_use]
pub fn is_valid_agent_name(name: &str) -> bool {
    validate_agent_name(name).is_ok()
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Validate a tool name: a Python identifier that is not a keyword.
pub fn validate_tool_name(name: &str) -> Result<(), &'static str> {
    if !is_identifier(name) {
        return Err("tool name must be a valid identifier ([A-Za-z_][A-Za-z0-9_]*)");
    }
    if PYTHON_KEYWORDS.contains(&name) {
        return Err("tool name must not be a Python keyword");
    }
    Ok(())
}

/// Validate an environment variable name: `[A-Za-z_][A-Za-z0-9_]*`.
///
/// The lowercased name becomes a Python variable, so it must not be a
/// keyword either.
pub fn validate_env_var_name(name: &str) -> Result<(), &'static str> {
    if !is_identifier(name) {
        return Err("environment variable name must match [A-Za-z_][A-Za-z0-9_]*");
    }
    if PYTHON_KEYWORDS.contains(&name.to_lowercase().as_str()) {
        return Err("lowercased environment variable name must not be a Python keyword");
    }
    Ok(())
}

/// File name of the archive produced for `agent_name`.
#[must_use]
pub fn archive_file_name(agent_name: &str) -> String {
    format!("{agent_name}.zip")
}

/// Public URL path the archive is served from.
#[must_use]
pub fn download_url(agent_name: &str) -> String {
    format!("/downloads/{}", archive_file_name(agent_name))
}

/// Validate a requested download file name: `<valid agent name>.zip`.
pub fn validate_archive_file_name(file_name: &str) -> Result<(), &'static str> {
    let stem = file_name
        .strip_suffix(".zip")
        .ok_or("archive file name must end in .zip")?;
    validate_agent_name(stem)
}

/// Destination folder inside a shared repository: `<agent_name>-NNNN`.
///
/// `suffix` is reduced modulo 10000 and zero-padded to four digits.
#[must_use]
pub fn publish_folder_name(agent_name: &str, suffix: u16) -> String {
    format!("{agent_name}-{:04}", suffix % 10_000)
}
