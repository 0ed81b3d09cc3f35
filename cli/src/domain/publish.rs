//! Repository publishing rules — URLs, identity, messages.
//!
//! Pure functions only. Subprocess and HTTP calls live in the application
//! and infra layers.

/// Commit identity used for every generated commit.
pub const GIT_USER_NAME: &str = "Agent Starter Pack API";
pub const GIT_USER_EMAIL: &str = "api@agent-starter-pack.local";

/// Message of the single commit in a local-only repository.
pub const INITIAL_COMMIT_MESSAGE: &str = "Initial commit - Generated by Agent Starter Pack API";

/// Entries of a generated project never copied into a shared repository.
pub const SKIPPED_ENTRIES: &[&str] = &[".git"];

/// Tokens shorter than this are only scrubbed from URL credentials.
pub const MIN_FREE_TEXT_REDACT_LEN: usize = 8;

const PUBLIC_WEB_BASE: &str = "https://github.com";
const PUBLIC_API_BASE: &str = "https://api.github.com";

/// Web and API endpoints of a GitHub (or GitHub Enterprise) instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteHost {
    pub web_base: String,
    pub api_base: String,
}

impl RemoteHost {
    /// `https://github.com`, or the enterprise URL with its `/api/v3` API.
    #[must_use]
    pub fn new(enterprise_url: Option<&str>) -> Self {
        match enterprise_url.map(|u| u.trim().trim_end_matches('/')).filter(|u| !u.is_empty()) {
            Some(base) => Self {
                web_base: base.to_string(),
                api_base: format!("{base}/api/v3"),
            },
            None => Self {
                web_base: PUBLIC_WEB_BASE.to_string(),
                api_base: PUBLIC_API_BASE.to_string(),
            },
        }
    }

    /// Whether `url` may name an enterprise host. Blank means the public one.
    #[must_use]
    pub fn is_valid_enterprise_url(url: &str) -> bool {
        let url = url.trim();
        url.is_empty()
            || ["https://", "http://"]
                .iter()
                .any(|scheme| url.strip_prefix(scheme).is_some_and(|rest| !rest.is_empty()))
    }

    #[must_use]
    pub fn user_endpoint(&self) -> String {
        format!("{}/user", self.api_base)
    }
}

/// A repository on a [`RemoteHost`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRepo {
    pub web_base: String,
    pub owner: String,
    pub name: String,
}

impl RemoteRepo {
    #[must_use]
    pub fn new(host: &RemoteHost, owner: &str, name: &str) -> Self {
        Self {
            web_base: host.web_base.clone(),
            owner: owner.to_string(),
            name: name.to_string(),
        }
    }

    #[must_use]
    pub fn html_url(&self) -> String {
        format!("{}/{}/{}", self.web_base, self.owner, self.name)
    }

    #[must_use]
    pub fn clone_url(&self) -> String {
        format!("{}.git", self.html_url())
    }

    /// Browse URL of `folder` on `branch`.
    #[must_use]
    pub fn folder_url(&self, branch: &str, folder: &str) -> String {
        format!("{}/tree/{branch}/{folder}", self.html_url())
    }
}

/// Outcome of a remote-folder publish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishResult {
    pub folder_name: String,
    pub remote_url: String,
}

/// Clone URL with the token embedded as HTTPS credentials.
///
/// Non-HTTPS URLs (e.g. `file://` mirrors) are returned unchanged.
#[must_use]
pub fn authenticated_url(clone_url: &str, token: &str) -> String {
    match clone_url.strip_prefix("https://") {
        Some(rest) => format!("https://{token}@{rest}"),
        None => clone_url.to_string(),
    }
}

/// Hide `token` in `text`.
///
/// The `https://<token>@` credential segment is always masked. Other
/// occurrences are masked only for tokens of at least
/// [`MIN_FREE_TEXT_REDACT_LEN`] characters, so a short token cannot mangle
/// unrelated words.
#[must_use]
pub fn redact(text: &str, token: &str) -> String {
    if token.is_empty() {
        return text.to_string();
    }
    let text = text.replace(&format!("https://{token}@"), "https://***@");
    if token.len() >= MIN_FREE_TEXT_REDACT_LEN {
        text.replace(token, "***")
    } else {
        text
    }
}

/// The explicit token if non-empty, else the fallback if non-empty.
#[must_use]
pub fn resolve_token(explicit: Option<&str>, fallback: Option<&str>) -> Option<String> {
    explicit
        .filter(|t| !t.trim().is_empty())
        .or_else(|| fallback.filter(|t| !t.trim().is_empty()))
        .map(|t| t.trim().to_string())
}

#[must_use]
pub fn folder_commit_message(folder_name: &str) -> String {
    format!("Add agent: {folder_name}")
}
