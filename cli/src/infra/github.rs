//! GitHub API client — implements `AccountLookup`.

use anyhow::{Context, Result};
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use serde::Deserialize;

use crate::application::ports::AccountLookup;
use crate::domain::{PublishError, RemoteHost};

const GITHUB_API_VERSION: &str = "2022-11-28";
const CLIENT_USER_AGENT: &str = concat!("agent-starter/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct AuthenticatedUser {
    login: String,
}

/// `reqwest`-backed GitHub client.
#[derive(Debug, Clone, Default)]
pub struct GithubClient {
    http: reqwest::Client,
}

impl GithubClient {
    #[must_use]
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }
}

fn headers(token: &str) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
    headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));
    headers.insert(
        "X-GitHub-Api-Version",
        HeaderValue::from_static(GITHUB_API_VERSION),
    );
    let mut auth = HeaderValue::from_str(&format!("Bearer {token}"))
        .context("token contains characters not allowed in a header")?;
    auth.set_sensitive(true);
    headers.insert(AUTHORIZATION, auth);
    Ok(headers)
}

impl AccountLookup for GithubClient {
    async fn authenticated_login(&self, host: &RemoteHost, token: &str) -> Result<String> {
        let url = host.user_endpoint();
        let resp = self
            .http
            .get(&url)
            .headers(headers(token)?)
            .send()
            .await
            .with_context(|| format!("requesting {url}"))?;

        let status = resp.status();
        if status != StatusCode::OK {
            let body = resp.text().await.unwrap_or_default();
            return Err(PublishError::AccountLookup {
                status: status.as_u16(),
                body,
            }
            .into());
        }
        let user: AuthenticatedUser = resp.json().await.context("parsing /user response")?;
        Ok(user.login)
    }
}
