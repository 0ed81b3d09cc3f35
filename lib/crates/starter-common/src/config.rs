use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Directory name created under the system temp dir when no data dir is set.
pub const DEFAULT_DATA_DIR_NAME: &str = "agent-starter-pack-api";

/// API server configuration, loaded from `STARTER_*` environment variables.
#[derive(Debug, Deserialize)]
pub struct ApiServerConfig {
    /// Listen address (default: 0.0.0.0:8080)
    #[serde(default = "default_listen_addr")]
    pub listen_addr: SocketAddr,

    /// Root of `projects/`, `downloads/` and `repos/`.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Upper bound for any single git invocation, in seconds.
    #[serde(default = "default_command_timeout_secs")]
    pub command_timeout_secs: u64,
}

impl ApiServerConfig {
    /// The configured data dir, or `<temp>/agent-starter-pack-api`.
    #[must_use]
    pub fn resolved_data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DATA_DIR_NAME))
    }
}

/// Fallback credentials for the version-control host (unprefixed env vars).
#[derive(Debug, Default, Deserialize)]
pub struct HostCredentials {
    /// `GITHUB_TOKEN`
    #[serde(default)]
    pub github_token: Option<String>,
}

fn default_listen_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8080))
}

fn default_command_timeout_secs() -> u64 {
    600
}

impl Default for ApiServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            data_dir: None,
            command_timeout_secs: default_command_timeout_secs(),
        }
    }
}
