//! Agent Starter API server entry point.
//!
//! Initialises tracing, loads configuration from `STARTER_*` environment
//! variables (plus the unprefixed `GITHUB_TOKEN` fallback), prepares the data
//! directory and serves the generator over HTTP.

use std::time::Duration;

use anyhow::{Context, Result};
use starter_api_server::{AppState, build_router};
use starter_cli::application::DataDirs;
use starter_cli::infra::LocalFs;
use starter_common::{ApiServerConfig, HostCredentials};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialise tracing with RUST_LOG env filter.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load configuration from STARTER_* env vars.
    let config: ApiServerConfig = envy::prefixed("STARTER_")
        .from_env()
        .context("failed to load config from STARTER_* env vars")?;
    let credentials: HostCredentials = envy::from_env().unwrap_or_default();

    let dirs = DataDirs::new(config.resolved_data_dir());
    dirs.ensure(&LocalFs)?;

    tracing::info!(
        listen_addr = %config.listen_addr,
        data_dir = %dirs.root.display(),
        command_timeout_secs = config.command_timeout_secs,
        token_configured = credentials.github_token.is_some(),
        "configuration loaded",
    );

    // 3. Build the router.
    let state = AppState::new(
        dirs,
        Duration::from_secs(config.command_timeout_secs),
        credentials.github_token,
    );
    let router = build_router(state);

    // 4. Bind and serve until Ctrl-C.
    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .context("failed to bind TCP listener")?;
    tracing::info!("agent starter API ready — http://{}", config.listen_addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    tracing::info!("agent starter API shut down");
    Ok(())
}

/// Wait for SIGINT (Ctrl-C) for graceful shutdown.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to install Ctrl-C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("received shutdown signal");
}
