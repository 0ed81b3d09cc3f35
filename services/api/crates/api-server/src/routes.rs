//! HTTP routes.
//!
//! - `POST /api/v1/generate/project`   — generate, package, optionally publish
//! - `GET  /api/v1/download/{filename}` — archive download as an attachment
//! - `GET  /downloads/{filename}`       — static serving of the downloads dir
//! - `GET  /`                           — service metadata
//! - `GET  /health`                     — liveness probe

use axum::Router;
use axum::body::Body;
use axum::extract::{Path, Request, State};
use axum::http::HeaderValue;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::{Json, Response};
use axum::routing::{get, post};
use serde_json::{Value, json};
use starter_cli::output::TracingReporter;
use starter_common::{GenerateProjectResponse, ProjectRequest, validate_archive_file_name};
use tower::ServiceExt;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::error::ApiError;
use crate::state::AppState;

pub const SERVICE_NAME: &str = "Agent Starter Pack API";

/// Build the axum router over `state`.
pub fn build_router(state: AppState) -> Router {
    let downloads = ServeDir::new(&state.dirs.downloads);
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/api/v1/generate/project", post(generate_project))
        .route("/api/v1/download/{filename}", get(download_project))
        .nest_service("/downloads", downloads)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn root() -> Json<Value> {
    Json(json!({
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "generate_project": "/api/v1/generate/project",
            "download": "/api/v1/download/{filename}",
            "health": "/health",
        },
    }))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

async fn generate_project(
    State(state): State<AppState>,
    Json(request): Json<ProjectRequest>,
) -> Result<Json<GenerateProjectResponse>, ApiError> {
    let reporter = TracingReporter::new(&request.agent_name);
    let response = state
        .generator
        .generate(
            &reporter,
            &state.dirs,
            &request,
            state.fallback_token.as_deref(),
        )
        .await?;
    Ok(Json(response))
}

/// Streams the archive from disk as an attachment.
async fn download_project(
    State(state): State<AppState>,
    Path(filename): Path<String>,
    request: Request,
) -> Result<Response, ApiError> {
    validate_archive_file_name(&filename).map_err(|_| ApiError::NotFound)?;
    let path = state.dirs.downloads.join(&filename);
    if !tokio::fs::metadata(&path).await.is_ok_and(|m| m.is_file()) {
        return Err(ApiError::NotFound);
    }
    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{filename}\""))
        .map_err(|_| ApiError::NotFound)?;

    let Ok(response) = ServeFile::new(&path).oneshot(request).await;
    let mut response = response.map(Body::new);
    let headers = response.headers_mut();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/zip"));
    headers.insert(CONTENT_DISPOSITION, disposition);
    Ok(response)
}
