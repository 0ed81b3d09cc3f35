//! HTTP error mapping. Every error body is `{"detail": "..."}`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use starter_cli::domain::ProjectError;
use starter_common::ErrorResponse;

#[derive(Debug)]
pub enum ApiError {
    /// Unknown or disallowed download file name.
    NotFound,
    /// Any failure of the generate pipeline.
    Generation(anyhow::Error),
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::Generation(err)
    }
}

fn detail(status: StatusCode, detail: String) -> Response {
    (status, Json(ErrorResponse { detail })).into_response()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound => detail(StatusCode::NOT_FOUND, "File not found".to_string()),
            Self::Generation(err) => match err.downcast_ref::<ProjectError>() {
                Some(ProjectError::InvalidAgentName { reason, .. }) => {
                    detail(StatusCode::BAD_REQUEST, (*reason).to_string())
                }
                Some(e) if e.is_validation() => detail(StatusCode::BAD_REQUEST, e.to_string()),
                _ => {
                    tracing::error!(error = %format!("{err:#}"), "project generation failed");
                    detail(
                        StatusCode::INTERNAL_SERVER_ERROR,
                        format!("Project generation failed: {err:#}"),
                    )
                }
            },
        }
    }
}
