use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::oracle::OracleError;
use crate::store::StoreError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Upstream parse error: {0}")]
    UpstreamParse(String),

    #[error("Upstream call error: {0}")]
    UpstreamCall(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Wraps an oracle failure with the name of the step that issued the call.
    pub fn oracle(step: &str, error: OracleError) -> Self {
        match error {
            OracleError::Parse(e) => AppError::UpstreamParse(format!("{step}: {e}")),
            other => AppError::UpstreamCall(format!("{step}: {other}")),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::SessionNotFound(_) => AppError::NotFound(error.to_string()),
            StoreError::SessionClosed { .. } | StoreError::NoResponses(_) => {
                AppError::Validation(error.to_string())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::UpstreamParse(msg) => {
                tracing::error!("Upstream parse error: {msg}");
                (StatusCode::BAD_GATEWAY, "UPSTREAM_PARSE_ERROR", msg.clone())
            }
            AppError::UpstreamCall(msg) => {
                tracing::error!("Upstream call error: {msg}");
                (StatusCode::BAD_GATEWAY, "UPSTREAM_CALL_ERROR", msg.clone())
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    e.to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
