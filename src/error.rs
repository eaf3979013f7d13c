use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(String),

    #[error("pricing configuration unavailable: {0}")]
    ConfigUnavailable(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("internal error: {0}")]
    Internal(String),
}

/// Failures talking to the routing or geocoding provider. These are absorbed
/// by the caller and never reach an HTTP response.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {0}")]
    Status(u16),

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("no route found")]
    NoRoute,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("store is read-only")]
    ReadOnly,

    #[error("{0} not found")]
    NotFound(String),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable(msg) => AppError::ConfigUnavailable(msg),
            StoreError::ReadOnly => {
                AppError::Conflict("pricing settings are managed upstream".to_string())
            }
            StoreError::NotFound(what) => AppError::NotFound(format!("{what} not found")),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::InvalidCoordinate(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::ConfigUnavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                format!("fare cannot be computed right now: {msg}"),
            ),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
