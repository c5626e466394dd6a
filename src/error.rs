//! Common error types for the demo harness

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// The upstream call exceeded its timeout bound. The reported latency is
    /// pinned at the ceiling rather than the measured elapsed time.
    #[error("Backend timeout")]
    UpstreamTimeout { latency_ms: f64 },

    /// Any other transport-level failure reaching the upstream: refused
    /// connection, reset, DNS failure, undecodable body.
    #[error("{0}")]
    UpstreamUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<f64>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, latency_ms) = match &self {
            AppError::UpstreamTimeout { latency_ms } => {
                (StatusCode::GATEWAY_TIMEOUT, Some(*latency_ms))
            }
            AppError::UpstreamUnavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, None),
            AppError::Config(_) | AppError::Io(_) | AppError::Json(_) | AppError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, None)
            }
        };

        let body = Json(ErrorBody {
            error: self.to_string(),
            latency_ms,
        });

        (status, body).into_response()
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;
