//! Error types for the broker's process and HTTP layers.
//!
//! The queue core itself has no failure modes; everything here happens around it.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Startup and serving failures, reported by the binary.
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid listen address '{0}'")]
    InvalidAddress(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Request rejections, rendered as `{"error": ...}` bodies.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("invalid JSON")]
    InvalidJson,

    #[error("invalid queue name: {0}")]
    InvalidQueueName(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::InvalidJson | ApiError::InvalidQueueName(_) => StatusCode::BAD_REQUEST,
        };

        let body = Json(serde_json::json!({
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_errors_render_as_bad_request() {
        let response = ApiError::InvalidJson.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = ApiError::InvalidQueueName("bad utf-8".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
