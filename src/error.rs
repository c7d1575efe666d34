//! Error handling for the fruitcam server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Camera device error (open/configure/capture)
    #[error("Camera error: {0}")]
    Camera(String),

    /// Frame decode error (corrupt or truncated JPEG)
    #[error("Decode error: {0}")]
    Decode(String),

    /// Inference error (model load or forward pass)
    #[error("Inference error: {0}")]
    Inference(String),

    /// Validation error (malformed client input)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match &self {
            Error::Camera(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "CAMERA_ERROR",
                msg.clone(),
            ),
            Error::Decode(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "DECODE_ERROR",
                msg.clone(),
            ),
            Error::Inference(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INFERENCE_ERROR",
                msg.clone(),
            ),
            Error::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            Error::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                msg.clone(),
            ),
        };

        tracing::error!(
            status = %status,
            error_code = %error_code,
            message = %message,
            "Request error"
        );

        let body = Json(json!({
            "error_code": error_code,
            "message": message
        }));

        (status, body).into_response()
    }
}
