//! WebAPI - HTTP Endpoints
//!
//! ## Responsibilities
//!
//! - Control/viewing page and MJPEG live view
//! - Classification start/stop/threshold controls
//! - Non-blocking result polling

mod routes;

pub use routes::create_router;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use crate::models::HealthResponse;
use crate::state::AppState;

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        capture_warm: state.frame_buffer.has_frame(),
        classification_enabled: state.classification.is_enabled(),
        confidence_threshold: state.classification.confidence_threshold(),
        last_frame_at: state.frame_buffer.last_captured_at(),
    };

    Json(response)
}
