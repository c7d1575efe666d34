//! API Routes

use axum::{
    body::Body,
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use serde::Deserialize;

use crate::models::{StatusMessage, PROCESSING_MESSAGE, STOPPED_MESSAGE};
use crate::state::AppState;
use crate::stream_mux;

/// Control/viewing page served at the root
const INDEX_PAGE: &str = include_str!("index.html");

/// Create API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Page & live view
        .route("/", get(index_page))
        .route("/video_feed", get(video_feed))
        // Classification control
        .route("/start", post(start_classification))
        .route("/stop", post(stop_classification))
        .route("/update_confidence", post(update_confidence))
        .route("/get_classification", get(get_classification))
        // Health
        .route("/healthz", get(super::health_check))
        .with_state(state)
}

// ========================================
// Page & Stream Handlers
// ========================================

async fn index_page() -> Html<&'static str> {
    Html(INDEX_PAGE)
}

async fn video_feed(State(state): State<AppState>) -> impl IntoResponse {
    let stream = stream_mux::mjpeg_stream(state.frame_buffer.clone(), state.config.stream_fps);

    (
        [(header::CONTENT_TYPE, stream_mux::CONTENT_TYPE)],
        Body::from_stream(stream),
    )
}

// ========================================
// Classification Control Handlers
// ========================================

async fn start_classification(State(state): State<AppState>) -> StatusCode {
    state.classification.set_enabled(true);
    tracing::info!("Classification started");
    StatusCode::NO_CONTENT
}

async fn stop_classification(State(state): State<AppState>) -> StatusCode {
    state.classification.set_enabled(false);
    tracing::info!("Classification stopped");
    StatusCode::NO_CONTENT
}

#[derive(Debug, Deserialize)]
struct UpdateConfidenceForm {
    confidence: String,
}

async fn update_confidence(
    State(state): State<AppState>,
    Form(form): Form<UpdateConfidenceForm>,
) -> Result<impl IntoResponse, crate::Error> {
    // The field arrives as text; any float is accepted, range unchecked.
    let confidence: f32 = form.confidence.trim().parse().map_err(|_| {
        crate::Error::Validation(format!("invalid confidence value: {}", form.confidence))
    })?;

    state.classification.set_confidence_threshold(confidence);
    tracing::info!(confidence, "Confidence threshold updated");
    Ok(StatusCode::NO_CONTENT)
}

async fn get_classification(State(state): State<AppState>) -> Response {
    if !state.classification.is_enabled() {
        return Json(StatusMessage::new(STOPPED_MESSAGE)).into_response();
    }

    match state.result_slot.try_consume() {
        Some(result) => Json(result).into_response(),
        None => Json(StatusMessage::new(PROCESSING_MESSAGE)).into_response(),
    }
}
