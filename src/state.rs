//! Application state
//!
//! Holds all shared components and state

use crate::classification_config::{ClassificationConfig, DEFAULT_CONFIDENCE_THRESHOLD};
use crate::frame_buffer::FrameBuffer;
use crate::result_slot::ResultSlot;
use std::sync::Arc;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Camera source ("test-pattern" or "v4l2")
    pub camera_source: String,
    /// Camera device path (v4l2 source)
    pub camera_device: String,
    /// Capture width
    pub camera_width: u32,
    /// Capture height
    pub camera_height: u32,
    /// Capture rate (frames per second)
    pub capture_fps: u32,
    /// Classification worker cadence (cycles per second)
    pub worker_hz: u32,
    /// Client-facing stream rate (chunks per second)
    pub stream_fps: u32,
    /// Confidence threshold applied at startup
    pub confidence_threshold: f32,
    /// ONNX model path; the stub engine is used when unset
    pub model_path: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            camera_source: std::env::var("CAMERA_SOURCE")
                .unwrap_or_else(|_| "test-pattern".to_string()),
            camera_device: std::env::var("CAMERA_DEVICE")
                .unwrap_or_else(|_| "/dev/video0".to_string()),
            camera_width: std::env::var("CAMERA_WIDTH")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(640),
            camera_height: std::env::var("CAMERA_HEIGHT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(480),
            capture_fps: std::env::var("CAPTURE_FPS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(15),
            worker_hz: std::env::var("WORKER_HZ")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            stream_fps: std::env::var("STREAM_FPS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            confidence_threshold: std::env::var("CONFIDENCE_THRESHOLD")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_CONFIDENCE_THRESHOLD),
            model_path: std::env::var("MODEL_PATH").ok(),
        }
    }
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Application config
    pub config: AppConfig,
    /// Latest captured frame
    pub frame_buffer: Arc<FrameBuffer>,
    /// Latest classification result
    pub result_slot: Arc<ResultSlot>,
    /// Runtime classification controls
    pub classification: Arc<ClassificationConfig>,
}
