//! Fruitcam Server Library
//!
//! Camera streaming and fruit/quality classification service
//!
//! ## Architecture (9 Components)
//!
//! 1. Camera - Frame acquisition backends (V4L2, test pattern)
//! 2. FrameSource - Dedicated capture thread feeding the buffer
//! 3. FrameBuffer - Latest-frame-wins shared frame store
//! 4. StreamMux - MJPEG multipart stream assembly
//! 5. Classifier - Fruit/quality inference backends (ONNX, stub)
//! 6. ClassificationWorker - Background inference loop
//! 7. ResultSlot - Single-result handoff to the polling API
//! 8. FruitInfo - Advisory lookup for classified produce
//! 9. WebAPI - REST API endpoints and embedded UI
//!
//! ## Design Principles
//!
//! - Capture never blocks on inference and inference never blocks HTTP
//! - Consumers always see whole frames, never partial writes
//! - Each classification result is delivered to at most one poll

pub mod camera;
pub mod classification_config;
pub mod classification_worker;
pub mod classifier;
pub mod error;
pub mod frame_buffer;
pub mod frame_source;
pub mod fruit_info;
pub mod models;
pub mod result_slot;
pub mod state;
pub mod stream_mux;
pub mod web_api;

pub use error::{Error, Result};
pub use state::{AppConfig, AppState};
