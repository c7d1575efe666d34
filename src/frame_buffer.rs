//! FrameBuffer - Latest Captured Frame
//!
//! ## Responsibilities
//!
//! - Hold the single most-recently captured frame
//! - Atomic replace on write, snapshot on read
//! - Never block the capture thread against viewers

use chrono::{DateTime, Utc};
use std::sync::{Arc, RwLock};

/// One encoded camera frame
#[derive(Debug, Clone)]
pub struct Frame {
    /// Image data (JPEG bytes)
    pub data: Vec<u8>,
    /// Capture timestamp
    pub captured_at: DateTime<Utc>,
}

impl Frame {
    /// Create a frame captured now
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            data,
            captured_at: Utc::now(),
        }
    }
}

/// Shared holder for the most recent frame.
///
/// The capture thread writes, stream viewers and the classification
/// worker read. Readers get an `Arc` snapshot, so a concurrent replace
/// never exposes partial bytes. Uses a std lock because the writer is
/// a plain OS thread; critical sections are pointer swaps.
#[derive(Default)]
pub struct FrameBuffer {
    current: RwLock<Option<Arc<Frame>>>,
}

impl FrameBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the newest frame, replacing any prior one
    pub fn put(&self, frame: Frame) {
        let mut current = self
            .current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *current = Some(Arc::new(frame));
    }

    /// Snapshot of the current frame, if any. Non-destructive,
    /// repeatable across readers.
    pub fn get(&self) -> Option<Arc<Frame>> {
        self.current
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Whether a frame has been captured yet
    pub fn has_frame(&self) -> bool {
        self.current
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .is_some()
    }

    /// Capture timestamp of the current frame, if any
    pub fn last_captured_at(&self) -> Option<DateTime<Utc>> {
        self.current
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .as_ref()
            .map(|frame| frame.captured_at)
    }
}
