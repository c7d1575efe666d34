//! ClassificationConfig - Runtime Classification Controls
//!
//! ## Responsibilities
//!
//! - Hold the process-wide enabled flag and confidence threshold
//! - Lock-free reads from the worker loop, writes from control handlers
//!
//! A worker cycle may observe a threshold one update stale; that is
//! acceptable, so plain relaxed atomics suffice.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

/// Default confidence threshold applied at startup
pub const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 0.7;

/// Runtime classification controls shared between the worker and the
/// HTTP control handlers. The threshold is stored as f32 bits in an
/// `AtomicU32` so both fields stay independently lock-free.
pub struct ClassificationConfig {
    enabled: AtomicBool,
    confidence_threshold: AtomicU32,
}

impl ClassificationConfig {
    pub fn new(confidence_threshold: f32) -> Self {
        Self {
            enabled: AtomicBool::new(false),
            confidence_threshold: AtomicU32::new(confidence_threshold.to_bits()),
        }
    }

    /// Whether classification is currently enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    /// Enable or disable classification. Takes effect on the worker's
    /// next poll.
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }

    /// Current confidence threshold
    pub fn confidence_threshold(&self) -> f32 {
        f32::from_bits(self.confidence_threshold.load(Ordering::Relaxed))
    }

    /// Replace the confidence threshold
    pub fn set_confidence_threshold(&self, threshold: f32) {
        self.confidence_threshold
            .store(threshold.to_bits(), Ordering::Relaxed);
    }
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIDENCE_THRESHOLD)
    }
}
