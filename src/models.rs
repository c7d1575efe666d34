//! Shared models and types for the fruitcam server
//!
//! This module contains types shared across multiple modules
//! to avoid circular dependencies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Message shown by the polling endpoint while classification is stopped.
pub const STOPPED_MESSAGE: &str = "Classification stopped.";

/// Message shown by the polling endpoint while a result is pending.
pub const PROCESSING_MESSAGE: &str = "Processing...";

/// A label with its confidence score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelScore {
    pub label: String,
    pub probability: f32,
}

impl LabelScore {
    pub fn new(label: impl Into<String>, probability: f32) -> Self {
        Self {
            label: label.into(),
            probability,
        }
    }
}

/// A completed classification: fruit + quality scores plus advisory text.
///
/// Immutable once constructed; at most one instance lives in the
/// result slot at a time (latest-wins).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub fruit: LabelScore,
    pub quality: LabelScore,
    pub info: String,
}

impl ClassificationResult {
    pub fn new(fruit: LabelScore, quality: LabelScore, info: impl Into<String>) -> Self {
        Self {
            fruit,
            quality,
            info: info.into(),
        }
    }
}

/// Status message response (`{"message": "..."}`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusMessage {
    pub message: String,
}

impl StatusMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub capture_warm: bool,
    pub classification_enabled: bool,
    pub confidence_threshold: f32,
    pub last_frame_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_result_serializes_nested_shape() {
        let result = ClassificationResult::new(
            LabelScore::new("apple", 0.9),
            LabelScore::new("fresh", 0.9),
            "Shelf life: 1-2 weeks at room temperature.",
        );

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["fruit"]["label"], "apple");
        assert_eq!(json["quality"]["label"], "fresh");
        assert_eq!(json["info"], "Shelf life: 1-2 weeks at room temperature.");
        let prob = json["fruit"]["probability"].as_f64().unwrap();
        assert!((prob - 0.9).abs() < 1e-6);
    }

    #[test]
    fn status_message_serializes_message_field() {
        let json = serde_json::to_value(StatusMessage::new(STOPPED_MESSAGE)).unwrap();
        assert_eq!(json["message"], "Classification stopped.");
    }
}
