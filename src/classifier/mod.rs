//! Classifier - Fruit/Quality Inference
//!
//! ## Responsibilities
//!
//! - Define the blocking classification interface used by the worker
//! - Resolve raw model scores into a (fruit, quality) prediction
//! - Provide a deterministic stub engine and an ONNX engine behind the
//!   `onnx` feature
//!
//! Model outputs score a combined "quality fruit" label ("fresh apple",
//! "rotten banana", ...). The resolution step splits the winning label
//! into its quality and fruit parts.

mod stub;

#[cfg(feature = "onnx")]
mod onnx;

pub use stub::StubClassifier;

#[cfg(feature = "onnx")]
pub use onnx::OnnxClassifier;

use crate::error::Result;
use crate::models::LabelScore;
use image::DynamicImage;
use std::sync::Arc;

/// Fruit label reported when no prediction clears the threshold
pub const UNKNOWN_FRUIT_LABEL: &str = "unknown";

/// Quality label reported when no prediction clears the threshold
pub const INDEFINITE_QUALITY_LABEL: &str = "indefinite";

/// Combined labels scored by the default model, index-aligned with its
/// output vector.
pub const LABELS: [&str; 15] = [
    "fresh apple",
    "fresh banana",
    "fresh mango",
    "fresh orange",
    "fresh tomato",
    "rotten apple",
    "rotten banana",
    "rotten mango",
    "rotten orange",
    "rotten tomato",
    "unripe apple",
    "unripe banana",
    "unripe carrot",
    "unripe mango",
    "unripe tomato",
];

/// Owned copy of [`LABELS`]
pub fn default_labels() -> Vec<String> {
    LABELS.iter().map(|label| label.to_string()).collect()
}

/// A resolved prediction: fruit and quality, each with the winning
/// probability.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub fruit: LabelScore,
    pub quality: LabelScore,
}

impl Prediction {
    /// Below-threshold pair. Probability is pinned to 1.0.
    pub fn unknown() -> Self {
        Self {
            fruit: LabelScore::new(UNKNOWN_FRUIT_LABEL, 1.0),
            quality: LabelScore::new(INDEFINITE_QUALITY_LABEL, 1.0),
        }
    }
}

/// A blocking fruit/quality classification engine.
///
/// One classification occupies the caller fully; the worker runs it on
/// a blocking task so a slow model throttles only classification.
pub trait Classifier: Send + Sync {
    fn classify(&self, image: &DynamicImage, confidence_threshold: f32) -> Result<Prediction>;
}

/// Build the classification engine. With a model path this loads the
/// ONNX engine (when compiled in); otherwise the content-driven stub.
pub fn build_classifier(model_path: Option<&str>) -> Result<Arc<dyn Classifier>> {
    match model_path {
        None => {
            tracing::info!("No model configured, using stub classifier");
            Ok(Arc::new(StubClassifier::default()))
        }
        #[cfg(feature = "onnx")]
        Some(path) => Ok(Arc::new(OnnxClassifier::load(path, default_labels())?)),
        #[cfg(not(feature = "onnx"))]
        Some(path) => Err(crate::error::Error::Inference(format!(
            "model {} configured but built without the onnx feature",
            path
        ))),
    }
}

/// Turn a raw score vector into a prediction.
///
/// The top score wins if it is at or above the threshold (ties keep
/// the lowest index). A winning combined label splits at the first
/// space into quality and fruit; single-word labels report quality
/// "N/A". Anything below the threshold resolves to the unknown pair.
pub(crate) fn resolve_prediction(
    scores: &[f32],
    labels: &[String],
    confidence_threshold: f32,
) -> Prediction {
    let mut best_index = None;
    let mut best_score = f32::NEG_INFINITY;
    for (index, score) in scores.iter().copied().enumerate() {
        if score > best_score {
            best_index = Some(index);
            best_score = score;
        }
    }

    match best_index {
        Some(index) if best_score >= confidence_threshold => {
            let combined = labels.get(index).map(String::as_str).unwrap_or_default();
            let (quality, fruit) = split_combined_label(combined);
            Prediction {
                fruit: LabelScore::new(fruit, best_score),
                quality: LabelScore::new(quality, best_score),
            }
        }
        _ => Prediction::unknown(),
    }
}

fn split_combined_label(combined: &str) -> (String, String) {
    match combined.split_once(' ') {
        Some((quality, fruit)) => (quality.to_string(), fruit.to_string()),
        None => ("N/A".to_string(), combined.to_string()),
    }
}
