//! ONNX classification engine via tract.

use crate::error::{Error, Result};
use image::{imageops::FilterType, DynamicImage};
use tract_onnx::prelude::*;

use super::{resolve_prediction, Classifier, Prediction};

/// Input geometry expected by the classification model
const MODEL_INPUT_WIDTH: u32 = 224;
const MODEL_INPUT_HEIGHT: u32 = 224;

type OnnxPlan = SimplePlan<TypedFact, Box<dyn TypedOp>, TypedModel>;

pub struct OnnxClassifier {
    model: OnnxPlan,
    labels: Vec<String>,
}

impl OnnxClassifier {
    /// Load and optimize the model at `model_path`. `labels` must be
    /// index-aligned with the model's output vector.
    pub fn load(model_path: &str, labels: Vec<String>) -> Result<Self> {
        let model = tract_onnx::onnx()
            .model_for_path(model_path)
            .map_err(|e| Error::Inference(format!("load {} failed: {}", model_path, e)))?
            .into_optimized()
            .map_err(|e| Error::Inference(format!("optimize {} failed: {}", model_path, e)))?
            .into_runnable()
            .map_err(|e| Error::Inference(format!("plan {} failed: {}", model_path, e)))?;

        tracing::info!(model_path = %model_path, labels = labels.len(), "ONNX model loaded");

        Ok(Self { model, labels })
    }

    fn image_to_tensor(image: &DynamicImage) -> Result<Tensor> {
        let resized = image.resize_exact(MODEL_INPUT_WIDTH, MODEL_INPUT_HEIGHT, FilterType::Triangle);
        let rgb = resized.to_rgb8();
        let (width, height) = (rgb.width() as usize, rgb.height() as usize);

        let mut tensor = Tensor::zero::<f32>(&[1, 3, height, width])
            .map_err(|e| Error::Inference(format!("tensor alloc failed: {}", e)))?;
        let slice = tensor
            .as_slice_mut::<f32>()
            .map_err(|e| Error::Inference(format!("tensor access failed: {}", e)))?;

        for (x, y, pixel) in rgb.enumerate_pixels() {
            for channel in 0..3 {
                let index = channel * height * width + y as usize * width + x as usize;
                slice[index] = pixel[channel] as f32 / 255.0;
            }
        }

        Ok(tensor)
    }
}

impl Classifier for OnnxClassifier {
    fn classify(&self, image: &DynamicImage, confidence_threshold: f32) -> Result<Prediction> {
        let input = Self::image_to_tensor(image)?;

        let outputs = self
            .model
            .run(tvec!(input.into_tvalue()))
            .map_err(|e| Error::Inference(format!("inference failed: {}", e)))?;

        let output = outputs
            .first()
            .ok_or_else(|| Error::Inference("model produced no outputs".to_string()))?;
        let scores = output
            .to_array_view::<f32>()
            .map_err(|e| Error::Inference(format!("unexpected output type: {}", e)))?;
        let scores: Vec<f32> = scores.iter().copied().collect();

        Ok(resolve_prediction(
            &scores,
            &self.labels,
            confidence_threshold,
        ))
    }
}
