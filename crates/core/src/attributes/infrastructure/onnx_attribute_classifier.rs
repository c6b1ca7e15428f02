/// Multi-label facial attribute classifier using ONNX Runtime via `ort`.
use std::path::Path;

use crate::attributes::domain::attribute::{Prediction, ATTRIBUTE_COUNT};
use crate::attributes::domain::attribute_classifier::AttributeClassifier;
use crate::shared::constants::CLASSIFIER_INPUT_SIZE;
use crate::shared::frame::Frame;

use super::preprocess::classifier_input;

/// Attribute classifier backed by an ONNX Runtime session.
///
/// Expects a model with NHWC input `(1, 224, 224, 3)` and 37 sigmoid
/// outputs in vocabulary order.
pub struct OnnxAttributeClassifier {
    session: ort::session::Session,
    threshold: f32,
}

impl OnnxAttributeClassifier {
    pub fn new(model_path: &Path, threshold: f32) -> Result<Self, Box<dyn std::error::Error>> {
        let session = ort::session::Session::builder()?.commit_from_file(model_path)?;
        Ok(Self { session, threshold })
    }
}

impl AttributeClassifier for OnnxAttributeClassifier {
    fn predict(&mut self, face: &Frame) -> Result<Prediction, Box<dyn std::error::Error>> {
        let input = classifier_input(face, CLASSIFIER_INPUT_SIZE)?;

        let input_value = ort::value::Tensor::from_array(input)?;
        let outputs = self.session.run(ort::inputs![input_value])?;
        if outputs.len() == 0 {
            return Err("attribute model produced no outputs".into());
        }

        let tensor = outputs[0].try_extract_array::<f32>()?;
        let scores: Vec<f32> = tensor.iter().copied().collect();
        if scores.len() != ATTRIBUTE_COUNT {
            return Err(format!(
                "attribute model produced {} scores, expected {ATTRIBUTE_COUNT}",
                scores.len()
            )
            .into());
        }

        Ok(Prediction::from_scores(&scores, self.threshold))
    }
}
