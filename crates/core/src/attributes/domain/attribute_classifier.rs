use crate::shared::frame::Frame;

use super::attribute::Prediction;

/// Domain interface for facial attribute prediction.
///
/// Takes a cropped face (any size); implementations own preprocessing.
pub trait AttributeClassifier: Send {
    fn predict(&mut self, face: &Frame) -> Result<Prediction, Box<dyn std::error::Error>>;
}
