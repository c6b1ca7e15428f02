use crate::annotation::attribute_panel::AttributePanel;
use crate::annotation::frame_annotator::{draw_face_box, draw_face_index};
use crate::attributes::domain::attribute_classifier::AttributeClassifier;
use crate::detection::domain::face_detector::FaceDetector;
use crate::shared::frame::Frame;

/// One detection-and-annotation pass over a single frame.
///
/// Detects faces, predicts attributes from margin-expanded crops of the
/// pristine frame, then overlays boxes and indices and stacks the
/// attribute panel underneath. Per-face prediction failures are logged
/// and leave that face's panel entry empty.
pub struct AnnotatePass {
    detector: Box<dyn FaceDetector>,
    classifier: Box<dyn AttributeClassifier>,
    margin: f64,
}

impl AnnotatePass {
    pub fn new(
        detector: Box<dyn FaceDetector>,
        classifier: Box<dyn AttributeClassifier>,
        margin: f64,
    ) -> Self {
        Self {
            detector,
            classifier,
            margin,
        }
    }

    /// Consumes a frame and returns the composed output
    /// (annotated frame over attribute panel, 1.5x the input height).
    pub fn run(&mut self, mut frame: Frame) -> Result<Frame, Box<dyn std::error::Error>> {
        let faces = self.detector.detect(&frame)?;

        // Predict from the unannotated frame before any overlay lands on it
        let mut predictions = Vec::with_capacity(faces.len());
        for (idx, face) in faces.iter().enumerate() {
            let expanded = face.expanded(self.margin, frame.width(), frame.height());
            let crop = frame.crop(&expanded);
            let labels = match self.classifier.predict(&crop) {
                Ok(prediction) => prediction.labels,
                Err(e) => {
                    log::warn!("attribute prediction failed for face {}: {e}", idx + 1);
                    Vec::new()
                }
            };
            predictions.push(labels);
        }

        let mut panel = AttributePanel::new(frame.width(), frame.height());
        for (idx, (face, labels)) in faces.iter().zip(&predictions).enumerate() {
            draw_face_box(&mut frame, face);
            draw_face_index(&mut frame, face, idx);
            panel.add_entry(idx, labels);
        }

        Ok(panel.compose(&frame))
    }
}
