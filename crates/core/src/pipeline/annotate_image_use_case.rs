use std::path::Path;

use crate::pipeline::annotate_pass::AnnotatePass;
use crate::video::domain::frame_source::FrameSource;
use crate::video::domain::image_writer::ImageWriter;

/// Single-image pipeline: read → detect → predict → annotate → write.
pub struct AnnotateImageUseCase {
    source: Box<dyn FrameSource>,
    image_writer: Box<dyn ImageWriter>,
    pass: AnnotatePass,
}

impl AnnotateImageUseCase {
    pub fn new(
        source: Box<dyn FrameSource>,
        image_writer: Box<dyn ImageWriter>,
        pass: AnnotatePass,
    ) -> Self {
        Self {
            source,
            image_writer,
            pass,
        }
    }

    /// Runs the pass over the source's single frame and writes the
    /// composition. An image with no faces still produces output
    /// (empty panel).
    pub fn execute(&mut self, output_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        let _metadata = self.source.open()?;

        let frame = self.source.frames().next().ok_or("No frames in image")??;
        self.source.close();

        let composed = self.pass.run(frame)?;
        self.image_writer.write(output_path, &composed)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::domain::attribute::Prediction;
    use crate::attributes::domain::attribute_classifier::AttributeClassifier;
    use crate::detection::domain::face_detector::FaceDetector;
    use crate::shared::face_box::FaceBox;
    use crate::shared::frame::Frame;
    use crate::video::domain::source_metadata::SourceMetadata;
    use std::sync::{Arc, Mutex};

    // --- Stubs ---

    struct StubSource {
        frame: Option<Frame>,
    }

    impl StubSource {
        fn new(frame: Frame) -> Self {
            Self { frame: Some(frame) }
        }
    }

    impl FrameSource for StubSource {
        fn open(&mut self) -> Result<SourceMetadata, Box<dyn std::error::Error>> {
            let frame = self.frame.as_ref().unwrap();
            Ok(SourceMetadata {
                width: frame.width(),
                height: frame.height(),
                fps: 0.0,
                total_frames: Some(1),
                source_path: None,
            })
        }

        fn frames(
            &mut self,
        ) -> Box<dyn Iterator<Item = Result<Frame, Box<dyn std::error::Error>>> + '_> {
            Box::new(self.frame.take().into_iter().map(Ok))
        }

        fn close(&mut self) {
            self.frame = None;
        }
    }

    struct StubImageWriter {
        written: Arc<Mutex<Vec<(std::path::PathBuf, Frame)>>>,
    }

    impl StubImageWriter {
        fn new() -> Self {
            Self {
                written: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    impl ImageWriter for StubImageWriter {
        fn write(&self, path: &Path, frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
            self.written
                .lock()
                .unwrap()
                .push((path.to_path_buf(), frame.clone()));
            Ok(())
        }
    }

    struct StubDetector {
        faces: Vec<FaceBox>,
    }

    impl FaceDetector for StubDetector {
        fn detect(&mut self, _frame: &Frame) -> Result<Vec<FaceBox>, Box<dyn std::error::Error>> {
            Ok(self.faces.clone())
        }
    }

    struct StubClassifier;

    impl AttributeClassifier for StubClassifier {
        fn predict(&mut self, _face: &Frame) -> Result<Prediction, Box<dyn std::error::Error>> {
            Ok(Prediction {
                labels: vec!["Smiling"],
                scores: vec![],
            })
        }
    }

    // --- Helpers ---

    fn make_pass(faces: Vec<FaceBox>) -> AnnotatePass {
        AnnotatePass::new(
            Box::new(StubDetector { faces }),
            Box::new(StubClassifier),
            0.35,
        )
    }

    fn face_box() -> FaceBox {
        FaceBox {
            x: 10,
            y: 10,
            width: 60,
            height: 60,
            confidence: 0.9,
        }
    }

    // --- Tests ---

    #[test]
    fn test_writes_composed_output() {
        let writer = StubImageWriter::new();
        let written = writer.written.clone();

        let mut uc = AnnotateImageUseCase::new(
            Box::new(StubSource::new(Frame::filled(200, 100, 3, 0))),
            Box::new(writer),
            make_pass(vec![face_box()]),
        );

        uc.execute(Path::new("out.png")).unwrap();

        let written = written.lock().unwrap();
        assert_eq!(written.len(), 1);
        assert_eq!(written[0].0, Path::new("out.png"));
        assert_eq!(written[0].1.width(), 200);
        assert_eq!(written[0].1.height(), 150); // frame + half-height panel
    }

    #[test]
    fn test_no_faces_still_writes_output() {
        let writer = StubImageWriter::new();
        let written = writer.written.clone();

        let mut uc = AnnotateImageUseCase::new(
            Box::new(StubSource::new(Frame::filled(100, 100, 3, 0))),
            Box::new(writer),
            make_pass(vec![]),
        );

        uc.execute(Path::new("out.png")).unwrap();
        assert_eq!(written.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_source_open_failure_propagates() {
        struct BrokenSource;
        impl FrameSource for BrokenSource {
            fn open(&mut self) -> Result<SourceMetadata, Box<dyn std::error::Error>> {
                Err("no such file".into())
            }
            fn frames(
                &mut self,
            ) -> Box<dyn Iterator<Item = Result<Frame, Box<dyn std::error::Error>>> + '_>
            {
                Box::new(std::iter::empty())
            }
            fn close(&mut self) {}
        }

        let mut uc = AnnotateImageUseCase::new(
            Box::new(BrokenSource),
            Box::new(StubImageWriter::new()),
            make_pass(vec![]),
        );
        assert!(uc.execute(Path::new("out.png")).is_err());
    }
}
