use crate::pipeline::annotate_pass::AnnotatePass;
use crate::video::domain::frame_sink::FrameSink;
use crate::video::domain::frame_source::FrameSource;

/// Decides after each composed frame whether the loop keeps running.
/// Receives the frame index.
pub type ContinueFn = Box<dyn Fn(usize) -> bool + Send>;

/// Live pipeline: loops frames from a source through the annotation pass
/// into a sink until the source ends or the continue callback says stop.
pub struct AnnotateStreamUseCase {
    source: Box<dyn FrameSource>,
    sink: Box<dyn FrameSink>,
    pass: AnnotatePass,
    should_continue: Option<ContinueFn>,
}

impl AnnotateStreamUseCase {
    pub fn new(
        source: Box<dyn FrameSource>,
        sink: Box<dyn FrameSink>,
        pass: AnnotatePass,
        should_continue: Option<ContinueFn>,
    ) -> Self {
        Self {
            source,
            sink,
            pass,
            should_continue,
        }
    }

    pub fn execute(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        let metadata = self.source.open()?;
        // Composed frames carry the attribute panel below the image
        self.sink
            .open(metadata.width, metadata.height + metadata.height / 2)?;

        let result = self.run_loop();

        self.source.close();
        let close_result = self.sink.close();
        result?;
        close_result
    }

    fn run_loop(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        for result in self.source.frames() {
            let frame = result?;
            let index = frame.index();

            let composed = self.pass.run(frame)?;
            self.sink.write(&composed)?;

            if let Some(ref cb) = self.should_continue {
                if !cb(index) {
                    log::info!("stream stopped by caller after frame {index}");
                    break;
                }
            }
        }
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
        frames: Vec<Frame>,
        closed: Arc<Mutex<bool>>,
    }

    impl StubSource {
        fn new(frames: Vec<Frame>) -> Self {
            Self {
                frames,
                closed: Arc::new(Mutex::new(false)),
            }
        }
    }

    impl FrameSource for StubSource {
        fn open(&mut self) -> Result<SourceMetadata, Box<dyn std::error::Error>> {
            Ok(SourceMetadata {
                width: 100,
                height: 100,
                fps: 30.0,
                total_frames: None,
                source_path: None,
            })
        }

        fn frames(
            &mut self,
        ) -> Box<dyn Iterator<Item = Result<Frame, Box<dyn std::error::Error>>> + '_> {
            Box::new(self.frames.drain(..).map(Ok))
        }

        fn close(&mut self) {
            *self.closed.lock().unwrap() = true;
        }
    }

    struct StubSink {
        opened_size: Arc<Mutex<Option<(u32, u32)>>>,
        written: Arc<Mutex<Vec<Frame>>>,
        closed: Arc<Mutex<bool>>,
    }

    impl StubSink {
        fn new() -> Self {
            Self {
                opened_size: Arc::new(Mutex::new(None)),
                written: Arc::new(Mutex::new(Vec::new())),
                closed: Arc::new(Mutex::new(false)),
            }
        }
    }

    impl FrameSink for StubSink {
        fn open(&mut self, width: u32, height: u32) -> Result<(), Box<dyn std::error::Error>> {
            *self.opened_size.lock().unwrap() = Some((width, height));
            Ok(())
        }

        fn write(&mut self, frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
            self.written.lock().unwrap().push(frame.clone());
            Ok(())
        }

        fn close(&mut self) -> Result<(), Box<dyn std::error::Error>> {
            *self.closed.lock().unwrap() = true;
            Ok(())
        }
    }

    struct StubDetector;

    impl FaceDetector for StubDetector {
        fn detect(&mut self, _frame: &Frame) -> Result<Vec<FaceBox>, Box<dyn std::error::Error>> {
            Ok(vec![])
        }
    }

    struct StubClassifier;

    impl AttributeClassifier for StubClassifier {
        fn predict(&mut self, _face: &Frame) -> Result<Prediction, Box<dyn std::error::Error>> {
            Ok(Prediction {
                labels: vec![],
                scores: vec![],
            })
        }
    }

    // --- Helpers ---

    fn make_pass() -> AnnotatePass {
        AnnotatePass::new(Box::new(StubDetector), Box::new(StubClassifier), 0.35)
    }

    fn frames(count: usize) -> Vec<Frame> {
        (0..count).map(|i| Frame::filled(100, 100, 3, i)).collect()
    }

    // --- Tests ---

    #[test]
    fn test_all_frames_flow_through() {
        let sink = StubSink::new();
        let written = sink.written.clone();

        let mut uc = AnnotateStreamUseCase::new(
            Box::new(StubSource::new(frames(3))),
            Box::new(sink),
            make_pass(),
            None,
        );
        uc.execute().unwrap();

        let written = written.lock().unwrap();
        assert_eq!(written.len(), 3);
        // Composed frames carry the panel
        assert_eq!(written[0].height(), 150);
    }

    #[test]
    fn test_sink_opened_with_composed_dimensions() {
        let sink = StubSink::new();
        let opened = sink.opened_size.clone();

        let mut uc = AnnotateStreamUseCase::new(
            Box::new(StubSource::new(frames(1))),
            Box::new(sink),
            make_pass(),
            None,
        );
        uc.execute().unwrap();

        assert_eq!(*opened.lock().unwrap(), Some((100, 150)));
    }

    #[test]
    fn test_continue_callback_stops_loop() {
        let sink = StubSink::new();
        let written = sink.written.clone();

        let mut uc = AnnotateStreamUseCase::new(
            Box::new(StubSource::new(frames(10))),
            Box::new(sink),
            make_pass(),
            Some(Box::new(|index| index < 2)),
        );
        uc.execute().unwrap();

        // Frames 0, 1, 2 written; callback returns false at index 2
        assert_eq!(written.lock().unwrap().len(), 3);
    }

    #[test]
    fn test_source_and_sink_closed_after_run() {
        let source = StubSource::new(frames(1));
        let source_closed = source.closed.clone();
        let sink = StubSink::new();
        let sink_closed = sink.closed.clone();

        let mut uc =
            AnnotateStreamUseCase::new(Box::new(source), Box::new(sink), make_pass(), None);
        uc.execute().unwrap();

        assert!(*source_closed.lock().unwrap());
        assert!(*sink_closed.lock().unwrap());
    }

    #[test]
    fn test_source_closed_even_when_frame_errors() {
        struct FailingSource {
            closed: Arc<Mutex<bool>>,
        }

        impl FrameSource for FailingSource {
            fn open(&mut self) -> Result<SourceMetadata, Box<dyn std::error::Error>> {
                Ok(SourceMetadata {
                    width: 100,
                    height: 100,
                    fps: 30.0,
                    total_frames: None,
                    source_path: None,
                })
            }
            fn frames(
                &mut self,
            ) -> Box<dyn Iterator<Item = Result<Frame, Box<dyn std::error::Error>>> + '_>
            {
                Box::new(std::iter::once(Err("camera read failed".into())))
            }
            fn close(&mut self) {
                *self.closed.lock().unwrap() = true;
            }
        }

        let closed = Arc::new(Mutex::new(false));
        let mut uc = AnnotateStreamUseCase::new(
            Box::new(FailingSource {
                closed: closed.clone(),
            }),
            Box::new(StubSink::new()),
            make_pass(),
            None,
        );

        assert!(uc.execute().is_err());
        assert!(*closed.lock().unwrap());
    }
}
