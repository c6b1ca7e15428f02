use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{CameraIndex, RequestedFormat, RequestedFormatType};
use nokhwa::{nokhwa_initialize, Camera};

use crate::shared::frame::Frame;
use crate::video::domain::frame_source::FrameSource;
use crate::video::domain::source_metadata::SourceMetadata;

/// Live webcam frames as a [`FrameSource`], via `nokhwa`.
///
/// The device index and requested frame rate are fixed at construction;
/// the stream opens lazily in `open`.
pub struct CameraReader {
    device_index: u32,
    fps: u32,
    camera: Option<Camera>,
    next_index: usize,
}

impl CameraReader {
    pub fn new(device_index: u32, fps: u32) -> Self {
        Self {
            device_index,
            fps,
            camera: None,
            next_index: 0,
        }
    }
}

impl FrameSource for CameraReader {
    fn open(&mut self) -> Result<SourceMetadata, Box<dyn std::error::Error>> {
        nokhwa_initialize(|granted| {
            log::debug!("camera permission granted: {granted}");
        });

        let format =
            RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestResolution);
        let mut camera = Camera::new(CameraIndex::Index(self.device_index), format)?;
        camera.set_frame_rate(self.fps)?;
        camera.open_stream()?;

        let resolution = camera.resolution();
        let metadata = SourceMetadata {
            width: resolution.width(),
            height: resolution.height(),
            fps: camera.frame_rate() as f64,
            total_frames: None,
            source_path: None,
        };
        self.camera = Some(camera);
        Ok(metadata)
    }

    fn frames(
        &mut self,
    ) -> Box<dyn Iterator<Item = Result<Frame, Box<dyn std::error::Error>>> + '_> {
        let Some(camera) = self.camera.as_mut() else {
            return Box::new(std::iter::once(Err("CameraReader: not opened".into())));
        };

        let next_index = &mut self.next_index;
        Box::new(std::iter::from_fn(move || {
            let result = capture_frame(camera, *next_index);
            *next_index += 1;
            Some(result)
        }))
    }

    fn close(&mut self) {
        if let Some(mut camera) = self.camera.take() {
            if let Err(e) = camera.stop_stream() {
                log::warn!("failed to stop camera stream: {e}");
            }
        }
    }
}

fn capture_frame(camera: &mut Camera, index: usize) -> Result<Frame, Box<dyn std::error::Error>> {
    let buffer = camera.frame()?;
    let decoded = buffer.decode_image::<RgbFormat>()?;
    let (width, height) = decoded.dimensions();
    Ok(Frame::new(decoded.into_raw(), width, height, 3, index))
}
