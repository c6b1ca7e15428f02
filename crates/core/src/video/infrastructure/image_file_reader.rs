use std::path::{Path, PathBuf};

use crate::shared::frame::Frame;
use crate::video::domain::frame_source::FrameSource;
use crate::video::domain::source_metadata::SourceMetadata;

/// Adapts a single image file to the [`FrameSource`] interface.
///
/// Decodes with the `image` crate and exposes the result as a one-frame
/// source with `fps = 0`, letting the pipeline treat stills and camera
/// feeds uniformly.
pub struct ImageFileReader {
    path: PathBuf,
    frame: Option<Frame>,
}

impl ImageFileReader {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            frame: None,
        }
    }
}

impl FrameSource for ImageFileReader {
    fn open(&mut self) -> Result<SourceMetadata, Box<dyn std::error::Error>> {
        let img = image::open(&self.path)?.into_rgb8();
        let (width, height) = img.dimensions();
        self.frame = Some(Frame::new(img.into_raw(), width, height, 3, 0));

        Ok(SourceMetadata {
            width,
            height,
            fps: 0.0,
            total_frames: Some(1),
            source_path: Some(self.path.clone()),
        })
    }

    fn frames(
        &mut self,
    ) -> Box<dyn Iterator<Item = Result<Frame, Box<dyn std::error::Error>>> + '_> {
        if self.frame.is_none() {
            return Box::new(std::iter::once(Err("ImageFileReader: not opened".into())));
        }
        Box::new(self.frame.take().into_iter().map(Ok))
    }

    fn close(&mut self) {
        self.frame = None;
    }
}
