use crate::shared::frame::Frame;

use super::source_metadata::SourceMetadata;

/// Produces frames from an image file or a live camera.
///
/// The concrete target (file path, device index) is fixed at construction;
/// implementations handle decode and capture details while the pipeline
/// works with the abstract `Frame` and `SourceMetadata` types.
pub trait FrameSource {
    /// Opens the source and returns its metadata.
    fn open(&mut self) -> Result<SourceMetadata, Box<dyn std::error::Error>>;

    /// Returns an iterator over frames in capture order.
    fn frames(
        &mut self,
    ) -> Box<dyn Iterator<Item = Result<Frame, Box<dyn std::error::Error>>> + '_>;

    /// Releases any resources held by the source.
    fn close(&mut self);
}
