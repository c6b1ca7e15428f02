use crate::shared::frame::Frame;

/// Consumes composed frames, e.g. an on-screen display.
pub trait FrameSink: Send {
    /// Prepares the sink for frames of the given dimensions.
    fn open(&mut self, width: u32, height: u32) -> Result<(), Box<dyn std::error::Error>>;

    fn write(&mut self, frame: &Frame) -> Result<(), Box<dyn std::error::Error>>;

    fn close(&mut self) -> Result<(), Box<dyn std::error::Error>>;
}
