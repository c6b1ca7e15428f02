use std::io::Write;
use std::process::{Child, Command, Stdio};

use crate::shared::frame::Frame;
use crate::video::domain::frame_sink::FrameSink;

/// On-screen display via an `ffplay` child process fed raw RGB frames.
pub struct FfplayDisplay {
    process: Option<Child>,
}

impl FfplayDisplay {
    pub fn new() -> Self {
        Self { process: None }
    }
}

impl Default for FfplayDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameSink for FfplayDisplay {
    fn open(&mut self, width: u32, height: u32) -> Result<(), Box<dyn std::error::Error>> {
        let process = Command::new("ffplay")
            .args([
                "-f",
                "rawvideo",
                "-pixel_format",
                "rgb24",
                "-video_size",
                &format!("{width}x{height}"),
                "-fflags",
                "nobuffer",
                "-flags",
                "low_delay",
                "-window_title",
                "faceattr",
                "-",
            ])
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;

        self.process = Some(process);
        Ok(())
    }

    fn write(&mut self, frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
        let process = self
            .process
            .as_mut()
            .ok_or("FfplayDisplay: not opened")?;
        if let Some(stdin) = process.stdin.as_mut() {
            stdin.write_all(frame.data())?;
            stdin.flush()?;
        }
        Ok(())
    }

    fn close(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(mut process) = self.process.take() {
            drop(process.stdin.take());
            process.wait()?;
        }
        Ok(())
    }
}

impl Drop for FfplayDisplay {
    fn drop(&mut self) {
        if let Some(mut process) = self.process.take() {
            if let Err(e) = process.kill() {
                log::error!("failed to stop ffplay: {e}");
            }
        }
    }
}
