use std::path::PathBuf;

/// Describes an opened frame source.
///
/// Still images report `total_frames = Some(1)` and `fps = 0`; live
/// cameras report `total_frames = None`.
#[derive(Clone, Debug, PartialEq)]
pub struct SourceMetadata {
    pub width: u32,
    pub height: u32,
    pub fps: f64,
    pub total_frames: Option<usize>,
    pub source_path: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_metadata() {
        let meta = SourceMetadata {
            width: 800,
            height: 600,
            fps: 0.0,
            total_frames: Some(1),
            source_path: Some(PathBuf::from("/tmp/photo.png")),
        };
        assert_eq!(meta.total_frames, Some(1));
        assert_eq!(meta.fps, 0.0);
    }

    #[test]
    fn test_camera_metadata_is_unbounded() {
        let meta = SourceMetadata {
            width: 1280,
            height: 720,
            fps: 30.0,
            total_frames: None,
            source_path: None,
        };
        assert!(meta.total_frames.is_none());
        assert_eq!(meta.fps, 30.0);
    }
}
