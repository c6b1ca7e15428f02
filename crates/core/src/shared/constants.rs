pub const DETECTOR_MODEL_NAME: &str = "yolo11n-face.onnx";
pub const DETECTOR_MODEL_URL: &str =
    "https://github.com/faceattr/faceattr/releases/download/v0.1.0/yolo11n-face.onnx";

pub const ATTRIBUTE_MODEL_NAME: &str = "celeba_attributes.onnx";
pub const ATTRIBUTE_MODEL_URL: &str =
    "https://github.com/faceattr/faceattr/releases/download/v0.1.0/celeba_attributes.onnx";

/// Margin added on each side of a detected face before cropping.
pub const CROP_MARGIN: f64 = 0.35;

/// Square input resolution the attribute classifier expects.
pub const CLASSIFIER_INPUT_SIZE: u32 = 224;

/// Score cutoff at or above which an attribute counts as present.
pub const SCORE_THRESHOLD: f32 = 0.5;

/// Detections smaller than this on either side are discarded.
pub const MIN_FACE_SIZE: u32 = 50;

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"];
