use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

use clap::Parser;
use crossterm::event::{self, Event, KeyCode};
use crossterm::terminal;

use faceattr_core::attributes::domain::attribute_classifier::AttributeClassifier;
use faceattr_core::attributes::infrastructure::onnx_attribute_classifier::OnnxAttributeClassifier;
use faceattr_core::detection::domain::face_detector::FaceDetector;
use faceattr_core::detection::infrastructure::model_resolver::ModelResolver;
use faceattr_core::detection::infrastructure::onnx_face_detector::{
    OnnxFaceDetector, DEFAULT_CONFIDENCE,
};
use faceattr_core::pipeline::annotate_image_use_case::AnnotateImageUseCase;
use faceattr_core::pipeline::annotate_pass::AnnotatePass;
use faceattr_core::pipeline::annotate_stream_use_case::AnnotateStreamUseCase;
use faceattr_core::shared::constants::{
    ATTRIBUTE_MODEL_NAME, ATTRIBUTE_MODEL_URL, CROP_MARGIN, DETECTOR_MODEL_NAME,
    DETECTOR_MODEL_URL, IMAGE_EXTENSIONS, MIN_FACE_SIZE, SCORE_THRESHOLD,
};
use faceattr_core::video::domain::frame_sink::FrameSink;
use faceattr_core::video::domain::frame_source::FrameSource;
use faceattr_core::video::domain::image_writer::ImageWriter;
use faceattr_core::video::infrastructure::camera_reader::CameraReader;
use faceattr_core::video::infrastructure::ffplay_display::FfplayDisplay;
use faceattr_core::video::infrastructure::image_file_reader::ImageFileReader;
use faceattr_core::video::infrastructure::image_file_writer::ImageFileWriter;

/// Facial attribute detection for images and webcam streams.
#[derive(Parser)]
#[command(name = "faceattr")]
struct Cli {
    /// Input image file (omit to read from a webcam).
    input: Option<PathBuf>,

    /// Output image file (required in image mode).
    output: Option<PathBuf>,

    /// Webcam device index to capture from.
    #[arg(long, default_value = "0")]
    camera: u32,

    /// Face detection confidence threshold (0.0-1.0).
    #[arg(long, default_value_t = DEFAULT_CONFIDENCE)]
    confidence: f64,

    /// Attribute score threshold (0.0-1.0); scores at or above count as present.
    #[arg(long, default_value_t = SCORE_THRESHOLD)]
    score_threshold: f32,

    /// Margin added on each side of a detected face before cropping (0.0-1.0).
    #[arg(long, default_value_t = CROP_MARGIN)]
    margin: f64,

    /// Discard detections smaller than this many pixels on either side.
    #[arg(long, default_value_t = MIN_FACE_SIZE)]
    min_face_size: u32,

    /// Directory with bundled ONNX models (skips download when present).
    #[arg(long)]
    model_dir: Option<PathBuf>,

    /// Requested webcam frame rate.
    #[arg(long, default_value = "30")]
    fps: u32,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let resolver = ModelResolver::new()?
        .bundled_dir(cli.model_dir.clone())
        .on_progress(Box::new(download_progress));
    let detector = build_detector(&cli, &resolver)?;
    let classifier = build_classifier(&cli, &resolver)?;
    let pass = AnnotatePass::new(detector, classifier, cli.margin);

    match cli.input {
        Some(ref input) => run_image(input, cli.output.as_ref().unwrap(), pass),
        None => run_stream(cli.camera, cli.fps, pass),
    }
}

fn run_image(
    input: &Path,
    output: &Path,
    pass: AnnotatePass,
) -> Result<(), Box<dyn std::error::Error>> {
    let source: Box<dyn FrameSource> = Box::new(ImageFileReader::new(input));
    let image_writer: Box<dyn ImageWriter> = Box::new(ImageFileWriter::new());

    let mut use_case = AnnotateImageUseCase::new(source, image_writer, pass);
    use_case.execute(output)?;
    log::info!("Output written to {}", output.display());
    Ok(())
}

fn run_stream(camera: u32, fps: u32, pass: AnnotatePass) -> Result<(), Box<dyn std::error::Error>> {
    let source: Box<dyn FrameSource> = Box::new(CameraReader::new(camera, fps));
    let sink: Box<dyn FrameSink> = Box::new(FfplayDisplay::new());

    eprintln!("Capturing from camera {camera}. Press Esc or q to quit.");

    let should_continue: Box<dyn Fn(usize) -> bool + Send> = Box::new(|_| !quit_requested());

    // Raw mode so keypresses arrive without Enter
    terminal::enable_raw_mode()?;
    let mut use_case = AnnotateStreamUseCase::new(source, sink, pass, Some(should_continue));
    let result = use_case.execute();
    terminal::disable_raw_mode()?;
    result
}

/// Non-blocking poll for an Esc or 'q' keypress on the controlling terminal.
fn quit_requested() -> bool {
    while event::poll(Duration::ZERO).unwrap_or(false) {
        if let Ok(Event::Key(key)) = event::read() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
                return true;
            }
        }
    }
    false
}

fn build_detector(
    cli: &Cli,
    resolver: &ModelResolver,
) -> Result<Box<dyn FaceDetector>, Box<dyn std::error::Error>> {
    log::info!("Resolving model: {DETECTOR_MODEL_NAME}");
    let model_path = resolver.resolve(DETECTOR_MODEL_NAME, DETECTOR_MODEL_URL)?;
    eprintln!();

    Ok(Box::new(OnnxFaceDetector::new(
        &model_path,
        cli.confidence,
        Some(cli.min_face_size),
    )?))
}

fn build_classifier(
    cli: &Cli,
    resolver: &ModelResolver,
) -> Result<Box<dyn AttributeClassifier>, Box<dyn std::error::Error>> {
    log::info!("Resolving model: {ATTRIBUTE_MODEL_NAME}");
    let model_path = resolver.resolve(ATTRIBUTE_MODEL_NAME, ATTRIBUTE_MODEL_URL)?;
    eprintln!();

    Ok(Box::new(OnnxAttributeClassifier::new(
        &model_path,
        cli.score_threshold,
    )?))
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(ref input) = cli.input {
        if !input.exists() {
            return Err(format!("Input file not found: {}", input.display()).into());
        }
        if !is_image(input) {
            return Err(format!(
                "Input must be an image file ({}), got: {}",
                IMAGE_EXTENSIONS.join(", "),
                input.display()
            )
            .into());
        }
        if cli.output.is_none() {
            return Err("Output file is required in image mode".into());
        }
    }
    if !(0.0..=1.0).contains(&cli.confidence) {
        return Err(format!(
            "Confidence must be between 0.0 and 1.0, got {}",
            cli.confidence
        )
        .into());
    }
    if !(0.0..=1.0).contains(&cli.score_threshold) {
        return Err(format!(
            "Score threshold must be between 0.0 and 1.0, got {}",
            cli.score_threshold
        )
        .into());
    }
    if !(0.0..=1.0).contains(&cli.margin) {
        return Err(format!("Margin must be between 0.0 and 1.0, got {}", cli.margin).into());
    }
    if cli.fps == 0 {
        return Err("FPS must be at least 1".into());
    }
    Ok(())
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

fn download_progress(downloaded: u64, total: u64) {
    if total > 0 {
        let pct = (downloaded as f64 / total as f64 * 100.0) as u32;
        eprint!("\rDownloading model... {pct}%");
    } else {
        eprint!("\rDownloading model... {downloaded} bytes");
    }
}
