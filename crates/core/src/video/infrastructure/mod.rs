pub mod camera_reader;
pub mod ffplay_display;
pub mod image_file_reader;
pub mod image_file_writer;
