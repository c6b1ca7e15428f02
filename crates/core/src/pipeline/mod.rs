pub mod annotate_image_use_case;
pub mod annotate_pass;
pub mod annotate_stream_use_case;
