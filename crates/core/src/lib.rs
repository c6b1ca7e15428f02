pub mod annotation;
pub mod attributes;
pub mod detection;
pub mod pipeline;
pub mod shared;
pub mod video;
