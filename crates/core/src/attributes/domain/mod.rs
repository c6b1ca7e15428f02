pub mod attribute;
pub mod attribute_classifier;
