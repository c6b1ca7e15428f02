pub mod onnx_attribute_classifier;
pub mod preprocess;
