pub mod attribute_panel;
pub mod frame_annotator;
pub mod glyphs;
