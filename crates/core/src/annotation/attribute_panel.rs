use crate::shared::frame::Frame;

use super::glyphs::draw_text;

/// Panel text color (white).
const TEXT_COLOR: [u8; 3] = [255, 255, 255];

const TEXT_SCALE: i32 = 1;

/// Attribute names drawn per text line.
const LABELS_PER_LINE: usize = 5;

/// Vertical spacing between lines of one face's block.
const LINE_SPACING: i32 = 20;

/// Left margin for all panel text.
const LEFT_MARGIN: i32 = 5;

/// Black canvas below the annotated frame listing each face's attributes.
///
/// The panel is the frame's width and half its height; face `index` gets a
/// text block starting at `y = panel_height * (index + 1) / 6`.
pub struct AttributePanel {
    frame: Frame,
}

impl AttributePanel {
    pub fn new(frame_width: u32, frame_height: u32) -> Self {
        Self {
            frame: Frame::filled(frame_width, frame_height / 2, 3, 0),
        }
    }

    /// Renders one face's attribute block, `LABELS_PER_LINE` names per line,
    /// the first line prefixed with the face's 1-based index.
    pub fn add_entry(&mut self, index: usize, labels: &[&str]) {
        let block_y = (self.frame.height() as i32 / 6) * (index as i32 + 1);

        let mut lines: Vec<String> = labels
            .chunks(LABELS_PER_LINE)
            .map(|chunk| chunk.join(" "))
            .collect();
        if lines.is_empty() {
            lines.push(String::new());
        }
        lines[0] = format!("{}: {}", index + 1, lines[0]);

        for (i, line) in lines.iter().enumerate() {
            draw_text(
                &mut self.frame,
                LEFT_MARGIN,
                block_y + i as i32 * LINE_SPACING,
                line,
                TEXT_SCALE,
                TEXT_COLOR,
            );
        }
    }

    /// Stacks the panel below the annotated frame.
    pub fn compose(self, annotated: &Frame) -> Frame {
        annotated.vconcat(&self.frame)
    }
}
