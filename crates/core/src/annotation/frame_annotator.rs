use crate::shared::face_box::FaceBox;
use crate::shared::frame::Frame;

use super::glyphs::{draw_text, put_pixel, text_width, GLYPH_HEIGHT};

/// Bounding rectangle color (green).
pub const BOX_COLOR: [u8; 3] = [0, 255, 0];

/// Face index label color (blue).
pub const INDEX_COLOR: [u8; 3] = [0, 0, 255];

const BOX_THICKNESS: i32 = 2;

const INDEX_SCALE: i32 = 2;

/// Vertical gap between the box's top edge and the index label baseline.
const INDEX_GAP: i32 = 15;

/// Draws a hollow rectangle around the detected face, clipped to the frame.
pub fn draw_face_box(frame: &mut Frame, face: &FaceBox) {
    let x1 = face.x;
    let y1 = face.y;
    let x2 = face.x + face.width - 1;
    let y2 = face.y + face.height - 1;

    for t in 0..BOX_THICKNESS {
        for x in x1..=x2 {
            put_pixel(frame, x, y1 + t, BOX_COLOR);
            put_pixel(frame, x, y2 - t, BOX_COLOR);
        }
        for y in y1..=y2 {
            put_pixel(frame, x1 + t, y, BOX_COLOR);
            put_pixel(frame, x2 - t, y, BOX_COLOR);
        }
    }
}

/// Draws the face's 1-based index above the box, centered horizontally.
///
/// The label is pushed down into the frame when the box touches the top
/// edge, so it never disappears entirely.
pub fn draw_face_index(frame: &mut Frame, face: &FaceBox, index: usize) {
    let text = (index + 1).to_string();
    let tx = face.x + face.width / 2 - text_width(&text, INDEX_SCALE) / 2;
    let ty = (face.y - INDEX_GAP - GLYPH_HEIGHT * INDEX_SCALE).max(0);
    draw_text(frame, tx, ty, &text, INDEX_SCALE, INDEX_COLOR);
}
