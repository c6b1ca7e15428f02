use crate::shared::frame::Frame;

/// Embedded 5x7 pixel font for overlay text.
///
/// Covers uppercase ASCII, digits, and the punctuation used by attribute
/// labels. Lowercase maps to uppercase; anything else renders blank.
pub const GLYPH_WIDTH: i32 = 5;
pub const GLYPH_HEIGHT: i32 = 7;

/// Horizontal advance per character, in glyph units (width + 1 gap).
const GLYPH_ADVANCE: i32 = GLYPH_WIDTH + 1;

#[rustfmt::skip]
fn glyph(ch: char) -> [u8; 7] {
    match ch.to_ascii_uppercase() {
        'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'B' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110],
        'C' => [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110],
        'D' => [0b11110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11110],
        'E' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
        'F' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000],
        'G' => [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111],
        'H' => [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'I' => [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        'J' => [0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100],
        'K' => [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001],
        'L' => [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'M' => [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001],
        'N' => [0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001, 0b10001],
        'O' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'Q' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101],
        'R' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'S' => [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
        'T' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        'U' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'V' => [0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b01010, 0b00100],
        'W' => [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b11011, 0b10001],
        'X' => [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001],
        'Y' => [0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b00100],
        'Z' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111],
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        ':' => [0b00000, 0b00100, 0b00100, 0b00000, 0b00100, 0b00100, 0b00000],
        '.' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b01100, 0b01100],
        '-' => [0b00000, 0b00000, 0b00000, 0b11111, 0b00000, 0b00000, 0b00000],
        '_' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b11111],
        _ => [0; 7],
    }
}

/// Pixel width of `text` rendered at `scale`.
pub fn text_width(text: &str, scale: i32) -> i32 {
    text.chars().count() as i32 * GLYPH_ADVANCE * scale
}

pub fn draw_text(frame: &mut Frame, x: i32, y: i32, text: &str, scale: i32, color: [u8; 3]) {
    let mut cursor_x = x;
    for ch in text.chars() {
        draw_char(frame, cursor_x, y, ch, scale, color);
        cursor_x += GLYPH_ADVANCE * scale;
    }
}

fn draw_char(frame: &mut Frame, x: i32, y: i32, ch: char, scale: i32, color: [u8; 3]) {
    let bitmap = glyph(ch);
    for (row, bits) in bitmap.iter().enumerate() {
        for col in 0..GLYPH_WIDTH {
            if (bits >> (GLYPH_WIDTH - 1 - col)) & 1 == 1 {
                for dy in 0..scale {
                    for dx in 0..scale {
                        put_pixel(
                            frame,
                            x + col * scale + dx,
                            y + row as i32 * scale + dy,
                            color,
                        );
                    }
                }
            }
        }
    }
}

/// Bounds-checked pixel write; silently clips outside the frame.
pub(crate) fn put_pixel(frame: &mut Frame, x: i32, y: i32, color: [u8; 3]) {
    if x < 0 || y < 0 || x >= frame.width() as i32 || y >= frame.height() as i32 {
        return;
    }
    let offset = (y as usize * frame.width() as usize + x as usize) * frame.channels() as usize;
    frame.data_mut()[offset..offset + 3].copy_from_slice(&color);
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: [u8; 3] = [255, 255, 255];

    fn lit_pixels(frame: &Frame) -> usize {
        frame.data().chunks(3).filter(|px| px[0] > 0).count()
    }

    #[test]
    fn test_draw_text_lights_pixels() {
        let mut frame = Frame::filled(100, 20, 3, 0);
        draw_text(&mut frame, 2, 2, "A1:", 1, WHITE);
        assert!(lit_pixels(&frame) > 0);
    }

    #[test]
    fn test_unknown_char_renders_blank() {
        let mut frame = Frame::filled(20, 20, 3, 0);
        draw_text(&mut frame, 2, 2, "~", 1, WHITE);
        assert_eq!(lit_pixels(&frame), 0);
    }

    #[test]
    fn test_lowercase_matches_uppercase() {
        let mut upper = Frame::filled(20, 20, 3, 0);
        let mut lower = Frame::filled(20, 20, 3, 0);
        draw_text(&mut upper, 2, 2, "G", 1, WHITE);
        draw_text(&mut lower, 2, 2, "g", 1, WHITE);
        assert_eq!(upper.data(), lower.data());
    }

    #[test]
    fn test_clipping_at_frame_edge_does_not_panic() {
        let mut frame = Frame::filled(10, 10, 3, 0);
        draw_text(&mut frame, -3, -3, "TEXT PAST THE EDGE", 2, WHITE);
        draw_text(&mut frame, 8, 8, "X", 3, WHITE);
    }

    #[test]
    fn test_text_width_scales() {
        assert_eq!(text_width("AB", 1), 12);
        assert_eq!(text_width("AB", 2), 24);
        assert_eq!(text_width("", 1), 0);
    }

    #[test]
    fn test_scale_doubles_coverage() {
        let mut small = Frame::filled(40, 40, 3, 0);
        let mut large = Frame::filled(40, 40, 3, 0);
        draw_text(&mut small, 0, 0, "8", 1, WHITE);
        draw_text(&mut large, 0, 0, "8", 2, WHITE);
        assert_eq!(lit_pixels(&large), lit_pixels(&small) * 4);
    }

    #[test]
    fn test_put_pixel_writes_color() {
        let mut frame = Frame::filled(4, 4, 3, 0);
        put_pixel(&mut frame, 1, 2, [10, 20, 30]);
        let offset = (2 * 4 + 1) * 3;
        assert_eq!(&frame.data()[offset..offset + 3], &[10, 20, 30]);
    }
}
