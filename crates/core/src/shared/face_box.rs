/// A detected face rectangle in frame coordinates.
///
/// Produced by the detector, consumed by cropping and annotation. Has no
/// identity or lifetime beyond a single frame.
#[derive(Clone, Debug, PartialEq)]
pub struct FaceBox {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub confidence: f64,
}

impl FaceBox {
    /// Grows the box by `margin` of its own size on each side, clamped to
    /// the frame.
    ///
    /// The result always lies within `[0, frame_w] x [0, frame_h]`; a box
    /// touching a frame edge simply loses the expansion on that side.
    pub fn expanded(&self, margin: f64, frame_w: u32, frame_h: u32) -> FaceBox {
        let dx = (self.width as f64 * margin) as i32;
        let dy = (self.height as f64 * margin) as i32;

        let x1 = (self.x - dx).max(0);
        let y1 = (self.y - dy).max(0);
        let x2 = (self.x + self.width + dx).min(frame_w as i32);
        let y2 = (self.y + self.height + dy).min(frame_h as i32);

        FaceBox {
            x: x1,
            y: y1,
            width: (x2 - x1).max(0),
            height: (y2 - y1).max(0),
            confidence: self.confidence,
        }
    }

    pub fn iou(&self, other: &FaceBox) -> f64 {
        let ix1 = self.x.max(other.x);
        let iy1 = self.y.max(other.y);
        let ix2 = (self.x + self.width).min(other.x + other.width);
        let iy2 = (self.y + self.height).min(other.y + other.height);

        let inter = (ix2 - ix1).max(0) as f64 * (iy2 - iy1).max(0) as f64;
        if inter == 0.0 {
            return 0.0;
        }

        let area_a = self.width as f64 * self.height as f64;
        let area_b = other.width as f64 * other.height as f64;
        inter / (area_a + area_b - inter)
    }
}
