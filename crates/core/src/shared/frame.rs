use ndarray::{ArrayView3, ArrayViewMut3};

use super::face_box::FaceBox;

/// A single image or camera frame: contiguous RGB bytes in row-major order.
///
/// Format conversion happens at I/O boundaries only; everything between
/// capture and encode works on this one representation.
#[derive(Clone, Debug)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
    index: usize,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, channels: u8, index: usize) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * (channels as usize),
            "data length must equal width * height * channels"
        );
        Self {
            data,
            width,
            height,
            channels,
            index,
        }
    }

    /// A black frame of the given dimensions.
    pub fn filled(width: u32, height: u32, channels: u8, index: usize) -> Self {
        let data = vec![0u8; (width as usize) * (height as usize) * (channels as usize)];
        Self::new(data, width, height, channels, index)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn as_ndarray(&self) -> ArrayView3<'_, u8> {
        ArrayView3::from_shape(self.shape(), &self.data)
            .expect("Frame data length must match dimensions")
    }

    pub fn as_ndarray_mut(&mut self) -> ArrayViewMut3<'_, u8> {
        ArrayViewMut3::from_shape(self.shape(), &mut self.data)
            .expect("Frame data length must match dimensions")
    }

    /// Extracts the sub-image covered by `face`, clamped to frame bounds.
    ///
    /// The result is never larger than the frame; a box entirely outside
    /// the frame yields an empty (0x0) frame.
    pub fn crop(&self, face: &FaceBox) -> Frame {
        let x1 = face.x.clamp(0, self.width as i32) as usize;
        let y1 = face.y.clamp(0, self.height as i32) as usize;
        let x2 = (face.x + face.width).clamp(0, self.width as i32) as usize;
        let y2 = (face.y + face.height).clamp(0, self.height as i32) as usize;

        let cw = x2.saturating_sub(x1);
        let ch = y2.saturating_sub(y1);
        let channels = self.channels as usize;

        let mut data = Vec::with_capacity(cw * ch * channels);
        let stride = self.width as usize * channels;
        for row in y1..y2 {
            let start = row * stride + x1 * channels;
            data.extend_from_slice(&self.data[start..start + cw * channels]);
        }

        Frame::new(data, cw as u32, ch as u32, self.channels, self.index)
    }

    /// Stacks `bottom` underneath this frame. Widths and channel counts
    /// must match.
    pub fn vconcat(&self, bottom: &Frame) -> Frame {
        debug_assert_eq!(self.width, bottom.width, "vconcat widths must match");
        debug_assert_eq!(
            self.channels, bottom.channels,
            "vconcat channel counts must match"
        );

        let mut data = Vec::with_capacity(self.data.len() + bottom.data.len());
        data.extend_from_slice(&self.data);
        data.extend_from_slice(&bottom.data);

        Frame::new(
            data,
            self.width,
            self.height + bottom.height,
            self.channels,
            self.index,
        )
    }

    fn shape(&self) -> (usize, usize, usize) {
        (
            self.height as usize,
            self.width as usize,
            self.channels as usize,
        )
    }
}
