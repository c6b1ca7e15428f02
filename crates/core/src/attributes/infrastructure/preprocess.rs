use crate::shared::frame::Frame;

/// Resizes a face crop to `size` × `size` and normalizes it into the
/// classifier's NHWC batch shape `(1, size, size, 3)` with values in [0, 1].
///
/// The output shape is fixed regardless of the input crop dimensions.
/// Empty crops (zero width or height) are rejected.
pub fn classifier_input(
    crop: &Frame,
    size: u32,
) -> Result<ndarray::Array4<f32>, Box<dyn std::error::Error>> {
    let src_w = crop.width() as usize;
    let src_h = crop.height() as usize;
    if src_w == 0 || src_h == 0 {
        return Err("cannot preprocess an empty face crop".into());
    }

    let target = size as usize;
    let scale_x = src_w as f64 / target as f64;
    let scale_y = src_h as f64 / target as f64;

    let src = crop.as_ndarray(); // [H, W, C] u8
    let mut tensor = ndarray::Array4::<f32>::zeros((1, target, target, 3));

    // Nearest-neighbor resize straight into the normalized tensor
    for y in 0..target {
        let src_y = ((y as f64 * scale_y) as usize).min(src_h - 1);
        for x in 0..target {
            let src_x = ((x as f64 * scale_x) as usize).min(src_w - 1);
            for c in 0..3 {
                tensor[[0, y, x, c]] = src[[src_y, src_x, c]] as f32 / 255.0;
            }
        }
    }

    Ok(tensor)
}
