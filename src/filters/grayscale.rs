//! Grayscale conversion filter.
//!
//! Uses ITU-R BT.601 luma coefficients on BGR-ordered input, as decoded
//! from 24-bit bitmaps. The weighted sum is truncated, not rounded.

use ndarray::{Array3, ArrayView3};

use crate::error::{ImagingError, Result};
use crate::image::PixelBuffer;

/// ITU-R BT.601 luma coefficients
const LUMA_R: f64 = 0.299;
const LUMA_G: f64 = 0.587;
const LUMA_B: f64 = 0.114;

/// Luma of one BGR pixel, truncated to a byte.
#[inline]
pub fn luma_bgr(b: u8, g: u8, r: u8) -> u8 {
    (LUMA_R * r as f64 + LUMA_G * g as f64 + LUMA_B * b as f64) as u8
}

/// Convert a BGR u8 image to single-channel grayscale.
///
/// # Arguments
/// * `input` - 3D array view of shape (height, width, 3) in blue, green, red order
///
/// # Returns
/// New array of shape (height, width, 1)
pub fn grayscale_bgr_u8(input: ArrayView3<u8>) -> Array3<u8> {
    let (height, width, _) = input.dim();
    let mut output = Array3::<u8>::zeros((height, width, 1));

    for y in 0..height {
        for x in 0..width {
            let b = input[[y, x, 0]];
            let g = input[[y, x, 1]];
            let r = input[[y, x, 2]];
            output[[y, x, 0]] = luma_bgr(b, g, r);
        }
    }

    output
}

/// Reduce a colour buffer to grayscale.
///
/// Reducing a buffer that is already grayscale is refused with
/// `InvalidArgument`; callers check [`PixelBuffer::is_grayscale`] first.
pub fn reduce(image: &PixelBuffer) -> Result<PixelBuffer> {
    if image.is_grayscale() {
        return Err(ImagingError::InvalidArgument(
            "image is already grayscale".to_string(),
        ));
    }
    Ok(PixelBuffer::from_filtered(grayscale_bgr_u8(image.view())))
}
