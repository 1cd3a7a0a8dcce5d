//! Stylize filters: Threshold.
//!
//! Input is expected to be grayscale already. Only the first channel is
//! read, and the output always has a single channel.

use ndarray::{Array3, ArrayView3};

use crate::image::PixelBuffer;

// ============================================================================
// Threshold
// ============================================================================

/// Apply binary threshold - u8 version.
///
/// # Arguments
/// * `input` - Image of shape (height, width, channels); channel 0 is used
/// * `threshold` - Pixels with value >= threshold become 255, others 0
///
/// # Returns
/// Single-channel image holding only 0 and 255
pub fn threshold_u8(input: ArrayView3<u8>, threshold: u8) -> Array3<u8> {
    let (height, width, _) = input.dim();
    let mut output = Array3::<u8>::zeros((height, width, 1));

    for y in 0..height {
        for x in 0..width {
            output[[y, x, 0]] = if input[[y, x, 0]] >= threshold { 255 } else { 0 };
        }
    }
    output
}

/// Binarize a grayscale buffer.
pub fn binarize(image: &PixelBuffer, threshold: u8) -> PixelBuffer {
    PixelBuffer::from_filtered(threshold_u8(image.view(), threshold))
}
