//! Edge detection filters: generic 3x3 convolution, Sobel, Laplacian.
//!
//! All filters here read channel 0 of a grayscale image and write a
//! single-channel result. Only interior pixels are computed; the one-pixel
//! border keeps the output's initial value of 0.

use ndarray::{Array3, ArrayView3};

use super::core::clamp_to_u8;
use crate::image::PixelBuffer;

/// 3x3 kernel indexed as `kernel[ky + 1][kx + 1]`.
pub type Kernel3 = [[f64; 3]; 3];

pub const SOBEL_X: Kernel3 = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];
pub const SOBEL_Y: Kernel3 = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];
pub const LAPLACIAN: Kernel3 = [[0.0, 1.0, 0.0], [1.0, -4.0, 1.0], [0.0, 1.0, 0.0]];

/// Weighted 3x3 neighbourhood sum around interior pixel (x, y).
#[inline]
fn apply_kernel(input: &ArrayView3<u8>, y: usize, x: usize, kernel: &Kernel3) -> f64 {
    let mut sum = 0.0;
    for ky in 0..3 {
        for kx in 0..3 {
            let v = input[[y + ky - 1, x + kx - 1, 0]] as f64;
            sum += v * kernel[ky][kx];
        }
    }
    sum
}

// ============================================================================
// Generic Convolution
// ============================================================================

/// Convolve with a 3x3 kernel - u8 version.
///
/// # Arguments
/// * `input` - Grayscale image (height, width, 1)
/// * `kernel` - Weights, centre at `kernel[1][1]`
///
/// # Returns
/// Single-channel image; interior sums clamped to 0-255 and truncated,
/// border pixels 0
pub fn convolve3x3_u8(input: ArrayView3<u8>, kernel: &Kernel3) -> Array3<u8> {
    let (height, width, _) = input.dim();
    let mut output = Array3::<u8>::zeros((height, width, 1));

    for y in 1..height.saturating_sub(1) {
        for x in 1..width.saturating_sub(1) {
            output[[y, x, 0]] = clamp_to_u8(apply_kernel(&input, y, x, kernel));
        }
    }

    output
}

/// Convolve a grayscale buffer with a 3x3 kernel.
pub fn convolve3x3(image: &PixelBuffer, kernel: &Kernel3) -> PixelBuffer {
    PixelBuffer::from_filtered(convolve3x3_u8(image.view(), kernel))
}

// ============================================================================
// Sobel Edge Detection
// ============================================================================

/// Sobel gradient magnitude - u8 version.
///
/// Horizontal and vertical gradients are computed separately per pixel and
/// combined as `sqrt(gx² + gy²)`, capped at 255 and truncated.
///
/// # Arguments
/// * `input` - Grayscale image (height, width, 1)
///
/// # Returns
/// Single-channel edge magnitude image with a zero border
pub fn sobel_magnitude_u8(input: ArrayView3<u8>) -> Array3<u8> {
    let (height, width, _) = input.dim();
    let mut output = Array3::<u8>::zeros((height, width, 1));

    for y in 1..height.saturating_sub(1) {
        for x in 1..width.saturating_sub(1) {
            let gx = apply_kernel(&input, y, x, &SOBEL_X);
            let gy = apply_kernel(&input, y, x, &SOBEL_Y);
            let mag = (gx * gx + gy * gy).sqrt();
            output[[y, x, 0]] = clamp_to_u8(mag);
        }
    }

    output
}

/// Sobel edge detection on a grayscale buffer.
pub fn detect_edges(image: &PixelBuffer) -> PixelBuffer {
    PixelBuffer::from_filtered(sobel_magnitude_u8(image.view()))
}

// ============================================================================
// Laplacian
// ============================================================================

/// 4-neighbour Laplacian. Negative responses clamp to 0.
pub fn laplacian(image: &PixelBuffer) -> PixelBuffer {
    convolve3x3(image, &LAPLACIAN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::GRAY;

    /// 5x5 grayscale image from `f(x, y)`.
    fn image_5x5(f: impl Fn(usize, usize) -> u8) -> PixelBuffer {
        let mut data = Vec::with_capacity(25);
        for y in 0..5 {
            for x in 0..5 {
                data.push(f(x, y));
            }
        }
        PixelBuffer::from_raw(5, 5, GRAY, data).unwrap()
    }

    fn assert_zero_border(img: &PixelBuffer) {
        for i in 0..5 {
            assert_eq!(img.get(i, 0, 0), 0);
            assert_eq!(img.get(i, 4, 0), 0);
            assert_eq!(img.get(0, i, 0), 0);
            assert_eq!(img.get(4, i, 0), 0);
        }
    }

    #[test]
    fn test_laplacian_quadratic_ramp() {
        // f = 4x² + 10y: second difference in x is 8, in y is 0
        let img = image_5x5(|x, y| (4 * x * x + 10 * y) as u8);

        let result = laplacian(&img);

        assert_zero_border(&result);
        for y in 1..4 {
            for x in 1..4 {
                assert_eq!(result.get(x, y, 0), 8, "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_laplacian_clamps_negative_to_zero() {
        let img = image_5x5(|x, y| if x == 2 && y == 2 { 100 } else { 0 });

        let result = laplacian(&img);

        assert_eq!(result.get(2, 2, 0), 0); // -400
        assert_eq!(result.get(2, 1, 0), 100);
        assert_eq!(result.get(1, 2, 0), 100);
        assert_eq!(result.get(1, 1, 0), 0);
    }

    #[test]
    fn test_convolve3x3_clamps_high() {
        let img = image_5x5(|_, _| 200);
        let double: Kernel3 = [[0.0, 0.0, 0.0], [0.0, 2.0, 0.0], [0.0, 0.0, 0.0]];

        let result = convolve3x3(&img, &double);

        assert_eq!(result.get(2, 2, 0), 255);
        assert_zero_border(&result);
    }

    #[test]
    fn test_convolve3x3_truncates_fractions() {
        let img = image_5x5(|_, _| 10);
        let box_blur: Kernel3 = [[0.05; 3]; 3]; // 9 * 0.05 * 10 = 4.5

        let result = convolve3x3(&img, &box_blur);

        assert_eq!(result.get(2, 2, 0), 4);
    }

    #[test]
    fn test_sobel_quadratic_ramp() {
        // gx = 64x, gy = 80 for f = 4x² + 10y
        let img = image_5x5(|x, y| (4 * x * x + 10 * y) as u8);

        let result = detect_edges(&img);

        assert_zero_border(&result);
        for y in 1..4 {
            assert_eq!(result.get(1, y, 0), 102); // sqrt(10496) = 102.45
            assert_eq!(result.get(2, y, 0), 150); // sqrt(22784) = 150.94
            assert_eq!(result.get(3, y, 0), 208); // sqrt(43264) = 208
        }
    }

    #[test]
    fn test_sobel_caps_at_255() {
        let img = image_5x5(|x, _| if x < 2 { 0 } else { 255 });

        let result = detect_edges(&img);

        // gx = 4 * 255 at the step
        assert_eq!(result.get(1, 2, 0), 255);
        assert_eq!(result.get(3, 2, 0), 0);
    }

    #[test]
    fn test_flat_image_has_no_edges() {
        let img = image_5x5(|_, _| 128);
        assert!(detect_edges(&img).as_slice().iter().all(|&v| v == 0));
        assert!(laplacian(&img).as_slice().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_tiny_images_are_all_border() {
        let img = PixelBuffer::from_raw(2, 2, GRAY, vec![0, 255, 255, 0]).unwrap();
        assert_eq!(detect_edges(&img).as_slice(), &[0, 0, 0, 0]);
        assert_eq!(laplacian(&img).as_slice(), &[0, 0, 0, 0]);
    }
}
