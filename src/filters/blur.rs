//! Gaussian smoothing.
//!
//! Full 2D convolution (not separable) with a kernel of side
//! `2 * floor(3σ) + 1`. Every pixel is computed; samples that fall outside
//! the image are mirrored back in (see [`reflect_index`]). Each channel is
//! filtered independently, so colour buffers stay colour.

use ndarray::{Array3, ArrayView3};

use super::core::{clamp_to_u8, gaussian_kernel_2d, reflect_index, MAX_GAUSSIAN_RADIUS};
use crate::error::{ImagingError, Result};
use crate::image::PixelBuffer;

/// Apply Gaussian blur - u8 version.
///
/// # Arguments
/// * `input` - Image with 1 or 3 channels (height, width, channels)
/// * `sigma` - Standard deviation of the Gaussian, must be positive
///
/// # Returns
/// Blurred image with the same shape; weighted sums are truncated
pub fn gaussian_blur_u8(input: ArrayView3<u8>, sigma: f64) -> Array3<u8> {
    let (height, width, channels) = input.dim();
    let kernel = gaussian_kernel_2d(sigma);
    let half = (kernel.dim().0 / 2) as isize;
    let mut output = Array3::<u8>::zeros((height, width, channels));

    for y in 0..height {
        for x in 0..width {
            for c in 0..channels {
                let mut sum = 0.0f64;
                for ky in -half..=half {
                    let Some(sy) = reflect_index(y as isize + ky, height) else {
                        continue;
                    };
                    for kx in -half..=half {
                        let Some(sx) = reflect_index(x as isize + kx, width) else {
                            continue;
                        };
                        let w = kernel[[(ky + half) as usize, (kx + half) as usize]];
                        sum += input[[sy, sx, c]] as f64 * w;
                    }
                }
                output[[y, x, c]] = clamp_to_u8(sum);
            }
        }
    }

    output
}

/// Smooth a buffer with a Gaussian of standard deviation `sigma`.
///
/// Fails with `InvalidArgument` unless `sigma` is finite and positive, and
/// its radius `floor(3σ)` is at most [`MAX_GAUSSIAN_RADIUS`].
pub fn smooth(image: &PixelBuffer, sigma: f64) -> Result<PixelBuffer> {
    validate_sigma(sigma)?;
    Ok(PixelBuffer::from_filtered(gaussian_blur_u8(image.view(), sigma)))
}

pub(crate) fn validate_sigma(sigma: f64) -> Result<()> {
    if !(sigma.is_finite() && sigma > 0.0) {
        return Err(ImagingError::InvalidArgument(format!(
            "sigma must be a positive number, got {sigma}"
        )));
    }
    // Compared as f64 so huge values cannot saturate the usize cast.
    if (sigma * 3.0).floor() > MAX_GAUSSIAN_RADIUS as f64 {
        return Err(ImagingError::InvalidArgument(format!(
            "sigma {sigma} needs a kernel radius above {MAX_GAUSSIAN_RADIUS}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::{BGR, GRAY};

    #[test]
    fn test_small_sigma_is_identity() {
        let data: Vec<u8> = (0..12).map(|v| (v * 20) as u8).collect();
        let img = PixelBuffer::from_raw(4, 3, GRAY, data).unwrap();

        // floor(0.3 * 3) = 0 -> 1x1 kernel
        let result = smooth(&img, 0.3).unwrap();

        assert_eq!(result, img);
    }

    #[test]
    fn test_flat_color_image_unchanged() {
        let mut data = Vec::new();
        for _ in 0..(6 * 5) {
            data.extend_from_slice(&[10, 128, 250]);
        }
        let img = PixelBuffer::from_raw(6, 5, BGR, data).unwrap();

        let result = smooth(&img, 1.0).unwrap();

        assert_eq!(result.channels(), BGR);
        // Normalized weights may sum to a hair under 1, truncating down by one.
        for (a, b) in result.as_slice().iter().zip(img.as_slice()) {
            assert!((*a as i32 - *b as i32).abs() <= 1);
        }
    }

    #[test]
    fn test_blur_spreads_point() {
        let mut img = Array3::<u8>::zeros((7, 7, 1));
        img[[3, 3, 0]] = 255;

        let result = gaussian_blur_u8(img.view(), 1.0);

        assert!(result[[3, 3, 0]] < 255);
        assert!(result[[3, 4, 0]] > 0);
        assert_eq!(result[[3, 4, 0]], result[[4, 3, 0]]);
        assert_eq!(result[[2, 3, 0]], result[[3, 2, 0]]);
    }

    #[test]
    fn test_border_mirrors_without_edge_repeat() {
        // A 1-pixel-wide bright column at x = 1 sits next to the left border.
        // With mirroring, x = -1 samples x = 1, so pixel 0 sees the column
        // on both sides and ends brighter than pixel 2, which only sees it once.
        let mut img = Array3::<u8>::zeros((3, 6, 1));
        for y in 0..3 {
            img[[y, 1, 0]] = 200;
        }

        let result = gaussian_blur_u8(img.view(), 0.4);

        assert!(result[[1, 0, 0]] > result[[1, 2, 0]]);
    }

    #[test]
    fn test_channels_are_independent() {
        let mut img = Array3::<u8>::zeros((5, 5, 3));
        for y in 0..5 {
            for x in 0..5 {
                img[[y, x, 2]] = 255;
            }
        }

        let result = gaussian_blur_u8(img.view(), 0.7);

        assert!(result.iter().step_by(3).all(|&b| b == 0));
    }

    #[test]
    fn test_rejects_bad_sigma() {
        let img = PixelBuffer::new(2, 2, GRAY).unwrap();
        for sigma in [0.0, -1.0, f64::NAN, f64::INFINITY, 1e300, 1e5] {
            assert!(matches!(
                smooth(&img, sigma),
                Err(ImagingError::InvalidArgument(_))
            ));
        }
    }

    #[test]
    fn test_sigma_radius_cap() {
        // floor(3 * 341.5) = 1024, floor(3 * 342) = 1026
        assert!(validate_sigma(341.5).is_ok());
        assert!(matches!(
            validate_sigma(342.0),
            Err(ImagingError::InvalidArgument(_))
        ));
    }
}
