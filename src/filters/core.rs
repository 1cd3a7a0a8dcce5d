//! Core utilities for image processing filters.
//!
//! This module provides shared functionality used by multiple filters:
//! - Gaussian kernel generation
//! - Mirrored coordinate lookup for border sampling
//! - Float to byte conversion

use ndarray::Array2;

/// Largest supported Gaussian kernel radius. The kernel side is then at most
/// 2049, a 2049x2049 `f64` matrix (about 33 MB).
pub const MAX_GAUSSIAN_RADIUS: usize = 1024;

/// Kernel radius for a Gaussian of standard deviation `sigma`: `floor(3 * sigma)`.
///
/// The side length is `2 * radius + 1`, so a small enough sigma gives a
/// 1x1 (identity) kernel.
#[inline]
pub fn gaussian_radius(sigma: f64) -> usize {
    (sigma * 3.0).floor() as usize
}

/// Generate a normalized 2D Gaussian kernel.
///
/// Weight at offset (dx, dy) is `exp(-(dx² + dy²) / (2σ²))`, divided by the
/// sum of all weights.
///
/// # Arguments
/// * `sigma` - Standard deviation of the Gaussian, must be positive
///
/// # Returns
/// Square kernel indexed as `[[dy + radius, dx + radius]]`
pub fn gaussian_kernel_2d(sigma: f64) -> Array2<f64> {
    let half = gaussian_radius(sigma) as isize;
    let size = (2 * half + 1) as usize;
    let denom = 2.0 * sigma * sigma;

    let mut kernel = Array2::<f64>::zeros((size, size));
    let mut sum = 0.0;
    for y in -half..=half {
        for x in -half..=half {
            let v = (-((x * x + y * y) as f64) / denom).exp();
            kernel[[(y + half) as usize, (x + half) as usize]] = v;
            sum += v;
        }
    }

    // Normalize
    kernel.mapv_inplace(|v| v / sum);
    kernel
}

/// Mirror a sample coordinate back into `[0, size)`.
///
/// A negative coordinate `c` maps to `-c`; a coordinate past the end maps
/// to `2 * size - c - 2`. Each rule is applied once, in that order. A
/// coordinate that is still outside (kernel wider than the image) yields
/// `None` and the sample is skipped.
#[inline]
pub fn reflect_index(i: isize, size: usize) -> Option<usize> {
    let s = size as isize;
    let mut r = i;
    if r < 0 {
        r = -r;
    }
    if r >= s {
        r = 2 * s - r - 2;
    }
    (0..s).contains(&r).then_some(r as usize)
}

/// Clamp to 0-255 and truncate toward zero.
#[inline]
pub fn clamp_to_u8(v: f64) -> u8 {
    v.clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gaussian_radius_floors() {
        assert_eq!(gaussian_radius(0.2), 0);
        assert_eq!(gaussian_radius(0.34), 1);
        assert_eq!(gaussian_radius(1.0), 3);
        assert_eq!(gaussian_radius(1.5), 4);
    }

    #[test]
    fn test_gaussian_kernel_normalized_and_symmetric() {
        let k = gaussian_kernel_2d(1.0);
        assert_eq!(k.dim(), (7, 7));

        let sum: f64 = k.iter().sum();
        assert!((sum - 1.0).abs() < 1e-12);

        assert_eq!(k[[0, 0]], k[[6, 6]]);
        assert_eq!(k[[2, 3]], k[[3, 2]]);
        assert!(k[[3, 3]] > k[[3, 4]]);
    }

    #[test]
    fn test_gaussian_kernel_tiny_sigma_is_identity() {
        let k = gaussian_kernel_2d(0.1);
        assert_eq!(k.dim(), (1, 1));
        assert_eq!(k[[0, 0]], 1.0);
    }

    #[test]
    fn test_reflect_index() {
        assert_eq!(reflect_index(3, 5), Some(3));
        assert_eq!(reflect_index(-1, 5), Some(1));
        assert_eq!(reflect_index(-2, 5), Some(2));
        assert_eq!(reflect_index(5, 5), Some(3));
        assert_eq!(reflect_index(6, 5), Some(2));
        // Mirrors past the far edge after the first reflection
        assert_eq!(reflect_index(-7, 5), Some(1));
        // Too far out for a single reflection
        assert_eq!(reflect_index(12, 5), None);
        // A single column has nowhere to reflect to
        assert_eq!(reflect_index(1, 1), None);
        assert_eq!(reflect_index(-1, 1), None);
    }

    #[test]
    fn test_clamp_to_u8_truncates() {
        assert_eq!(clamp_to_u8(-3.5), 0);
        assert_eq!(clamp_to_u8(12.99), 12);
        assert_eq!(clamp_to_u8(255.0), 255);
        assert_eq!(clamp_to_u8(900.0), 255);
    }
}
