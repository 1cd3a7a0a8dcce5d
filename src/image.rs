//! Owned pixel storage passed between pipeline stages.
//!
//! Pixels live in an `Array3<u8>` of shape (height, width, channels):
//! - **Grayscale**: (height, width, 1)
//! - **BGR**: (height, width, 3), blue first, as stored in 24-bit bitmaps
//!
//! Row 0 is the topmost visible row. Row padding only exists on disk.

use ndarray::{Array3, ArrayView3};

use crate::error::{ImagingError, Result};

/// Channel count of a grayscale buffer.
pub const GRAY: usize = 1;
/// Channel count of a BGR colour buffer.
pub const BGR: usize = 3;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    pixels: Array3<u8>,
}

impl PixelBuffer {
    /// Zero-filled buffer.
    pub fn new(width: usize, height: usize, channels: usize) -> Result<Self> {
        check_shape(width, height, channels)?;
        Ok(Self {
            pixels: Array3::zeros((height, width, channels)),
        })
    }

    /// Wrap a flat row-major byte vector.
    ///
    /// # Arguments
    /// * `width`, `height` - Dimensions in pixels, both positive
    /// * `channels` - 1 (grayscale) or 3 (BGR)
    /// * `data` - Exactly `width * height * channels` bytes
    pub fn from_raw(width: usize, height: usize, channels: usize, data: Vec<u8>) -> Result<Self> {
        check_shape(width, height, channels)?;
        let expected = width * height * channels;
        if data.len() != expected {
            return Err(ImagingError::InvalidArgument(format!(
                "pixel data holds {} bytes, expected {expected} for {width}x{height}x{channels}",
                data.len()
            )));
        }
        let pixels = Array3::from_shape_vec((height, width, channels), data)
            .map_err(|e| ImagingError::InvalidArgument(e.to_string()))?;
        Ok(Self { pixels })
    }

    /// Wrap filter output whose shape was derived from a valid buffer.
    pub(crate) fn from_filtered(pixels: Array3<u8>) -> Self {
        debug_assert!({
            let (h, w, c) = pixels.dim();
            check_shape(w, h, c).is_ok() && pixels.is_standard_layout()
        });
        Self { pixels }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.pixels.dim().1
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.pixels.dim().0
    }

    #[inline]
    pub fn channels(&self) -> usize {
        self.pixels.dim().2
    }

    #[inline]
    pub fn is_grayscale(&self) -> bool {
        self.channels() == GRAY
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize, c: usize) -> u8 {
        self.pixels[[y, x, c]]
    }

    /// Read-only view in (height, width, channels) order.
    pub fn view(&self) -> ArrayView3<'_, u8> {
        self.pixels.view()
    }

    /// Bytes of row `y` with channels interleaved.
    pub fn row(&self, y: usize) -> &[u8] {
        let stride = self.width() * self.channels();
        let start = y * stride;
        &self.as_slice()[start..start + stride]
    }

    /// Flat row-major bytes.
    pub fn as_slice(&self) -> &[u8] {
        // Every constructor produces a standard-layout array.
        self.pixels
            .as_slice()
            .unwrap_or_else(|| unreachable!("PixelBuffer is always contiguous"))
    }

    pub fn into_raw(self) -> Vec<u8> {
        let (data, _) = self.pixels.into_raw_vec_and_offset();
        data
    }
}

fn check_shape(width: usize, height: usize, channels: usize) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(ImagingError::InvalidArgument(format!(
            "image dimensions must be positive, got {width}x{height}"
        )));
    }
    if channels != GRAY && channels != BGR {
        return Err(ImagingError::InvalidArgument(format!(
            "channel count must be 1 or 3, got {channels}"
        )));
    }
    Ok(())
}
