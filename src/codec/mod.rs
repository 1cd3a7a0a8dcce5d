//! Bitmap container codec.
//!
//! Decodes uncompressed 8-bit and 24-bit bitmaps into a [`PixelBuffer`] and
//! writes grayscale buffers back out as 8-bit paletted bitmaps.
//!
//! [`PixelBuffer`]: crate::image::PixelBuffer

mod bmp;
pub mod header;

pub use self::bmp::{decode, decode_bytes, encode, encode_to_vec, read_bmp, write_bmp};
