//! bmpfilter
//!
//! Decodes uncompressed bitmaps, applies a spatial filter, and writes the
//! result back out as an 8-bit grayscale bitmap.
//!
//! ## Image Format
//! Buffers are `ndarray` arrays of shape (height, width, channels):
//! - **Grayscale**: (height, width, 1) - from 8-bit bitmaps
//! - **BGR**: (height, width, 3) - from 24-bit bitmaps, blue first
//!
//! Row 0 is the top of the image; on-disk row order and padding are handled
//! entirely by [`codec`].
//!
//! ## Operations
//! - `binarize` - threshold to 0/255
//! - `smooth` - Gaussian blur with mirrored borders (works on colour)
//! - `edge` - Sobel gradient magnitude
//! - `laplacian` - 4-neighbour Laplacian
//! - `log` - Gaussian blur followed by the Laplacian
//!
//! ```no_run
//! use bmpfilter::{codec, pipeline, Operation};
//!
//! # fn main() -> bmpfilter::Result<()> {
//! let image = codec::read_bmp("input.bmp")?;
//! let result = pipeline::process(&Operation::smooth(1.5)?, &image)?;
//! codec::write_bmp("output.bmp", &result)?;
//! # Ok(())
//! # }
//! ```

pub mod codec;
pub mod error;
pub mod filters;
pub mod image;
pub mod pipeline;

pub use crate::error::{ImagingError, Result};
pub use crate::image::PixelBuffer;
pub use crate::pipeline::{Operation, OperationKind};
