//! Operation dispatch and end-to-end processing.
//!
//! | Operation | Parameter | Source |
//! |-----------|-----------|--------|
//! | `binarize` | threshold 0-255 | grayscale |
//! | `smooth` | sigma > 0 | original (colour stays colour) |
//! | `edge` | - | grayscale |
//! | `laplacian` | - | grayscale |
//! | `log` | sigma > 0 | grayscale, smoothed then Laplacian |
//!
//! [`process`] reduces colour input to grayscale where the operation needs
//! it, runs the operation, and reduces again if the result is still colour,
//! so its output can always be encoded.

use std::borrow::Cow;
use std::fmt;
use std::path::Path;

use crate::codec;
use crate::error::{ImagingError, Result};
use crate::filters::{blur, edge, grayscale, stylize};
use crate::image::PixelBuffer;

/// A filter operation with its validated parameter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Operation {
    Binarize { threshold: u8 },
    Smooth { sigma: f64 },
    Edge,
    Laplacian,
    LaplacianOfGaussian { sigma: f64 },
}

impl Operation {
    /// Threshold must lie in 0-255; anything else is rejected.
    pub fn binarize(threshold: i64) -> Result<Self> {
        let threshold = u8::try_from(threshold).map_err(|_| {
            ImagingError::InvalidArgument(format!(
                "threshold must be between 0 and 255, got {threshold}"
            ))
        })?;
        Ok(Self::Binarize { threshold })
    }

    pub fn smooth(sigma: f64) -> Result<Self> {
        blur::validate_sigma(sigma)?;
        Ok(Self::Smooth { sigma })
    }

    pub fn log(sigma: f64) -> Result<Self> {
        blur::validate_sigma(sigma)?;
        Ok(Self::LaplacianOfGaussian { sigma })
    }

    pub fn kind(&self) -> OperationKind {
        match self {
            Self::Binarize { .. } => OperationKind::Binarize,
            Self::Smooth { .. } => OperationKind::Smooth,
            Self::Edge => OperationKind::Edge,
            Self::Laplacian => OperationKind::Laplacian,
            Self::LaplacianOfGaussian { .. } => OperationKind::Log,
        }
    }

    /// `smooth` is the only operation applied to the original colour input.
    pub fn uses_color_source(&self) -> bool {
        matches!(self, Self::Smooth { .. })
    }
}

/// Operation names as they appear on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperationKind {
    Binarize,
    Smooth,
    Edge,
    Laplacian,
    Log,
}

impl OperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Binarize => "binarize",
            Self::Smooth => "smooth",
            Self::Edge => "edge",
            Self::Laplacian => "laplacian",
            Self::Log => "log",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Dispatch
// ============================================================================

/// Run one operation on `source`.
///
/// `source` must already be grayscale for every operation except `smooth`,
/// which accepts colour input and keeps its channel count.
pub fn run(op: &Operation, source: &PixelBuffer) -> Result<PixelBuffer> {
    if !op.uses_color_source() && !source.is_grayscale() {
        return Err(ImagingError::InvalidArgument(format!(
            "operation '{}' needs a grayscale source, got {} channels",
            op.kind(),
            source.channels()
        )));
    }

    match *op {
        Operation::Binarize { threshold } => Ok(stylize::binarize(source, threshold)),
        Operation::Smooth { sigma } => blur::smooth(source, sigma),
        Operation::Edge => Ok(edge::detect_edges(source)),
        Operation::Laplacian => Ok(edge::laplacian(source)),
        Operation::LaplacianOfGaussian { sigma } => laplacian_of_gaussian(source, sigma),
    }
}

/// Gaussian smoothing followed by the Laplacian.
pub fn laplacian_of_gaussian(source: &PixelBuffer, sigma: f64) -> Result<PixelBuffer> {
    let smoothed = blur::smooth(source, sigma)?;
    Ok(edge::laplacian(&smoothed))
}

/// Borrow `image` when it is already grayscale, otherwise reduce it.
pub fn grayscale_source(image: &PixelBuffer) -> Result<Cow<'_, PixelBuffer>> {
    if image.is_grayscale() {
        Ok(Cow::Borrowed(image))
    } else {
        grayscale::reduce(image).map(Cow::Owned)
    }
}

/// Run `op` on a decoded image and return a grayscale result ready to encode.
pub fn process(op: &Operation, input: &PixelBuffer) -> Result<PixelBuffer> {
    let result = if op.uses_color_source() {
        run(op, input)?
    } else {
        let gray = grayscale_source(input)?;
        run(op, &gray)?
    };

    if result.is_grayscale() {
        Ok(result)
    } else {
        grayscale::reduce(&result)
    }
}

/// Decode `input`, apply `op`, and write the encoded result to `output`.
pub fn process_file(op: &Operation, input: &Path, output: &Path) -> Result<()> {
    let image = codec::read_bmp(input)?;
    let result = process(op, &image)?;
    drop(image);

    codec::write_bmp(output, &result)
}
