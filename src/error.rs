//! Error type shared by the codec, the filters and the pipeline.

use std::io;

/// Errors raised while decoding, filtering or encoding an image.
#[derive(Debug, thiserror::Error)]
pub enum ImagingError {
    /// A stream could not be opened, read or written, or ended early.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is not a bitmap this crate can decode.
    #[error("invalid bitmap: {0}")]
    Format(String),

    /// The buffer cannot be written in the requested container layout.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// An operation parameter is missing or out of range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, ImagingError>;
