//! Decoding and encoding of uncompressed bitmaps.
//!
//! ## Supported Layouts
//!
//! | Bits | Decoded as | Encoded as |
//! |------|------------|------------|
//! | 8    | (H, W, 1) raw intensity, palette ignored | always, with a 256-entry gray palette |
//! | 24   | (H, W, 3) BGR | never (reduce to grayscale first) |
//!
//! Rows are stored bottom-to-top on disk and padded to a multiple of 4 bytes.
//! A negative height is read as its absolute value and the rows are still
//! treated as bottom-up.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use super::header::{
    FileHeader, InfoHeader, FILE_HEADER_SIZE, HEADERS_SIZE, INFO_HEADER_SIZE, SIGNATURE,
};
use crate::error::{ImagingError, Result};
use crate::image::{PixelBuffer, GRAY};

const PALETTE_ENTRIES: usize = 256;
const PALETTE_SIZE: usize = PALETTE_ENTRIES * 4;

/// Bytes per on-disk row: `width * channels` rounded up to a multiple of 4.
#[inline]
fn padded_row_size(row_bytes: usize) -> usize {
    (row_bytes + 3) & !3
}

// ============================================================================
// Decoding
// ============================================================================

/// Decode a bitmap from a byte stream.
///
/// # Arguments
/// * `reader` - Stream positioned at the `BM` signature
///
/// # Returns
/// A top-down buffer with 1 channel for 8-bit input or 3 (BGR) for 24-bit input
///
/// # Errors
/// * `Format` - bad signature, compression, bit depth, dimensions or data offset
/// * `Io` - the stream ends before the headers or pixel rows are complete
pub fn decode<R: Read>(mut reader: R) -> Result<PixelBuffer> {
    let file_header = FileHeader::read_from(&mut reader)?;
    if file_header.signature != SIGNATURE {
        return Err(ImagingError::Format(format!(
            "bad signature 0x{:04X}, expected \"BM\"",
            file_header.signature
        )));
    }

    let info = InfoHeader::read_from(&mut reader)?;
    if info.compression != 0 || (info.bits_per_pixel != 8 && info.bits_per_pixel != 24) {
        return Err(ImagingError::Format(format!(
            "only uncompressed 8-bit or 24-bit bitmaps are supported \
             (compression={}, bits={})",
            info.compression, info.bits_per_pixel
        )));
    }
    if info.width <= 0 || info.height == 0 {
        return Err(ImagingError::Format(format!(
            "invalid dimensions {}x{}",
            info.width, info.height
        )));
    }
    if file_header.data_offset < HEADERS_SIZE {
        return Err(ImagingError::Format(format!(
            "pixel data offset {} overlaps the headers",
            file_header.data_offset
        )));
    }

    let channels = usize::from(info.bits_per_pixel / 8);
    let width = info.width as usize;
    let height = info.height.unsigned_abs() as usize;

    // Skip the palette and anything else up to the pixel data.
    let skip = u64::from(file_header.data_offset - HEADERS_SIZE);
    let skipped = io::copy(&mut reader.by_ref().take(skip), &mut io::sink())?;
    if skipped < skip {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "stream ends before pixel data offset",
        )
        .into());
    }

    let too_large = || {
        ImagingError::Format(format!(
            "dimensions {}x{} overflow the pixel data size",
            info.width, info.height
        ))
    };
    let stride = width.checked_mul(channels).ok_or_else(too_large)?;
    let padded = stride
        .checked_add(3)
        .map(|n| n & !3)
        .ok_or_else(too_large)?;
    let total = padded.checked_mul(height).ok_or_else(too_large)?;

    // The buffer grows with the bytes actually present, not the declared size.
    let mut payload = Vec::new();
    reader.take(total as u64).read_to_end(&mut payload)?;
    if payload.len() < total {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("pixel data holds {} bytes, expected {total}", payload.len()),
        )
        .into());
    }

    let mut data = Vec::with_capacity(stride * height);
    for row in payload.chunks_exact(padded).rev() {
        data.extend_from_slice(&row[..stride]);
    }

    PixelBuffer::from_raw(width, height, channels, data)
}

/// Decode a bitmap held in memory.
pub fn decode_bytes(bytes: &[u8]) -> Result<PixelBuffer> {
    decode(bytes)
}

/// Open `path` and decode it.
pub fn read_bmp<P: AsRef<Path>>(path: P) -> Result<PixelBuffer> {
    let file = File::open(path.as_ref())?;
    decode(BufReader::new(file))
}

// ============================================================================
// Encoding
// ============================================================================

/// Encode a grayscale buffer as an 8-bit paletted bitmap.
///
/// Writes the file header, info header, a 256-entry gray palette
/// (B = G = R = index) and bottom-up rows padded with zeros.
///
/// # Errors
/// * `UnsupportedFormat` - the buffer has more than one channel, or is too
///   large for the 32-bit size fields
/// * `Io` - the writer fails
pub fn encode<W: Write>(image: &PixelBuffer, mut writer: W) -> Result<()> {
    if image.channels() != GRAY {
        return Err(ImagingError::UnsupportedFormat(format!(
            "only grayscale buffers can be encoded, got {} channels",
            image.channels()
        )));
    }

    let width = image.width();
    let height = image.height();
    let row_size = padded_row_size(width);
    let too_large =
        || ImagingError::UnsupportedFormat(format!("{width}x{height} exceeds bitmap size limits"));

    let image_size = row_size
        .checked_mul(height)
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(too_large)?;
    let data_offset = HEADERS_SIZE + PALETTE_SIZE as u32;
    let file_size = data_offset.checked_add(image_size).ok_or_else(too_large)?;

    let file_header = FileHeader {
        signature: SIGNATURE,
        file_size,
        reserved1: 0,
        reserved2: 0,
        data_offset,
    };
    let info = InfoHeader {
        header_size: INFO_HEADER_SIZE,
        width: i32::try_from(width).map_err(|_| too_large())?,
        height: i32::try_from(height).map_err(|_| too_large())?,
        planes: 1,
        bits_per_pixel: 8,
        compression: 0,
        image_size,
        x_pixels_per_meter: 0,
        y_pixels_per_meter: 0,
        colors_used: PALETTE_ENTRIES as u32,
        colors_important: 0,
    };

    file_header.write_to(&mut writer)?;
    info.write_to(&mut writer)?;

    let mut palette = [0u8; PALETTE_SIZE];
    for (i, entry) in palette.chunks_exact_mut(4).enumerate() {
        let v = i as u8;
        entry[0] = v; // B
        entry[1] = v; // G
        entry[2] = v; // R
    }
    writer.write_all(&palette)?;

    let mut row = vec![0u8; row_size];
    for y in (0..height).rev() {
        row[..width].copy_from_slice(image.row(y));
        writer.write_all(&row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Encode into a new byte vector.
pub fn encode_to_vec(image: &PixelBuffer) -> Result<Vec<u8>> {
    let capacity = FILE_HEADER_SIZE as usize
        + INFO_HEADER_SIZE as usize
        + PALETTE_SIZE
        + padded_row_size(image.width()) * image.height();
    let mut out = Vec::with_capacity(capacity);
    encode(image, &mut out)?;
    Ok(out)
}

/// Encode `image` and write it to `path`, replacing any existing file.
pub fn write_bmp<P: AsRef<Path>>(path: P, image: &PixelBuffer) -> Result<()> {
    // A rejected buffer must not leave an empty file behind.
    if image.channels() != GRAY {
        return Err(ImagingError::UnsupportedFormat(format!(
            "only grayscale buffers can be encoded, got {} channels",
            image.channels()
        )));
    }
    let file = File::create(path.as_ref())?;
    encode(image, BufWriter::new(file))
}
