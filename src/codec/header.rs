//! On-disk bitmap headers.
//!
//! Both headers are packed little-endian records. Each field is read and
//! written individually in declaration order, so the in-memory layout of
//! these structs never matters.

use std::io::{Read, Write};

use crate::error::Result;

/// "BM" read as a little-endian u16.
pub const SIGNATURE: u16 = 0x4D42;
pub const FILE_HEADER_SIZE: u32 = 14;
pub const INFO_HEADER_SIZE: u32 = 40;
/// Offset of the pixel data when no palette follows the headers.
pub const HEADERS_SIZE: u32 = FILE_HEADER_SIZE + INFO_HEADER_SIZE;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FileHeader {
    pub signature: u16,
    pub file_size: u32,
    pub reserved1: u16,
    pub reserved2: u16,
    pub data_offset: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InfoHeader {
    pub header_size: u32,
    pub width: i32,
    pub height: i32,
    pub planes: u16,
    pub bits_per_pixel: u16,
    pub compression: u32,
    pub image_size: u32,
    pub x_pixels_per_meter: i32,
    pub y_pixels_per_meter: i32,
    pub colors_used: u32,
    pub colors_important: u32,
}

impl FileHeader {
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        Ok(Self {
            signature: read_u16(reader)?,
            file_size: read_u32(reader)?,
            reserved1: read_u16(reader)?,
            reserved2: read_u16(reader)?,
            data_offset: read_u32(reader)?,
        })
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&self.signature.to_le_bytes())?;
        writer.write_all(&self.file_size.to_le_bytes())?;
        writer.write_all(&self.reserved1.to_le_bytes())?;
        writer.write_all(&self.reserved2.to_le_bytes())?;
        writer.write_all(&self.data_offset.to_le_bytes())?;
        Ok(())
    }
}

impl InfoHeader {
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        Ok(Self {
            header_size: read_u32(reader)?,
            width: read_i32(reader)?,
            height: read_i32(reader)?,
            planes: read_u16(reader)?,
            bits_per_pixel: read_u16(reader)?,
            compression: read_u32(reader)?,
            image_size: read_u32(reader)?,
            x_pixels_per_meter: read_i32(reader)?,
            y_pixels_per_meter: read_i32(reader)?,
            colors_used: read_u32(reader)?,
            colors_important: read_u32(reader)?,
        })
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&self.header_size.to_le_bytes())?;
        writer.write_all(&self.width.to_le_bytes())?;
        writer.write_all(&self.height.to_le_bytes())?;
        writer.write_all(&self.planes.to_le_bytes())?;
        writer.write_all(&self.bits_per_pixel.to_le_bytes())?;
        writer.write_all(&self.compression.to_le_bytes())?;
        writer.write_all(&self.image_size.to_le_bytes())?;
        writer.write_all(&self.x_pixels_per_meter.to_le_bytes())?;
        writer.write_all(&self.y_pixels_per_meter.to_le_bytes())?;
        writer.write_all(&self.colors_used.to_le_bytes())?;
        writer.write_all(&self.colors_important.to_le_bytes())?;
        Ok(())
    }
}

#[inline]
fn read_u16<R: Read>(reader: &mut R) -> Result<u16> {
    let mut buf = [0u8; 2];
    reader.read_exact(&mut buf)?;
    Ok(u16::from_le_bytes(buf))
}

#[inline]
fn read_u32<R: Read>(reader: &mut R) -> Result<u32> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

#[inline]
fn read_i32<R: Read>(reader: &mut R) -> Result<i32> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf)?;
    Ok(i32::from_le_bytes(buf))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ImagingError;

    #[test]
    fn test_file_header_layout() {
        let header = FileHeader {
            signature: SIGNATURE,
            file_size: 0x0102_0304,
            reserved1: 0,
            reserved2: 0,
            data_offset: 1078,
        };
        let mut bytes = Vec::new();
        header.write_to(&mut bytes).unwrap();

        assert_eq!(bytes.len(), FILE_HEADER_SIZE as usize);
        assert_eq!(&bytes[0..2], b"BM");
        assert_eq!(&bytes[2..6], &[0x04, 0x03, 0x02, 0x01]);
        assert_eq!(&bytes[10..14], &1078u32.to_le_bytes());
        assert_eq!(FileHeader::read_from(&mut bytes.as_slice()).unwrap(), header);
    }

    #[test]
    fn test_info_header_layout() {
        let header = InfoHeader {
            header_size: INFO_HEADER_SIZE,
            width: 7,
            height: -3,
            planes: 1,
            bits_per_pixel: 24,
            compression: 0,
            image_size: 72,
            x_pixels_per_meter: 2835,
            y_pixels_per_meter: 2835,
            colors_used: 0,
            colors_important: 0,
        };
        let mut bytes = Vec::new();
        header.write_to(&mut bytes).unwrap();

        assert_eq!(bytes.len(), INFO_HEADER_SIZE as usize);
        assert_eq!(&bytes[8..12], &(-3i32).to_le_bytes());
        assert_eq!(&bytes[14..16], &24u16.to_le_bytes());
        assert_eq!(InfoHeader::read_from(&mut bytes.as_slice()).unwrap(), header);
    }

    #[test]
    fn test_short_header_is_io_error() {
        let bytes = [0x42u8, 0x4D, 0x00];
        let err = FileHeader::read_from(&mut &bytes[..]).unwrap_err();
        assert!(matches!(err, ImagingError::Io(_)));
    }
}
