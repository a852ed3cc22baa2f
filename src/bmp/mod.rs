//! 24-bit uncompressed BMP decoder and encoder (internal).
//!
//! Use top-level [`crate::decode_bmp`], [`crate::encode_bmp`],
//! [`crate::read_image`] and [`crate::write_image`].

mod decode;
mod encode;

pub(crate) use decode::decode_pixels;
pub(crate) use encode::encode_bmp;

use crate::error::BitmapError;

/// Size of the `BITMAPFILEHEADER`.
pub const FILE_HEADER_SIZE: u32 = 14;
/// Size of the `BITMAPINFOHEADER`.
pub const INFO_HEADER_SIZE: u32 = 40;
/// Pixel array offset written by the encoder.
pub const PIXEL_OFFSET: u32 = FILE_HEADER_SIZE + INFO_HEADER_SIZE;
/// Horizontal and vertical resolution written by the encoder (72 DPI).
pub const PIXELS_PER_METER: u32 = 2835;

/// Controls how strictly the decoder validates input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BmpPermissiveness {
    /// Additionally require the `BM` magic, a 40+ byte info header,
    /// planes == 1, 24 bits per pixel, no compression, and a file size
    /// field that matches the actual input length.
    Strict,

    /// Only require the file size field to agree with the size implied
    /// by width, height, and scanline padding.
    #[default]
    Standard,
}

/// Bytes of padding appended to a scanline of `width` pixels.
pub fn scanline_padding(width: u64) -> u64 {
    (4 - (width * 3) % 4) % 4
}

/// Stored scanline length in bytes, padding included.
pub fn padded_scanline(width: u64) -> u64 {
    width * 3 + scanline_padding(width)
}

/// File size implied by a pixel offset and dimensions.
///
/// Saturates instead of overflowing; a saturated size never matches a
/// 32-bit header field.
pub fn expected_file_size(data_offset: u32, width: u32, height: u32) -> u64 {
    padded_scanline(width.into())
        .saturating_mul(height.into())
        .saturating_add(data_offset.into())
}

/// Header fields of a BMP file, parsed without touching pixel data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BmpInfo {
    /// First two bytes of the file (`b"BM"` for a well-formed bitmap).
    pub magic: [u8; 2],
    /// File size as declared at offset 2.
    pub file_size: u32,
    /// Pixel array offset as declared at offset 10.
    pub data_offset: u32,
    /// Info header size at offset 14.
    pub info_header_size: u32,
    pub width: u32,
    pub height: u32,
    pub planes: u16,
    pub bits_per_pixel: u16,
    pub compression: u32,
    /// Declared pixel array size, padding included.
    pub image_size: u32,
    pub x_pixels_per_meter: u32,
    pub y_pixels_per_meter: u32,
}

impl BmpInfo {
    /// Parse the 54-byte file and info headers.
    pub fn from_bytes(data: &[u8]) -> Result<Self, BitmapError> {
        let header = data
            .get(..PIXEL_OFFSET as usize)
            .ok_or(BitmapError::UnexpectedEof)?;
        let u32_at = |off: usize| {
            u32::from_le_bytes([
                header[off],
                header[off + 1],
                header[off + 2],
                header[off + 3],
            ])
        };
        let u16_at = |off: usize| u16::from_le_bytes([header[off], header[off + 1]]);
        Ok(Self {
            magic: [header[0], header[1]],
            file_size: u32_at(2),
            data_offset: u32_at(10),
            info_header_size: u32_at(14),
            width: u32_at(18),
            height: u32_at(22),
            planes: u16_at(26),
            bits_per_pixel: u16_at(28),
            compression: u32_at(30),
            image_size: u32_at(34),
            x_pixels_per_meter: u32_at(38),
            y_pixels_per_meter: u32_at(42),
        })
    }

    /// File size implied by the dimensions and pixel offset.
    pub fn expected_file_size(&self) -> u64 {
        expected_file_size(self.data_offset, self.width, self.height)
    }

    /// Whether this header describes a file the decoder accepts.
    pub fn is_true_color(&self) -> bool {
        self.expected_file_size() == u64::from(self.file_size)
    }
}
