//! BMP decoder for uncompressed 24-bit bitmaps.
//!
//! The file size field is the validity check: a file is accepted when
//! `data_offset + padded_scanline * height` equals the declared size.
//! Scanlines are read in file order, so row 0 is the bottom of the image.

use enough::Stop;

use super::{BmpInfo, BmpPermissiveness, expected_file_size, padded_scanline};
use crate::error::BitmapError;
use crate::grid::PixelGrid;
use crate::limits::Limits;

// ── Cursor for reading from &[u8] ───────────────────────────────────

struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn set_position(&mut self, pos: u64) -> Result<(), BitmapError> {
        let pos = usize::try_from(pos).map_err(|_| BitmapError::UnexpectedEof)?;
        if pos > self.data.len() {
            return Err(BitmapError::UnexpectedEof);
        }
        self.pos = pos;
        Ok(())
    }

    fn u32_le_at(&mut self, offset: u64) -> Result<u32, BitmapError> {
        self.set_position(offset)?;
        let bytes = self.take(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], BitmapError> {
        let end = self.pos.checked_add(n).ok_or(BitmapError::UnexpectedEof)?;
        let slice = self
            .data
            .get(self.pos..end)
            .ok_or(BitmapError::UnexpectedEof)?;
        self.pos = end;
        Ok(slice)
    }
}

// ── Header ──────────────────────────────────────────────────────────

/// The four fields the decoder relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BmpHeader {
    file_size: u32,
    data_offset: u32,
    width: u32,
    height: u32,
}

fn read_header(cursor: &mut Cursor<'_>) -> Result<BmpHeader, BitmapError> {
    Ok(BmpHeader {
        file_size: cursor.u32_le_at(2)?,
        data_offset: cursor.u32_le_at(10)?,
        width: cursor.u32_le_at(18)?,
        height: cursor.u32_le_at(22)?,
    })
}

fn check_strict(data: &[u8]) -> Result<(), BitmapError> {
    let info = BmpInfo::from_bytes(data)?;
    if &info.magic != b"BM" {
        return Err(BitmapError::UnrecognizedFormat);
    }
    if info.info_header_size < 40 {
        return Err(BitmapError::InvalidHeader(format!(
            "info header size {} is smaller than 40",
            info.info_header_size
        )));
    }
    if info.planes != 1 {
        return Err(BitmapError::InvalidHeader(format!(
            "planes field is {}, expected 1",
            info.planes
        )));
    }
    if info.bits_per_pixel != 24 {
        return Err(BitmapError::InvalidHeader(format!(
            "{} bits per pixel, expected 24",
            info.bits_per_pixel
        )));
    }
    if info.compression != 0 {
        return Err(BitmapError::InvalidHeader(format!(
            "compression method {} is not supported",
            info.compression
        )));
    }
    if info.file_size as usize != data.len() {
        return Err(BitmapError::InvalidHeader(format!(
            "file size field ({}) doesn't match actual size ({})",
            info.file_size,
            data.len()
        )));
    }
    Ok(())
}

// ── Full decode ─────────────────────────────────────────────────────

/// Decode a 24-bit BMP into a pixel grid.
pub(crate) fn decode_pixels(
    data: &[u8],
    permissiveness: BmpPermissiveness,
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<PixelGrid, BitmapError> {
    let mut cursor = Cursor::new(data);
    let header = read_header(&mut cursor)?;

    let expected = expected_file_size(header.data_offset, header.width, header.height);
    if expected != u64::from(header.file_size) {
        return Err(BitmapError::NotTrueColor {
            declared: header.file_size.into(),
            expected,
        });
    }
    if permissiveness == BmpPermissiveness::Strict {
        check_strict(data)?;
    }
    if let Some(limits) = limits {
        limits.check(header.width.into(), header.height.into())?;
    }
    if expected > data.len() as u64 {
        return Err(BitmapError::UnexpectedEof);
    }
    stop.check()?;

    let too_large = || BitmapError::DimensionsTooLarge {
        width: header.width.into(),
        height: header.height.into(),
    };
    let row_bytes = usize::try_from(u64::from(header.width) * 3).map_err(|_| too_large())?;
    if row_bytes == 0 {
        // Zero-width rows carry no bytes, whatever the height.
        return PixelGrid::from_bgr(Vec::new(), header.width, header.height);
    }
    let stride = usize::try_from(padded_scanline(header.width.into())).map_err(|_| too_large())?;
    let block_len = stride
        .checked_mul(header.height as usize)
        .ok_or_else(too_large)?;

    cursor.set_position(header.data_offset.into())?;
    let block = cursor.take(block_len)?;
    let mut pixels = Vec::with_capacity(row_bytes * header.height as usize);
    for (row, scanline) in block.chunks_exact(stride).enumerate() {
        if row % 16 == 0 {
            stop.check()?;
        }
        pixels.extend_from_slice(&scanline[..row_bytes]);
    }

    PixelGrid::from_bgr(pixels, header.width, header.height)
}
