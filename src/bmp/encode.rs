//! BMP encoder: uncompressed 24-bit BMP.

use enough::Stop;

use super::{
    FILE_HEADER_SIZE, INFO_HEADER_SIZE, PIXEL_OFFSET, PIXELS_PER_METER, padded_scanline,
    scanline_padding,
};
use crate::error::BitmapError;
use crate::grid::PixelGrid;

/// Encode a pixel grid as a 24-bit BMP.
///
/// Row 0 of the grid is written first, matching the decoder.
pub(crate) fn encode_bmp(grid: &PixelGrid, stop: &dyn Stop) -> Result<Vec<u8>, BitmapError> {
    let width = grid.width();
    let height = grid.height();
    let too_large = BitmapError::DimensionsTooLarge {
        width: width.into(),
        height: height.into(),
    };

    let pixel_data_size = padded_scanline(width.into())
        .checked_mul(height.into())
        .ok_or(too_large)?;
    let file_size = pixel_data_size + u64::from(PIXEL_OFFSET);
    // Both sizes are stored in 32-bit header fields.
    let (Ok(file_size), Ok(pixel_data_size)) =
        (u32::try_from(file_size), u32::try_from(pixel_data_size))
    else {
        return Err(BitmapError::DimensionsTooLarge {
            width: width.into(),
            height: height.into(),
        });
    };

    stop.check()?;

    let mut out = Vec::with_capacity(file_size as usize);
    write_bmp_header(&mut out, file_size, pixel_data_size, width, height);

    let pad_bytes = scanline_padding(width.into()) as usize;
    for (row_idx, row) in grid.rows().enumerate() {
        if row_idx % 16 == 0 {
            stop.check()?;
        }
        out.extend_from_slice(row);
        out.extend(core::iter::repeat_n(0u8, pad_bytes));
    }
    debug_assert_eq!(out.len(), file_size as usize);

    Ok(out)
}

fn write_bmp_header(out: &mut Vec<u8>, file_size: u32, pixel_data_size: u32, width: u32, height: u32) {
    // File header (14 bytes)
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&file_size.to_le_bytes());
    out.extend_from_slice(&[0u8; 4]); // reserved
    out.extend_from_slice(&PIXEL_OFFSET.to_le_bytes());
    debug_assert_eq!(out.len(), FILE_HEADER_SIZE as usize);

    // DIB header (BITMAPINFOHEADER, 40 bytes)
    out.extend_from_slice(&INFO_HEADER_SIZE.to_le_bytes());
    out.extend_from_slice(&width.to_le_bytes());
    out.extend_from_slice(&height.to_le_bytes()); // positive = bottom-up
    out.extend_from_slice(&1u16.to_le_bytes()); // planes
    out.extend_from_slice(&24u16.to_le_bytes()); // bits per pixel
    out.extend_from_slice(&0u32.to_le_bytes()); // compression (BI_RGB)
    out.extend_from_slice(&pixel_data_size.to_le_bytes());
    out.extend_from_slice(&PIXELS_PER_METER.to_le_bytes()); // h resolution
    out.extend_from_slice(&PIXELS_PER_METER.to_le_bytes()); // v resolution
    out.extend_from_slice(&0u32.to_le_bytes()); // colors in palette
    out.extend_from_slice(&0u32.to_le_bytes()); // important colors
}

#[cfg(test)]
mod tests {
    use super::*;
    use enough::Unstoppable;

    #[test]
    fn header_layout_is_exact() {
        let grid = PixelGrid::from_fn(1, 2, |r, _| [r as u8, 0x40, 0x80]).unwrap();
        let out = encode_bmp(&grid, &Unstoppable).unwrap();

        #[rustfmt::skip]
        let expected_header: [u8; 54] = [
            b'B', b'M',
            62, 0, 0, 0,        // file size: 54 + (3 + 1) * 2
            0, 0, 0, 0,         // reserved
            54, 0, 0, 0,        // pixel offset
            40, 0, 0, 0,        // info header size
            1, 0, 0, 0,         // width
            2, 0, 0, 0,         // height
            1, 0,               // planes
            24, 0,              // bpp
            0, 0, 0, 0,         // compression
            8, 0, 0, 0,         // pixel array size
            0x13, 0x0B, 0, 0,   // 2835
            0x13, 0x0B, 0, 0,   // 2835
            0, 0, 0, 0,
            0, 0, 0, 0,
        ];
        assert_eq!(&out[..54], &expected_header[..]);
        assert_eq!(&out[54..], &[0, 0x40, 0x80, 0, 1, 0x40, 0x80, 0]);
    }

    #[test]
    fn row_stride_padding() {
        for (w, stride) in [(1u32, 4usize), (2, 8), (3, 12), (4, 12), (5, 16)] {
            let grid = PixelGrid::new(w, 3).unwrap();
            let out = encode_bmp(&grid, &Unstoppable).unwrap();
            assert_eq!(out.len(), 54 + stride * 3, "width {w}");
        }
    }

    #[test]
    fn cancellation_stops_encoding() {
        use crate::test_util::StopAfter;

        let grid = PixelGrid::new(3, 20).unwrap();
        assert!(matches!(
            encode_bmp(&grid, &StopAfter::new(0)),
            Err(BitmapError::Cancelled(_))
        ));
        // Pre-loop, row 0, then row 16 fails.
        assert!(matches!(
            encode_bmp(&grid, &StopAfter::new(2)),
            Err(BitmapError::Cancelled(_))
        ));
        assert!(encode_bmp(&grid, &StopAfter::new(3)).is_ok());
    }

    #[test]
    fn empty_grid_is_header_only() {
        let grid = PixelGrid::new(0, 0).unwrap();
        let out = encode_bmp(&grid, &Unstoppable).unwrap();
        assert_eq!(out.len(), 54);
        assert_eq!(&out[2..6], &54u32.to_le_bytes());
    }
}
