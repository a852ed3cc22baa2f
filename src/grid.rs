//! In-memory pixel grid: a flat row-major buffer of 3-channel pixels.
//!
//! Channels are stored in file order (blue, green, red). Row 0 is the first
//! scanline of the BMP pixel array, which is the visually bottom row.

use crate::error::BitmapError;

/// Bytes per pixel (blue, green, red).
pub const CHANNELS: usize = 3;

/// One pixel as `[blue, green, red]`.
pub type Bgr = [u8; CHANNELS];

pub const BLACK: Bgr = [0, 0, 0];
pub const WHITE: Bgr = [255, 255, 255];

/// Convert a computed channel value to a byte.
///
/// Truncates toward zero, then saturates to `0..=255`. NaN maps to 0.
/// Every transform funnels its arithmetic through here, so out-of-range
/// results never wrap.
#[inline]
pub fn to_channel(v: f64) -> u8 {
    // `as` on floats truncates and saturates.
    v as u8
}

/// A rectangular grid of BGR pixels with independently owned storage.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl core::fmt::Debug for PixelGrid {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PixelGrid")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.data.len())
            .finish()
    }
}

fn buffer_len(width: u32, height: u32) -> Result<usize, BitmapError> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|wh| wh.checked_mul(CHANNELS))
        .ok_or(BitmapError::DimensionsTooLarge {
            width: width.into(),
            height: height.into(),
        })
}

impl PixelGrid {
    /// All-black grid.
    pub fn new(width: u32, height: u32) -> Result<Self, BitmapError> {
        let len = buffer_len(width, height)?;
        Ok(Self {
            width,
            height,
            data: vec![0u8; len],
        })
    }

    /// Wrap a packed BGR buffer. The buffer must hold exactly
    /// `width * height * 3` bytes.
    pub fn from_bgr(data: Vec<u8>, width: u32, height: u32) -> Result<Self, BitmapError> {
        let needed = buffer_len(width, height)?;
        if data.len() < needed {
            return Err(BitmapError::BufferTooSmall {
                needed,
                actual: data.len(),
            });
        }
        if data.len() > needed {
            return Err(BitmapError::InvalidParameter(format!(
                "buffer holds {} bytes, {width}x{height} grid needs {needed}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build from nested rows, rejecting ragged input.
    ///
    /// An empty slice yields a 0x0 grid.
    pub fn from_rows(rows: &[Vec<Bgr>]) -> Result<Self, BitmapError> {
        let width = rows.first().map_or(0, Vec::len);
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(BitmapError::InvalidParameter(format!(
                "row {i} has {} pixels, expected {width}",
                row.len()
            )));
        }
        let too_large = || BitmapError::DimensionsTooLarge {
            width: width as u64,
            height: rows.len() as u64,
        };
        let w = u32::try_from(width).map_err(|_| too_large())?;
        let h = u32::try_from(rows.len()).map_err(|_| too_large())?;
        let mut data = Vec::with_capacity(buffer_len(w, h)?);
        for px in rows.iter().flatten() {
            data.extend_from_slice(px);
        }
        Ok(Self {
            width: w,
            height: h,
            data,
        })
    }

    /// Build by evaluating `f(row, col)` for every pixel.
    pub fn from_fn(
        width: u32,
        height: u32,
        mut f: impl FnMut(u32, u32) -> Bgr,
    ) -> Result<Self, BitmapError> {
        let len = buffer_len(width, height)?;
        let mut data = Vec::with_capacity(len);
        if len == 0 {
            return Ok(Self {
                width,
                height,
                data,
            });
        }
        for row in 0..height {
            for col in 0..width {
                data.extend_from_slice(&f(row, col));
            }
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// True when the grid holds no pixels (either dimension is zero).
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    fn offset(&self, row: u32, col: u32) -> usize {
        assert!(
            row < self.height && col < self.width,
            "pixel ({row}, {col}) out of bounds for {}x{} grid",
            self.width,
            self.height
        );
        (row as usize * self.width as usize + col as usize) * CHANNELS
    }

    /// Pixel at `(row, col)`. Panics when out of bounds.
    #[inline]
    pub fn pixel(&self, row: u32, col: u32) -> Bgr {
        let off = self.offset(row, col);
        [self.data[off], self.data[off + 1], self.data[off + 2]]
    }

    /// Overwrite the pixel at `(row, col)`. Panics when out of bounds.
    #[inline]
    pub fn set_pixel(&mut self, row: u32, col: u32, px: Bgr) {
        let off = self.offset(row, col);
        self.data[off..off + CHANNELS].copy_from_slice(&px);
    }

    /// Packed bytes of one row.
    pub fn row(&self, row: u32) -> &[u8] {
        let stride = self.stride();
        let start = row as usize * stride;
        &self.data[start..start + stride]
    }

    /// Packed bytes per row (no padding).
    pub fn stride(&self) -> usize {
        self.width as usize * CHANNELS
    }

    /// Iterate rows as packed byte slices, row 0 first.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        // chunks_exact panics on a zero chunk size
        let stride = self.stride().max(1);
        self.data
            .chunks_exact(stride)
            .take(self.height as usize)
    }

    /// Iterate pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = Bgr> + '_ {
        self.data.chunks_exact(CHANNELS).map(|c| [c[0], c[1], c[2]])
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Copy out as nested rows.
    pub fn to_rows(&self) -> Vec<Vec<Bgr>> {
        (0..self.height)
            .map(|r| (0..self.width).map(|c| self.pixel(r, c)).collect())
            .collect()
    }

    /// Typed view of the pixels as [`rgb::alt::BGR8`].
    #[cfg(feature = "rgb")]
    pub fn as_bgr(&self) -> &[rgb::alt::BGR8] {
        use rgb::FromSlice as _;
        self.data.as_bgr()
    }

    /// Zero-copy [`imgref::ImgRef`] view, row 0 first.
    #[cfg(feature = "imgref")]
    pub fn as_imgref(&self) -> imgref::ImgRef<'_, rgb::alt::BGR8> {
        imgref::ImgRef::new(self.as_bgr(), self.width as usize, self.height as usize)
    }

    /// Owned [`imgref::ImgVec`] copy.
    #[cfg(feature = "imgref")]
    pub fn to_imgvec(&self) -> imgref::ImgVec<rgb::alt::BGR8> {
        imgref::ImgVec::new(
            self.as_bgr().to_vec(),
            self.width as usize,
            self.height as usize,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_arithmetic_is_row_major() {
        let grid = PixelGrid::from_fn(3, 2, |r, c| [r as u8, c as u8, 7]).unwrap();
        assert_eq!(grid.pixel(1, 2), [1, 2, 7]);
        assert_eq!(&grid.as_bytes()[15..18], &[1, 2, 7]);
        assert_eq!(grid.row(1), &[1, 0, 7, 1, 1, 7, 1, 2, 7]);
    }

    #[test]
    fn from_rows_rejects_ragged() {
        let rows = vec![vec![BLACK, WHITE], vec![BLACK]];
        assert!(matches!(
            PixelGrid::from_rows(&rows),
            Err(BitmapError::InvalidParameter(_))
        ));
    }

    #[test]
    fn from_rows_roundtrips_to_rows() {
        let rows = vec![vec![[1, 2, 3], [4, 5, 6]], vec![[7, 8, 9], [10, 11, 12]]];
        let grid = PixelGrid::from_rows(&rows).unwrap();
        assert_eq!(grid.width(), 2);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.to_rows(), rows);
    }

    #[test]
    fn empty_grids_are_valid() {
        let grid = PixelGrid::from_rows(&[]).unwrap();
        assert_eq!((grid.width(), grid.height()), (0, 0));
        assert!(grid.is_empty());
        assert_eq!(grid.rows().count(), 0);

        let tall = PixelGrid::new(0, 5).unwrap();
        assert!(tall.is_empty());
        assert_eq!(tall.rows().count(), 0);
    }

    #[test]
    fn from_fn_skips_zero_width_rows() {
        let grid = PixelGrid::from_fn(0, u32::MAX, |_, _| unreachable!()).unwrap();
        assert_eq!(grid.height(), u32::MAX);
        assert!(grid.is_empty());
    }

    #[test]
    fn from_bgr_checks_length() {
        assert!(matches!(
            PixelGrid::from_bgr(vec![0; 5], 1, 2),
            Err(BitmapError::BufferTooSmall { needed: 6, actual: 5 })
        ));
        assert!(PixelGrid::from_bgr(vec![0; 7], 1, 2).is_err());
        assert!(PixelGrid::from_bgr(vec![0; 6], 1, 2).is_ok());
    }

    #[test]
    fn to_channel_truncates_and_saturates() {
        assert_eq!(to_channel(12.99), 12);
        assert_eq!(to_channel(-0.5), 0);
        assert_eq!(to_channel(-40.0), 0);
        assert_eq!(to_channel(300.0), 255);
        assert_eq!(to_channel(f64::NAN), 0);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn pixel_out_of_bounds_panics() {
        PixelGrid::new(2, 2).unwrap().pixel(2, 0);
    }

    #[cfg(feature = "imgref")]
    #[test]
    fn imgref_view_matches_pixels() {
        let grid = PixelGrid::from_fn(2, 3, |r, c| [r as u8, c as u8, 9]).unwrap();
        let img = grid.as_imgref();
        assert_eq!(img.width(), 2);
        assert_eq!(img.height(), 3);
        let px = img[(1usize, 2usize)];
        assert_eq!((px.b, px.g, px.r), (2, 1, 9));
    }
}
