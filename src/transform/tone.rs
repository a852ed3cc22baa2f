//! Per-pixel color transforms. Output dimensions always match the input.

use enough::Stop;

use crate::error::BitmapError;
use crate::grid::{BLACK, Bgr, PixelGrid, WHITE, to_channel};

/// Strength of the Clarendon brighten/darken pull.
const CLARENDON_SCALE: f64 = 0.3;
const CLARENDON_LIGHT: u32 = 170;
const CLARENDON_DARK: u32 = 90;

/// Floor of the channel average. 255 / 2 truncated.
const HIGH_CONTRAST_THRESHOLD: u32 = 127;

const POSTERIZE_WHITE: u32 = 550;
const POSTERIZE_BLACK: u32 = 150;

#[inline]
fn channel_sum(px: Bgr) -> u32 {
    px.iter().map(|&c| u32::from(c)).sum()
}

/// Map every pixel with `f`, checking `stop` every 16 rows.
fn map_rows(
    grid: &PixelGrid,
    stop: &dyn Stop,
    mut f: impl FnMut(Bgr) -> Bgr,
) -> Result<PixelGrid, BitmapError> {
    let mut data = Vec::with_capacity(grid.as_bytes().len());
    for (row_idx, row) in grid.rows().enumerate() {
        if row_idx % 16 == 0 {
            stop.check()?;
        }
        for px in row.chunks_exact(3) {
            data.extend_from_slice(&f([px[0], px[1], px[2]]));
        }
    }
    PixelGrid::from_bgr(data, grid.width(), grid.height())
}

fn check_factor(name: &str, factor: f64) -> Result<(), BitmapError> {
    if !(0.0..=1.0).contains(&factor) {
        return Err(BitmapError::InvalidParameter(format!(
            "{name} factor must be within [0, 1], got {factor}"
        )));
    }
    Ok(())
}

/// Push light pixels toward white and dark pixels toward black.
///
/// Pixels whose channel average is at least 170 get
/// `255 - trunc((255 - c) * 0.3)`, below 90 get `trunc(c * 0.3)`, and
/// everything in between is left alone.
pub fn clarendon(grid: &PixelGrid, stop: &dyn Stop) -> Result<PixelGrid, BitmapError> {
    map_rows(grid, stop, |px| {
        let avg = channel_sum(px) / 3;
        if avg >= CLARENDON_LIGHT {
            px.map(|c| 255 - to_channel(f64::from(255 - c) * CLARENDON_SCALE))
        } else if avg < CLARENDON_DARK {
            px.map(|c| to_channel(f64::from(c) * CLARENDON_SCALE))
        } else {
            px
        }
    })
}

/// Replace each channel with the floored mean of the three.
pub fn grayscale(grid: &PixelGrid, stop: &dyn Stop) -> Result<PixelGrid, BitmapError> {
    map_rows(grid, stop, |px| {
        let gray = (channel_sum(px) / 3) as u8;
        [gray; 3]
    })
}

/// Threshold to pure black or white on the floored channel mean: white
/// from 127 up, so an average of exactly 127 is white.
pub fn high_contrast(grid: &PixelGrid, stop: &dyn Stop) -> Result<PixelGrid, BitmapError> {
    map_rows(grid, stop, |px| {
        if channel_sum(px) / 3 >= HIGH_CONTRAST_THRESHOLD {
            WHITE
        } else {
            BLACK
        }
    })
}

/// Scale each channel's distance from white by `factor`.
///
/// `0.0` produces white, `1.0` leaves the image unchanged.
pub fn lighten(grid: &PixelGrid, factor: f64, stop: &dyn Stop) -> Result<PixelGrid, BitmapError> {
    check_factor("lighten", factor)?;
    map_rows(grid, stop, |px| {
        px.map(|c| to_channel(255.0 - f64::from(255 - c) * factor))
    })
}

/// Scale each channel by `factor`.
///
/// `0.0` produces black, `1.0` leaves the image unchanged.
pub fn darken(grid: &PixelGrid, factor: f64, stop: &dyn Stop) -> Result<PixelGrid, BitmapError> {
    check_factor("darken", factor)?;
    map_rows(grid, stop, |px| px.map(|c| to_channel(f64::from(c) * factor)))
}

/// Reduce to five colors: black, white, and the dominant primary.
///
/// Ties between channels fall through to blue.
pub fn posterize(grid: &PixelGrid, stop: &dyn Stop) -> Result<PixelGrid, BitmapError> {
    map_rows(grid, stop, |px| {
        let total = channel_sum(px);
        let [blue, green, red] = px;
        if total >= POSTERIZE_WHITE {
            WHITE
        } else if total <= POSTERIZE_BLACK {
            BLACK
        } else if red > blue && red > green {
            [0, 0, 255]
        } else if green > blue && green > red {
            [0, 255, 0]
        } else {
            [255, 0, 0]
        }
    })
}
