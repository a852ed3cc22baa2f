//! Transforms that move pixels: quarter-turn rotation and integer upscaling.

use enough::Stop;

use crate::error::BitmapError;
use crate::grid::{CHANNELS, PixelGrid};
use crate::limits::Limits;

/// Rotate a quarter turn clockwise.
///
/// Output has `width` rows of `height` pixels, with
/// `out[width - 1 - y][x] = in[x][y]`.
pub fn rotate_90(grid: &PixelGrid, stop: &dyn Stop) -> Result<PixelGrid, BitmapError> {
    let (in_w, in_h) = (grid.width(), grid.height());
    let mut out = PixelGrid::new(in_h, in_w)?;
    if out.is_empty() {
        return Ok(out);
    }
    for x in 0..in_h {
        if x % 16 == 0 {
            stop.check()?;
        }
        for y in 0..in_w {
            out.set_pixel(in_w - 1 - y, x, grid.pixel(x, y));
        }
    }
    Ok(out)
}

/// Rotate `turns` quarter turns clockwise.
///
/// Only `turns.rem_euclid(4)` matters; negative counts turn counter-clockwise,
/// so `-1`, `-2` and `-3` equal three, two and one clockwise turns. Zero
/// returns a copy.
pub fn rotate(grid: &PixelGrid, turns: i64, stop: &dyn Stop) -> Result<PixelGrid, BitmapError> {
    let mut out = grid.clone();
    for _ in 0..turns.rem_euclid(4) {
        out = rotate_90(&out, stop)?;
    }
    Ok(out)
}

/// Nearest-neighbor upscale by integer factors.
///
/// Output is `height * y_scale` rows of `width * x_scale` pixels, with
/// `out[i][j] = in[i / y_scale][j / x_scale]`. Both scales must be at least 1.
pub fn enlarge(
    grid: &PixelGrid,
    x_scale: u32,
    y_scale: u32,
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<PixelGrid, BitmapError> {
    if x_scale == 0 || y_scale == 0 {
        return Err(BitmapError::InvalidParameter(format!(
            "enlarge scales must be at least 1, got {x_scale}x{y_scale}"
        )));
    }
    let out_w = u64::from(grid.width()) * u64::from(x_scale);
    let out_h = u64::from(grid.height()) * u64::from(y_scale);
    if let Some(limits) = limits {
        limits.check(out_w, out_h)?;
    }
    let (Ok(out_w), Ok(out_h)) = (u32::try_from(out_w), u32::try_from(out_h)) else {
        return Err(BitmapError::DimensionsTooLarge {
            width: out_w,
            height: out_h,
        });
    };
    stop.check()?;

    // Build one widened source row, then repeat it y_scale times.
    let len = (out_w as usize)
        .checked_mul(out_h as usize)
        .and_then(|n| n.checked_mul(CHANNELS))
        .ok_or(BitmapError::DimensionsTooLarge {
            width: out_w.into(),
            height: out_h.into(),
        })?;
    let mut out = Vec::with_capacity(len);
    let mut wide = Vec::with_capacity(out_w as usize * CHANNELS);
    for (row_idx, row) in grid.rows().enumerate() {
        if row_idx % 16 == 0 {
            stop.check()?;
        }
        wide.clear();
        for px in row.chunks_exact(CHANNELS) {
            for _ in 0..x_scale {
                wide.extend_from_slice(px);
            }
        }
        for _ in 0..y_scale {
            out.extend_from_slice(&wide);
        }
    }
    PixelGrid::from_bgr(out, out_w, out_h)
}
