use enough::Stop;

use crate::error::BitmapError;
use crate::grid::{CHANNELS, PixelGrid, to_channel};

/// Darken pixels in proportion to their distance from the center.
///
/// The center is `(width / 2, height / 2)`, with the width halved exactly
/// and the height halved by integer division. Each channel is scaled by
/// `(height - distance) / height`; pixels farther than `height` from the
/// center would go negative and saturate to black.
pub fn vignette(grid: &PixelGrid, stop: &dyn Stop) -> Result<PixelGrid, BitmapError> {
    let height = f64::from(grid.height());
    let center_x = f64::from(grid.width()) / 2.0;
    let center_y = f64::from(grid.height() / 2);

    let mut data = Vec::with_capacity(grid.as_bytes().len());
    for (row_idx, row) in grid.rows().enumerate() {
        if row_idx % 16 == 0 {
            stop.check()?;
        }
        let dy = row_idx as f64 - center_y;
        for (col, px) in row.chunks_exact(CHANNELS).enumerate() {
            let dx = col as f64 - center_x;
            let distance = (dx * dx + dy * dy).sqrt();
            let factor = (height - distance) / height;
            data.extend(px.iter().map(|&c| to_channel(factor * f64::from(c))));
        }
    }
    PixelGrid::from_bgr(data, grid.width(), grid.height())
}
