//! # bmpfx
//!
//! Uncompressed 24-bit BMP decoder and encoder, plus a small catalog of
//! pixel transforms that map one [`PixelGrid`] to a new one.
//!
//! ## Pixel grid
//!
//! Decoded images are a flat, row-major buffer of `[blue, green, red]`
//! pixels. Row 0 is the first scanline stored in the file, which for a
//! bottom-up BMP is the visually bottom row. The encoder writes row 0
//! first, so decode → encode round trips are lossless and keep orientation.
//!
//! ## Transforms
//!
//! Vignette, Clarendon, grayscale, quarter-turn rotation, nearest-neighbor
//! enlarge, high contrast, lighten, darken, and a five-color posterize.
//! See [`transform`] and the [`Transform`] enum.
//!
//! Channel arithmetic is truncated toward zero and saturated to
//! `0..=255` (see [`to_channel`]), uniformly across all transforms.
//!
//! ## Non-Goals
//!
//! - Compressed, palette, or alpha BMP variants
//! - Any other image format
//! - Streaming images larger than memory
//!
//! ## Usage
//!
//! ```no_run
//! use bmpfx::{Transform, Unstoppable};
//!
//! let image = bmpfx::read_image("in.bmp")?;
//! let gray = Transform::Grayscale.apply(&image, Unstoppable)?;
//! bmpfx::write_image("out.bmp", &gray)?;
//! # Ok::<(), bmpfx::BitmapError>(())
//! ```

#![forbid(unsafe_code)]

mod error;
mod grid;
mod limits;

pub mod bmp;
pub mod edit;
pub mod transform;

mod decode;

#[cfg(test)]
mod test_util;

use std::path::Path;

// Re-exports
pub use bmp::{BmpInfo, BmpPermissiveness};
pub use decode::DecodeRequest;
pub use edit::{EditReport, EditRequest};
pub use enough::{Stop, Unstoppable};
pub use error::BitmapError;
pub use grid::{BLACK, Bgr, CHANNELS, PixelGrid, WHITE, to_channel};
pub use limits::Limits;
pub use transform::{Transform, TransformParams};

/// Decode BMP bytes with default settings.
pub fn decode_bmp(data: &[u8], stop: impl Stop) -> Result<PixelGrid, BitmapError> {
    DecodeRequest::new(data).decode(stop)
}

/// Encode a grid as a 24-bit BMP.
pub fn encode_bmp(grid: &PixelGrid, stop: impl Stop) -> Result<Vec<u8>, BitmapError> {
    bmp::encode_bmp(grid, &stop)
}

/// Read and decode a BMP file.
///
/// Fails with [`BitmapError::NotTrueColor`] when the header's file size
/// disagrees with the dimensions; no grid is produced in that case.
pub fn read_image(path: impl AsRef<Path>) -> Result<PixelGrid, BitmapError> {
    let data = std::fs::read(path)?;
    decode_bmp(&data, Unstoppable)
}

/// Encode `grid` and write it to `path`.
///
/// The file is only opened after encoding succeeds, so an error before
/// that point leaves no file behind.
pub fn write_image(path: impl AsRef<Path>, grid: &PixelGrid) -> Result<(), BitmapError> {
    let bytes = encode_bmp(grid, Unstoppable)?;
    std::fs::write(path, bytes)?;
    Ok(())
}
