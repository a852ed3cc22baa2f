use enough::Stop;

use crate::bmp::{self, BmpPermissiveness};
use crate::error::BitmapError;
use crate::grid::PixelGrid;
use crate::limits::Limits;

/// Builder for decoding BMP bytes with optional limits and strictness.
///
/// ```
/// use bmpfx::{BmpPermissiveness, DecodeRequest, Limits, PixelGrid, Unstoppable};
///
/// let bytes = bmpfx::encode_bmp(&PixelGrid::new(4, 4)?, Unstoppable)?;
/// let limits = Limits { max_pixels: Some(1 << 20), ..Default::default() };
/// let grid = DecodeRequest::new(&bytes)
///     .with_limits(&limits)
///     .with_permissiveness(BmpPermissiveness::Strict)
///     .decode(Unstoppable)?;
/// assert_eq!((grid.width(), grid.height()), (4, 4));
/// # Ok::<(), bmpfx::BitmapError>(())
/// ```
#[derive(Clone, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
    permissiveness: BmpPermissiveness,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            limits: None,
            permissiveness: BmpPermissiveness::default(),
        }
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn with_permissiveness(mut self, permissiveness: BmpPermissiveness) -> Self {
        self.permissiveness = permissiveness;
        self
    }

    pub fn decode(self, stop: impl Stop) -> Result<PixelGrid, BitmapError> {
        bmp::decode_pixels(self.data, self.permissiveness, self.limits, &stop)
    }
}
