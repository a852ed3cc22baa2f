//! The transform catalog.
//!
//! Every transform borrows its input and returns a freshly allocated grid.
//! Channel arithmetic goes through [`crate::to_channel`]: results are
//! truncated toward zero and saturated to `0..=255`, never wrapped.

mod geometry;
mod tone;
mod vignette;

pub use geometry::{enlarge, rotate, rotate_90};
pub use tone::{clarendon, darken, grayscale, high_contrast, lighten, posterize};
pub use vignette::vignette;

use enough::Stop;

use crate::error::BitmapError;
use crate::grid::PixelGrid;
use crate::limits::Limits;

/// One entry of the transform catalog, with its typed parameters.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Transform {
    /// Darken toward the edges.
    Vignette,
    /// Brighten light pixels, darken dark ones.
    Clarendon,
    /// Average the three channels.
    Grayscale,
    /// One quarter turn clockwise.
    Rotate90,
    /// `turns` quarter turns clockwise (negative turns counter-clockwise).
    Rotate { turns: i64 },
    /// Nearest-neighbor upscale by integer factors.
    Enlarge { x_scale: u32, y_scale: u32 },
    /// Black or white only.
    HighContrast,
    /// Pull toward white; `factor` in `[0, 1]`, 1 = unchanged.
    Lighten { factor: f64 },
    /// Pull toward black; `factor` in `[0, 1]`, 1 = unchanged.
    Darken { factor: f64 },
    /// Black, white, red, green, and blue only.
    Posterize,
}

/// Numeric inputs collected for a menu selection.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TransformParams {
    pub turns: i64,
    pub x_scale: u32,
    pub y_scale: u32,
    pub factor: f64,
}

impl Transform {
    /// Every catalog entry, in menu order, with neutral parameters.
    pub const CATALOG: [Transform; 10] = [
        Transform::Vignette,
        Transform::Clarendon,
        Transform::Grayscale,
        Transform::Rotate90,
        Transform::Rotate { turns: 1 },
        Transform::Enlarge {
            x_scale: 1,
            y_scale: 1,
        },
        Transform::HighContrast,
        Transform::Lighten { factor: 1.0 },
        Transform::Darken { factor: 1.0 },
        Transform::Posterize,
    ];

    /// Position in the numbered menu, `1..=10`.
    pub fn menu_number(&self) -> u8 {
        match self {
            Self::Vignette => 1,
            Self::Clarendon => 2,
            Self::Grayscale => 3,
            Self::Rotate90 => 4,
            Self::Rotate { .. } => 5,
            Self::Enlarge { .. } => 6,
            Self::HighContrast => 7,
            Self::Lighten { .. } => 8,
            Self::Darken { .. } => 9,
            Self::Posterize => 10,
        }
    }

    /// Build the transform for a menu number. Parameters unused by the
    /// selection are ignored. Returns `None` outside `1..=10`.
    pub fn from_menu(number: u8, params: TransformParams) -> Option<Self> {
        Some(match number {
            1 => Self::Vignette,
            2 => Self::Clarendon,
            3 => Self::Grayscale,
            4 => Self::Rotate90,
            5 => Self::Rotate {
                turns: params.turns,
            },
            6 => Self::Enlarge {
                x_scale: params.x_scale,
                y_scale: params.y_scale,
            },
            7 => Self::HighContrast,
            8 => Self::Lighten {
                factor: params.factor,
            },
            9 => Self::Darken {
                factor: params.factor,
            },
            10 => Self::Posterize,
            _ => return None,
        })
    }

    /// Human-readable name as shown in the menu.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Vignette => "Vignette",
            Self::Clarendon => "Clarendon",
            Self::Grayscale => "Grayscale",
            Self::Rotate90 => "Rotate 90 degrees",
            Self::Rotate { .. } => "Rotate 90 degrees n times",
            Self::Enlarge { .. } => "Enlarge",
            Self::HighContrast => "High contrast",
            Self::Lighten { .. } => "Lighten",
            Self::Darken { .. } => "Darken",
            Self::Posterize => "Black, white, red, green, and blue only",
        }
    }

    /// Apply to `grid`, producing a new grid.
    pub fn apply(&self, grid: &PixelGrid, stop: impl Stop) -> Result<PixelGrid, BitmapError> {
        self.apply_with_limits(grid, None, stop)
    }

    /// Apply with output size limits (only size-changing transforms check them).
    pub fn apply_with_limits(
        &self,
        grid: &PixelGrid,
        limits: Option<&Limits>,
        stop: impl Stop,
    ) -> Result<PixelGrid, BitmapError> {
        self.apply_dyn(grid, limits, &stop)
    }

    pub(crate) fn apply_dyn(
        &self,
        grid: &PixelGrid,
        limits: Option<&Limits>,
        stop: &dyn Stop,
    ) -> Result<PixelGrid, BitmapError> {
        match *self {
            Self::Vignette => vignette(grid, stop),
            Self::Clarendon => clarendon(grid, stop),
            Self::Grayscale => grayscale(grid, stop),
            Self::Rotate90 => rotate_90(grid, stop),
            Self::Rotate { turns } => rotate(grid, turns, stop),
            Self::Enlarge { x_scale, y_scale } => enlarge(grid, x_scale, y_scale, limits, stop),
            Self::HighContrast => high_contrast(grid, stop),
            Self::Lighten { factor } => lighten(grid, factor, stop),
            Self::Darken { factor } => darken(grid, factor, stop),
            Self::Posterize => posterize(grid, stop),
        }
    }
}

impl core::fmt::Display for Transform {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Rotate { turns } => write!(f, "{} (n = {turns})", self.name()),
            Self::Enlarge { x_scale, y_scale } => {
                write!(f, "{} ({x_scale}x, {y_scale}y)", self.name())
            }
            Self::Lighten { factor } | Self::Darken { factor } => {
                write!(f, "{} (factor {factor})", self.name())
            }
            _ => f.write_str(self.name()),
        }
    }
}
