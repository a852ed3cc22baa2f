use bmpfx::{Transform, TransformParams};
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "bmpfx",
    version,
    about = "Apply a pixel transform to a 24-bit BMP image",
    long_about = "
Reads an uncompressed 24-bit BMP, applies one transform, and writes the
result as a new 24-bit BMP.

Example Usage:
  # Grayscale copy
  bmpfx grayscale photo.bmp gray.bmp

  # Rotate three quarter turns clockwise
  bmpfx rotate --turns 3 photo.bmp rotated.bmp

  # Double the width, triple the height
  bmpfx enlarge --x-scale 2 --y-scale 3 photo.bmp big.bmp

  # Same transform picked by its menu number
  bmpfx run 6 -x 2 -y 3 photo.bmp big.bmp

  # Inspect a header without decoding
  bmpfx info photo.bmp
"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Print extra detail about each step
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Reject files that are not well-formed 24-bit BMPs (magic, bpp, compression)
    #[arg(long, global = true)]
    pub strict: bool,

    /// Refuse images (input or output) with more than this many pixels
    #[arg(long, global = true, value_name = "PIXELS")]
    pub max_pixels: Option<u64>,
}

/// Input and output paths shared by every transform.
#[derive(ClapArgs, Debug, Clone)]
pub struct Files {
    /// Source BMP file
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Destination BMP file (overwritten)
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Darken toward the edges
    Vignette(Files),
    /// Brighten light areas and darken dark ones
    Clarendon(Files),
    /// Average the color channels
    Grayscale(Files),
    /// Rotate one quarter turn clockwise
    #[command(name = "rotate90")]
    Rotate90(Files),
    /// Rotate a number of quarter turns clockwise
    Rotate {
        /// Quarter turns; negative values turn counter-clockwise
        #[arg(short = 'n', long, allow_negative_numbers = true)]
        turns: i64,
        #[command(flatten)]
        files: Files,
    },
    /// Nearest-neighbor enlarge by integer factors
    Enlarge {
        /// Horizontal scale (at least 1)
        #[arg(short = 'x', long, value_parser = clap::value_parser!(u32).range(1..))]
        x_scale: u32,
        /// Vertical scale (at least 1)
        #[arg(short = 'y', long, value_parser = clap::value_parser!(u32).range(1..))]
        y_scale: u32,
        #[command(flatten)]
        files: Files,
    },
    /// Black and white only
    HighContrast(Files),
    /// Pull colors toward white
    Lighten {
        /// Scaling factor between 0 and 1 (1 leaves the image unchanged)
        #[arg(short, long)]
        factor: f64,
        #[command(flatten)]
        files: Files,
    },
    /// Pull colors toward black
    Darken {
        /// Scaling factor between 0 and 1 (1 leaves the image unchanged)
        #[arg(short, long)]
        factor: f64,
        #[command(flatten)]
        files: Files,
    },
    /// Black, white, red, green, and blue only
    Posterize(Files),
    /// Apply a transform by its menu number (see `list`)
    Run {
        /// Menu number, 1 to 10
        #[arg(value_parser = clap::value_parser!(u8).range(1..=10))]
        number: u8,
        /// Quarter turns for menu entry 5
        #[arg(short = 'n', long, default_value_t = 1, allow_negative_numbers = true)]
        turns: i64,
        /// Horizontal scale for menu entry 6
        #[arg(short = 'x', long, default_value_t = 1)]
        x_scale: u32,
        /// Vertical scale for menu entry 6
        #[arg(short = 'y', long, default_value_t = 1)]
        y_scale: u32,
        /// Factor for menu entries 8 and 9
        #[arg(short, long, default_value_t = 1.0)]
        factor: f64,
        #[command(flatten)]
        files: Files,
    },
    /// Print the header fields of a BMP file
    Info {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// List the transform catalog with menu numbers
    List,
}

impl Command {
    /// The transform and file pair for transform subcommands.
    pub fn edit(&self) -> Option<(Transform, &Files)> {
        Some(match self {
            Command::Vignette(files) => (Transform::Vignette, files),
            Command::Clarendon(files) => (Transform::Clarendon, files),
            Command::Grayscale(files) => (Transform::Grayscale, files),
            Command::Rotate90(files) => (Transform::Rotate90, files),
            Command::Rotate { turns, files } => (Transform::Rotate { turns: *turns }, files),
            Command::Enlarge {
                x_scale,
                y_scale,
                files,
            } => (
                Transform::Enlarge {
                    x_scale: *x_scale,
                    y_scale: *y_scale,
                },
                files,
            ),
            Command::HighContrast(files) => (Transform::HighContrast, files),
            Command::Lighten { factor, files } => (Transform::Lighten { factor: *factor }, files),
            Command::Darken { factor, files } => (Transform::Darken { factor: *factor }, files),
            Command::Posterize(files) => (Transform::Posterize, files),
            Command::Run {
                number,
                turns,
                x_scale,
                y_scale,
                factor,
                files,
            } => {
                let params = TransformParams {
                    turns: *turns,
                    x_scale: *x_scale,
                    y_scale: *y_scale,
                    factor: *factor,
                };
                (Transform::from_menu(*number, params)?, files)
            }
            Command::Info { .. } | Command::List => return None,
        })
    }
}
