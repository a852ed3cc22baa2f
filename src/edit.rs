//! Single-image edit: read a BMP, apply one transform, write the result.

use std::path::PathBuf;

use enough::Stop;

use crate::bmp::BmpPermissiveness;
use crate::error::BitmapError;
use crate::limits::Limits;
use crate::transform::Transform;

/// A fully specified edit.
#[derive(Clone, Debug, PartialEq)]
pub struct EditRequest {
    pub input: PathBuf,
    pub output: PathBuf,
    pub transform: Transform,
    pub permissiveness: BmpPermissiveness,
}

/// What an edit did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EditReport {
    pub input_width: u32,
    pub input_height: u32,
    pub output_width: u32,
    pub output_height: u32,
    pub bytes_written: usize,
}

impl EditRequest {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>, transform: Transform) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            transform,
            permissiveness: BmpPermissiveness::default(),
        }
    }

    pub fn with_permissiveness(mut self, permissiveness: BmpPermissiveness) -> Self {
        self.permissiveness = permissiveness;
        self
    }

    /// Run without limits.
    pub fn run(&self, stop: impl Stop) -> Result<EditReport, BitmapError> {
        self.run_with_limits(None, stop)
    }

    /// Run with limits applied to both the decoded input and the
    /// transformed output. The output file is only created once the new
    /// image has been fully encoded.
    pub fn run_with_limits(
        &self,
        limits: Option<&Limits>,
        stop: impl Stop,
    ) -> Result<EditReport, BitmapError> {
        let stop: &dyn Stop = &stop;
        let data = std::fs::read(&self.input)?;
        let input = crate::bmp::decode_pixels(&data, self.permissiveness, limits, stop)?;
        let output = self.transform.apply_dyn(&input, limits, stop)?;
        let bytes = crate::bmp::encode_bmp(&output, stop)?;
        std::fs::write(&self.output, &bytes)?;
        Ok(EditReport {
            input_width: input.width(),
            input_height: input.height(),
            output_width: output.width(),
            output_height: output.height(),
            bytes_written: bytes.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::PixelGrid;
    use enough::Unstoppable;

    fn scratch(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("bmpfx-edit-{}-{name}", std::process::id()))
    }

    #[test]
    fn rotate_edit_writes_rotated_file() {
        let input = scratch("rot-in.bmp");
        let output = scratch("rot-out.bmp");
        let grid = PixelGrid::from_fn(3, 2, |r, c| [r as u8, c as u8, 9]).unwrap();
        crate::write_image(&input, &grid).unwrap();

        let report = EditRequest::new(&input, &output, Transform::Rotate90)
            .run(Unstoppable)
            .unwrap();
        assert_eq!((report.input_width, report.input_height), (3, 2));
        assert_eq!((report.output_width, report.output_height), (2, 3));
        // 2 pixels = 6 bytes + 2 padding, 3 rows
        assert_eq!(report.bytes_written, 54 + 8 * 3);

        let back = crate::read_image(&output).unwrap();
        assert_eq!(back, crate::transform::rotate_90(&grid, &Unstoppable).unwrap());

        let _ = std::fs::remove_file(&input);
        let _ = std::fs::remove_file(&output);
    }

    #[test]
    fn failed_decode_writes_nothing() {
        let input = scratch("bad-in.bmp");
        let output = scratch("bad-out.bmp");
        std::fs::write(&input, b"BM not really a bitmap, just some bytes").unwrap();
        let _ = std::fs::remove_file(&output);

        let err = EditRequest::new(&input, &output, Transform::Grayscale)
            .run(Unstoppable)
            .unwrap_err();
        assert!(matches!(err, BitmapError::NotTrueColor { .. }));
        assert!(!output.exists());

        let _ = std::fs::remove_file(&input);
    }

    #[test]
    fn invalid_parameter_writes_nothing() {
        let input = scratch("param-in.bmp");
        let output = scratch("param-out.bmp");
        crate::write_image(&input, &PixelGrid::new(2, 2).unwrap()).unwrap();
        let _ = std::fs::remove_file(&output);

        let err = EditRequest::new(&input, &output, Transform::Lighten { factor: 2.0 })
            .run(Unstoppable)
            .unwrap_err();
        assert!(matches!(err, BitmapError::InvalidParameter(_)));
        assert!(!output.exists());

        let _ = std::fs::remove_file(&input);
    }

    #[test]
    fn missing_input_is_io_error() {
        let err = EditRequest::new(
            scratch("does-not-exist.bmp"),
            scratch("unused.bmp"),
            Transform::Vignette,
        )
        .run(Unstoppable)
        .unwrap_err();
        assert!(matches!(err, BitmapError::Io(_)));
    }
}
