//! Error types for the raster backend.

use thiserror::Error;

/// Errors that can occur while rasterizing a display list or exporting pixels.
#[derive(Error, Debug)]
pub enum RasterError {
    /// The backing pixmap or clip mask could not be allocated (zero or huge size).
    #[error("cannot allocate a {0}x{1} raster target")]
    Allocation(u32, u32),

    /// A `PopClip`/`PopTransform` without a matching push.
    #[error("unbalanced {0} stack in display list")]
    Unbalanced(&'static str),

    /// PNG encoding or file IO failed.
    #[error("image export failed: {0}")]
    Image(#[from] image::ImageError),
}
