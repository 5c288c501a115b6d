//! Typed errors for the resize pipeline and for pre-flight validation.
//!
//! Per-image failures are reported through [`ResizeError`] and contained by the
//! batch processor; [`ValidationError`] rejects a run before any work starts.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResizeError {
    #[error("Invalid calculated dimensions for resizing: {width}x{height}")]
    InvalidGeometry { width: i64, height: i64 },

    #[error("Crop ({x},{y},{width}x{height}) exceeds {image_width}x{image_height} image")]
    CropOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        image_width: u32,
        image_height: u32,
    },

    #[error("Resampling failed: {0}")]
    Resample(String),

    #[error("Failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to write {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ResizeError {
    pub fn resample<E: std::fmt::Display>(e: E) -> Self {
        ResizeError::Resample(e.to_string())
    }

    /// True for failures caused by the geometry of the crop or target rather
    /// than by the file itself.
    pub fn is_degenerate(&self) -> bool {
        matches!(self, ResizeError::InvalidGeometry { .. })
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please select an input directory")]
    MissingInputDir,

    #[error("Please select an output directory")]
    MissingOutputDir,

    #[error("Invalid template size format '{0}'. Use width,height")]
    MalformedSize(String),

    #[error("Width and height must be greater than 0, got {width},{height}")]
    ZeroSize { width: u32, height: u32 },
}
