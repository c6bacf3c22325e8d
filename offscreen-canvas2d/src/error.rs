//! Error types for offscreen-canvas2d.

use thiserror::Error;

/// Result type alias using Canvas2dError.
pub type Canvas2dResult<T> = Result<T, Canvas2dError>;

/// Errors that can occur in canvas operations.
#[derive(Debug, Error)]
pub enum Canvas2dError {
    /// Invalid canvas dimensions (must be positive and within limits).
    #[error("Invalid dimensions: width={width}, height={height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// Failed to parse color value.
    #[error("Failed to parse color: {0}")]
    ColorParseError(String),

    /// The requested rendering context kind is not provided by this canvas.
    #[error("Unsupported context type: {0:?}")]
    UnsupportedContext(String),

    /// Pixel coordinates outside of the canvas.
    #[error("Pixel ({x}, {y}) is outside of the {width}x{height} canvas")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    /// The shared context lock was poisoned by a panic while held.
    #[error("Canvas context lock poisoned")]
    Poisoned,

    /// PNG encoding error.
    #[error("PNG encoding error: {0}")]
    PngError(String),
}

impl From<png::EncodingError> for Canvas2dError {
    fn from(err: png::EncodingError) -> Self {
        Canvas2dError::PngError(err.to_string())
    }
}
