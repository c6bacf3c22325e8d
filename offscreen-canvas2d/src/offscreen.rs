//! Offscreen canvas owning at most one 2D rendering context.

use crate::context::{Canvas2dContext, MAX_DIMENSION};
use crate::error::{Canvas2dError, Canvas2dResult};
use std::sync::{Arc, Mutex, OnceLock};

/// Context kind accepted by [`OffscreenCanvas::get_context`].
pub const CONTEXT_2D: &str = "2d";

/// A 2D context shared between the canvas and its callers.
pub type SharedContext = Arc<Mutex<Canvas2dContext>>;

/// A canvas that is not attached to any document.
///
/// The 2D context is created on first request; every later request returns
/// the same instance.
#[derive(Debug)]
pub struct OffscreenCanvas {
    width: u32,
    height: u32,
    context: OnceLock<SharedContext>,
}

impl OffscreenCanvas {
    /// Create a canvas with the specified dimensions.
    pub fn new(width: u32, height: u32) -> Canvas2dResult<Self> {
        if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(Canvas2dError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            context: OnceLock::new(),
        })
    }

    /// Get canvas width.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get canvas height.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the rendering context of the given kind.
    pub fn get_context(&self, kind: &str) -> Canvas2dResult<SharedContext> {
        if kind != CONTEXT_2D {
            return Err(Canvas2dError::UnsupportedContext(kind.to_string()));
        }
        if let Some(ctx) = self.context.get() {
            return Ok(Arc::clone(ctx));
        }
        log::debug!(target: "canvas", "creating 2d context {}x{}", self.width, self.height);
        let created = Arc::new(Mutex::new(Canvas2dContext::new(self.width, self.height)?));
        Ok(Arc::clone(self.context.get_or_init(|| created)))
    }

    /// Read a single pixel as non-premultiplied RGBA.
    ///
    /// A canvas whose context was never requested is transparent black.
    pub fn read_pixel(&self, x: u32, y: u32) -> Canvas2dResult<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return Err(Canvas2dError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        match self.context.get() {
            Some(ctx) => ctx.lock().map_err(|_| Canvas2dError::Poisoned)?.get_pixel(x, y),
            None => Ok([0, 0, 0, 0]),
        }
    }

    /// Export the canvas to PNG data.
    pub fn to_png(&self) -> Canvas2dResult<Vec<u8>> {
        let ctx = self.get_context(CONTEXT_2D)?;
        let ctx = ctx.lock().map_err(|_| Canvas2dError::Poisoned)?;
        ctx.to_png()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RectParams;

    #[test]
    fn test_context_is_unique_per_canvas() {
        let canvas = OffscreenCanvas::new(100, 50).unwrap();
        let a = canvas.get_context("2d").unwrap();
        let b = canvas.get_context("2d").unwrap();
        assert!(Arc::ptr_eq(&a, &b));

        let other = OffscreenCanvas::new(100, 50).unwrap();
        let c = other.get_context("2d").unwrap();
        assert!(!Arc::ptr_eq(&a, &c));
    }

    #[test]
    fn test_unsupported_context() {
        let canvas = OffscreenCanvas::new(10, 10).unwrap();
        assert!(matches!(
            canvas.get_context("webgl"),
            Err(Canvas2dError::UnsupportedContext(kind)) if kind == "webgl"
        ));
    }

    #[test]
    fn test_read_pixel_before_and_after_drawing() {
        let canvas = OffscreenCanvas::new(10, 10).unwrap();
        assert_eq!(canvas.read_pixel(3, 3).unwrap(), [0, 0, 0, 0]);
        assert!(canvas.read_pixel(10, 3).is_err());

        let ctx = canvas.get_context(CONTEXT_2D).unwrap();
        {
            let mut ctx = ctx.lock().unwrap();
            ctx.set_fill_style("#0f0").unwrap();
            ctx.fill_rect(&RectParams {
                x: 0.0,
                y: 0.0,
                width: 10.0,
                height: 10.0,
            });
        }
        assert_eq!(canvas.read_pixel(3, 3).unwrap(), [0, 255, 0, 255]);
    }

    #[test]
    fn test_invalid_dimensions() {
        assert!(OffscreenCanvas::new(0, 50).is_err());
    }
}
