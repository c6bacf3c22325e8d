//! Canvas host backed by the `offscreen-canvas2d` software renderer.

use super::{CanvasHost, HostError, HostResult, RenderingContext2d, Rgba, Surface};
use offscreen_canvas2d::{Canvas2dContext, Canvas2dError, OffscreenCanvas, RectParams};
use std::sync::{Arc, Mutex};

/// Host that creates [`OffscreenCanvas`] surfaces.
#[derive(Debug, Clone, Copy, Default)]
pub struct SoftwareHost;

impl CanvasHost for SoftwareHost {
    fn name(&self) -> &str {
        "offscreen-canvas2d"
    }

    fn create_surface(&self, width: u32, height: u32) -> HostResult<Arc<dyn Surface>> {
        Ok(Arc::new(OffscreenCanvas::new(width, height)?))
    }
}

impl From<Canvas2dError> for HostError {
    fn from(err: Canvas2dError) -> Self {
        match err {
            Canvas2dError::InvalidDimensions { width, height } => {
                HostError::InvalidDimensions { width, height }
            }
            Canvas2dError::UnsupportedContext(kind) => HostError::UnsupportedContext(kind),
            Canvas2dError::ColorParseError(msg) => HostError::InvalidColor(msg),
            Canvas2dError::OutOfBounds { x, y, .. } => HostError::OutOfBounds { x, y },
            other => HostError::Backend(other.to_string()),
        }
    }
}

impl Surface for OffscreenCanvas {
    fn width(&self) -> u32 {
        OffscreenCanvas::width(self)
    }

    fn height(&self) -> u32 {
        OffscreenCanvas::height(self)
    }

    fn get_context(&self, kind: &str) -> HostResult<Arc<dyn RenderingContext2d>> {
        // The canvas hands out one shared context, so identity carries over.
        let ctx = OffscreenCanvas::get_context(self, kind)?;
        Ok(ctx)
    }

    fn read_pixel(&self, x: u32, y: u32) -> HostResult<Rgba> {
        Ok(OffscreenCanvas::read_pixel(self, x, y)?.into())
    }

    fn snapshot_png(&self) -> HostResult<Vec<u8>> {
        Ok(OffscreenCanvas::to_png(self)?)
    }
}

fn with_context<R>(
    ctx: &Mutex<Canvas2dContext>,
    f: impl FnOnce(&mut Canvas2dContext) -> R,
) -> HostResult<R> {
    let mut guard = ctx.lock().map_err(|_| HostError::from(Canvas2dError::Poisoned))?;
    Ok(f(&mut guard))
}

impl RenderingContext2d for Mutex<Canvas2dContext> {
    fn fill_rect(&self, x: f64, y: f64, width: f64, height: f64) -> HostResult<()> {
        let params = RectParams {
            x: x as f32,
            y: y as f32,
            width: width as f32,
            height: height as f32,
        };
        with_context(self, |ctx| ctx.fill_rect(&params))
    }

    fn set_fill_style(&self, css_color: &str) -> HostResult<()> {
        Ok(with_context(self, |ctx| ctx.set_fill_style(css_color))??)
    }

    fn fill_style(&self) -> HostResult<String> {
        with_context(self, |ctx| ctx.fill_style())
    }

    fn set_shadow_color(&self, css_color: &str) -> HostResult<()> {
        Ok(with_context(self, |ctx| ctx.set_shadow_color(css_color))??)
    }

    fn shadow_color(&self) -> HostResult<String> {
        with_context(self, |ctx| ctx.shadow_color())
    }

    fn set_shadow_offset_x(&self, offset: f64) -> HostResult<()> {
        with_context(self, |ctx| ctx.set_shadow_offset_x(offset))
    }

    fn shadow_offset_x(&self) -> HostResult<f64> {
        with_context(self, |ctx| ctx.shadow_offset_x())
    }

    fn set_shadow_offset_y(&self, offset: f64) -> HostResult<()> {
        with_context(self, |ctx| ctx.set_shadow_offset_y(offset))
    }

    fn shadow_offset_y(&self) -> HostResult<f64> {
        with_context(self, |ctx| ctx.shadow_offset_y())
    }

    fn set_shadow_blur(&self, blur: f64) -> HostResult<()> {
        with_context(self, |ctx| ctx.set_shadow_blur(blur))
    }

    fn shadow_blur(&self) -> HostResult<f64> {
        with_context(self, |ctx| ctx.shadow_blur())
    }

    fn save(&self) -> HostResult<()> {
        with_context(self, |ctx| ctx.save())
    }

    fn restore(&self) -> HostResult<()> {
        with_context(self, |ctx| ctx.restore())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::CONTEXT_2D;

    #[test]
    fn test_context_identity_survives_trait_objects() {
        let surface = SoftwareHost.create_surface(100, 50).unwrap();
        let a = surface.get_context(CONTEXT_2D).unwrap();
        let b = surface.get_context(CONTEXT_2D).unwrap();
        assert!(std::ptr::addr_eq(Arc::as_ptr(&a), Arc::as_ptr(&b)));
    }

    #[test]
    fn test_errors_map_to_host_errors() {
        assert_eq!(
            SoftwareHost.create_surface(0, 10).err(),
            Some(HostError::InvalidDimensions {
                width: 0,
                height: 10
            })
        );

        let surface = SoftwareHost.create_surface(10, 10).unwrap();
        assert!(matches!(
            surface.get_context("bitmaprenderer").err(),
            Some(HostError::UnsupportedContext(_))
        ));
        assert_eq!(
            surface.read_pixel(10, 0).err(),
            Some(HostError::OutOfBounds { x: 10, y: 0 })
        );

        let ctx = surface.get_context(CONTEXT_2D).unwrap();
        assert!(matches!(
            ctx.set_shadow_color("nope"),
            Err(HostError::InvalidColor(_))
        ));
    }

    #[test]
    fn test_drawing_through_the_adapter() {
        let surface = SoftwareHost.create_surface(20, 20).unwrap();
        let ctx = surface.get_context(CONTEXT_2D).unwrap();
        ctx.set_fill_style("#0f0").unwrap();
        ctx.fill_rect(0.0, 0.0, 20.0, 20.0).unwrap();
        assert_eq!(surface.read_pixel(10, 10).unwrap(), Rgba::new(0, 255, 0, 255));
        assert_eq!(ctx.fill_style().unwrap(), "#00ff00");
    }
}
