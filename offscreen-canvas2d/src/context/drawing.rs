//! Fill and clear operations for Canvas2dContext.

use super::Canvas2dContext;
use crate::geometry::RectParams;
use crate::shadow::draw_shadow;
use tiny_skia::Transform;

impl Canvas2dContext {
    /// Fill a rectangle with the current fill style.
    ///
    /// Non-finite arguments make the call a no-op.
    pub fn fill_rect(&mut self, params: &RectParams) {
        log::debug!(target: "canvas", "fillRect {} {} {} {}", params.x, params.y, params.width, params.height);
        if !params.is_finite() {
            return;
        }
        if let Some(path) = params.to_path(&self.state.transform) {
            self.fill_device_path(&path);
        }
    }

    /// Clear a rectangle (set pixels to transparent).
    pub fn clear_rect(&mut self, params: &RectParams) {
        log::debug!(target: "canvas", "clearRect {} {} {} {}", params.x, params.y, params.width, params.height);
        if !params.is_finite() {
            return;
        }
        if let Some(path) = params.to_path(&self.state.transform) {
            let paint = tiny_skia::Paint {
                blend_mode: tiny_skia::BlendMode::Clear,
                ..Default::default()
            };
            self.pixmap.fill_path(
                &path,
                &paint,
                tiny_skia::FillRule::Winding,
                Transform::identity(),
                None,
            );
        }
    }

    /// Fill a path that is already in device space, shadow first.
    pub(crate) fn fill_device_path(&mut self, path: &tiny_skia::Path) {
        if self.state.casts_shadow() {
            draw_shadow(&mut self.pixmap, path, &self.state);
        }
        let paint = self.fill_paint();
        self.pixmap.fill_path(
            path,
            &paint,
            tiny_skia::FillRule::Winding,
            Transform::identity(),
            None,
        );
    }

    pub(crate) fn fill_paint(&self) -> tiny_skia::Paint<'static> {
        let mut color = self.state.fill_style;
        // Apply global alpha
        if self.state.global_alpha < 1.0 {
            color.set_alpha((color.alpha() * self.state.global_alpha).clamp(0.0, 1.0));
        }
        let mut paint = tiny_skia::Paint {
            anti_alias: true,
            ..Default::default()
        };
        paint.set_color(color);
        paint
    }
}

#[cfg(test)]
mod tests {
    use crate::{Canvas2dContext, RectParams};

    fn full(width: f32, height: f32) -> RectParams {
        RectParams {
            x: 0.0,
            y: 0.0,
            width,
            height,
        }
    }

    #[test]
    fn test_fill_rect_pixels() {
        let mut ctx = Canvas2dContext::new(100, 100).unwrap();
        ctx.set_fill_style("#ff0000").unwrap();
        ctx.fill_rect(&RectParams {
            x: 10.0,
            y: 10.0,
            width: 50.0,
            height: 50.0,
        });

        assert_eq!(ctx.get_pixel(30, 30).unwrap(), [255, 0, 0, 255]);
        // Outside the rect: transparent
        assert_eq!(ctx.get_pixel(5, 5).unwrap(), [0, 0, 0, 0]);
    }

    #[test]
    fn test_fill_rect_ignores_non_finite() {
        let mut ctx = Canvas2dContext::new(10, 10).unwrap();
        ctx.fill_rect(&RectParams {
            x: f32::NAN,
            ..full(10.0, 10.0)
        });
        assert_eq!(ctx.get_pixel(5, 5).unwrap(), [0, 0, 0, 0]);
    }

    #[test]
    fn test_fill_rect_with_transform() {
        let mut ctx = Canvas2dContext::new(100, 100).unwrap();
        ctx.translate(50.0, 50.0);
        ctx.fill_rect(&full(10.0, 10.0));
        assert_eq!(ctx.get_pixel(55, 55).unwrap(), [0, 0, 0, 255]);
        assert_eq!(ctx.get_pixel(5, 5).unwrap(), [0, 0, 0, 0]);
    }

    #[test]
    fn test_shadow_offset_lands_on_canvas() {
        let mut ctx = Canvas2dContext::new(100, 50).unwrap();
        ctx.set_shadow_color("#00f").unwrap();
        ctx.set_shadow_offset_y(50.0);
        ctx.set_fill_style("#f00").unwrap();
        // Shape is entirely above the canvas; only its shadow is visible
        ctx.fill_rect(&RectParams {
            x: 0.0,
            y: -50.0,
            width: 100.0,
            height: 50.0,
        });
        assert_eq!(ctx.get_pixel(50, 25).unwrap(), [0, 0, 255, 255]);
    }

    #[test]
    fn test_shadow_alpha_is_used() {
        let mut ctx = Canvas2dContext::new(100, 50).unwrap();
        ctx.set_fill_style("#0f0").unwrap();
        ctx.fill_rect(&full(100.0, 50.0));
        ctx.set_shadow_color("rgba(255, 0, 0, 0.01)").unwrap();
        ctx.set_shadow_offset_y(50.0);
        ctx.fill_rect(&RectParams {
            x: 0.0,
            y: -50.0,
            width: 100.0,
            height: 50.0,
        });

        let [r, g, b, a] = ctx.get_pixel(50, 25).unwrap();
        assert!(r <= 4, "red channel {}", r);
        assert!(g >= 251, "green channel {}", g);
        assert_eq!((b, a), (0, 255));
    }

    #[test]
    fn test_shadow_offset_ignores_transform() {
        let mut ctx = Canvas2dContext::new(100, 100).unwrap();
        ctx.scale(2.0, 2.0);
        ctx.set_shadow_color("#00f").unwrap();
        ctx.set_shadow_offset_x(30.0);
        ctx.fill_rect(&full(10.0, 10.0));
        // Shape covers 0..20 in device space; shadow covers 30..50, not 60..80
        assert_eq!(ctx.get_pixel(40, 10).unwrap(), [0, 0, 255, 255]);
        assert_eq!(ctx.get_pixel(70, 10).unwrap(), [0, 0, 0, 0]);
    }

    #[test]
    fn test_blurred_shadow_is_soft() {
        let mut ctx = Canvas2dContext::new(100, 100).unwrap();
        ctx.set_shadow_color("#000").unwrap();
        ctx.set_shadow_blur(10.0);
        ctx.set_fill_style("rgba(0, 0, 0, 0)").unwrap();
        ctx.fill_rect(&RectParams {
            x: 30.0,
            y: 30.0,
            width: 40.0,
            height: 40.0,
        });

        let center = ctx.get_pixel(50, 50).unwrap()[3];
        let edge = ctx.get_pixel(30, 50).unwrap()[3];
        let outside = ctx.get_pixel(26, 50).unwrap()[3];
        assert!(center > edge);
        assert!(edge > outside);
        assert!(outside > 0);
        assert_eq!(ctx.get_pixel(0, 0).unwrap()[3], 0);
    }

    #[test]
    fn test_huge_shadow_blur_still_draws_shape() {
        let mut ctx = Canvas2dContext::new(10, 10).unwrap();
        ctx.set_shadow_color("#000").unwrap();
        ctx.set_shadow_blur(3.0e9);
        ctx.fill_rect(&full(10.0, 10.0));
        assert_eq!(ctx.get_pixel(5, 5).unwrap(), [0, 0, 0, 255]);

        ctx.set_shadow_blur(f64::MAX);
        ctx.set_fill_style("#0f0").unwrap();
        ctx.fill_rect(&full(10.0, 10.0));
        assert_eq!(ctx.get_pixel(5, 5).unwrap(), [0, 255, 0, 255]);
    }

    #[test]
    fn test_clear_rect() {
        let mut ctx = Canvas2dContext::new(20, 20).unwrap();
        ctx.fill_rect(&full(20.0, 20.0));
        ctx.clear_rect(&full(10.0, 20.0));
        assert_eq!(ctx.get_pixel(5, 5).unwrap(), [0, 0, 0, 0]);
        assert_eq!(ctx.get_pixel(15, 5).unwrap(), [0, 0, 0, 255]);
    }
}
