//! Canvas 2D rendering context implementation.

mod drawing;
mod image_ops;
mod transform;

use crate::color::{parse_color, serialize_color};
use crate::drawing_state::DrawingState;
use crate::error::{Canvas2dError, Canvas2dResult};
use tiny_skia::Pixmap;

/// Maximum canvas dimension (same as Chrome).
pub(crate) const MAX_DIMENSION: u32 = 32767;

/// Canvas 2D rendering context.
pub struct Canvas2dContext {
    /// Width of the canvas in pixels.
    pub(crate) width: u32,
    /// Height of the canvas in pixels.
    pub(crate) height: u32,
    /// Pixel buffer (premultiplied RGBA).
    pub(crate) pixmap: Pixmap,
    /// Current drawing state.
    pub(crate) state: DrawingState,
    /// Stack of saved drawing states.
    state_stack: Vec<DrawingState>,
}

impl std::fmt::Debug for Canvas2dContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas2dContext")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("state", &self.state)
            .field("saved_states", &self.state_stack.len())
            .finish()
    }
}

impl Canvas2dContext {
    /// Create a new Canvas2dContext with the specified dimensions.
    pub fn new(width: u32, height: u32) -> Canvas2dResult<Self> {
        // Validate dimensions
        if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(Canvas2dError::InvalidDimensions { width, height });
        }

        let pixmap =
            Pixmap::new(width, height).ok_or(Canvas2dError::InvalidDimensions { width, height })?;

        Ok(Self {
            width,
            height,
            pixmap,
            state: DrawingState::default(),
            state_stack: Vec::new(),
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

    /// The current drawing state.
    pub fn state(&self) -> &DrawingState {
        &self.state
    }

    /// Number of states currently saved on the stack.
    pub fn saved_state_count(&self) -> usize {
        self.state_stack.len()
    }

    /// Save the current drawing state.
    pub fn save(&mut self) {
        log::debug!(target: "canvas", "save");
        self.state_stack.push(self.state.clone());
    }

    /// Restore the previously saved drawing state.
    ///
    /// Does nothing when no state has been saved.
    pub fn restore(&mut self) {
        log::debug!(target: "canvas", "restore");
        if let Some(state) = self.state_stack.pop() {
            self.state = state;
        }
    }

    /// Reset the rendering context to its default state.
    ///
    /// This clears the canvas to transparent, resets all drawing state
    /// and empties the state stack.
    pub fn reset(&mut self) {
        log::debug!(target: "canvas", "reset");
        self.pixmap.fill(tiny_skia::Color::TRANSPARENT);
        self.state = DrawingState::default();
        self.state_stack.clear();
    }

    // --- Style setters ---

    /// Set the fill style from a CSS color string.
    ///
    /// Unparseable colors are rejected and leave the current style in place.
    pub fn set_fill_style(&mut self, style: &str) -> Canvas2dResult<()> {
        log::debug!(target: "canvas", "fillStyle {}", style);
        self.state.fill_style = parse_color(style)?;
        Ok(())
    }

    /// Get the fill style serialized as a CSS color.
    pub fn fill_style(&self) -> String {
        serialize_color(&self.state.fill_style)
    }

    /// Set the global alpha (opacity).
    /// Non-finite values and values outside [0.0, 1.0] are ignored.
    pub fn set_global_alpha(&mut self, alpha: f32) {
        if alpha.is_finite() && (0.0..=1.0).contains(&alpha) {
            self.state.global_alpha = alpha;
        }
    }

    /// Get the global alpha.
    pub fn global_alpha(&self) -> f32 {
        self.state.global_alpha
    }

    // --- Shadows ---

    /// Set the shadow color from a CSS color string.
    pub fn set_shadow_color(&mut self, color: &str) -> Canvas2dResult<()> {
        log::debug!(target: "canvas", "shadowColor {}", color);
        self.state.shadow_color = parse_color(color)?;
        Ok(())
    }

    /// Get the shadow color serialized as a CSS color.
    pub fn shadow_color(&self) -> String {
        serialize_color(&self.state.shadow_color)
    }

    /// Set the horizontal shadow offset.
    /// Non-finite values are ignored.
    pub fn set_shadow_offset_x(&mut self, offset: f64) {
        if offset.is_finite() {
            self.state.shadow_offset_x = offset;
        }
    }

    /// Get the horizontal shadow offset.
    pub fn shadow_offset_x(&self) -> f64 {
        self.state.shadow_offset_x
    }

    /// Set the vertical shadow offset.
    /// Non-finite values are ignored.
    pub fn set_shadow_offset_y(&mut self, offset: f64) {
        if offset.is_finite() {
            self.state.shadow_offset_y = offset;
        }
    }

    /// Get the vertical shadow offset.
    pub fn shadow_offset_y(&self) -> f64 {
        self.state.shadow_offset_y
    }

    /// Set the shadow blur level.
    /// Non-finite and negative values are ignored.
    pub fn set_shadow_blur(&mut self, blur: f64) {
        if blur.is_finite() && blur >= 0.0 {
            self.state.shadow_blur = blur;
        }
    }

    /// Get the shadow blur level.
    pub fn shadow_blur(&self) -> f64 {
        self.state.shadow_blur
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::RectParams;

    #[test]
    fn test_new_context_defaults() {
        let ctx = Canvas2dContext::new(200, 150).unwrap();
        assert_eq!(ctx.width(), 200);
        assert_eq!(ctx.height(), 150);
        assert_eq!(ctx.fill_style(), "#000000");
        assert_eq!(ctx.global_alpha(), 1.0);
        assert_eq!(ctx.shadow_color(), "rgba(0, 0, 0, 0)");
        assert_eq!(ctx.shadow_offset_x(), 0.0);
        assert_eq!(ctx.shadow_offset_y(), 0.0);
        assert_eq!(ctx.shadow_blur(), 0.0);
        assert_eq!(ctx.saved_state_count(), 0);
        // Canvas should be fully transparent
        assert!(ctx.pixmap.data().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_invalid_dimensions() {
        assert!(matches!(
            Canvas2dContext::new(0, 100),
            Err(Canvas2dError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            Canvas2dContext::new(100, 0),
            Err(Canvas2dError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            Canvas2dContext::new(MAX_DIMENSION + 1, 10),
            Err(Canvas2dError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_shadow_blur_ignore_invalid() {
        let mut ctx = Canvas2dContext::new(100, 100).unwrap();
        ctx.set_shadow_blur(5.0);
        assert_eq!(ctx.shadow_blur(), 5.0);

        // Negative values are ignored (value preserved)
        ctx.set_shadow_blur(-1.0);
        assert_eq!(ctx.shadow_blur(), 5.0);

        // Non-finite values are ignored
        ctx.set_shadow_blur(f64::NAN);
        assert_eq!(ctx.shadow_blur(), 5.0);
        ctx.set_shadow_blur(f64::INFINITY);
        assert_eq!(ctx.shadow_blur(), 5.0);

        // Zero is valid
        ctx.set_shadow_blur(0.0);
        assert_eq!(ctx.shadow_blur(), 0.0);
    }

    #[test]
    fn test_shadow_offset_ignore_non_finite() {
        let mut ctx = Canvas2dContext::new(100, 100).unwrap();
        ctx.set_shadow_offset_x(-3.5);
        ctx.set_shadow_offset_y(50.0);

        ctx.set_shadow_offset_x(f64::NAN);
        ctx.set_shadow_offset_y(f64::NEG_INFINITY);
        assert_eq!(ctx.shadow_offset_x(), -3.5);
        assert_eq!(ctx.shadow_offset_y(), 50.0);
    }

    #[test]
    fn test_invalid_color_preserves_style() {
        let mut ctx = Canvas2dContext::new(100, 100).unwrap();
        ctx.set_fill_style("#0f0").unwrap();
        assert!(ctx.set_fill_style("bogus").is_err());
        assert_eq!(ctx.fill_style(), "#00ff00");

        ctx.set_shadow_color("rgba(255, 0, 0, 0.01)").unwrap();
        assert!(ctx.set_shadow_color("").is_err());
        assert_eq!(ctx.shadow_color(), "rgba(255, 0, 0, 0.01)");
    }

    #[test]
    fn test_global_alpha_ignore_invalid() {
        let mut ctx = Canvas2dContext::new(100, 100).unwrap();
        ctx.set_global_alpha(0.5);
        assert_eq!(ctx.global_alpha(), 0.5);

        // Out-of-range values are ignored (not clamped)
        ctx.set_global_alpha(2.0);
        assert_eq!(ctx.global_alpha(), 0.5);
        ctx.set_global_alpha(f32::NAN);
        assert_eq!(ctx.global_alpha(), 0.5);
    }

    #[test]
    fn test_save_restore_shadow_state() {
        let mut ctx = Canvas2dContext::new(100, 100).unwrap();

        ctx.set_shadow_blur(5.0);
        ctx.set_shadow_offset_x(2.0);
        ctx.set_shadow_color("#f00").unwrap();
        ctx.save();

        // save() itself leaves every value untouched
        assert_eq!(ctx.shadow_blur(), 5.0);
        assert_eq!(ctx.shadow_offset_x(), 2.0);
        assert_eq!(ctx.shadow_color(), "#ff0000");

        ctx.set_shadow_blur(10.0);
        ctx.set_shadow_offset_x(-7.0);
        ctx.set_shadow_color("rgba(0, 0, 255, 0.5)").unwrap();

        ctx.restore();

        assert_eq!(ctx.shadow_blur(), 5.0);
        assert_eq!(ctx.shadow_offset_x(), 2.0);
        assert_eq!(ctx.shadow_color(), "#ff0000");
    }

    #[test]
    fn test_restore_without_save_is_noop() {
        let mut ctx = Canvas2dContext::new(100, 100).unwrap();
        ctx.set_shadow_blur(3.0);
        ctx.restore();
        assert_eq!(ctx.shadow_blur(), 3.0);
    }

    #[test]
    fn test_reset() {
        let mut ctx = Canvas2dContext::new(100, 100).unwrap();

        ctx.set_fill_style("#ff0000").unwrap();
        ctx.set_shadow_blur(4.0);
        ctx.translate(10.0, 10.0);
        ctx.save();
        ctx.fill_rect(&RectParams {
            x: 0.0,
            y: 0.0,
            width: 100.0,
            height: 100.0,
        });
        assert!(ctx.pixmap.data().iter().any(|&b| b != 0));

        ctx.reset();

        // Canvas should be clear
        assert!(ctx.pixmap.data().iter().all(|&b| b == 0));
        assert_eq!(ctx.saved_state_count(), 0);
        assert_eq!(ctx.fill_style(), "#000000");
        assert_eq!(ctx.shadow_blur(), 0.0);
        assert!(ctx.state().transform.is_identity());
    }
}
