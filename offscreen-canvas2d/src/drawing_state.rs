//! Drawing state that can be saved and restored.

use tiny_skia::Transform;

/// Drawing state that can be saved and restored.
#[derive(Debug, Clone)]
pub struct DrawingState {
    /// Current fill color.
    pub fill_style: tiny_skia::Color,
    /// Current global alpha.
    pub global_alpha: f32,
    /// Color of shadows drawn under shapes.
    pub shadow_color: tiny_skia::Color,
    /// Horizontal shadow offset in device pixels (not affected by the transform).
    pub shadow_offset_x: f64,
    /// Vertical shadow offset in device pixels (not affected by the transform).
    pub shadow_offset_y: f64,
    /// Shadow blur level; the Gaussian sigma is half of this value.
    pub shadow_blur: f64,
    /// Current transform matrix.
    pub transform: Transform,
}

impl DrawingState {
    /// Whether a shape drawn with this state casts a visible shadow.
    pub fn casts_shadow(&self) -> bool {
        self.shadow_color.alpha() > 0.0
            && (self.shadow_blur != 0.0 || self.shadow_offset_x != 0.0 || self.shadow_offset_y != 0.0)
    }
}

impl Default for DrawingState {
    fn default() -> Self {
        Self {
            fill_style: tiny_skia::Color::BLACK,
            global_alpha: 1.0,
            shadow_color: tiny_skia::Color::TRANSPARENT,
            shadow_offset_x: 0.0,
            shadow_offset_y: 0.0,
            shadow_blur: 0.0,
            transform: Transform::identity(),
        }
    }
}
