//! Transform operations for Canvas2dContext.

use super::Canvas2dContext;

impl Canvas2dContext {
    /// Translate the canvas.
    pub fn translate(&mut self, x: f32, y: f32) {
        log::debug!(target: "canvas", "translate {} {}", x, y);
        self.state.transform = self.state.transform.pre_translate(x, y);
    }

    /// Scale the canvas.
    pub fn scale(&mut self, x: f32, y: f32) {
        log::debug!(target: "canvas", "scale {} {}", x, y);
        self.state.transform = self.state.transform.pre_scale(x, y);
    }
}
