//! Software `OffscreenCanvas` with a Canvas 2D rendering context.
//!
//! This crate provides an offscreen canvas that can be driven without a
//! browser or JavaScript runtime. Rasterization and compositing are done by
//! `tiny-skia`; the crate itself owns the drawing state (fill style, global
//! alpha, shadow parameters), the save/restore stack, CSS color handling and
//! pixel readback.
//!
//! # Example
//!
//! ```rust,ignore
//! use offscreen_canvas2d::{OffscreenCanvas, RectParams};
//!
//! let canvas = OffscreenCanvas::new(100, 50)?;
//! let ctx = canvas.get_context("2d")?;
//! let mut ctx = ctx.lock().unwrap();
//! ctx.set_fill_style("#0f0")?;
//! ctx.fill_rect(&RectParams { x: 0.0, y: 0.0, width: 100.0, height: 50.0 });
//! let png_data = ctx.to_png()?;
//! ```

mod color;
mod context;
mod drawing_state;
mod error;
mod geometry;
mod offscreen;
mod shadow;

// Re-export public API
pub use color::{parse_color, serialize_color};
pub use context::Canvas2dContext;
pub use drawing_state::DrawingState;
pub use error::{Canvas2dError, Canvas2dResult};
pub use geometry::RectParams;
pub use offscreen::{OffscreenCanvas, SharedContext, CONTEXT_2D};
