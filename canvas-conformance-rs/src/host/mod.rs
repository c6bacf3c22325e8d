//! The canvas host seam.
//!
//! The harness never renders anything itself. Everything it observes comes
//! through these traits: a host creates surfaces, a surface hands out
//! rendering contexts and reads pixels back, a context mutates drawing state
//! and draws.
//!
//! All methods take `&self`; hosts that mutate state use interior mutability,
//! so that a context can be shared by reference and compared by identity.

pub mod software;

use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Context kind for the 2D rendering context.
pub const CONTEXT_2D: &str = "2d";

pub type HostResult<T> = Result<T, HostError>;

/// Errors reported by a canvas host.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    #[error("Invalid surface dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Unsupported context kind: {0:?}")]
    UnsupportedContext(String),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Pixel ({x}, {y}) is outside of the surface")]
    OutOfBounds { x: u32, y: u32 },

    #[error("Canvas host failure: {0}")]
    Backend(String),
}

/// An 8-bit, non-premultiplied RGBA pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn channels(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Largest absolute per-channel difference to `other`.
    pub fn max_channel_diff(&self, other: &Rgba) -> u8 {
        self.channels()
            .iter()
            .zip(other.channels().iter())
            .map(|(a, b)| a.abs_diff(*b))
            .max()
            .unwrap_or(0)
    }
}

impl From<[u8; 4]> for Rgba {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self { r, g, b, a }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.r, self.g, self.b, self.a)
    }
}

/// The rendering engine under test.
pub trait CanvasHost: Send + Sync {
    /// Name used in reports.
    fn name(&self) -> &str;

    /// Create a fresh offscreen surface.
    fn create_surface(&self, width: u32, height: u32) -> HostResult<Arc<dyn Surface>>;
}

/// An offscreen pixel buffer with fixed dimensions.
pub trait Surface: Send + Sync {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Get the rendering context of `kind`.
    ///
    /// Conforming hosts return the same instance for repeated requests on one
    /// surface; the harness checks this rather than relying on it.
    fn get_context(&self, kind: &str) -> HostResult<Arc<dyn RenderingContext2d>>;

    /// Read one pixel as non-premultiplied RGBA.
    fn read_pixel(&self, x: u32, y: u32) -> HostResult<Rgba>;

    /// Encode the current surface contents as PNG.
    fn snapshot_png(&self) -> HostResult<Vec<u8>>;
}

/// Drawing operations and state of a 2D context.
pub trait RenderingContext2d: Send + Sync {
    fn fill_rect(&self, x: f64, y: f64, width: f64, height: f64) -> HostResult<()>;

    fn set_fill_style(&self, css_color: &str) -> HostResult<()>;

    fn fill_style(&self) -> HostResult<String>;

    fn set_shadow_color(&self, css_color: &str) -> HostResult<()>;

    fn shadow_color(&self) -> HostResult<String>;

    fn set_shadow_offset_x(&self, offset: f64) -> HostResult<()>;

    fn shadow_offset_x(&self) -> HostResult<f64>;

    fn set_shadow_offset_y(&self, offset: f64) -> HostResult<()>;

    fn shadow_offset_y(&self) -> HostResult<f64>;

    fn set_shadow_blur(&self, blur: f64) -> HostResult<()>;

    fn shadow_blur(&self) -> HostResult<f64>;

    /// Push the current drawing state.
    fn save(&self) -> HostResult<()>;

    /// Pop the most recently saved drawing state.
    fn restore(&self) -> HostResult<()>;
}
