//! CSS color parsing and serialization.

use crate::error::{Canvas2dError, Canvas2dResult};

/// Parse a CSS color string into a tiny_skia::Color.
pub fn parse_color(s: &str) -> Canvas2dResult<tiny_skia::Color> {
    let parsed = csscolorparser::parse(s)
        .map_err(|e| Canvas2dError::ColorParseError(format!("{}: {}", s, e)))?;

    let [r, g, b, a] = parsed.to_array();
    tiny_skia::Color::from_rgba(r, g, b, a)
        .ok_or_else(|| Canvas2dError::ColorParseError(s.to_string()))
}

/// Serialize a color the way canvas attribute getters report it.
///
/// Opaque colors become `#rrggbb`, everything else `rgba(r, g, b, a)`.
pub fn serialize_color(color: &tiny_skia::Color) -> String {
    let c = color.to_color_u8();
    if c.alpha() == 255 {
        format!("#{:02x}{:02x}{:02x}", c.red(), c.green(), c.blue())
    } else {
        format!(
            "rgba({}, {}, {}, {})",
            c.red(),
            c.green(),
            c.blue(),
            format_alpha(color.alpha())
        )
    }
}

fn format_alpha(alpha: f32) -> String {
    let s = format!("{:.3}", alpha);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}
