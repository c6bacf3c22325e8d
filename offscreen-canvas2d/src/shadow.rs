//! Shadow rendering for filled shapes.
//!
//! A shadow is drawn before the shape it belongs to:
//! 1. Fill the shape's device-space path, shifted by the shadow offset, with
//!    the shadow color into a padded offscreen layer
//! 2. Blur the layer (three box blurs per axis approximate a Gaussian whose
//!    sigma is half the shadow blur level)
//! 3. Composite the layer onto the canvas with source-over

use crate::drawing_state::DrawingState;
use tiny_skia::{Pixmap, Transform};

/// Largest blur sigma a shadow is rendered with; higher blur levels clamp.
const MAX_SHADOW_SIGMA: f32 = 128.0;

/// Largest shadow layer, in pixels.
const MAX_LAYER_PIXELS: u64 = 1 << 28;

/// Paint the shadow that `path` casts under `state` onto `target`.
pub(crate) fn draw_shadow(target: &mut Pixmap, path: &tiny_skia::Path, state: &DrawingState) {
    let sigma = ((state.shadow_blur / 2.0) as f32).min(MAX_SHADOW_SIGMA);
    let pad = if sigma > 0.0 {
        (3.0 * sigma).ceil() as u32 + 1
    } else {
        0
    };

    let layer = layer_size(target.width(), target.height(), pad)
        .and_then(|(width, height)| Pixmap::new(width, height));
    let Some(mut layer) = layer else {
        log::warn!(target: "canvas", "shadow layer too large, skipping shadow");
        return;
    };

    let mut color = state.shadow_color;
    color.set_alpha((color.alpha() * state.global_alpha).clamp(0.0, 1.0));
    let mut paint = tiny_skia::Paint {
        anti_alias: true,
        ..Default::default()
    };
    paint.set_color(color);

    let shift = Transform::from_translate(
        state.shadow_offset_x as f32 + pad as f32,
        state.shadow_offset_y as f32 + pad as f32,
    );
    layer.fill_path(path, &paint, tiny_skia::FillRule::Winding, shift, None);

    if sigma > 0.0 {
        approx_gaussian_blur(&mut layer, sigma);
    }

    target.draw_pixmap(
        -(pad as i32),
        -(pad as i32),
        layer.as_ref(),
        &tiny_skia::PixmapPaint::default(),
        Transform::identity(),
        None,
    );
}

/// Size of the padded shadow layer, or `None` when it would be too large.
fn layer_size(width: u32, height: u32, pad: u32) -> Option<(u32, u32)> {
    let border = pad.checked_mul(2)?;
    let width = width.checked_add(border)?;
    let height = height.checked_add(border)?;
    (u64::from(width) * u64::from(height) <= MAX_LAYER_PIXELS).then_some((width, height))
}

/// Box radius whose triple application approximates a Gaussian of `sigma`.
pub(crate) fn box_radius(sigma: f32) -> usize {
    let d = (sigma * 3.0 * (2.0 * std::f32::consts::PI).sqrt() / 4.0 + 0.5).floor();
    (d.max(0.0) as usize) / 2
}

/// Blur a premultiplied pixmap in place.
pub(crate) fn approx_gaussian_blur(pixmap: &mut Pixmap, sigma: f32) {
    let radius = box_radius(sigma);
    if radius == 0 {
        return;
    }
    let width = pixmap.width() as usize;
    let height = pixmap.height() as usize;
    let data = pixmap.data_mut();
    let mut scratch = vec![0u8; data.len()];

    let rows = Lines {
        count: height,
        len: width,
        line_stride: width * 4,
        step: 4,
    };
    let columns = Lines {
        count: width,
        len: height,
        line_stride: 4,
        step: width * 4,
    };

    box_blur_lines(data, &mut scratch, &rows, radius);
    box_blur_lines(&scratch, data, &rows, radius);
    box_blur_lines(data, &mut scratch, &rows, radius);
    box_blur_lines(&scratch, data, &columns, radius);
    box_blur_lines(data, &mut scratch, &columns, radius);
    box_blur_lines(&scratch, data, &columns, radius);
}

/// Layout of the lines one blur pass runs along.
struct Lines {
    count: usize,
    len: usize,
    line_stride: usize,
    step: usize,
}

/// One box blur pass; pixels beyond the edges count as transparent.
fn box_blur_lines(src: &[u8], dst: &mut [u8], lines: &Lines, radius: usize) {
    let window = (2 * radius + 1) as u32;
    for line in 0..lines.count {
        let base = line * lines.line_stride;
        let at = |i: usize| base + i * lines.step;
        let mut sums = [0u32; 4];

        for i in 0..radius.min(lines.len) {
            for (c, sum) in sums.iter_mut().enumerate() {
                *sum += src[at(i) + c] as u32;
            }
        }

        for i in 0..lines.len {
            let incoming = i + radius;
            if incoming < lines.len {
                for (c, sum) in sums.iter_mut().enumerate() {
                    *sum += src[at(incoming) + c] as u32;
                }
            }

            for (c, sum) in sums.iter().enumerate() {
                dst[at(i) + c] = ((sum + window / 2) / window) as u8;
            }

            if i >= radius {
                for (c, sum) in sums.iter_mut().enumerate() {
                    *sum -= src[at(i - radius) + c] as u32;
                }
            }
        }
    }
}
