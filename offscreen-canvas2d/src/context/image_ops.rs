//! Pixel readback and PNG export for Canvas2dContext.

use super::Canvas2dContext;
use crate::error::{Canvas2dError, Canvas2dResult};

impl Canvas2dContext {
    /// Read a single pixel as non-premultiplied RGBA.
    pub fn get_pixel(&self, x: u32, y: u32) -> Canvas2dResult<[u8; 4]> {
        let out_of_bounds = Canvas2dError::OutOfBounds {
            x,
            y,
            width: self.width,
            height: self.height,
        };
        // Pixmap::pixel only bounds-checks the flat index
        if x >= self.width || y >= self.height {
            return Err(out_of_bounds);
        }
        let pixel = self.pixmap.pixel(x, y).ok_or(out_of_bounds)?.demultiply();
        Ok([pixel.red(), pixel.green(), pixel.blue(), pixel.alpha()])
    }

    /// Get image data for a rectangle of the canvas.
    ///
    /// Returns non-premultiplied RGBA bytes; pixels outside the canvas are
    /// transparent black.
    pub fn get_image_data(&self, x: i32, y: i32, width: u32, height: u32) -> Vec<u8> {
        let mut data = vec![0u8; (width * height * 4) as usize];

        for dy in 0..height {
            for dx in 0..width {
                let src_x = x + dx as i32;
                let src_y = y + dy as i32;
                if src_x < 0 || src_y < 0 {
                    continue;
                }
                if let Ok(pixel) = self.get_pixel(src_x as u32, src_y as u32) {
                    let dst_idx = ((dy * width + dx) * 4) as usize;
                    data[dst_idx..dst_idx + 4].copy_from_slice(&pixel);
                }
            }
        }

        data
    }

    /// Export canvas to PNG data.
    pub fn to_png(&self) -> Canvas2dResult<Vec<u8>> {
        let mut buf = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut buf, self.width, self.height);
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);

            let mut writer = encoder.write_header()?;

            // Convert from premultiplied to straight alpha for PNG
            let data = self.get_image_data(0, 0, self.width, self.height);
            writer.write_image_data(&data)?;
        }
        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Canvas2dContext, Canvas2dError, RectParams};

    #[test]
    fn test_get_pixel_out_of_bounds() {
        let ctx = Canvas2dContext::new(10, 10).unwrap();
        assert!(matches!(
            ctx.get_pixel(10, 0),
            Err(Canvas2dError::OutOfBounds { x: 10, y: 0, .. })
        ));
        assert!(matches!(
            ctx.get_pixel(0, 10),
            Err(Canvas2dError::OutOfBounds { x: 0, y: 10, .. })
        ));
    }

    #[test]
    fn test_get_pixel_past_right_edge_does_not_wrap() {
        let mut ctx = Canvas2dContext::new(10, 10).unwrap();
        // Only row 1 is painted
        ctx.fill_rect(&RectParams {
            x: 0.0,
            y: 1.0,
            width: 10.0,
            height: 1.0,
        });
        assert_eq!(ctx.get_pixel(0, 1).unwrap(), [0, 0, 0, 255]);
        assert!(matches!(
            ctx.get_pixel(10, 0),
            Err(Canvas2dError::OutOfBounds { .. })
        ));
        assert_eq!(ctx.get_image_data(9, 0, 2, 1), vec![0u8; 8]);
    }

    #[test]
    fn test_get_pixel_demultiplies() {
        let mut ctx = Canvas2dContext::new(10, 10).unwrap();
        ctx.set_fill_style("rgba(255, 0, 0, 0.5)").unwrap();
        ctx.fill_rect(&RectParams {
            x: 0.0,
            y: 0.0,
            width: 10.0,
            height: 10.0,
        });
        let [r, g, b, a] = ctx.get_pixel(5, 5).unwrap();
        assert!(r >= 254);
        assert_eq!((g, b), (0, 0));
        assert!((127..=128).contains(&a));
    }

    #[test]
    fn test_get_image_data_outside_is_transparent() {
        let mut ctx = Canvas2dContext::new(4, 4).unwrap();
        ctx.fill_rect(&RectParams {
            x: 0.0,
            y: 0.0,
            width: 4.0,
            height: 4.0,
        });
        let data = ctx.get_image_data(-1, 0, 2, 1);
        assert_eq!(data, vec![0, 0, 0, 0, 0, 0, 0, 255]);

        let data = ctx.get_image_data(3, 1, 2, 1);
        assert_eq!(data, vec![0, 0, 0, 255, 0, 0, 0, 0]);
        let data = ctx.get_image_data(0, 3, 1, 2);
        assert_eq!(data, vec![0, 0, 0, 255, 0, 0, 0, 0]);
    }

    #[test]
    fn test_to_png_signature() {
        let ctx = Canvas2dContext::new(8, 8).unwrap();
        let png = ctx.to_png().unwrap();
        assert_eq!(&png[..8], &[137, 80, 78, 71, 13, 10, 26, 10]);
    }
}
