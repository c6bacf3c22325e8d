//! Parameter structs for Canvas 2D drawing operations.

/// Parameters for a rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectParams {
    /// X coordinate of the rectangle origin.
    pub x: f32,
    /// Y coordinate of the rectangle origin.
    pub y: f32,
    /// Width of the rectangle.
    pub width: f32,
    /// Height of the rectangle.
    pub height: f32,
}

impl RectParams {
    /// Whether all four values are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }

    /// Build a closed path for this rectangle, mapped through `transform`.
    pub(crate) fn to_path(self, transform: &tiny_skia::Transform) -> Option<tiny_skia::Path> {
        let mut corners = [
            tiny_skia::Point::from_xy(self.x, self.y),
            tiny_skia::Point::from_xy(self.x + self.width, self.y),
            tiny_skia::Point::from_xy(self.x + self.width, self.y + self.height),
            tiny_skia::Point::from_xy(self.x, self.y + self.height),
        ];
        transform.map_points(&mut corners);

        let mut pb = tiny_skia::PathBuilder::new();
        pb.move_to(corners[0].x, corners[0].y);
        pb.line_to(corners[1].x, corners[1].y);
        pb.line_to(corners[2].x, corners[2].y);
        pb.line_to(corners[3].x, corners[3].y);
        pb.close();
        pb.finish()
    }
}
