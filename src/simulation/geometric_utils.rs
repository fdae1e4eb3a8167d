//! Geometric helpers for bounds and collision tests.

use geo::{Rect, coord};

/// Builds an axis-aligned rectangle from its top-left corner and size.
pub fn rect(x: f32, y: f32, width: f32, height: f32) -> Rect<f32> {
    Rect::new(coord! { x: x, y: y }, coord! { x: x + width, y: y + height })
}

/// Axis-aligned bounding box of a circle.
pub fn circle_bounds(cx: f32, cy: f32, radius: f32) -> Rect<f32> {
    Rect::new(
        coord! { x: cx - radius, y: cy - radius },
        coord! { x: cx + radius, y: cy + radius },
    )
}

/// Strict overlap test: rectangles that only share an edge do not collide.
pub fn overlaps(a: &Rect<f32>, b: &Rect<f32>) -> bool {
    a.min().x < b.max().x && a.max().x > b.min().x && a.min().y < b.max().y && a.max().y > b.min().y
}

/// Whether a circle touches or crosses the ceiling (`y = 0`) or floor (`y = height`).
pub fn outside_vertical(cy: f32, radius: f32, height: f32) -> bool {
    cy + radius >= height || cy - radius <= 0.0
}
