//! Shape generation for 2D primitives

use glam::Vec2;

use super::vertex::{Color, Vertex};

/// Map a pixel position (origin top-left, y down) to NDC (y up)
#[inline]
pub fn pixel_to_ndc(point: Vec2, viewport: Vec2) -> Vec2 {
    Vec2::new(
        point.x / viewport.x * 2.0 - 1.0,
        1.0 - point.y / viewport.y * 2.0,
    )
}

/// Two triangles covering an axis-aligned rectangle given in pixels
pub fn rect(top_left: Vec2, size: Vec2, color: Color, viewport: Vec2) -> [Vertex; 6] {
    let a = pixel_to_ndc(top_left, viewport);
    let b = pixel_to_ndc(top_left + size, viewport);

    [
        Vertex::new(a.x, a.y, color),
        Vertex::new(a.x, b.y, color),
        Vertex::new(b.x, a.y, color),
        Vertex::new(b.x, a.y, color),
        Vertex::new(a.x, b.y, color),
        Vertex::new(b.x, b.y, color),
    ]
}
