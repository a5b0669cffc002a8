//! Axis-aligned bounding box tests
//!
//! Every body is a rectangle centered on `center` with full extents `size`.

use glam::Vec2;

use super::body::Body;

/// Check whether two distinct bodies overlap
///
/// A body never collides with itself. Boxes that merely share an edge are
/// not colliding; they must overlap on both axes.
pub fn colliding(a: &Body, b: &Body) -> bool {
    if a.id == b.id {
        return false;
    }
    boxes_overlap(a.center, a.size, b.center, b.size)
}

/// Overlap test for two center/size rectangles
#[inline]
pub fn boxes_overlap(center_a: Vec2, size_a: Vec2, center_b: Vec2, size_b: Vec2) -> bool {
    let a_min = center_a - size_a / 2.0;
    let a_max = center_a + size_a / 2.0;
    let b_min = center_b - size_b / 2.0;
    let b_max = center_b + size_b / 2.0;

    // Separated on some axis (touching counts as separated)
    let separated = a_max.x <= b_min.x || b_max.x <= a_min.x || a_max.y <= b_min.y || b_max.y <= a_min.y;
    !separated
}

/// Check whether a point has left the `[0, width] x [0, height]` playfield
///
/// Points exactly on an edge are still inside.
#[inline]
pub fn is_out_of_bounds(center: Vec2, bounds: Vec2) -> bool {
    center.x < 0.0 || center.x > bounds.x || center.y < 0.0 || center.y > bounds.y
}
