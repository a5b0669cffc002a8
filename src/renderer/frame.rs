//! CPU-side frame assembly
//!
//! The simulation paints through [`Canvas`]; [`FrameBuilder`] records the
//! rectangles as triangles ready for upload.

use glam::Vec2;

use super::shapes;
use super::vertex::{Color, Vertex};

/// A drawing surface that only knows flat rectangles
pub trait Canvas {
    /// Surface size in pixels
    fn size(&self) -> Vec2;
    /// Forget everything painted so far
    fn clear(&mut self);
    /// Fill a rectangle given by its top-left corner and extents in pixels
    fn fill_rect(&mut self, top_left: Vec2, size: Vec2, color: Color);
}

/// Collects one frame's worth of rectangles
#[derive(Debug, Clone, Default)]
pub struct FrameBuilder {
    size: Vec2,
    vertices: Vec<Vertex>,
}

impl FrameBuilder {
    pub fn new(size: Vec2) -> Self {
        Self {
            size,
            vertices: Vec::new(),
        }
    }

    /// Change the pixel size subsequent rectangles are mapped against
    pub fn resize(&mut self, size: Vec2) {
        self.size = size;
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn rect_count(&self) -> usize {
        self.vertices.len() / 6
    }
}

impl Canvas for FrameBuilder {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn clear(&mut self) {
        self.vertices.clear();
    }

    fn fill_rect(&mut self, top_left: Vec2, size: Vec2, color: Color) {
        // Nothing sensible to draw on a zero-sized surface
        if self.size.x <= 0.0 || self.size.y <= 0.0 {
            return;
        }
        self.vertices
            .extend_from_slice(&shapes::rect(top_left, size, color, self.size));
    }
}
