//! Vertex format shared by the frame builder and the GPU pipeline

use bytemuck::{Pod, Zeroable};

/// Linear RGBA; the surface format is sRGB, so the GPU encodes on write
pub type Color = [f32; 4];

/// 2D vertex in normalized device coordinates with a flat color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: Color,
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: Color) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
            wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4];
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &ATTRIBUTES,
        }
    }
}

/// Colors for game elements
pub mod colors {
    use super::Color;

    /// CSS level 0x80 in linear light
    const HALF: f32 = 0.2158;

    pub const BACKGROUND: Color = [0.0, 0.0, 0.0, 1.0];
    /// CSS `red`
    pub const PLAYER: Color = [1.0, 0.0, 0.0, 1.0];
    /// CSS `purple`
    pub const PLAYER_BULLET: Color = [HALF, 0.0, HALF, 1.0];
    /// CSS `green`
    pub const INVADER: Color = [0.0, HALF, 0.0, 1.0];
    /// CSS `yellow`
    pub const INVADER_BULLET: Color = [1.0, 1.0, 0.0, 1.0];
}
