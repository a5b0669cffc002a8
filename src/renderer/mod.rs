//! Rendering module
//!
//! Everything on screen is a flat-colored rectangle. The simulation paints
//! into a [`FrameBuilder`]; [`RenderState`] pushes the result through WebGPU.

pub mod frame;
pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use frame::{Canvas, FrameBuilder};
pub use pipeline::RenderState;
pub use vertex::{Color, Vertex, colors};
