//! Platform abstraction layer
//!
//! Browser-facing glue that the simulation reads from:
//! - Keyboard state
//! - Viewport size

pub mod input;
pub mod viewport;

pub use input::Keyboard;
pub use viewport::viewport_size;
