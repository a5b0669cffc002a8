//! Simulation module
//!
//! All gameplay logic lives here:
//! - Seeded RNG only, so a seed fully determines a run
//! - Stable iteration order (insertion order of the body list)
//! - No platform dependencies; drawing goes through the `Canvas` trait

pub mod body;
pub mod collision;
pub mod world;

pub use body::{Body, BodyId, BodyKind, Command, Invader, Shot};
pub use collision::{boxes_overlap, colliding, is_out_of_bounds};
pub use world::{GameEvent, Key, TickInput, World, grid_position};
