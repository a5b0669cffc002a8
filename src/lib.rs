//! Invaders - a Space Invaders style arcade shooter
//!
//! Core modules:
//! - `sim`: Simulation (bodies, collisions, world controller)
//! - `renderer`: Flat-rectangle drawing surface and WebGPU pipeline
//! - `platform`: Browser keyboard and viewport glue
//! - `audio`: Laser sound loading and playback (web only)
//! - `settings`: Player preferences persisted to LocalStorage

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::GameError;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Formation layout: the original cabinet had 5 rows of 11 aliens
    pub const INVADER_COLUMNS: usize = 11;
    pub const INVADER_ROWS: usize = 5;
    pub const INVADER_COUNT: usize = INVADER_COLUMNS * INVADER_ROWS;
    /// Viewport width is split into this many grid cells
    pub const GRID_DIVISIONS: f32 = 13.0;
    /// First grid slot sits this many cells in from the top-left corner
    pub const GRID_START_CELLS: f32 = 1.25;
    /// Invader edge length is the viewport width divided by this
    pub const INVADER_SIZE_DIVISOR: f32 = 24.0;
    /// Lower bound on invader size so tiny viewports keep bodies valid
    pub const INVADER_MIN_SIZE: f32 = 1.0;
    /// Patrol speed (pixels/tick)
    pub const INVADER_SPEED: f32 = 0.3;
    /// An invader fires when a uniform roll exceeds this (~0.5% per tick)
    pub const INVADER_FIRE_THRESHOLD: f32 = 0.995;
    /// Invader bullets fall at this speed with up to this much sideways drift
    pub const INVADER_BULLET_SPEED: f32 = 3.0;
    pub const INVADER_BULLET_MAX_DRIFT: f32 = 0.5;

    /// Player ship
    pub const PLAYER_SIZE: f32 = 15.0;
    pub const PLAYER_STEP: f32 = 2.0;
    pub const PLAYER_BULLET_SPEED: f32 = 3.0;

    /// Bullets are small squares
    pub const BULLET_SIZE: f32 = 3.0;
    /// Gap between a shooter's edge and its bullet's center
    pub const MUZZLE_GAP: f32 = 2.0;
}
