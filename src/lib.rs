//! RPS Arena - rock, paper and scissors sprites fighting for the whole canvas
//!
//! Core modules:
//! - `sim`: Simulation engine (motion, collisions, population tally, driver)
//! - `render`: Renderer boundary and sprite lookup
//! - `settings`: Data-driven configuration
//! - `error`: Construction-time failures

pub mod error;
pub mod render;
pub mod settings;
pub mod sim;

pub use error::SimError;
pub use settings::Settings;

/// Simulation configuration constants
pub mod consts {
    /// Sprite bounding box, shared by every player
    pub const PLAYER_WIDTH: f32 = 32.0;
    pub const PLAYER_HEIGHT: f32 = 32.0;

    /// Population size used by the browser build
    pub const PLAYERS_TOTAL: u32 = 45;

    /// Velocity per axis is drawn from [-1, SPEED_FACTOR - 1)
    pub const SPEED_FACTOR: f32 = 2.0;

    /// Pixels trimmed off the window size when sizing the canvas
    pub const CANVAS_MARGIN: u32 = 20;
}
