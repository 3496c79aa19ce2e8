//! Nine Ball - build walls to capture the grid without touching the balls
//!
//! Core modules:
//! - `sim`: Deterministic simulation (grid, balls, walls, region capture)
//! - `platform`: Input events, the event queue and the game loop
//! - `renderer`: Text presentation of the board
//! - `settings`: Configuration loaded from JSON

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{Difficulty, Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Clock period in milliseconds
    pub const TICK_MS: u64 = 30;

    /// Board dimensions in tiles, border included
    pub const TILES_X: i32 = 32;
    pub const TILES_Y: i32 = 20;

    /// Captured fraction needed to clear a level
    pub const MIN_CAPTURED: f64 = 0.60;

    /// Ball count grows with the level up to this cap
    pub const MAX_BALLS: usize = 50;

    /// New balls spawn at least this many tiles from the edge
    pub const SPAWN_MARGIN: i32 = 4;

    /// Largest accepted board side, keeps the tile count well inside `i32`
    pub const MAX_TILES_PER_SIDE: i32 = 1024;
}
