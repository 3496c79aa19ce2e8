//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per clock tick, no wall-clock time
//! - Seeded RNG only, and only for ball respawn
//! - Stable iteration order (balls in spawn order, negative extension first)
//! - No rendering or platform dependencies

pub mod ball;
pub mod capture;
pub mod config;
pub mod grid;
pub mod state;
pub mod tick;
pub mod wall;

pub use ball::Ball;
pub use capture::{capture_regions, flood_capture};
pub use config::{ConfigError, SimConfig};
pub use grid::{Grid, captured_fraction};
pub use state::{GameEvent, GameState, new_level};
pub use tick::{Outcome, TickKind, TickReport, step, tick};
pub use wall::{Extension, Orientation, Side, Wall};
