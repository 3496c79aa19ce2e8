//! Fixed timestep simulation tick
//!
//! One clock tick runs, in this order:
//! 1. grow + destroy-check the negative extension
//! 2. grow + destroy-check the positive extension
//! 3. completion check, negative extension
//! 4. completion check, positive extension
//! 5. region capture once both extensions have settled
//! 6. move and bounce every ball
//!
//! then recomputes the captured fraction and settles the level.

use serde::{Deserialize, Serialize};

use super::ball::{self, Ball};
use super::capture::capture_regions;
use super::config::SimConfig;
use super::grid::Grid;
use super::state::{GameEvent, GameState};
use super::wall::{Side, Wall};

/// What woke the simulation up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickKind {
    /// Advance the simulation one step
    Clock,
    /// Layout changed; the simulation does nothing
    Resize,
}

/// How the level stands after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Outcome {
    #[default]
    Playing,
    /// Threshold reached; the next level has started
    Won,
    /// Out of lives; the run restarted at level 1
    Lost,
}

/// Result of a single tick
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickReport {
    /// Lives gained or lost this tick
    pub life_delta: i32,
    /// Lives after applying `life_delta`, before any level reset
    pub lives: i32,
    /// Captured fraction after this tick, before any level reset
    pub captured: f64,
    pub outcome: Outcome,
    /// Everything that happened, in order
    pub events: Vec<GameEvent>,
}

impl TickReport {
    pub fn won(&self) -> bool {
        self.outcome == Outcome::Won
    }
}

/// Run the wall and ball steps on bare simulation state and return the
/// events they produced. Does not touch lives or levels.
pub fn step(grid: &mut Grid, balls: &mut [Ball], wall: &mut Wall, config: &SimConfig) -> Vec<GameEvent> {
    let mut events = Vec::new();

    for side in Side::BOTH {
        wall.grow(side, balls, &mut events);
    }
    for side in Side::BOTH {
        wall.try_complete(side, grid, &mut events);
    }
    if wall.is_settled() {
        capture_regions(wall, grid, balls, &mut events);
    }

    ball::advance_all(balls, grid, config.corner_fallback);
    events
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, kind: TickKind) -> TickReport {
    if kind == TickKind::Resize {
        return TickReport {
            life_delta: 0,
            lives: state.lives,
            captured: state.captured,
            outcome: Outcome::Playing,
            events: Vec::new(),
        };
    }

    state.time_ticks += 1;
    let mut events = step(&mut state.grid, &mut state.balls, &mut state.wall, &state.config);

    let life_delta: i32 = events.iter().map(GameEvent::life_delta).sum();
    state.lives += life_delta;
    state.captured = state.grid.captured_fraction();

    let lives = state.lives;
    let captured = state.captured;
    let level = state.level;

    let outcome = if captured >= state.config.win_threshold {
        log::info!("Level {} won with {:.1}% captured", level, captured * 100.0);
        events.push(GameEvent::LevelWon { level });
        state.start_level(level + 1);
        Outcome::Won
    } else if lives <= 0 {
        log::info!("Level {} lost after {} ticks", level, state.time_ticks);
        events.push(GameEvent::LevelLost { level });
        state.start_level(1);
        Outcome::Lost
    } else {
        Outcome::Playing
    };

    TickReport {
        life_delta,
        lives,
        captured,
        outcome,
        events,
    }
}
