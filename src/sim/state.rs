//! Game state and core simulation types
//!
//! Everything a level needs lives here: the grid, the balls, the wall in
//! flight, lives, and the seeded RNG used to respawn balls.

use glam::IVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ball::{self, Ball};
use super::config::{ConfigError, SimConfig};
use super::grid::Grid;
use super::wall::{Orientation, Side, Wall};

/// Something that happened during a tick. Life bookkeeping is derived from
/// these rather than from counters scattered through the step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A ball touched a building extension; costs one life
    ExtensionDestroyed { side: Side },
    /// An extension reached captured territory
    ExtensionBuilt { side: Side },
    /// The wall was dropped; `closed` when both ends were built
    WallRetired { closed: bool },
    /// Tiles filled in on one side of a closed wall
    RegionCaptured { side: Side, tiles: usize },
    /// Captured fraction reached the threshold on this level
    LevelWon { level: u32 },
    /// Lives ran out on this level
    LevelLost { level: u32 },
}

impl GameEvent {
    /// Lives gained (negative: lost) because of this event
    pub fn life_delta(&self) -> i32 {
        match self {
            GameEvent::ExtensionDestroyed { .. } => -1,
            _ => 0,
        }
    }
}

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    /// Levels spawned from this seed so far
    pub levels_spawned: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, levels_spawned: 0 }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Tunable constants
    pub config: SimConfig,
    /// RNG bookkeeping
    pub rng_state: RngState,
    /// Current level (1-based)
    pub level: u32,
    /// Lives remaining; may drop to zero or below on the losing tick
    pub lives: i32,
    /// Captured fraction as of the last clock tick
    pub captured: f64,
    /// Simulation tick counter within the current level
    pub time_ticks: u64,
    pub grid: Grid,
    pub balls: Vec<Ball>,
    pub wall: Wall,
    #[serde(skip, default = "default_rng")]
    rng: Pcg32,
}

fn default_rng() -> Pcg32 {
    Pcg32::seed_from_u64(0)
}

impl GameState {
    /// Start a new run at level 1
    pub fn new(config: SimConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let rng_state = RngState::new(seed);
        let rng = rng_state.to_rng();
        let grid = Grid::new(config.width, config.height);
        let mut state = Self {
            config,
            rng_state,
            level: 1,
            lives: 0,
            captured: 0.0,
            time_ticks: 0,
            grid,
            balls: Vec::new(),
            wall: Wall::default(),
            rng,
        };
        state.start_level(1);
        Ok(state)
    }

    /// Reset the board for `level`: fresh grid, no wall, new balls, and as
    /// many lives as balls
    pub fn start_level(&mut self, level: u32) {
        self.level = level;
        self.grid.initialize();
        self.wall = Wall::default();
        let (balls, lives) = new_level(&self.config, level, &mut self.rng);
        self.balls = balls;
        self.lives = lives;
        self.rng_state.levels_spawned += 1;
        self.captured = 0.0;
        self.time_ticks = 0;
        log::info!("Level {}: {} balls, {} lives", level, self.balls.len(), self.lives);
    }

    /// Anchor a wall at `tile` if none is in flight and the tile is open
    pub fn try_start_wall(&mut self, tile: IVec2, orientation: Orientation) -> bool {
        self.wall.try_start(&self.grid, tile, orientation)
    }
}

/// Balls for `level` and the lives that go with them (one per ball)
pub fn new_level<R: Rng>(config: &SimConfig, level: u32, rng: &mut R) -> (Vec<Ball>, i32) {
    let balls = ball::spawn(config, level, rng);
    let lives = balls.len() as i32;
    (balls, lives)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game_level_one() {
        let state = GameState::new(SimConfig::default(), 12345).unwrap();
        assert_eq!(state.level, 1);
        assert_eq!(state.balls.len(), 2);
        assert_eq!(state.lives, 2);
        assert!(state.wall.is_idle());
        assert_eq!(state.grid.captured_interior(), 0);
    }

    #[test]
    fn test_same_seed_same_balls() {
        let a = GameState::new(SimConfig::default(), 99).unwrap();
        let b = GameState::new(SimConfig::default(), 99).unwrap();
        assert_eq!(a.balls, b.balls);
    }

    #[test]
    fn test_start_level_resets_board() {
        let mut state = GameState::new(SimConfig::default(), 1).unwrap();
        state.grid.set_captured(IVec2::new(5, 5));
        assert!(state.try_start_wall(IVec2::new(8, 8), Orientation::Horizontal));
        state.start_level(3);
        assert_eq!(state.level, 3);
        assert_eq!(state.balls.len(), 4);
        assert_eq!(state.lives, 4);
        assert!(state.wall.is_idle());
        assert_eq!(state.grid.captured_interior(), 0);
    }

    #[test]
    fn test_new_level_lives_match_balls() {
        let mut rng = Pcg32::seed_from_u64(3);
        let config = SimConfig::default();
        let (balls, lives) = new_level(&config, 7, &mut rng);
        assert_eq!(balls.len(), 8);
        assert_eq!(lives, 8);
        let (balls, lives) = new_level(&config, 200, &mut rng);
        assert_eq!(balls.len(), config.max_balls);
        assert_eq!(lives, config.max_balls as i32);
    }

    #[test]
    fn test_life_delta_per_event() {
        assert_eq!(GameEvent::ExtensionDestroyed { side: Side::Negative }.life_delta(), -1);
        assert_eq!(GameEvent::ExtensionBuilt { side: Side::Positive }.life_delta(), 0);
        assert_eq!(GameEvent::WallRetired { closed: true }.life_delta(), 0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SimConfig {
            max_balls: 0,
            ..Default::default()
        };
        assert!(matches!(GameState::new(config, 0), Err(ConfigError::NoBalls)));

        let huge = SimConfig {
            width: 70_000,
            height: 70_000,
            ..Default::default()
        };
        assert!(matches!(GameState::new(huge, 0), Err(ConfigError::GridTooLarge { .. })));
    }
}
