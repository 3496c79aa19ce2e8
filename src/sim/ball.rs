//! Ball spawning, motion and bounce resolution
//!
//! Balls move one tile diagonally per tick. When the next tile is captured,
//! the tiles beside the current one decide which velocity component flips.

use glam::IVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::config::SimConfig;
use super::grid::Grid;

/// A ball: the tile it occupies plus a unit diagonal velocity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: IVec2,
    /// Each component is +1 or -1
    pub vel: IVec2,
}

impl Ball {
    pub fn new(pos: IVec2, vel: IVec2) -> Self {
        debug_assert!(vel.x.abs() == 1 && vel.y.abs() == 1, "ball velocity must be diagonal");
        Self { pos, vel }
    }

    /// Flip velocity components if the next tile is captured.
    ///
    /// `dx` flips unless the tile beside us horizontally is open (the wall
    /// ahead is horizontal), `dy` flips unless the tile beside us vertically
    /// is open. A head-on corner hit where both are open flips both when
    /// `corner_fallback` is set.
    pub fn bounce(&mut self, grid: &Grid, corner_fallback: bool) {
        let next = self.pos + self.vel;
        if !grid.is_captured(next) {
            return;
        }

        let mut flip_x = grid.is_captured(IVec2::new(next.x, self.pos.y));
        let mut flip_y = grid.is_captured(IVec2::new(self.pos.x, next.y));
        if !flip_x && !flip_y && corner_fallback {
            flip_x = true;
            flip_y = true;
        }

        if flip_x {
            self.vel.x = -self.vel.x;
        }
        if flip_y {
            self.vel.y = -self.vel.y;
        }
    }

    /// Resolve bounces then step exactly one tile
    pub fn advance(&mut self, grid: &Grid, corner_fallback: bool) {
        self.bounce(grid, corner_fallback);
        self.pos += self.vel;
    }
}

/// Spawn the balls for `level` at random interior positions
pub fn spawn<R: Rng>(config: &SimConfig, level: u32, rng: &mut R) -> Vec<Ball> {
    let count = config.balls_for_level(level);
    let margin = config.spawn_margin;
    (0..count)
        .map(|_| {
            let pos = IVec2::new(
                rng.random_range(margin..=config.width - 1 - margin),
                rng.random_range(margin..=config.height - 1 - margin),
            );
            let vel = IVec2::new(random_sign(rng), random_sign(rng));
            Ball::new(pos, vel)
        })
        .collect()
}

fn random_sign<R: Rng>(rng: &mut R) -> i32 {
    if rng.random_bool(0.5) { 1 } else { -1 }
}

/// Move every ball by one tick
pub fn advance_all(balls: &mut [Ball], grid: &Grid, corner_fallback: bool) {
    for ball in balls.iter_mut() {
        ball.advance(grid, corner_fallback);
    }
}

/// Whether any ball currently occupies `tile`
#[inline]
pub fn has_ball(balls: &[Ball], tile: IVec2) -> bool {
    balls.iter().any(|b| b.pos == tile)
}
