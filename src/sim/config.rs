//! Tunable simulation constants
//!
//! Passed into the engine at construction instead of living in globals.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Simulation constants that cannot set up a level
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("spawn_margin must be at least 1, got {0}")]
    SpawnMargin(i32),
    #[error("grid {width}x{height} too small for spawn margin {margin} (need at least {min} per side)")]
    GridTooSmall {
        width: i32,
        height: i32,
        margin: i32,
        min: i32,
    },
    #[error("grid {width}x{height} too large (at most {max} per side)")]
    GridTooLarge { width: i32, height: i32, max: i32 },
    #[error("win_threshold must be in (0, 1], got {0}")]
    WinThreshold(f64),
    #[error("max_balls must be at least 1")]
    NoBalls,
}

/// Constants the engine depends on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Grid width in tiles (border included)
    pub width: i32,
    /// Grid height in tiles (border included)
    pub height: i32,
    /// Captured fraction that wins the level
    pub win_threshold: f64,
    /// Upper bound on balls per level
    pub max_balls: usize,
    /// Minimum distance between a freshly spawned ball and the grid edge
    pub spawn_margin: i32,
    /// Flip both velocity components when neither directional bounce test
    /// fires (a ball hitting the tip of a corner head-on)
    pub corner_fallback: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: TILES_X,
            height: TILES_Y,
            win_threshold: MIN_CAPTURED,
            max_balls: MAX_BALLS,
            spawn_margin: SPAWN_MARGIN,
            corner_fallback: true,
        }
    }
}

impl SimConfig {
    /// Check that a level can actually be set up with these constants
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.spawn_margin < 1 {
            return Err(ConfigError::SpawnMargin(self.spawn_margin));
        }
        if self.width > MAX_TILES_PER_SIDE || self.height > MAX_TILES_PER_SIDE {
            return Err(ConfigError::GridTooLarge {
                width: self.width,
                height: self.height,
                max: MAX_TILES_PER_SIDE,
            });
        }
        let min_side = self.spawn_margin.saturating_mul(2).saturating_add(1);
        if self.width < min_side || self.height < min_side {
            return Err(ConfigError::GridTooSmall {
                width: self.width,
                height: self.height,
                margin: self.spawn_margin,
                min: min_side,
            });
        }
        if !(self.win_threshold > 0.0 && self.win_threshold <= 1.0) {
            return Err(ConfigError::WinThreshold(self.win_threshold));
        }
        if self.max_balls == 0 {
            return Err(ConfigError::NoBalls);
        }
        Ok(())
    }

    /// Balls spawned at the start of `level`
    pub fn balls_for_level(&self, level: u32) -> usize {
        (level as usize + 1).min(self.max_balls)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = SimConfig::default();
        assert_eq!(config.width, 32);
        assert_eq!(config.height, 20);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_tiny_grid() {
        let config = SimConfig {
            width: 8,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::GridTooSmall { min: 9, .. })));
    }

    #[test]
    fn test_rejects_huge_grid() {
        let config = SimConfig {
            width: 70_000,
            height: 70_000,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::GridTooLarge { .. })));

        let edge = SimConfig {
            width: MAX_TILES_PER_SIDE,
            height: MAX_TILES_PER_SIDE,
            ..Default::default()
        };
        assert!(edge.validate().is_ok());
    }

    #[test]
    fn test_huge_margin_does_not_overflow() {
        let config = SimConfig {
            spawn_margin: i32::MAX,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_threshold() {
        let zero = SimConfig {
            win_threshold: 0.0,
            ..Default::default()
        };
        let over = SimConfig {
            win_threshold: 1.5,
            ..Default::default()
        };
        assert_eq!(zero.validate(), Err(ConfigError::WinThreshold(0.0)));
        assert_eq!(over.validate(), Err(ConfigError::WinThreshold(1.5)));
    }

    #[test]
    fn test_ball_count_capped() {
        let config = SimConfig {
            max_balls: 5,
            ..Default::default()
        };
        assert_eq!(config.balls_for_level(1), 2);
        assert_eq!(config.balls_for_level(4), 5);
        assert_eq!(config.balls_for_level(100), 5);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: SimConfig = serde_json::from_str(r#"{"win_threshold": 0.7}"#).unwrap();
        assert_eq!(config.win_threshold, 0.7);
        assert_eq!(config.width, TILES_X);
        assert!(config.corner_fallback);
    }
}
