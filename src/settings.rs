//! Game settings
//!
//! Loaded from a JSON file next to the binary. Missing keys fall back to
//! defaults, so an empty object is a valid settings file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::TICK_MS;
use crate::sim::{ConfigError, SimConfig};

/// Errors while loading settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid settings: {0}")]
    Invalid(String),
    #[error("invalid simulation settings: {0}")]
    Config(#[from] ConfigError),
}

/// Difficulty preset; picks the captured fraction needed to win a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    #[default]
    Classic,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Classic => "Classic",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" | "normal" => Some(Difficulty::Classic),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Captured fraction that wins a level
    pub fn win_threshold(&self) -> f64 {
        match self {
            Difficulty::Classic => 0.60,
            Difficulty::Hard => 0.70,
        }
    }
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Difficulty preset; when set, overrides `sim.win_threshold`
    pub difficulty: Option<Difficulty>,
    /// Clock period in milliseconds
    pub tick_ms: u64,
    /// RNG seed; `None` seeds from the system clock
    pub seed: Option<u64>,
    /// Simulation constants
    pub sim: SimConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: None,
            tick_ms: TICK_MS,
            seed: None,
            sim: SimConfig::default(),
        }
    }
}

impl Settings {
    /// Create settings from a difficulty preset
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        Self {
            difficulty: Some(difficulty),
            ..Self::default()
        }
    }

    /// Simulation constants with the difficulty threshold applied, if any
    pub fn sim_config(&self) -> SimConfig {
        match self.difficulty {
            Some(difficulty) => SimConfig {
                win_threshold: difficulty.win_threshold(),
                ..self.sim.clone()
            },
            None => self.sim.clone(),
        }
    }

    /// Parse and validate settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings, falling back to defaults on any error
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(SettingsError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("{}; using default settings", e);
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.tick_ms == 0 {
            return Err(SettingsError::Invalid("tick_ms must be positive".to_string()));
        }
        // The raw threshold is checked even when a preset masks it
        self.sim.validate()?;
        self.sim_config().validate()?;
        Ok(())
    }
}
