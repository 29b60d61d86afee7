//! Game configuration
//!
//! One immutable struct handed to the grid, the entities and the game state.
//! Persisted as JSON; missing fields fall back to the defaults.

use std::fs;
use std::path::{Path, PathBuf};

use glam::IVec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Smallest grid that still leaves room to play inside the wall ring
pub const MIN_GRID_SIZE: i32 = 5;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read or write config file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config file {path} is not valid JSON")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Playfield ===
    /// Grid width in cells, wall ring included
    pub width: i32,
    /// Grid height in cells, wall ring included
    pub height: i32,

    // === Speeds (cells per millisecond) ===
    pub player_speed: f32,
    /// Applied to each axis independently
    pub pursuer_speed: f32,
    pub wanderer_speed: f32,

    // === Pursuer footprint ===
    pub pursuer_width: i32,
    pub pursuer_height: i32,

    // === Rules ===
    /// Upper bound on wanderers (one more joins per level)
    pub max_wanderers: usize,
    /// Claimed percentage that completes a level
    pub win_percent: u8,
    pub initial_lives: u8,
    /// Award a life on completing every Nth level (0 = never)
    pub bonus_life_every: u32,

    // === Countdowns (ticks) ===
    pub get_ready_ticks: u32,
    pub explosion_ticks: u32,
    pub completed_ticks: u32,

    // === Driver ===
    /// Clamp for the elapsed time of a single frame
    pub max_frame_ms: f32,
    /// Simulation RNG seed
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 99,
            height: 99,

            player_speed: 0.05,
            pursuer_speed: 0.05,
            wanderer_speed: 0.04,

            pursuer_width: 18,
            pursuer_height: 8,

            max_wanderers: 4,
            win_percent: 75,
            initial_lives: 3,
            bonus_life_every: 3,

            get_ready_ticks: 120,
            explosion_ticks: 90,
            completed_ticks: 180,

            max_frame_ms: 100.0,
            seed: 0x5EED,
        }
    }
}

impl GameConfig {
    /// Load and validate a config from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: GameConfig =
            serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Write the config as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Config saved to {}", path.display());
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < MIN_GRID_SIZE || self.height < MIN_GRID_SIZE {
            return Err(ConfigError::Invalid(format!(
                "grid {}x{} is smaller than {MIN_GRID_SIZE}x{MIN_GRID_SIZE}",
                self.width, self.height
            )));
        }
        if self.pursuer_width < 1 || self.pursuer_height < 1 {
            return Err(ConfigError::Invalid("pursuer footprint is empty".into()));
        }
        // The footprint plus a free cell on each side must fit inside the ring
        if self.pursuer_width + 4 > self.width || self.pursuer_height + 4 > self.height {
            return Err(ConfigError::Invalid(format!(
                "pursuer {}x{} does not fit a {}x{} grid",
                self.pursuer_width, self.pursuer_height, self.width, self.height
            )));
        }
        for (name, speed) in [
            ("player_speed", self.player_speed),
            ("pursuer_speed", self.pursuer_speed),
            ("wanderer_speed", self.wanderer_speed),
        ] {
            if !speed.is_finite() || speed <= 0.0 {
                return Err(ConfigError::Invalid(format!("{name} must be positive")));
            }
        }
        if !(1..=100).contains(&self.win_percent) {
            return Err(ConfigError::Invalid(format!(
                "win_percent {} outside 1..=100",
                self.win_percent
            )));
        }
        if self.initial_lives == 0 {
            return Err(ConfigError::Invalid("initial_lives must be at least 1".into()));
        }
        if !self.max_frame_ms.is_finite() || self.max_frame_ms <= 0.0 {
            return Err(ConfigError::Invalid("max_frame_ms must be positive".into()));
        }
        Ok(())
    }

    /// Player spawn: bottom edge midpoint
    pub fn player_start(&self) -> IVec2 {
        IVec2::new(self.width / 2, self.height - 1)
    }

    /// Pursuer spawn (top-left of its footprint), kept inside the ring
    pub fn pursuer_start(&self) -> IVec2 {
        let max_x = self.width - 2 - self.pursuer_width;
        let max_y = self.height - 2 - self.pursuer_height;
        IVec2::new(
            (self.width * 3 / 4).clamp(1, max_x.max(1)),
            (self.height / 4).clamp(1, max_y.max(1)),
        )
    }

    pub fn pursuer_size(&self) -> IVec2 {
        IVec2::new(self.pursuer_width, self.pursuer_height)
    }

    /// Clamp a clock reading to the configured frame limit
    pub fn clamp_frame(&self, elapsed_ms: f32) -> f32 {
        if elapsed_ms.is_finite() {
            elapsed_ms.clamp(0.0, self.max_frame_ms)
        } else {
            log::warn!("Non-finite frame time {elapsed_ms}, treating as zero");
            0.0
        }
    }

    /// Whether completing `level` earns an extra life
    pub fn awards_bonus_life(&self, level: u32) -> bool {
        self.bonus_life_every != 0 && level % self.bonus_life_every == 0
    }
}
