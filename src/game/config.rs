use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};
use std::{path::Path, time::Duration};

/// Largest accepted grid side; keeps the cell count and `i32` coordinates in range
pub const MAX_GRID_SIZE: usize = 256;

/// Largest accepted points per food; a full board at `MAX_GRID_SIZE` stays far below `u32::MAX`
pub const MAX_FOOD_SCORE: u32 = 1000;

/// How the tick interval shrinks as the snake grows.
///
/// `interval = max(min_ms, base_ms - min(max_bonus_ms, length * per_segment_ms))`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedCurve {
    /// Interval for a zero-length snake
    pub base_ms: u64,
    /// Floor for the interval
    pub min_ms: u64,
    /// Milliseconds removed per snake segment
    pub per_segment_ms: u64,
    /// Cap on the total speed bonus
    pub max_bonus_ms: u64,
}

impl Default for SpeedCurve {
    fn default() -> Self {
        Self {
            base_ms: 180,
            min_ms: 80,
            per_segment_ms: 4,
            max_bonus_ms: 80,
        }
    }
}

impl SpeedCurve {
    /// Tick interval for a snake of the given length
    pub fn interval_for(&self, length: usize) -> Duration {
        let bonus = (length as u64)
            .saturating_mul(self.per_segment_ms)
            .min(self.max_bonus_ms);
        let millis = self.base_ms.saturating_sub(bonus).max(self.min_ms);
        Duration::from_millis(millis)
    }
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Side length of the square, wrap-around grid
    pub grid_size: usize,
    /// Initial length of the snake
    pub initial_snake_length: usize,
    /// Points awarded per food eaten
    pub food_score: u32,
    pub speed: SpeedCurve,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 20,
            initial_snake_length: 3,
            food_score: 10,
            speed: SpeedCurve::default(),
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom grid size
    pub fn new(grid_size: usize) -> Self {
        Self {
            grid_size,
            ..Default::default()
        }
    }

    /// Load a JSON config file. Missing fields fall back to defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let config: GameConfig = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the engine can lay out and run a game with this config
    pub fn validate(&self) -> Result<()> {
        ensure!(self.grid_size >= 2, "grid_size must be at least 2, got {}", self.grid_size);
        ensure!(
            self.grid_size <= MAX_GRID_SIZE,
            "grid_size must be at most {}, got {}",
            MAX_GRID_SIZE,
            self.grid_size
        );
        ensure!(
            self.initial_snake_length >= 1,
            "initial_snake_length must be at least 1"
        );
        ensure!(
            self.initial_snake_length <= self.grid_size / 2,
            "initial_snake_length {} does not fit a grid of size {}",
            self.initial_snake_length,
            self.grid_size
        );
        ensure!(
            self.food_score > 0 && self.food_score % 10 == 0,
            "food_score must be a positive multiple of 10, got {}",
            self.food_score
        );
        ensure!(
            self.food_score <= MAX_FOOD_SCORE,
            "food_score must be at most {}, got {}",
            MAX_FOOD_SCORE,
            self.food_score
        );
        ensure!(self.speed.min_ms > 0, "speed.min_ms must be positive");
        ensure!(
            self.speed.min_ms <= self.speed.base_ms,
            "speed.min_ms ({}) must not exceed speed.base_ms ({})",
            self.speed.min_ms,
            self.speed.base_ms
        );
        Ok(())
    }

    /// Number of cells on the grid
    pub fn area(&self) -> usize {
        self.grid_size * self.grid_size
    }

    /// Head cell of a freshly started snake: left of centre on the middle row
    pub fn initial_head(&self) -> (i32, i32) {
        let mid = (self.grid_size / 2) as i32;
        (mid - 1, mid)
    }
}
