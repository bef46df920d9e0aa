//! Runtime configuration for a game
//!
//! Rule constants live in the types crate; this struct carries the per-game knobs
//! a front-end may override.

use crate::types::{GRID_HEIGHT, GRID_WIDTH, MAX_GRID_DIM, MIN_GRID_DIM};

/// How a spawned power-up picks its kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PowerUpSelection {
    /// Uniform over all four kinds
    #[default]
    Random,
    /// Always `ClearLine`
    ClearLineOnly,
}

impl PowerUpSelection {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "random" => Some(PowerUpSelection::Random),
            "clear-line" | "clearline" => Some(PowerUpSelection::ClearLineOnly),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub width: u16,
    pub height: u16,
    pub seed: u32,
    pub power_ups: PowerUpSelection,
    pub power_ups_enabled: bool,
}

impl GameConfig {
    pub fn with_size(mut self, width: u16, height: u16) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_power_ups(mut self, selection: PowerUpSelection) -> Self {
        self.power_ups = selection;
        self.power_ups_enabled = true;
        self
    }

    pub fn without_power_ups(mut self) -> Self {
        self.power_ups_enabled = false;
        self
    }

    /// Grid dimensions clamped into `MIN_GRID_DIM..=MAX_GRID_DIM`
    pub fn grid_size(&self) -> (u16, u16) {
        (
            self.width.clamp(MIN_GRID_DIM, MAX_GRID_DIM),
            self.height.clamp(MIN_GRID_DIM, MAX_GRID_DIM),
        )
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: GRID_WIDTH,
            height: GRID_HEIGHT,
            seed: 1,
            power_ups: PowerUpSelection::Random,
            power_ups_enabled: true,
        }
    }
}
