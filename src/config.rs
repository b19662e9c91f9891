//! Difficulty parameters supplied by the caller on every level reset.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::FRIGHTENED_SLOWDOWN;
use crate::error::{GameError, GameResult};

const TICKS_PER_SECOND: u32 = 60;

/// Every field is required: a record missing one is rejected rather than defaulted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyParams {
    /// Ghost base speed in pixels per tick.
    pub ghost_speed: f32,
    /// Frightened-mode length in ticks.
    pub chase_duration: u32,
    /// Starting lives.
    pub full_health: u32,
}

impl DifficultyParams {
    pub fn from_json(text: &str) -> GameResult<Self> {
        let params: DifficultyParams =
            serde_json::from_str(text).map_err(|e| GameError::InvalidDifficulty {
                reason: e.to_string(),
            })?;
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> GameResult<()> {
        if !self.ghost_speed.is_finite() || self.ghost_speed <= FRIGHTENED_SLOWDOWN {
            return Err(GameError::InvalidDifficulty {
                reason: format!(
                    "ghost_speed must be a finite number above {FRIGHTENED_SLOWDOWN}, got {}",
                    self.ghost_speed
                ),
            });
        }
        if self.chase_duration == 0 {
            return Err(GameError::InvalidDifficulty {
                reason: "chase_duration must be at least one tick".to_string(),
            });
        }
        if self.full_health == 0 {
            return Err(GameError::InvalidDifficulty {
                reason: "full_health must be at least one life".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for DifficultyParams {
    fn default() -> Self {
        Difficulty::Hard.params()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
    Impossible,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Normal,
        Difficulty::Hard,
        Difficulty::Impossible,
    ];

    pub fn params(self) -> DifficultyParams {
        let (ghost_speed, seconds, full_health) = match self {
            Difficulty::Easy => (1.0, 10, 3),
            Difficulty::Normal => (1.3, 8, 3),
            Difficulty::Hard => (1.5, 6, 3),
            Difficulty::Impossible => (2.0, 4, 1),
        };
        DifficultyParams {
            ghost_speed,
            chase_duration: seconds * TICKS_PER_SECOND,
            full_health,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
            Difficulty::Impossible => "impossible",
        }
    }
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| GameError::UnknownDifficulty { name: s.to_string() })
    }
}
