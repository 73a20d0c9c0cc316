//! Elo rating configuration

use crate::error::{Result, StandingsError};
use serde::{Deserialize, Serialize};

/// Parameters of the Elo forecaster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingConfig {
    /// Speed at which ratings change after a game
    pub k_factor: f64,
    /// Share of the distance to `mean_rating` removed between seasons
    pub season_revert: f64,
    /// Rating teams drift back toward between seasons
    pub mean_rating: f64,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            k_factor: 20.0,
            season_revert: 1.0 / 3.0,
            mean_rating: 1600.0,
        }
    }
}

impl RatingConfig {
    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.k_factor <= 0.0 {
            return Err(StandingsError::ConfigurationError {
                message: "K factor must be positive".to_string(),
            }
            .into());
        }

        if !(0.0..=1.0).contains(&self.season_revert) {
            return Err(StandingsError::ConfigurationError {
                message: "Season revert must be between 0 and 1".to_string(),
            }
            .into());
        }

        if !self.mean_rating.is_finite() {
            return Err(StandingsError::ConfigurationError {
                message: "Mean rating must be finite".to_string(),
            }
            .into());
        }

        Ok(())
    }
}
