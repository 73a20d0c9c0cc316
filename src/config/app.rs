//! Main application configuration
//!
//! This module defines the configuration structures for the standings tool,
//! including TOML file loading, environment variable overrides and
//! validation.

use crate::config::rating::RatingConfig;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub data: DataSettings,
    /// Elo forecaster parameters, the `[elo]` table
    pub elo: RatingConfig,
    pub standings: StandingsSettings,
}

/// Service-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

/// Input file locations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    /// CSV of teams and their initial Elo ratings
    pub teams_file: PathBuf,
}

/// Standings-specific settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StandingsSettings {
    /// Seed for the random tiebreak; unseeded runs draw from the OS
    pub tiebreak_seed: Option<u64>,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            teams_file: PathBuf::from("data/initial_elos.csv"),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file, then apply environment overrides
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let mut config: AppConfig = toml::from_str(&contents)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Ok(log_level) = env::var("LOG_LEVEL") {
            self.service.log_level = log_level;
        }
        if let Ok(teams_file) = env::var("TEAMS_FILE") {
            self.data.teams_file = PathBuf::from(teams_file);
        }

        if let Ok(k) = env::var("ELO_K") {
            self.elo.k_factor = k
                .parse()
                .map_err(|_| anyhow!("Invalid ELO_K value: {}", k))?;
        }
        if let Ok(revert) = env::var("ELO_REVERT") {
            self.elo.season_revert = revert
                .parse()
                .map_err(|_| anyhow!("Invalid ELO_REVERT value: {}", revert))?;
        }
        if let Ok(mean) = env::var("ELO_MEAN") {
            self.elo.mean_rating = mean
                .parse()
                .map_err(|_| anyhow!("Invalid ELO_MEAN value: {}", mean))?;
        }

        if let Ok(seed) = env::var("TIEBREAK_SEED") {
            self.standings.tiebreak_seed = Some(
                seed.parse()
                    .map_err(|_| anyhow!("Invalid TIEBREAK_SEED value: {}", seed))?,
            );
        }

        Ok(())
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    // Validate log level
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    if config.data.teams_file.as_os_str().is_empty() {
        return Err(anyhow!("Teams file cannot be empty"));
    }

    config.elo.validate()?;

    Ok(())
}
