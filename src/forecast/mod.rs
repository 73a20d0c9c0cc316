//! Elo win-probability forecasts for scheduled and completed games
//!
//! This module walks a game log in order, reporting each game's pre-game
//! ratings and team1 win probability, and updating ratings after every
//! completed game using the skillratings crate.

pub mod elo;

// Re-export commonly used types
pub use elo::{EloForecaster, ForecastRun};
