//! Curling Standings - round-robin rankings and Elo forecasts
//!
//! This crate ranks teams from a log of pairwise game results using a
//! cascade of tiebreakers, and forecasts game outcomes with an Elo model.

pub mod config;
pub mod error;
pub mod forecast;
pub mod records;
pub mod report;
pub mod standings;
pub mod types;

// Re-export commonly used types and traits
pub use error::{Result, StandingsError};
pub use types::*;

// Re-export key components
pub use forecast::EloForecaster;
pub use standings::{compute_standings, Standings, StandingsResolver, WinMatrix};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
