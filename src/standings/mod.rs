//! Round-robin standings with cascading tiebreakers
//!
//! This module turns a game log into a total order of teams. Wins are
//! tallied into a `WinMatrix`, then the `StandingsResolver` assigns ranks
//! from 1st to last, breaking ties with an ordered list of `TiebreakRule`s.

pub mod matrix;
pub mod resolver;
pub mod table;
pub mod tiebreak;

// Re-export commonly used types
pub use matrix::WinMatrix;
pub use resolver::{compute_standings, StandingsResolver};
pub use table::{Placement, Standings};
pub use tiebreak::{standard_cascade, TiebreakContext, TiebreakRule};
