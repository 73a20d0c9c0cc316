//! Error types for the standings engine
//!
//! Domain failures are expressed as `StandingsError` variants and propagated
//! through the crate as `anyhow` errors so callers can attach context.

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific standings scenarios
#[derive(Debug, thiserror::Error)]
pub enum StandingsError {
    #[error("Duplicate team identifier: {team}")]
    DuplicateTeam { team: String },

    #[error("Game references unknown team: {team}")]
    UnknownTeam { team: String },

    #[error("Team cannot play against itself: {team}")]
    SelfPlay { team: String },

    #[error("Tie could not be resolved for rank {rank} among {contenders:?}")]
    UnresolvedTie { rank: u32, contenders: Vec<String> },

    #[error("Standings invariant violated: {message}")]
    InvariantViolation { message: String },

    #[error("Invalid record at line {line}: {reason}")]
    InvalidRecord { line: u64, reason: String },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },
}
