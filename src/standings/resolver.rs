//! Rank resolution over a tiebreak cascade
//!
//! Ranks are decided one at a time from 1st to last. For every rank the
//! cascade starts over with all unassigned teams and applies its rules in
//! order until a single contender remains. Later rules may look at ranks
//! already decided in the same run, which is why the order matters.

use crate::error::{Result, StandingsError};
use crate::standings::matrix::WinMatrix;
use crate::standings::table::Standings;
use crate::standings::tiebreak::{standard_cascade, TiebreakContext, TiebreakRule};
use crate::types::{GameRecord, TeamId, Tiebreak};
use rand::{Rng, RngCore};
use std::collections::HashSet;
use tracing::{debug, info};

/// Assigns ranks by walking an ordered list of tiebreak rules
#[derive(Debug)]
pub struct StandingsResolver {
    rules: Vec<Box<dyn TiebreakRule>>,
}

impl Default for StandingsResolver {
    fn default() -> Self {
        Self::new(standard_cascade())
    }
}

impl StandingsResolver {
    /// Create a resolver over a custom cascade
    ///
    /// The cascade should end in a rule that always leaves a single team;
    /// otherwise a tie that survives every rule fails the run.
    pub fn new(rules: Vec<Box<dyn TiebreakRule>>) -> Self {
        Self { rules }
    }

    /// Criteria of the configured rules, in application order
    pub fn criteria(&self) -> Vec<Tiebreak> {
        self.rules.iter().map(|rule| rule.criterion()).collect()
    }

    /// Build the win matrix for `teams` and rank every team
    pub fn compute_standings<S, R>(
        &self,
        teams: &[S],
        games: &[GameRecord],
        rng: &mut R,
    ) -> Result<Standings>
    where
        S: AsRef<str>,
        R: Rng,
    {
        let matrix = WinMatrix::build(teams, games)?;
        self.resolve(&matrix, rng)
    }

    /// Rank every team of an already built matrix
    pub fn resolve<R: Rng>(&self, matrix: &WinMatrix, rng: &mut R) -> Result<Standings> {
        let mut unassigned: Vec<TeamId> = matrix.teams().to_vec();
        let mut standings = Standings::new();

        for rank in 1..=matrix.len() as u32 {
            let (team, tiebreak) = self.decide_rank(rank, matrix, &unassigned, &standings, rng)?;

            debug!("Rank {}: {} ({})", rank, team, tiebreak);
            unassigned.retain(|candidate| candidate != &team);
            standings.push(team, tiebreak);
        }

        verify_standings(matrix, &unassigned, &standings)?;

        info!("Computed standings for {} teams", standings.len());
        Ok(standings)
    }

    /// Run the cascade for a single rank
    fn decide_rank(
        &self,
        rank: u32,
        matrix: &WinMatrix,
        unassigned: &[TeamId],
        standings: &Standings,
        rng: &mut dyn RngCore,
    ) -> Result<(TeamId, Tiebreak)> {
        let ctx = TiebreakContext {
            matrix,
            unassigned,
            standings,
        };
        let mut contenders = unassigned.to_vec();

        for rule in &self.rules {
            contenders = rule.narrow(&contenders, &ctx, rng);

            match contenders.as_slice() {
                [team] => return Ok((team.clone(), rule.criterion())),
                [] => {
                    return Err(StandingsError::InvariantViolation {
                        message: format!(
                            "rule '{}' eliminated every contender for rank {}",
                            rule.criterion(),
                            rank
                        ),
                    }
                    .into())
                }
                tied => debug!(
                    "Rank {}: {} teams still tied after '{}'",
                    rank,
                    tied.len(),
                    rule.criterion()
                ),
            }
        }

        Err(StandingsError::UnresolvedTie { rank, contenders }.into())
    }
}

/// Every team ranked exactly once and every rank filled
fn verify_standings(
    matrix: &WinMatrix,
    unassigned: &[TeamId],
    standings: &Standings,
) -> Result<()> {
    if !unassigned.is_empty() {
        return Err(StandingsError::InvariantViolation {
            message: format!("teams left without a rank: {:?}", unassigned),
        }
        .into());
    }

    if standings.len() != matrix.len() {
        return Err(StandingsError::InvariantViolation {
            message: format!(
                "{} ranks filled for {} teams",
                standings.len(),
                matrix.len()
            ),
        }
        .into());
    }

    let mut seen = HashSet::with_capacity(standings.len());
    for (expected, placement) in (1u32..).zip(standings.iter()) {
        if placement.rank != expected {
            return Err(StandingsError::InvariantViolation {
                message: format!("rank {} missing", expected),
            }
            .into());
        }
        if !matrix.contains(&placement.team) || !seen.insert(placement.team.as_str()) {
            return Err(StandingsError::InvariantViolation {
                message: format!("team {} ranked more than once", placement.team),
            }
            .into());
        }
    }

    Ok(())
}

/// Rank `teams` from `games` with the standard cascade
pub fn compute_standings<S, R>(teams: &[S], games: &[GameRecord], rng: &mut R) -> Result<Standings>
where
    S: AsRef<str>,
    R: Rng,
{
    StandingsResolver::default().compute_standings(teams, games, rng)
}
