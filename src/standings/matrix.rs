//! Pairwise win counts between teams
//!
//! Row `a`, column `b` holds the number of times `a` beat `b`. A row sum is a
//! team's total wins; a row sum restricted to a subset of columns gives its
//! wins against that subset, which is all the tiebreak rules ever need.

use crate::error::{Result, StandingsError};
use crate::types::{GameRecord, GameResult, TeamId};
use std::collections::HashMap;

/// Square table of win counts indexed by team on both axes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WinMatrix {
    teams: Vec<TeamId>,
    index: HashMap<TeamId, usize>,
    counts: Vec<u32>,
}

impl WinMatrix {
    /// Build the matrix from decisive games only
    ///
    /// Draws and unplayed games leave every cell untouched. Duplicate team
    /// identifiers, games naming teams outside `teams` and games a team
    /// plays against itself are rejected, so the diagonal stays zero.
    pub fn build<S: AsRef<str>>(teams: &[S], games: &[GameRecord]) -> Result<Self> {
        let mut index = HashMap::with_capacity(teams.len());
        let mut names = Vec::with_capacity(teams.len());

        for team in teams {
            let team = team.as_ref();
            if index.insert(team.to_string(), names.len()).is_some() {
                return Err(StandingsError::DuplicateTeam {
                    team: team.to_string(),
                }
                .into());
            }
            names.push(team.to_string());
        }

        let mut matrix = Self {
            counts: vec![0; names.len() * names.len()],
            teams: names,
            index,
        };

        for game in games {
            let row = matrix.position(&game.team1)?;
            let col = matrix.position(&game.team2)?;
            if row == col {
                return Err(StandingsError::SelfPlay {
                    team: game.team1.clone(),
                }
                .into());
            }

            match game.result1 {
                Some(GameResult::Team1Win) => matrix.increment(row, col),
                Some(GameResult::Team1Loss) => matrix.increment(col, row),
                // draws are not supported in the win count
                Some(GameResult::Draw) | None => {}
            }
        }

        Ok(matrix)
    }

    fn position(&self, team: &str) -> Result<usize> {
        self.index.get(team).copied().ok_or_else(|| {
            StandingsError::UnknownTeam {
                team: team.to_string(),
            }
            .into()
        })
    }

    fn increment(&mut self, row: usize, col: usize) {
        let n = self.teams.len();
        self.counts[row * n + col] += 1;
    }

    fn cell(&self, row: usize, col: usize) -> u32 {
        self.counts[row * self.teams.len() + col]
    }

    /// Teams in the order the matrix was built with
    pub fn teams(&self) -> &[TeamId] {
        &self.teams
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    pub fn contains(&self, team: &str) -> bool {
        self.index.contains_key(team)
    }

    /// Number of times `winner` beat `loser`; unknown teams count as zero
    pub fn wins(&self, winner: &str, loser: &str) -> u32 {
        match (self.index.get(winner), self.index.get(loser)) {
            (Some(&row), Some(&col)) => self.cell(row, col),
            _ => 0,
        }
    }

    /// Row sum over every column
    pub fn total_wins(&self, team: &str) -> u32 {
        let Some(&row) = self.index.get(team) else {
            return 0;
        };
        (0..self.teams.len()).map(|col| self.cell(row, col)).sum()
    }

    /// Row sum restricted to the columns named in `opponents`
    pub fn wins_within<S: AsRef<str>>(&self, team: &str, opponents: &[S]) -> u32 {
        opponents
            .iter()
            .map(|opponent| self.wins(team, opponent.as_ref()))
            .sum()
    }
}
