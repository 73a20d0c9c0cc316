//! Final standings: one placement per rank, 1st place first

use crate::types::{TeamId, Tiebreak};
use serde::{Deserialize, Serialize};

/// A team's rank and the criterion that decided it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub rank: u32,
    pub team: TeamId,
    pub tiebreak: Tiebreak,
}

/// Ranks 1..N in order, dense and without repeats
///
/// Placements can only be appended, so ranks are always decided in
/// increasing order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standings {
    placements: Vec<Placement>,
}

impl Standings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign the next rank and return it
    pub(crate) fn push(&mut self, team: impl Into<TeamId>, tiebreak: Tiebreak) -> u32 {
        let rank = self.placements.len() as u32 + 1;
        self.placements.push(Placement {
            rank,
            team: team.into(),
            tiebreak,
        });
        rank
    }

    pub fn get(&self, rank: u32) -> Option<&Placement> {
        let index = (rank as usize).checked_sub(1)?;
        self.placements.get(index)
    }

    /// Team holding `rank`, if it has been decided
    pub fn team_at(&self, rank: u32) -> Option<&str> {
        self.get(rank).map(|placement| placement.team.as_str())
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Placement> {
        self.placements.iter()
    }

    /// Team names from 1st to last
    pub fn teams(&self) -> Vec<&str> {
        self.placements.iter().map(|p| p.team.as_str()).collect()
    }
}

impl<'a> IntoIterator for &'a Standings {
    type Item = &'a Placement;
    type IntoIter = std::slice::Iter<'a, Placement>;

    fn into_iter(self) -> Self::IntoIter {
        self.placements.iter()
    }
}
