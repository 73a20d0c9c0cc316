//! Tiebreak rules and the standard cascade
//!
//! Each rule narrows a group of tied contenders. Rules are applied in order
//! until one of them leaves a single team; the rule that did so is recorded
//! as the criterion for that rank.

use crate::standings::matrix::WinMatrix;
use crate::standings::table::Standings;
use crate::types::{TeamId, Tiebreak};
use rand::seq::SliceRandom;
use rand::RngCore;

/// Read-only state a rule may consult while deciding one rank
#[derive(Debug, Clone, Copy)]
pub struct TiebreakContext<'a> {
    /// Pairwise win counts over the full team set
    pub matrix: &'a WinMatrix,
    /// Teams without a rank yet, including every contender
    pub unassigned: &'a [TeamId],
    /// Ranks decided so far in this run
    pub standings: &'a Standings,
}

/// A single level of the tiebreak cascade
pub trait TiebreakRule: Send + Sync + std::fmt::Debug {
    /// Criterion recorded when this rule leaves a single contender
    fn criterion(&self) -> Tiebreak;

    /// Narrow `contenders` to those that survive this rule
    ///
    /// Must return a non-empty subset of `contenders` whenever `contenders`
    /// is non-empty. Returning the input unchanged is a valid pass-through.
    fn narrow(
        &self,
        contenders: &[TeamId],
        ctx: &TiebreakContext<'_>,
        rng: &mut dyn RngCore,
    ) -> Vec<TeamId>;
}

/// Keep the contenders with the highest score, preserving their order
pub fn keep_max<F>(contenders: &[TeamId], mut score: F) -> Vec<TeamId>
where
    F: FnMut(&str) -> u32,
{
    let scored: Vec<(u32, &TeamId)> = contenders
        .iter()
        .map(|team| (score(team.as_str()), team))
        .collect();

    let Some(best) = scored.iter().map(|(s, _)| *s).max() else {
        return Vec::new();
    };

    scored
        .into_iter()
        .filter(|(s, _)| *s == best)
        .map(|(_, team)| team.clone())
        .collect()
}

/// Level 1: most wins against anyone, including teams already ranked
#[derive(Debug, Clone, Copy, Default)]
pub struct TotalWins;

impl TiebreakRule for TotalWins {
    fn criterion(&self) -> Tiebreak {
        Tiebreak::Points
    }

    fn narrow(
        &self,
        contenders: &[TeamId],
        ctx: &TiebreakContext<'_>,
        _rng: &mut dyn RngCore,
    ) -> Vec<TeamId> {
        keep_max(contenders, |team| ctx.matrix.total_wins(team))
    }
}

/// Level 2: most wins in games played among the contenders themselves
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadToHeadWins;

impl TiebreakRule for HeadToHeadWins {
    fn criterion(&self) -> Tiebreak {
        Tiebreak::HeadToHeadPoints
    }

    fn narrow(
        &self,
        contenders: &[TeamId],
        ctx: &TiebreakContext<'_>,
        _rng: &mut dyn RngCore,
    ) -> Vec<TeamId> {
        keep_max(contenders, |team| ctx.matrix.wins_within(team, contenders))
    }
}

/// Levels 3 and 4: most wins against the team holding an earlier rank
///
/// While that rank is still undecided the rule passes every contender
/// through, so a tie for 1st place still walks past levels 3 and 4 before
/// reaching the random draw.
#[derive(Debug, Clone, Copy)]
pub struct VersusPlace {
    rank: u32,
}

impl VersusPlace {
    pub fn first() -> Self {
        Self { rank: 1 }
    }

    pub fn second() -> Self {
        Self { rank: 2 }
    }
}

impl TiebreakRule for VersusPlace {
    fn criterion(&self) -> Tiebreak {
        if self.rank == 1 {
            Tiebreak::VersusFirstPlace
        } else {
            Tiebreak::VersusSecondPlace
        }
    }

    fn narrow(
        &self,
        contenders: &[TeamId],
        ctx: &TiebreakContext<'_>,
        _rng: &mut dyn RngCore,
    ) -> Vec<TeamId> {
        match ctx.standings.team_at(self.rank) {
            Some(placed) => keep_max(contenders, |team| ctx.matrix.wins(team, placed)),
            None => contenders.to_vec(),
        }
    }
}

/// Level 5: uniform random pick, always leaves exactly one team
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomDraw;

impl TiebreakRule for RandomDraw {
    fn criterion(&self) -> Tiebreak {
        Tiebreak::Random
    }

    fn narrow(
        &self,
        contenders: &[TeamId],
        _ctx: &TiebreakContext<'_>,
        rng: &mut dyn RngCore,
    ) -> Vec<TeamId> {
        contenders.choose(rng).cloned().into_iter().collect()
    }
}

/// The five levels in the order they are applied
pub fn standard_cascade() -> Vec<Box<dyn TiebreakRule>> {
    vec![
        Box::new(TotalWins),
        Box::new(HeadToHeadWins),
        Box::new(VersusPlace::first()),
        Box::new(VersusPlace::second()),
        Box::new(RandomDraw),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{GameRecord, GameResult};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn names(teams: &[&str]) -> Vec<TeamId> {
        teams.iter().map(|t| t.to_string()).collect()
    }

    fn win(winner: &str, loser: &str) -> GameRecord {
        GameRecord::new(winner, loser, Some(GameResult::Team1Win))
    }

    /// A and B have two wins each, C has one; A beat B head to head
    fn head_to_head_fixture() -> WinMatrix {
        let games = vec![
            win("A", "B"),
            win("A", "D"),
            win("B", "C"),
            win("B", "D"),
            win("C", "A"),
        ];
        WinMatrix::build(&["A", "B", "C", "D"], &games).unwrap()
    }

    #[test]
    fn test_standard_cascade_order_matches_labels() {
        let criteria: Vec<_> = standard_cascade().iter().map(|r| r.criterion()).collect();
        assert_eq!(criteria, Tiebreak::ALL.to_vec());
    }

    #[test]
    fn test_keep_max_preserves_order() {
        let contenders = names(&["x", "y", "z"]);
        let kept = keep_max(&contenders, |team| if team == "y" { 1 } else { 3 });
        assert_eq!(kept, names(&["x", "z"]));
        assert!(keep_max(&[], |_| 0).is_empty());
    }

    #[test]
    fn test_total_wins_keeps_leaders() {
        let matrix = head_to_head_fixture();
        let unassigned = names(&["A", "B", "C", "D"]);
        let standings = Standings::new();
        let ctx = TiebreakContext {
            matrix: &matrix,
            unassigned: &unassigned,
            standings: &standings,
        };
        let mut rng = StdRng::seed_from_u64(7);

        let kept = TotalWins.narrow(&unassigned, &ctx, &mut rng);
        assert_eq!(kept, names(&["A", "B"]));
    }

    #[test]
    fn test_head_to_head_picks_winner_of_direct_game() {
        let matrix = head_to_head_fixture();
        let unassigned = names(&["A", "B", "C", "D"]);
        let standings = Standings::new();
        let ctx = TiebreakContext {
            matrix: &matrix,
            unassigned: &unassigned,
            standings: &standings,
        };
        let mut rng = StdRng::seed_from_u64(7);

        let kept = HeadToHeadWins.narrow(&names(&["A", "B"]), &ctx, &mut rng);
        assert_eq!(kept, names(&["A"]));
    }

    #[test]
    fn test_versus_place_passes_through_when_rank_undecided() {
        let matrix = head_to_head_fixture();
        let unassigned = names(&["A", "B", "C", "D"]);
        let standings = Standings::new();
        let ctx = TiebreakContext {
            matrix: &matrix,
            unassigned: &unassigned,
            standings: &standings,
        };
        let mut rng = StdRng::seed_from_u64(7);

        let contenders = names(&["C", "D"]);
        assert_eq!(VersusPlace::first().narrow(&contenders, &ctx, &mut rng), contenders);
        assert_eq!(VersusPlace::second().narrow(&contenders, &ctx, &mut rng), contenders);
    }

    #[test]
    fn test_versus_place_uses_ranked_team() {
        let matrix = head_to_head_fixture();
        let unassigned = names(&["B", "C", "D"]);
        let mut standings = Standings::new();
        standings.push("A", Tiebreak::HeadToHeadPoints);
        let ctx = TiebreakContext {
            matrix: &matrix,
            unassigned: &unassigned,
            standings: &standings,
        };
        let mut rng = StdRng::seed_from_u64(7);

        // C beat A, D did not
        let kept = VersusPlace::first().narrow(&names(&["C", "D"]), &ctx, &mut rng);
        assert_eq!(kept, names(&["C"]));

        // Rank 2 is still open, so level 4 changes nothing
        let kept = VersusPlace::second().narrow(&names(&["C", "D"]), &ctx, &mut rng);
        assert_eq!(kept, names(&["C", "D"]));
    }

    #[test]
    fn test_random_draw_returns_one_contender() {
        let matrix = head_to_head_fixture();
        let unassigned = names(&["A", "B", "C", "D"]);
        let standings = Standings::new();
        let ctx = TiebreakContext {
            matrix: &matrix,
            unassigned: &unassigned,
            standings: &standings,
        };
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..20 {
            let kept = RandomDraw.narrow(&unassigned, &ctx, &mut rng);
            assert_eq!(kept.len(), 1);
            assert!(unassigned.contains(&kept[0]));
        }
    }

    #[test]
    fn test_random_draw_covers_every_contender() {
        let matrix = head_to_head_fixture();
        let unassigned = names(&["A", "B", "C"]);
        let standings = Standings::new();
        let ctx = TiebreakContext {
            matrix: &matrix,
            unassigned: &unassigned,
            standings: &standings,
        };
        let mut rng = StdRng::seed_from_u64(1);

        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.extend(RandomDraw.narrow(&unassigned, &ctx, &mut rng));
        }
        assert_eq!(seen.len(), 3);
    }
}
