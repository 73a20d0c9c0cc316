//! Elo forecaster built on the skillratings crate
//!
//! Games are processed in log order. Before each game both teams are
//! reverted toward the mean rating if the game opens a new season for them;
//! the pre-game ratings and team1's win probability are then recorded, and
//! completed games move both ratings by the same amount in opposite
//! directions.

use crate::config::RatingConfig;
use crate::error::{Result, StandingsError};
use crate::types::{ForecastedGame, GameRecord, GameResult, TeamId, TeamRating};
use serde::{Deserialize, Serialize};
use skillratings::elo::{elo, expected_score, EloConfig, EloRating};
use skillratings::Outcomes;
use std::collections::HashMap;
use tracing::debug;

/// Output of a forecasting pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastRun {
    /// Every input game, annotated, in input order
    pub games: Vec<ForecastedGame>,
    /// Ratings after the last completed game, in input team order
    pub final_ratings: Vec<TeamRating>,
}

/// Elo forecaster with season reversion
#[derive(Debug, Clone)]
pub struct EloForecaster {
    config: RatingConfig,
}

impl Default for EloForecaster {
    fn default() -> Self {
        Self {
            config: RatingConfig::default(),
        }
    }
}

impl EloForecaster {
    /// Create a new forecaster
    pub fn new(config: RatingConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self { config })
    }

    pub fn config(&self) -> &RatingConfig {
        &self.config
    }

    /// Probability that a team rated `elo1` beats a team rated `elo2`
    pub fn win_probability(&self, elo1: f64, elo2: f64) -> f64 {
        let (prob1, _) = expected_score(&EloRating { rating: elo1 }, &EloRating { rating: elo2 });
        prob1
    }

    /// Rating after reverting toward the mean at a season boundary
    pub fn revert(&self, elo: f64) -> f64 {
        self.config.mean_rating * self.config.season_revert + elo * (1.0 - self.config.season_revert)
    }

    /// New ratings for both teams after a completed game
    pub fn update(&self, elo1: f64, elo2: f64, result: GameResult) -> (f64, f64) {
        let outcome = match result {
            GameResult::Team1Win => Outcomes::WIN,
            GameResult::Team1Loss => Outcomes::LOSS,
            GameResult::Draw => Outcomes::DRAW,
        };

        let (new1, new2) = elo(
            &EloRating { rating: elo1 },
            &EloRating { rating: elo2 },
            &outcome,
            &EloConfig {
                k: self.config.k_factor,
            },
        );
        (new1.rating, new2.rating)
    }

    /// Forecast every game and return the annotated log with final ratings
    pub fn forecast(&self, teams: &[TeamRating], games: &[GameRecord]) -> Result<ForecastRun> {
        let mut ratings: HashMap<TeamId, TeamRating> = HashMap::with_capacity(teams.len());
        for team in teams {
            if ratings.insert(team.name.clone(), team.clone()).is_some() {
                return Err(StandingsError::DuplicateTeam {
                    team: team.name.clone(),
                }
                .into());
            }
        }

        let mut forecasted = Vec::with_capacity(games.len());

        for game in games {
            if game.team1 == game.team2 {
                return Err(StandingsError::SelfPlay {
                    team: game.team1.clone(),
                }
                .into());
            }

            for name in [&game.team1, &game.team2] {
                let team = ratings
                    .get_mut(name)
                    .ok_or_else(|| StandingsError::UnknownTeam { team: name.clone() })?;

                if let Some(season) = &team.season {
                    if *season != game.season {
                        let reverted = self.revert(team.elo);
                        debug!(
                            "New season {} for {}: {:.1} -> {:.1}",
                            game.season, team.name, team.elo, reverted
                        );
                        team.elo = reverted;
                    }
                }
                team.season = Some(game.season.clone());
            }

            let elo1 = ratings[&game.team1].elo;
            let elo2 = ratings[&game.team2].elo;
            let elo_prob1 = self.win_probability(elo1, elo2);

            if let Some(result) = game.result1 {
                let (new1, new2) = self.update(elo1, elo2, result);
                if let Some(team) = ratings.get_mut(&game.team1) {
                    team.elo = new1;
                }
                if let Some(team) = ratings.get_mut(&game.team2) {
                    team.elo = new2;
                }
            }

            forecasted.push(ForecastedGame {
                game: game.clone(),
                elo1,
                elo2,
                elo_prob1,
            });
        }

        let final_ratings = teams
            .iter()
            .filter_map(|team| ratings.remove(&team.name))
            .collect();

        Ok(ForecastRun {
            games: forecasted,
            final_ratings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn teams() -> Vec<TeamRating> {
        vec![TeamRating::new("RII", 1600.0), TeamRating::new("STP", 1600.0)]
    }

    #[test]
    fn test_equal_ratings_are_even() {
        let forecaster = EloForecaster::default();
        assert!((forecaster.win_probability(1600.0, 1600.0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_win_probability_matches_logistic_curve() {
        let forecaster = EloForecaster::default();
        let expected = 1.0 / (10f64.powf(-200.0 / 400.0) + 1.0);
        assert!((forecaster.win_probability(1700.0, 1500.0) - expected).abs() < 1e-9);
        assert!(forecaster.win_probability(1500.0, 1700.0) < 0.5);
    }

    #[test]
    fn test_update_is_zero_sum() {
        let forecaster = EloForecaster::default();
        let (new1, new2) = forecaster.update(1650.0, 1550.0, GameResult::Team1Loss);

        let prob1 = forecaster.win_probability(1650.0, 1550.0);
        let shift = 20.0 * (0.0 - prob1);
        assert!((new1 - (1650.0 + shift)).abs() < 1e-9);
        assert!((new2 - (1550.0 - shift)).abs() < 1e-9);
        assert!(((new1 + new2) - 3200.0).abs() < 1e-9);
    }

    #[test]
    fn test_completed_game_moves_ratings() {
        let forecaster = EloForecaster::default();
        let games = vec![
            GameRecord::new("RII", "STP", Some(GameResult::Team1Win)).in_season("2019"),
            GameRecord::new("RII", "STP", None).in_season("2019"),
        ];

        let run = forecaster.forecast(&teams(), &games).unwrap();

        assert_eq!(run.games[0].elo1, 1600.0);
        assert_eq!(run.games[0].elo_prob1, 0.5);
        assert!((run.games[1].elo1 - 1610.0).abs() < 1e-9);
        assert!((run.games[1].elo2 - 1590.0).abs() < 1e-9);
        assert!(run.games[1].elo_prob1 > 0.5);

        // the unplayed game does not move anything
        assert!((run.final_ratings[0].elo - 1610.0).abs() < 1e-9);
        assert_eq!(run.final_ratings[0].name, "RII");
    }

    #[test]
    fn test_draw_between_equals_changes_nothing() {
        let forecaster = EloForecaster::default();
        let games = vec![GameRecord::new("RII", "STP", Some(GameResult::Draw)).in_season("2019")];

        let run = forecaster.forecast(&teams(), &games).unwrap();
        assert!((run.final_ratings[0].elo - 1600.0).abs() < 1e-9);
        assert!((run.final_ratings[1].elo - 1600.0).abs() < 1e-9);
    }

    #[test]
    fn test_season_reversion() {
        let forecaster = EloForecaster::default();
        let teams = vec![TeamRating::new("RII", 1900.0), TeamRating::new("STP", 1300.0)];
        let games = vec![
            GameRecord::new("RII", "STP", None).in_season("2018"),
            GameRecord::new("RII", "STP", None).in_season("2019"),
        ];

        let run = forecaster.forecast(&teams, &games).unwrap();

        // first season never reverts
        assert_eq!(run.games[0].elo1, 1900.0);
        assert_eq!(run.games[0].elo2, 1300.0);
        // a third of the way back to 1600
        assert!((run.games[1].elo1 - 1800.0).abs() < 1e-9);
        assert!((run.games[1].elo2 - 1400.0).abs() < 1e-9);
        assert_eq!(run.final_ratings[0].season.as_deref(), Some("2019"));
    }

    #[test]
    fn test_unknown_team_fails() {
        let forecaster = EloForecaster::default();
        let games = vec![GameRecord::new("RII", "BFF", None)];
        assert!(forecaster.forecast(&teams(), &games).is_err());
    }

    #[test]
    fn test_self_play_fails() {
        let forecaster = EloForecaster::default();
        let games = vec![GameRecord::new("RII", "RII", Some(GameResult::Team1Win)).in_season("2019")];

        let err = forecaster.forecast(&teams(), &games).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StandingsError>(),
            Some(StandingsError::SelfPlay { team }) if team == "RII"
        ));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = RatingConfig {
            k_factor: -1.0,
            ..RatingConfig::default()
        };
        assert!(EloForecaster::new(config).is_err());
    }
}
