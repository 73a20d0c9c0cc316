//! CSV loading and saving of team ratings and game logs
//!
//! Ratings files carry a `team,elo` header. Game logs carry
//! `date,season,playoff,team1,team2,result1,elo1,elo2,elo_prob1`; an empty
//! `result1` marks a game that has not been played yet.

use crate::error::{Result, StandingsError};
use crate::types::{ForecastedGame, GameRecord, GameResult, TeamRating};
use anyhow::Context;
use serde::Deserialize;
use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;

/// Column order of game logs, both read and written
pub const GAME_FIELDS: [&str; 9] = [
    "date",
    "season",
    "playoff",
    "team1",
    "team2",
    "result1",
    "elo1",
    "elo2",
    "elo_prob1",
];

#[derive(Debug, Deserialize)]
struct TeamRow {
    team: String,
    elo: f64,
}

#[derive(Debug, Deserialize)]
struct GameRow {
    #[serde(default)]
    date: String,
    #[serde(default)]
    season: String,
    #[serde(default)]
    playoff: String,
    team1: String,
    team2: String,
    result1: Option<f64>,
}

/// Read initial ratings, keeping file order
pub fn read_initial_ratings(path: &Path) -> Result<Vec<TeamRating>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open ratings file: {}", path.display()))?;
    read_initial_ratings_from(file)
}

/// Read initial ratings from any CSV source
pub fn read_initial_ratings_from<R: io::Read>(source: R) -> Result<Vec<TeamRating>> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(source);
    let mut seen = HashSet::new();
    let mut teams = Vec::new();

    for (i, row) in reader.deserialize::<TeamRow>().enumerate() {
        let line = i as u64 + 2;
        let row = row.map_err(|e| StandingsError::InvalidRecord {
            line,
            reason: e.to_string(),
        })?;

        if !seen.insert(row.team.clone()) {
            return Err(StandingsError::DuplicateTeam { team: row.team }.into());
        }
        teams.push(TeamRating::new(row.team, row.elo));
    }

    Ok(teams)
}

/// Read a game log
pub fn read_games(path: &Path) -> Result<Vec<GameRecord>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open games file: {}", path.display()))?;
    read_games_from(file)
}

/// Read a game log from any CSV source
pub fn read_games_from<R: io::Read>(source: R) -> Result<Vec<GameRecord>> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(source);
    let mut games = Vec::new();

    for (i, row) in reader.deserialize::<GameRow>().enumerate() {
        let line = i as u64 + 2;
        let row = row.map_err(|e| StandingsError::InvalidRecord {
            line,
            reason: e.to_string(),
        })?;

        let result1 = match row.result1 {
            Some(score) => Some(GameResult::from_score(score).ok_or_else(|| {
                StandingsError::InvalidRecord {
                    line,
                    reason: format!("result1 must be 1, 0 or 0.5, got {}", score),
                }
            })?),
            None => None,
        };

        games.push(GameRecord {
            date: row.date,
            season: row.season,
            playoff: row.playoff,
            team1: row.team1,
            team2: row.team2,
            result1,
        });
    }

    Ok(games)
}

/// Default destination for a forecast of `games_path`
pub fn forecast_output_path(games_path: &Path) -> PathBuf {
    let mut name = games_path.as_os_str().to_os_string();
    name.push(".forecasted.csv");
    PathBuf::from(name)
}

/// Write forecasted games with ratings rounded to five decimals
pub fn write_forecast(path: &Path, games: &[ForecastedGame]) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create forecast file: {}", path.display()))?;
    write_forecast_to(file, games)?;

    info!("Games data saved to {}", path.display());
    Ok(())
}

/// Write forecasted games to any CSV sink
pub fn write_forecast_to<W: io::Write>(sink: W, games: &[ForecastedGame]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(sink);
    writer.write_record(GAME_FIELDS)?;

    for forecast in games {
        let game = &forecast.game;
        let result1 = game.result1.map(|r| r.to_string()).unwrap_or_default();

        writer.write_record([
            game.date.as_str(),
            game.season.as_str(),
            game.playoff.as_str(),
            game.team1.as_str(),
            game.team2.as_str(),
            result1.as_str(),
            format!("{:.5}", forecast.elo1).as_str(),
            format!("{:.5}", forecast.elo2).as_str(),
            format!("{:.5}", forecast.elo_prob1).as_str(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}
