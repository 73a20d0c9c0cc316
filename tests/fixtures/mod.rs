//! Test fixtures for integration testing

#![allow(dead_code)]

use curling_standings::types::{GameRecord, GameResult};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const TEAMS_CSV: &str = "\
team,elo
RII,1650
STP,1600
BFF,1550
";

/// Three-team season with a clear order and one game still to play
pub const GAMES_CSV: &str = "\
date,season,playoff,team1,team2,result1,elo1,elo2,elo_prob1
2019-01-05,2019,0,RII,STP,1,,,
2019-01-05,2019,0,STP,BFF,1,,,
2019-01-06,2019,0,BFF,RII,0,,,
2019-01-06,2019,0,STP,RII,0.5,,,
2019-01-07,2019,0,BFF,STP,,,,
";

/// Temporary data directory holding a teams file and a games file
pub struct DataDir {
    pub dir: TempDir,
    pub teams: PathBuf,
    pub games: PathBuf,
}

impl DataDir {
    pub fn new(teams_csv: &str, games_csv: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let teams = write_file(dir.path(), "initial_elos.csv", teams_csv);
        let games = write_file(dir.path(), "games.csv", games_csv);
        Self { dir, teams, games }
    }
}

fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    let mut file = std::fs::File::create(&path).expect("create fixture file");
    file.write_all(contents.as_bytes()).expect("write fixture file");
    path
}

pub fn win(winner: &str, loser: &str) -> GameRecord {
    GameRecord::new(winner, loser, Some(GameResult::Team1Win))
}

/// Team names `T0`, `T1`, ...
pub fn team_names(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("T{}", i)).collect()
}

/// One game per pair; `outcome(i, j)` decides the result for `Ti` vs `Tj`
pub fn round_robin<F>(teams: &[String], mut outcome: F) -> Vec<GameRecord>
where
    F: FnMut(usize, usize) -> Option<GameResult>,
{
    let mut games = Vec::new();
    for i in 0..teams.len() {
        for j in (i + 1)..teams.len() {
            games.push(GameRecord::new(
                teams[i].clone(),
                teams[j].clone(),
                outcome(i, j),
            ));
        }
    }
    games
}
