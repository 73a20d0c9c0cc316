//! Common types shared by the standings engine and the forecaster

use serde::{Deserialize, Serialize};

/// Unique identifier for a team
pub type TeamId = String;

/// Outcome of a game from team1's point of view
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameResult {
    Team1Win,
    Team1Loss,
    Draw,
}

impl GameResult {
    /// Map a numeric team1 score back to a result
    pub fn from_score(score: f64) -> Option<Self> {
        if score == 1.0 {
            Some(GameResult::Team1Win)
        } else if score == 0.0 {
            Some(GameResult::Team1Loss)
        } else if score == 0.5 {
            Some(GameResult::Draw)
        } else {
            None
        }
    }
}

impl std::fmt::Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameResult::Team1Win => write!(f, "1"),
            GameResult::Team1Loss => write!(f, "0"),
            GameResult::Draw => write!(f, "0.5"),
        }
    }
}

/// A single scheduled or completed game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub date: String,
    pub season: String,
    pub playoff: String,
    pub team1: TeamId,
    pub team2: TeamId,
    /// `None` while the game has not been played
    pub result1: Option<GameResult>,
}

impl GameRecord {
    /// Create a game with only the fields the standings engine reads
    pub fn new(
        team1: impl Into<TeamId>,
        team2: impl Into<TeamId>,
        result1: Option<GameResult>,
    ) -> Self {
        Self {
            date: String::new(),
            season: String::new(),
            playoff: String::new(),
            team1: team1.into(),
            team2: team2.into(),
            result1,
        }
    }

    /// Builder-style season setter, used by the forecaster's reversion logic
    pub fn in_season(mut self, season: impl Into<String>) -> Self {
        self.season = season.into();
        self
    }

    pub fn is_played(&self) -> bool {
        self.result1.is_some()
    }
}

/// Criterion that decided a rank
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tiebreak {
    #[serde(rename = "by points")]
    Points,
    #[serde(rename = "by head-to-head points")]
    HeadToHeadPoints,
    #[serde(rename = "by vs-1st-place")]
    VersusFirstPlace,
    #[serde(rename = "by vs-2nd-place")]
    VersusSecondPlace,
    #[serde(rename = "by random")]
    Random,
}

impl Tiebreak {
    /// All criteria in the order they are applied
    pub const ALL: [Tiebreak; 5] = [
        Tiebreak::Points,
        Tiebreak::HeadToHeadPoints,
        Tiebreak::VersusFirstPlace,
        Tiebreak::VersusSecondPlace,
        Tiebreak::Random,
    ];

    /// Report label; consumers match on these strings verbatim
    pub fn label(self) -> &'static str {
        match self {
            Tiebreak::Points => "by points",
            Tiebreak::HeadToHeadPoints => "by head-to-head points",
            Tiebreak::VersusFirstPlace => "by vs-1st-place",
            Tiebreak::VersusSecondPlace => "by vs-2nd-place",
            Tiebreak::Random => "by random",
        }
    }

    /// 1-based level number
    pub fn level(self) -> usize {
        match self {
            Tiebreak::Points => 1,
            Tiebreak::HeadToHeadPoints => 2,
            Tiebreak::VersusFirstPlace => 3,
            Tiebreak::VersusSecondPlace => 4,
            Tiebreak::Random => 5,
        }
    }
}

impl std::fmt::Display for Tiebreak {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A team's rating as tracked by the forecaster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamRating {
    pub name: TeamId,
    pub elo: f64,
    /// Season of the team's most recent game, used for between-season reversion
    pub season: Option<String>,
}

impl TeamRating {
    pub fn new(name: impl Into<TeamId>, elo: f64) -> Self {
        Self {
            name: name.into(),
            elo,
            season: None,
        }
    }
}

/// A game annotated with pre-game ratings and team1's win probability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastedGame {
    pub game: GameRecord,
    pub elo1: f64,
    pub elo2: f64,
    pub elo_prob1: f64,
}
