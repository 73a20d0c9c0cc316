//! Text and JSON rendering of standings

use crate::error::Result;
use crate::standings::Standings;
use crate::types::ForecastedGame;

/// One line per rank: `1. RII (by points)`
pub fn format_standings(standings: &Standings) -> String {
    standings
        .iter()
        .map(|placement| {
            format!(
                "{}. {} ({})",
                placement.rank,
                placement.team,
                placement.tiebreak.label()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Pretty-printed JSON array of placements
pub fn standings_json(standings: &Standings) -> Result<String> {
    let placements: Vec<_> = standings.iter().collect();
    Ok(serde_json::to_string_pretty(&placements)?)
}

/// Summary of a forecast run for the console
pub fn format_forecast_summary(games: &[ForecastedGame]) -> String {
    let played = games.iter().filter(|g| g.game.is_played()).count();
    let upcoming: Vec<String> = games
        .iter()
        .filter(|g| !g.game.is_played())
        .map(|g| {
            format!(
                "{} vs {}: {:.1}%",
                g.game.team1,
                g.game.team2,
                g.elo_prob1 * 100.0
            )
        })
        .collect();

    let mut lines = vec![format!(
        "{} games forecasted ({} played, {} upcoming)",
        games.len(),
        played,
        upcoming.len()
    )];
    lines.extend(upcoming);
    lines.join("\n")
}
