//! Command line entry point for the curling standings tool
//!
//! `standings` ranks teams from the completed games of a round-robin log;
//! `forecast` annotates every game with Elo ratings and win probabilities.

use anyhow::Result;
use clap::{Parser, Subcommand};
use curling_standings::config::{validate_config, AppConfig};
use curling_standings::forecast::EloForecaster;
use curling_standings::records;
use curling_standings::report;
use curling_standings::standings::StandingsResolver;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Curling Standings - round-robin rankings and Elo forecasts
#[derive(Parser)]
#[command(
    name = "curling-standings",
    version,
    about = "Round-robin standings with cascading tiebreakers and Elo game forecasts"
)]
struct Args {
    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        global = true,
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Teams file override
    #[arg(
        short,
        long,
        value_name = "FILE",
        global = true,
        help = "CSV of teams and initial Elo ratings"
    )]
    teams: Option<PathBuf>,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        global = true,
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Enable debug mode
    #[arg(short, long, global = true, help = "Enable debug mode with verbose logging")]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Rank teams from completed games
    Standings {
        /// Games history CSV
        games: PathBuf,

        /// Seed for the random tiebreak
        #[arg(long, value_name = "SEED")]
        seed: Option<u64>,

        /// Print standings as JSON
        #[arg(long)]
        json: bool,
    },
    /// Forecast win probabilities and save the annotated games
    Forecast {
        /// Games history CSV
        games: PathBuf,

        /// Output path, defaults to `<games>.forecasted.csv`
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Load and merge configuration from file, environment and CLI arguments
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }

    if args.debug {
        config.service.log_level = "debug".to_string();
    }

    if let Some(teams) = &args.teams {
        config.data.teams_file = teams.clone();
    }

    if let Command::Standings {
        seed: Some(seed), ..
    } = &args.command
    {
        config.standings.tiebreak_seed = Some(*seed);
    }

    validate_config(&config)?;
    Ok(config)
}

fn run_standings(config: &AppConfig, games_path: &Path, json: bool) -> Result<()> {
    let teams = records::read_initial_ratings(&config.data.teams_file)?;
    let games = records::read_games(games_path)?;
    info!("Loaded {} teams and {} games", teams.len(), games.len());

    let names: Vec<&str> = teams.iter().map(|team| team.name.as_str()).collect();
    let mut rng = match config.standings.tiebreak_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let standings = StandingsResolver::default().compute_standings(&names, &games, &mut rng)?;

    if json {
        println!("{}", report::standings_json(&standings)?);
    } else {
        println!("{}", report::format_standings(&standings));
    }
    Ok(())
}

fn run_forecast(config: &AppConfig, games_path: &Path, output: Option<PathBuf>) -> Result<()> {
    let teams = records::read_initial_ratings(&config.data.teams_file)?;
    let games = records::read_games(games_path)?;

    let forecaster = EloForecaster::new(config.elo.clone())?;
    let run = forecaster.forecast(&teams, &games)?;

    let output = output.unwrap_or_else(|| records::forecast_output_path(games_path));
    records::write_forecast(&output, &run.games)?;

    println!("{}", report::format_forecast_summary(&run.games));
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    let outcome = match args.command {
        Command::Standings { games, json, .. } => run_standings(&config, &games, json),
        Command::Forecast { games, output } => run_forecast(&config, &games, output),
    };

    if let Err(e) = outcome {
        error!("{:#}", e);
        std::process::exit(1);
    }
    Ok(())
}
