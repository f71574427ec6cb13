//! Scoreline operator CLI
//!
//! Creates games, places bets, and finishes games against the
//! Postgres database configured through the environment.

use anyhow::Context;
use clap::{Parser, Subcommand};
use scoreline_backend::config::AppConfig;
use scoreline_backend::database::Database;
use scoreline_backend::models::{FinishGame, NewBet, NewGame, Score};
use scoreline_backend::{AppError, AppResult, AppState};
use std::path::Path;
use serde::Serialize;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "scoreline")]
#[command(about = "Manage games and settle exact-score bets", long_about = None)]
struct Cli {
    /// Directory holding SQL migrations
    #[arg(long, default_value = "./migrations")]
    migrations: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all games
    Games,

    /// Show a single game
    Game {
        id: i64,
    },

    /// Create a new game
    CreateGame {
        /// Home team name
        #[arg(long)]
        home: String,

        /// Away team name
        #[arg(long)]
        away: String,
    },

    /// Bet on the exact final score of a game
    Bet {
        #[arg(long)]
        game: i64,

        /// Predicted home score
        #[arg(long)]
        home: i32,

        /// Predicted away score
        #[arg(long)]
        away: i32,

        /// Stake in the smallest currency unit
        #[arg(long)]
        amount: i64,
    },

    /// Finish a game with its final score and settle its bets
    Finish {
        id: i64,

        /// Final home score
        #[arg(long)]
        home: i32,

        /// Final away score
        #[arg(long)]
        away: i32,
    },
}

fn print_json<T: Serialize>(value: &T) -> AppResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run(cli: Cli, state: &AppState) -> AppResult<()> {
    match cli.command {
        Commands::Games => print_json(&state.game_service.get_all().await?),
        Commands::Game { id } => print_json(&state.game_service.get_by_id(id).await?),
        Commands::CreateGame { home, away } => {
            print_json(&state.game_service.create(NewGame::new(home, away)).await?)
        }
        Commands::Bet {
            game,
            home,
            away,
            amount,
        } => {
            let bet = NewBet::new(game, Score::new(home, away), amount);
            print_json(&state.bet_service.place(bet).await?)
        }
        Commands::Finish { id, home, away } => {
            let settlement = state
                .game_service
                .finish(id, FinishGame::new(home, away))
                .await?;
            print_json(&settlement)
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables first
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let config = AppConfig::from_env().map_err(AppError::Config)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                let level = &config.log_level;
                format!("scoreline_backend={level},scoreline={level},sqlx=warn").into()
            }),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Environment: {}", config.environment);

    let database = Database::connect(&config.database, Path::new(&cli.migrations))
        .await
        .map_err(|e| {
            if e.is_connection_error() {
                error!("Database unreachable, check DATABASE_URL: {}", e);
            }
            e
        })
        .context("Failed to open database")?;

    let state = AppState::new(database);

    if let Err(e) = run(cli, &state).await {
        error!("{:?} ({}): {}", e.kind(), e.status_code(), e);
        return Err(e.into());
    }

    Ok(())
}
