//! Scoreline Backend Library
//!
//! Games, exact-score bets, and the settlement that pays out winning
//! bets once a game's final score is declared.

pub mod config;
pub mod database;
pub mod error;
pub mod models;
pub mod repositories;
pub mod services;
pub mod settlement;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::{AppError, AppResult, ErrorKind};

use database::Database;
use repositories::{BetRepository, BetStore, GameRepository, GameStore, InMemoryStore};
use services::{BetService, GameService};
use std::sync::Arc;

/// Application state containing the stores and the services built on them
pub struct AppState {
    pub game_store: Arc<dyn GameStore>,
    pub bet_store: Arc<dyn BetStore>,
    pub game_service: GameService,
    pub bet_service: BetService,
}

impl AppState {
    /// Create a new AppState backed by Postgres
    pub fn new(database: Database) -> Self {
        let pool = database.into_pool();
        Self::with_stores(
            Arc::new(GameRepository::new(pool.clone())),
            Arc::new(BetRepository::new(pool)),
        )
    }

    /// Create an AppState over a single in-memory store
    pub fn in_memory() -> Self {
        let store = Arc::new(InMemoryStore::new());
        Self::with_stores(store.clone(), store)
    }

    pub fn with_stores(game_store: Arc<dyn GameStore>, bet_store: Arc<dyn BetStore>) -> Self {
        Self {
            game_service: GameService::new(game_store.clone(), bet_store.clone()),
            bet_service: BetService::new(game_store.clone(), bet_store.clone()),
            game_store,
            bet_store,
        }
    }
}
