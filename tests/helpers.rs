#![allow(dead_code)]

use scoreline_backend::models::*;
use scoreline_backend::repositories::*;
use scoreline_backend::AppState;
use sqlx::PgPool;
use std::sync::Arc;

/// Application state over a fresh in-memory store, plus a handle on the store
pub struct TestApp {
    pub store: Arc<InMemoryStore>,
    pub state: AppState,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(InMemoryStore::new());
        let state = AppState::with_stores(store.clone(), store.clone());
        Self { store, state }
    }

    pub async fn game(&self, home: &str, away: &str) -> Game {
        self.state
            .game_service
            .create(NewGame::new(home, away))
            .await
            .expect("Failed to create test game")
    }

    pub async fn bet(&self, game_id: i64, home: i32, away: i32, amount: i64) -> Bet {
        self.state
            .bet_service
            .place(NewBet::new(game_id, Score::new(home, away), amount))
            .await
            .expect("Failed to place test bet")
    }

    pub async fn bet_by_id(&self, id: i64) -> Bet {
        self.store.find_bet(id).await.expect("Bet should exist")
    }
}

/// Postgres-backed repositories sharing one pool
pub struct TestDatabase {
    pub pool: PgPool,
    pub game_repo: Arc<GameRepository>,
    pub bet_repo: Arc<BetRepository>,
}

impl TestDatabase {
    /// Create TestDatabase from an existing pool (useful with sqlx::test)
    pub fn from_pool(pool: PgPool) -> Self {
        Self {
            pool: pool.clone(),
            game_repo: Arc::new(GameRepository::new(pool.clone())),
            bet_repo: Arc::new(BetRepository::new(pool)),
        }
    }

    pub fn app_state(&self) -> AppState {
        AppState::with_stores(self.game_repo.clone(), self.bet_repo.clone())
    }

    /// Clean up all test data
    pub async fn cleanup(&self) {
        sqlx::query("TRUNCATE TABLE bets, games RESTART IDENTITY CASCADE")
            .execute(&self.pool)
            .await
            .expect("Failed to cleanup test data");
    }
}

/// Assert that two games are equal (ignoring timestamps)
pub fn assert_games_equal(game1: &Game, game2: &Game) {
    assert_eq!(game1.id, game2.id);
    assert_eq!(game1.home_team_name, game2.home_team_name);
    assert_eq!(game1.away_team_name, game2.away_team_name);
    assert_eq!(game1.is_finished, game2.is_finished);
    assert_eq!(game1.final_score(), game2.final_score());
}
