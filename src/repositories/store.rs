//! Store interfaces used by the services.
//!
//! Postgres-backed repositories implement these for the running service;
//! `InMemoryStore` implements both for tests and local tooling.

use crate::error::RepositoryResult;
use crate::models::{Bet, Game, NewBet, NewGame, Score, SettlementResult};
use async_trait::async_trait;

/// Game persistence
#[async_trait]
pub trait GameStore: Send + Sync {
    /// All games, newest first
    async fn find_all(&self) -> RepositoryResult<Vec<Game>>;

    /// Insert a game. `None` means the store produced no record.
    async fn create(&self, game: &NewGame) -> RepositoryResult<Option<Game>>;

    /// Look up a game, optionally with its bets attached
    async fn find_by_id(&self, id: i64, include_bets: bool) -> RepositoryResult<Option<Game>>;

    /// Mark an unfinished game finished with the declared score.
    /// `None` when the game is missing or already finished.
    async fn finish(&self, id: i64, score: Score) -> RepositoryResult<Option<Game>>;
}

/// Bet persistence
#[async_trait]
pub trait BetStore: Send + Sync {
    /// Insert a bet if its game exists and is still open. `None` when the
    /// game is missing or already finished; the check and the insert are
    /// one step, so no bet lands on a game after it finished.
    async fn create(&self, bet: &NewBet) -> RepositoryResult<Option<Bet>>;

    /// Bets on a game in placement order
    async fn find_by_game(&self, game_id: i64) -> RepositoryResult<Vec<Bet>>;

    /// Write winner/loser status and awarded amounts
    async fn update_winners_and_losers(
        &self,
        results: &[SettlementResult],
    ) -> RepositoryResult<()>;
}
