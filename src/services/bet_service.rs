use crate::error::{option_to_result, AppError, AppResult};
use crate::models::{Bet, NewBet};
use crate::repositories::{BetStore, GameStore};
use std::sync::Arc;
use tracing::info;

fn closed_game() -> AppError {
    AppError::BusinessLogic("Cannot bet on a finished game".to_string())
}

/// Service for placing bets on open games
pub struct BetService {
    game_store: Arc<dyn GameStore>,
    bet_store: Arc<dyn BetStore>,
}

impl BetService {
    pub fn new(game_store: Arc<dyn GameStore>, bet_store: Arc<dyn BetStore>) -> Self {
        Self {
            game_store,
            bet_store,
        }
    }

    /// Place a bet on the exact final score of an unfinished game
    pub async fn place(&self, bet: NewBet) -> AppResult<Bet> {
        bet.validate().map_err(AppError::Validation)?;

        let game = self.game_store.find_by_id(bet.game_id, false).await?;
        let game = option_to_result(game, "Game not found")?;

        if game.is_finished {
            return Err(closed_game());
        }

        // The store re-checks atomically; the game may finish in between
        let placed = self.bet_store.create(&bet).await?.ok_or_else(closed_game)?;
        info!(
            "Bet {} placed on game {}: {} for {}",
            placed.id,
            game.id,
            placed.predicted_score(),
            placed.amount_bet
        );

        Ok(placed)
    }

    /// Bets on a game in placement order
    pub async fn get_by_game(&self, game_id: i64) -> AppResult<Vec<Bet>> {
        Ok(self.bet_store.find_by_game(game_id).await?)
    }
}
