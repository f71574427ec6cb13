use crate::error::{option_to_result, AppError, AppResult};
use crate::models::{FinishGame, Game, NewGame, SettlementResult};
use crate::repositories::{BetStore, GameStore};
use crate::settlement;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

/// Finished game together with how each of its bets was settled
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Settlement {
    pub game: Game,
    pub results: Vec<SettlementResult>,
}

impl Settlement {
    pub fn winners(&self) -> impl Iterator<Item = &SettlementResult> {
        self.results.iter().filter(|r| r.is_winner)
    }

    pub fn total_awarded(&self) -> i64 {
        self.results.iter().map(|r| r.amount_won).sum()
    }
}

/// Service for managing games and settling them
pub struct GameService {
    game_store: Arc<dyn GameStore>,
    bet_store: Arc<dyn BetStore>,
}

impl GameService {
    pub fn new(game_store: Arc<dyn GameStore>, bet_store: Arc<dyn BetStore>) -> Self {
        Self {
            game_store,
            bet_store,
        }
    }

    /// List all games
    pub async fn get_all(&self) -> AppResult<Vec<Game>> {
        Ok(self.game_store.find_all().await?)
    }

    /// Create a new game
    pub async fn create(&self, game: NewGame) -> AppResult<Game> {
        game.validate().map_err(AppError::Validation)?;

        let created = self
            .game_store
            .create(&game)
            .await?
            .ok_or_else(|| AppError::Internal("Game not created".to_string()))?;

        info!(
            "Created game {}: {} vs {}",
            created.id, created.home_team_name, created.away_team_name
        );
        Ok(created)
    }

    /// Get a game by id
    pub async fn get_by_id(&self, id: i64) -> AppResult<Game> {
        let game = self.game_store.find_by_id(id, false).await?;
        option_to_result(game, "Game not found")
    }

    /// Finish a game with its final score and settle every bet placed on it
    pub async fn finish(&self, id: i64, request: FinishGame) -> AppResult<Settlement> {
        let current = self.game_store.find_by_id(id, false).await?;
        let current = option_to_result(current, "Game not found")?;

        if current.is_finished {
            return Err(AppError::BusinessLogic("Game is already finished".to_string()));
        }

        let score = request.to_score().map_err(|e| {
            warn!("Rejected final score for game {}: {}", id, e);
            AppError::Validation("Invalid game data provided".to_string())
        })?;

        let game = self
            .game_store
            .finish(id, score)
            .await?
            .ok_or_else(|| AppError::BusinessLogic("Game is already finished".to_string()))?;

        // Read bets only once the game is closed to new ones
        let bets = self.bet_store.find_by_game(id).await?;
        let results = settlement::settle(score, &bets);
        self.bet_store.update_winners_and_losers(&results).await?;

        let settlement = Settlement { game, results };
        info!(
            "Game {} finished {}: {} bets, {} winners, {} awarded",
            id,
            score,
            settlement.results.len(),
            settlement.winners().count(),
            settlement.total_awarded()
        );

        Ok(settlement)
    }
}
