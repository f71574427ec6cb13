use super::{BetStore, GameStore};
use crate::error::{RepositoryError, RepositoryResult};
use crate::models::{Bet, Game, NewBet, NewGame, Score, SettlementResult};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Default)]
struct State {
    games: BTreeMap<i64, Game>,
    bets: BTreeMap<i64, Bet>,
    next_game_id: i64,
    next_bet_id: i64,
}

/// Process-local game and bet store
#[derive(Default)]
pub struct InMemoryStore {
    state: RwLock<State>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a single bet
    pub async fn find_bet(&self, id: i64) -> Option<Bet> {
        self.state.read().await.bets.get(&id).cloned()
    }
}

#[async_trait]
impl GameStore for InMemoryStore {
    async fn find_all(&self) -> RepositoryResult<Vec<Game>> {
        let state = self.state.read().await;
        // ids are handed out in creation order
        Ok(state.games.values().rev().cloned().collect())
    }

    async fn create(&self, game: &NewGame) -> RepositoryResult<Option<Game>> {
        let mut state = self.state.write().await;
        state.next_game_id += 1;
        let id = state.next_game_id;

        let created = Game::new(id, game.home_team_name.clone(), game.away_team_name.clone());
        state.games.insert(id, created.clone());

        Ok(Some(created))
    }

    async fn find_by_id(&self, id: i64, include_bets: bool) -> RepositoryResult<Option<Game>> {
        let state = self.state.read().await;
        let Some(game) = state.games.get(&id) else {
            return Ok(None);
        };

        let mut game = game.clone();
        if include_bets {
            game.bets = state
                .bets
                .values()
                .filter(|bet| bet.game_id == id)
                .cloned()
                .collect();
        }

        Ok(Some(game))
    }

    async fn finish(&self, id: i64, score: Score) -> RepositoryResult<Option<Game>> {
        let mut state = self.state.write().await;
        match state.games.get_mut(&id) {
            Some(game) if !game.is_finished => {
                game.finish(score);
                Ok(Some(game.clone()))
            }
            _ => Ok(None),
        }
    }
}

#[async_trait]
impl BetStore for InMemoryStore {
    async fn create(&self, bet: &NewBet) -> RepositoryResult<Option<Bet>> {
        let mut state = self.state.write().await;
        let open = state
            .games
            .get(&bet.game_id)
            .is_some_and(|game| !game.is_finished);
        if !open {
            return Ok(None);
        }

        state.next_bet_id += 1;
        let id = state.next_bet_id;

        let created = Bet::new(id, bet.game_id, bet.predicted_score(), bet.amount_bet);
        state.bets.insert(id, created.clone());

        Ok(Some(created))
    }

    async fn find_by_game(&self, game_id: i64) -> RepositoryResult<Vec<Bet>> {
        let state = self.state.read().await;
        Ok(state
            .bets
            .values()
            .filter(|bet| bet.game_id == game_id)
            .cloned()
            .collect())
    }

    async fn update_winners_and_losers(
        &self,
        results: &[SettlementResult],
    ) -> RepositoryResult<()> {
        let mut state = self.state.write().await;

        // Check every id first so a bad batch leaves nothing applied
        if let Some(missing) = results.iter().find(|r| !state.bets.contains_key(&r.bet_id)) {
            return Err(RepositoryError::NotFound(format!(
                "Bet {} not found",
                missing.bet_id
            )));
        }

        for result in results {
            if let Some(bet) = state.bets.get_mut(&result.bet_id) {
                bet.apply(result);
            }
        }

        Ok(())
    }
}
