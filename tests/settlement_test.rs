mod helpers;

use async_trait::async_trait;
use helpers::*;
use scoreline_backend::error::RepositoryResult;
use scoreline_backend::models::*;
use scoreline_backend::repositories::{BetStore, GameStore, InMemoryStore};
use scoreline_backend::{AppState, ErrorKind};
use std::sync::Arc;
use tokio_test::{assert_err, assert_ok};

/// Delegates to an in-memory store, running a hook right before
/// `finish` or right after `find_by_id`, to force an interleaving.
struct Interleaved {
    inner: Arc<InMemoryStore>,
    bet_before_finish: Option<NewBet>,
    finish_after_lookup: Option<Score>,
}

impl Interleaved {
    fn new(inner: Arc<InMemoryStore>) -> Self {
        Self {
            inner,
            bet_before_finish: None,
            finish_after_lookup: None,
        }
    }
}

#[async_trait]
impl GameStore for Interleaved {
    async fn find_all(&self) -> RepositoryResult<Vec<Game>> {
        self.inner.find_all().await
    }

    async fn create(&self, game: &NewGame) -> RepositoryResult<Option<Game>> {
        GameStore::create(&*self.inner, game).await
    }

    async fn find_by_id(&self, id: i64, include_bets: bool) -> RepositoryResult<Option<Game>> {
        let game = self.inner.find_by_id(id, include_bets).await?;
        if let Some(score) = self.finish_after_lookup {
            self.inner.finish(id, score).await?;
        }
        Ok(game)
    }

    async fn finish(&self, id: i64, score: Score) -> RepositoryResult<Option<Game>> {
        if let Some(bet) = &self.bet_before_finish {
            BetStore::create(&*self.inner, bet).await?;
        }
        self.inner.finish(id, score).await
    }
}

/// Store that accepts writes but never hands a record back
struct NoRecordStore;

#[async_trait]
impl GameStore for NoRecordStore {
    async fn find_all(&self) -> RepositoryResult<Vec<Game>> {
        Ok(Vec::new())
    }

    async fn create(&self, _game: &NewGame) -> RepositoryResult<Option<Game>> {
        Ok(None)
    }

    async fn find_by_id(&self, _id: i64, _include_bets: bool) -> RepositoryResult<Option<Game>> {
        Ok(None)
    }

    async fn finish(&self, _id: i64, _score: Score) -> RepositoryResult<Option<Game>> {
        Ok(None)
    }
}

// ============================================================================
// Game lifecycle
// ============================================================================

#[tokio::test]
async fn test_create_and_get_game() {
    let app = TestApp::new();
    let created = app.game("Lions", "Tigers").await;

    let found = assert_ok!(app.state.game_service.get_by_id(created.id).await);
    assert_games_equal(&created, &found);
    assert!(!found.is_finished);
    assert!(found.bets.is_empty());
}

#[tokio::test]
async fn test_get_all_newest_first() {
    let app = TestApp::new();
    let first = app.game("A", "B").await;
    let second = app.game("C", "D").await;

    let games = assert_ok!(app.state.game_service.get_all().await);
    let ids: Vec<i64> = games.iter().map(|g| g.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);
}

#[tokio::test]
async fn test_create_rejects_blank_team() {
    let app = TestApp::new();
    let err = assert_err!(app.state.game_service.create(NewGame::new("", "Tigers")).await);
    assert_eq!(err.kind(), ErrorKind::BadRequest);
}

#[tokio::test]
async fn test_create_without_stored_record_is_internal() {
    let state = AppState::with_stores(Arc::new(NoRecordStore), Arc::new(InMemoryStore::new()));

    let err = assert_err!(state.game_service.create(NewGame::new("Lions", "Tigers")).await);
    assert_eq!(err.kind(), ErrorKind::Internal);
    assert_eq!(err.status_code(), 500);
    assert!(err.to_string().contains("Game not created"));
}

#[tokio::test]
async fn test_get_missing_game() {
    let app = TestApp::new();
    let err = assert_err!(app.state.game_service.get_by_id(404).await);
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(err.status_code(), 404);
}

// ============================================================================
// Finishing and settlement
// ============================================================================

#[tokio::test]
async fn test_finish_settles_winners_and_losers() {
    let app = TestApp::new();
    let game = app.game("Lions", "Tigers").await;
    let winner = app.bet(game.id, 2, 1, 100).await;
    let loser = app.bet(game.id, 1, 1, 50).await;

    let settlement = assert_ok!(
        app.state
            .game_service
            .finish(game.id, FinishGame::new(2, 1))
            .await
    );

    assert_eq!(settlement.game.final_score(), Some(Score::new(2, 1)));
    assert_eq!(
        settlement.results,
        vec![
            SettlementResult {
                bet_id: winner.id,
                is_winner: true,
                amount_won: 70,
            },
            SettlementResult {
                bet_id: loser.id,
                is_winner: false,
                amount_won: 0,
            },
        ]
    );

    let winner = app.bet_by_id(winner.id).await;
    assert_eq!(winner.status_enum(), BetStatus::Won);
    assert_eq!(winner.amount_won, Some(70));

    let loser = app.bet_by_id(loser.id).await;
    assert_eq!(loser.status_enum(), BetStatus::Lost);
    assert_eq!(loser.amount_won, Some(0));
}

#[tokio::test]
async fn test_finish_without_bets() {
    let app = TestApp::new();
    let game = app.game("Lions", "Tigers").await;

    let settlement = assert_ok!(
        app.state
            .game_service
            .finish(game.id, FinishGame::new(0, 0))
            .await
    );

    assert!(settlement.results.is_empty());
    assert_eq!(settlement.total_awarded(), 0);
    // a 0-0 final score is valid
    assert_eq!(settlement.game.final_score(), Some(Score::new(0, 0)));
}

#[tokio::test]
async fn test_finish_with_no_winners() {
    let app = TestApp::new();
    let game = app.game("Lions", "Tigers").await;
    let bet = app.bet(game.id, 1, 0, 40).await;

    let settlement = assert_ok!(
        app.state
            .game_service
            .finish(game.id, FinishGame::new(3, 2))
            .await
    );

    assert_eq!(settlement.winners().count(), 0);
    assert_eq!(
        settlement.results,
        vec![SettlementResult {
            bet_id: bet.id,
            is_winner: false,
            amount_won: 0,
        }]
    );
}

#[tokio::test]
async fn test_multiple_winners_paid_on_own_stake() {
    let app = TestApp::new();
    let game = app.game("Lions", "Tigers").await;
    let small = app.bet(game.id, 1, 1, 100).await;
    let large = app.bet(game.id, 1, 1, 200).await;

    let settlement = assert_ok!(
        app.state
            .game_service
            .finish(game.id, FinishGame::new(1, 1))
            .await
    );

    assert_eq!(settlement.total_awarded(), 210);
    assert_eq!(app.bet_by_id(small.id).await.amount_won, Some(70));
    assert_eq!(app.bet_by_id(large.id).await.amount_won, Some(140));
}

#[tokio::test]
async fn test_finish_only_settles_own_bets() {
    let app = TestApp::new();
    let game = app.game("Lions", "Tigers").await;
    let other = app.game("Bears", "Wolves").await;
    app.bet(game.id, 1, 0, 10).await;
    let untouched = app.bet(other.id, 1, 0, 10).await;

    assert_ok!(
        app.state
            .game_service
            .finish(game.id, FinishGame::new(1, 0))
            .await
    );

    assert!(!app.bet_by_id(untouched.id).await.is_settled());
}

#[tokio::test]
async fn test_bet_placed_while_finishing_is_settled() {
    let store = Arc::new(InMemoryStore::new());
    let game = GameStore::create(&*store, &NewGame::new("Lions", "Tigers"))
        .await
        .unwrap()
        .unwrap();

    let mut games = Interleaved::new(store.clone());
    games.bet_before_finish = Some(NewBet::new(game.id, Score::new(1, 0), 1000));
    let state = AppState::with_stores(Arc::new(games), store.clone());

    let settlement = assert_ok!(state.game_service.finish(game.id, FinishGame::new(1, 0)).await);
    assert_eq!(settlement.results.len(), 1);
    assert_eq!(settlement.total_awarded(), 700);

    let bets = assert_ok!(store.find_by_game(game.id).await);
    assert_eq!(bets.len(), 1);
    assert_eq!(bets[0].status_enum(), BetStatus::Won);
    assert_eq!(bets[0].amount_won, Some(700));
}

#[tokio::test]
async fn test_bet_refused_when_game_finishes_after_check() {
    let store = Arc::new(InMemoryStore::new());
    let game = GameStore::create(&*store, &NewGame::new("Lions", "Tigers"))
        .await
        .unwrap()
        .unwrap();

    let mut games = Interleaved::new(store.clone());
    games.finish_after_lookup = Some(Score::new(2, 0));
    let state = AppState::with_stores(Arc::new(games), store.clone());

    let err = assert_err!(
        state
            .bet_service
            .place(NewBet::new(game.id, Score::new(2, 0), 50))
            .await
    );
    assert_eq!(err.kind(), ErrorKind::BadRequest);
    assert!(assert_ok!(store.find_by_game(game.id).await).is_empty());
}

#[tokio::test]
async fn test_finish_missing_game() {
    let app = TestApp::new();
    let err = assert_err!(app.state.game_service.finish(7, FinishGame::new(1, 0)).await);
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_finish_twice_rejected() {
    let app = TestApp::new();
    let game = app.game("Lions", "Tigers").await;
    let bet = app.bet(game.id, 2, 2, 100).await;

    assert_ok!(
        app.state
            .game_service
            .finish(game.id, FinishGame::new(2, 2))
            .await
    );

    let err = assert_err!(
        app.state
            .game_service
            .finish(game.id, FinishGame::new(0, 0))
            .await
    );
    assert_eq!(err.kind(), ErrorKind::BadRequest);

    // the first settlement stands
    let game = assert_ok!(app.state.game_service.get_by_id(game.id).await);
    assert_eq!(game.final_score(), Some(Score::new(2, 2)));
    assert_eq!(app.bet_by_id(bet.id).await.amount_won, Some(70));
}

#[tokio::test]
async fn test_finish_rejects_invalid_score() {
    let app = TestApp::new();
    let game = app.game("Lions", "Tigers").await;

    let missing = FinishGame {
        home_team_score: Some(1),
        away_team_score: None,
    };
    let err = assert_err!(app.state.game_service.finish(game.id, missing).await);
    assert_eq!(err.kind(), ErrorKind::BadRequest);

    let err = assert_err!(
        app.state
            .game_service
            .finish(game.id, FinishGame::new(-1, 0))
            .await
    );
    assert_eq!(err.kind(), ErrorKind::BadRequest);

    // nothing was persisted
    let game = assert_ok!(app.state.game_service.get_by_id(game.id).await);
    assert!(!game.is_finished);
}

// ============================================================================
// Betting
// ============================================================================

#[tokio::test]
async fn test_bet_on_finished_game_rejected() {
    let app = TestApp::new();
    let game = app.game("Lions", "Tigers").await;
    assert_ok!(
        app.state
            .game_service
            .finish(game.id, FinishGame::new(1, 0))
            .await
    );

    let err = assert_err!(
        app.state
            .bet_service
            .place(NewBet::new(game.id, Score::new(1, 0), 10))
            .await
    );
    assert_eq!(err.kind(), ErrorKind::BadRequest);
}

#[tokio::test]
async fn test_bet_validation() {
    let app = TestApp::new();
    let game = app.game("Lions", "Tigers").await;

    let err = assert_err!(
        app.state
            .bet_service
            .place(NewBet::new(game.id, Score::new(1, 0), 0))
            .await
    );
    assert_eq!(err.kind(), ErrorKind::BadRequest);

    let err = assert_err!(
        app.state
            .bet_service
            .place(NewBet::new(999, Score::new(1, 0), 10))
            .await
    );
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_bets_listed_in_placement_order() {
    let app = TestApp::new();
    let game = app.game("Lions", "Tigers").await;
    let first = app.bet(game.id, 0, 0, 10).await;
    let second = app.bet(game.id, 3, 1, 20).await;

    let bets = assert_ok!(app.state.bet_service.get_by_game(game.id).await);
    let ids: Vec<i64> = bets.iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![first.id, second.id]);
}
