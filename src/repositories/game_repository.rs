use super::{BetRepository, GameStore};
use crate::error::RepositoryResult;
use crate::models::{Game, NewGame, Score};
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

const GAME_COLUMNS: &str = r#"
    id,
    home_team_name,
    away_team_name,
    home_team_score,
    away_team_score,
    is_finished,
    created_at
"#;

/// Repository for game data access
pub struct GameRepository {
    pool: PgPool,
}

impl GameRepository {
    /// Create a new GameRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GameStore for GameRepository {
    async fn find_all(&self) -> RepositoryResult<Vec<Game>> {
        let games = sqlx::query_as::<_, Game>(&format!(
            "SELECT {} FROM games ORDER BY created_at DESC, id DESC",
            GAME_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(games)
    }

    async fn create(&self, game: &NewGame) -> RepositoryResult<Option<Game>> {
        let created = sqlx::query_as::<_, Game>(&format!(
            r#"
            INSERT INTO games (home_team_name, away_team_name)
            VALUES ($1, $2)
            RETURNING {}
            "#,
            GAME_COLUMNS
        ))
        .bind(&game.home_team_name)
        .bind(&game.away_team_name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(created)
    }

    async fn find_by_id(&self, id: i64, include_bets: bool) -> RepositoryResult<Option<Game>> {
        let game = sqlx::query_as::<_, Game>(&format!(
            "SELECT {} FROM games WHERE id = $1",
            GAME_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match game {
            Some(mut game) if include_bets => {
                game.bets = BetRepository::fetch_by_game(&self.pool, id).await?;
                debug!("Loaded game {} with {} bets", id, game.bets.len());
                Ok(Some(game))
            }
            other => Ok(other),
        }
    }

    async fn finish(&self, id: i64, score: Score) -> RepositoryResult<Option<Game>> {
        // The is_finished guard makes the transition happen at most once
        let game = sqlx::query_as::<_, Game>(&format!(
            r#"
            UPDATE games
            SET home_team_score = $2,
                away_team_score = $3,
                is_finished = TRUE,
                updated_at = NOW()
            WHERE id = $1 AND is_finished = FALSE
            RETURNING {}
            "#,
            GAME_COLUMNS
        ))
        .bind(id)
        .bind(score.home)
        .bind(score.away)
        .fetch_optional(&self.pool)
        .await?;

        Ok(game)
    }
}
