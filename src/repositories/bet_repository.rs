use super::BetStore;
use crate::error::RepositoryResult;
use crate::models::{Bet, NewBet, SettlementResult};
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

const BET_COLUMNS: &str = r#"
    id,
    game_id,
    home_team_score,
    away_team_score,
    amount_bet,
    status,
    amount_won,
    created_at
"#;

/// Repository for bet data access
pub struct BetRepository {
    pool: PgPool,
}

impl BetRepository {
    /// Create a new BetRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) async fn fetch_by_game(pool: &PgPool, game_id: i64) -> RepositoryResult<Vec<Bet>> {
        let bets = sqlx::query_as::<_, Bet>(&format!(
            "SELECT {} FROM bets WHERE game_id = $1 ORDER BY id ASC",
            BET_COLUMNS
        ))
        .bind(game_id)
        .fetch_all(pool)
        .await?;

        Ok(bets)
    }
}

#[async_trait]
impl BetStore for BetRepository {
    async fn create(&self, bet: &NewBet) -> RepositoryResult<Option<Bet>> {
        let mut tx = self.pool.begin().await?;

        // Share lock on the game row: a concurrent finish waits for this
        // insert to commit, so it always sees the bet.
        let open: Option<i64> = sqlx::query_scalar(
            "SELECT id FROM games WHERE id = $1 AND is_finished = FALSE FOR SHARE",
        )
        .bind(bet.game_id)
        .fetch_optional(&mut *tx)
        .await?;

        if open.is_none() {
            debug!("Refused bet on closed or missing game {}", bet.game_id);
            return Ok(None);
        }

        let created = sqlx::query_as::<_, Bet>(&format!(
            r#"
            INSERT INTO bets (game_id, home_team_score, away_team_score, amount_bet)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            BET_COLUMNS
        ))
        .bind(bet.game_id)
        .bind(bet.home_team_score)
        .bind(bet.away_team_score)
        .bind(bet.amount_bet)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(created))
    }

    async fn find_by_game(&self, game_id: i64) -> RepositoryResult<Vec<Bet>> {
        Self::fetch_by_game(&self.pool, game_id).await
    }

    async fn update_winners_and_losers(
        &self,
        results: &[SettlementResult],
    ) -> RepositoryResult<()> {
        if results.is_empty() {
            return Ok(());
        }

        let mut tx = self.pool.begin().await?;

        for result in results {
            sqlx::query(
                r#"
                UPDATE bets
                SET status = $2, amount_won = $3, updated_at = NOW()
                WHERE id = $1
                "#,
            )
            .bind(result.bet_id)
            .bind(result.status().as_str())
            .bind(result.amount_won)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        debug!("Stored settlement for {} bets", results.len());

        Ok(())
    }
}
