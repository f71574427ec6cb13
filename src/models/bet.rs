use super::Score;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Settlement status of a bet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BetStatus {
    Pending,
    Won,
    Lost,
}

impl BetStatus {
    /// Convert from database string
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(BetStatus::Pending),
            "won" => Ok(BetStatus::Won),
            "lost" => Ok(BetStatus::Lost),
            _ => Err(format!("Invalid bet status: {}", s)),
        }
    }

    /// Convert to database string
    pub fn as_str(&self) -> &'static str {
        match self {
            BetStatus::Pending => "pending",
            BetStatus::Won => "won",
            BetStatus::Lost => "lost",
        }
    }
}

impl From<BetStatus> for String {
    fn from(status: BetStatus) -> Self {
        status.as_str().to_string()
    }
}

/// Bet on the exact final score of a game
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Bet {
    pub id: i64,
    pub game_id: i64,
    pub home_team_score: i32,
    pub away_team_score: i32,
    /// Stake in the smallest currency unit
    pub amount_bet: i64,
    pub status: String, // Stored as TEXT, use BetStatus for type safety
    pub amount_won: Option<i64>,
    pub created_at: NaiveDateTime,
}

impl Bet {
    /// Create a pending bet
    pub fn new(id: i64, game_id: i64, predicted: Score, amount_bet: i64) -> Self {
        Self {
            id,
            game_id,
            home_team_score: predicted.home,
            away_team_score: predicted.away,
            amount_bet,
            status: BetStatus::Pending.as_str().to_string(),
            amount_won: None,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }

    pub fn predicted_score(&self) -> Score {
        Score::new(self.home_team_score, self.away_team_score)
    }

    /// Get status as an enum
    pub fn status_enum(&self) -> BetStatus {
        BetStatus::from_str(&self.status).unwrap_or(BetStatus::Pending)
    }

    pub fn is_settled(&self) -> bool {
        self.status_enum() != BetStatus::Pending
    }

    /// Write a settlement outcome into this bet
    pub fn apply(&mut self, result: &SettlementResult) {
        self.status = result.status().as_str().to_string();
        self.amount_won = Some(result.amount_won);
    }
}

/// Input for placing a bet
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBet {
    pub game_id: i64,
    pub home_team_score: i32,
    pub away_team_score: i32,
    pub amount_bet: i64,
}

impl NewBet {
    pub fn new(game_id: i64, predicted: Score, amount_bet: i64) -> Self {
        Self {
            game_id,
            home_team_score: predicted.home,
            away_team_score: predicted.away,
            amount_bet,
        }
    }

    pub fn predicted_score(&self) -> Score {
        Score::new(self.home_team_score, self.away_team_score)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.amount_bet <= 0 {
            return Err("Bet amount must be greater than zero".to_string());
        }
        self.predicted_score().validate()
    }
}

/// Outcome of settling one bet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementResult {
    pub bet_id: i64,
    pub is_winner: bool,
    pub amount_won: i64,
}

impl SettlementResult {
    pub fn status(&self) -> BetStatus {
        if self.is_winner {
            BetStatus::Won
        } else {
            BetStatus::Lost
        }
    }
}
