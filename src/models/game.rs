use super::Bet;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Final (or predicted) score of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Score {
    pub home: i32,
    pub away: i32,
}

impl Score {
    pub fn new(home: i32, away: i32) -> Self {
        Self { home, away }
    }

    /// Both sides must be non-negative
    pub fn validate(&self) -> Result<(), String> {
        if self.home < 0 || self.away < 0 {
            return Err(format!("Scores must be non-negative, got {}", self));
        }
        Ok(())
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.home, self.away)
    }
}

/// Game model. Scores stay at 0 until the game is finished.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: i64,
    pub home_team_name: String,
    pub away_team_name: String,
    pub home_team_score: i32,
    pub away_team_score: i32,
    pub is_finished: bool,
    pub created_at: NaiveDateTime,
    /// Only populated when the game is loaded with its bets
    #[sqlx(skip)]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bets: Vec<Bet>,
}

impl Game {
    /// Create an unfinished game with zeroed scores
    pub fn new(id: i64, home_team_name: String, away_team_name: String) -> Self {
        Self {
            id,
            home_team_name,
            away_team_name,
            home_team_score: 0,
            away_team_score: 0,
            is_finished: false,
            created_at: chrono::Utc::now().naive_utc(),
            bets: Vec::new(),
        }
    }

    /// Declared final score, if the game is finished
    pub fn final_score(&self) -> Option<Score> {
        self.is_finished
            .then(|| Score::new(self.home_team_score, self.away_team_score))
    }

    /// Mark finished with the declared score
    pub fn finish(&mut self, score: Score) {
        self.home_team_score = score.home;
        self.away_team_score = score.away;
        self.is_finished = true;
    }
}

/// Input for creating a game
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGame {
    pub home_team_name: String,
    pub away_team_name: String,
}

impl NewGame {
    pub fn new(home_team_name: impl Into<String>, away_team_name: impl Into<String>) -> Self {
        Self {
            home_team_name: home_team_name.into(),
            away_team_name: away_team_name.into(),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.home_team_name.trim().is_empty() || self.away_team_name.trim().is_empty() {
            return Err("Team names must not be empty".to_string());
        }
        Ok(())
    }
}

/// Input for finishing a game. Fields are optional so absent scores
/// can be reported instead of failing deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinishGame {
    pub home_team_score: Option<i32>,
    pub away_team_score: Option<i32>,
}

impl FinishGame {
    pub fn new(home_team_score: i32, away_team_score: i32) -> Self {
        Self {
            home_team_score: Some(home_team_score),
            away_team_score: Some(away_team_score),
        }
    }

    /// Turn the request into a declared score
    pub fn to_score(&self) -> Result<Score, String> {
        match (self.home_team_score, self.away_team_score) {
            (Some(home), Some(away)) => {
                let score = Score::new(home, away);
                score.validate()?;
                Ok(score)
            }
            _ => Err("Both home and away scores are required".to_string()),
        }
    }
}
