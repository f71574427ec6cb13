//! Domain models for the Scoreline backend.
//!
//! Database-backed records for games and bets, plus the request
//! types used to create and finish them.

pub mod bet;
pub mod game;

// Re-export all models for convenient access
pub use bet::{Bet, BetStatus, NewBet, SettlementResult};
pub use game::{FinishGame, Game, NewGame, Score};
