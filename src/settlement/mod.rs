pub mod calculator;

pub use calculator::{is_winning_bet, payout_for, settle, PAYOUT_RATE};
