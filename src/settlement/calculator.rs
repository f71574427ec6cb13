use crate::models::{Bet, Score, SettlementResult};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Share of a winning stake returned to the bettor (0.7)
pub const PAYOUT_RATE: Decimal = Decimal::from_parts(7, 0, 0, false, 1);

/// A bet wins only on an exact match of both sides of the score
pub fn is_winning_bet(declared: Score, predicted: Score) -> bool {
    predicted.home == declared.home && predicted.away == declared.away
}

/// Award for a winning stake given the total staked by all winners
///
/// The award is `floor(amount / pool * pool * 0.7)`. The pool cancels out,
/// so each winner gets 70% of their own stake regardless of how many others
/// won; the pool only guards against an empty winning side.
pub fn payout_for(amount: i64, total_winning_pool: i64) -> i64 {
    if total_winning_pool <= 0 || amount <= 0 {
        return 0;
    }

    (Decimal::from(amount) * PAYOUT_RATE)
        .floor()
        .to_i64()
        .unwrap_or(0)
}

/// Settle every bet on a game against its declared final score.
///
/// Results come back in the same order as `bets`. Losing bets never
/// reach the payout formula.
pub fn settle(declared: Score, bets: &[Bet]) -> Vec<SettlementResult> {
    let total_winning_pool: i64 = bets
        .iter()
        .filter(|bet| is_winning_bet(declared, bet.predicted_score()))
        .map(|bet| bet.amount_bet)
        .sum();

    bets.iter()
        .map(|bet| {
            let is_winner = is_winning_bet(declared, bet.predicted_score());
            let amount_won = if is_winner {
                payout_for(bet.amount_bet, total_winning_pool)
            } else {
                0
            };

            SettlementResult {
                bet_id: bet.id,
                is_winner,
                amount_won,
            }
        })
        .collect()
}
