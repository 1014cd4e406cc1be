//! Round scoring
//!
//! `round = (BASE_SCORE + accuracy + time bonus) * difficulty multiplier`.
//! All integer math; divisions truncate.

use crate::config::Difficulty;

/// Points for any winning round
pub const BASE_SCORE: u32 = 100;

/// Accuracy points for a dead-center lock-in
pub const ACCURACY_BONUS: u32 = 30;

/// Time bonus for a lock-in at zero seconds
pub const TIME_BONUS: u32 = 50;

/// Seconds after which the time bonus is gone
pub const TIME_BONUS_WINDOW_S: u32 = 30;

/// Components of a round score, all pre-multiplier except `total`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScoreBreakdown {
    pub accuracy: u32,
    pub time_bonus: u32,
    pub total: u32,
}

/// Accuracy points: maps `0..=tolerance` linearly onto `ACCURACY_BONUS..=0`
pub fn accuracy_score(distance: u8, tolerance: u8) -> u32 {
    if distance >= tolerance {
        // Also covers a zero tolerance with a non-zero distance
        return if distance == 0 { ACCURACY_BONUS } else { 0 };
    }
    ACCURACY_BONUS - ACCURACY_BONUS * distance as u32 / tolerance as u32
}

/// Time bonus for a lock-in `elapsed_s` seconds into the session
pub fn time_bonus(elapsed_s: u32) -> u32 {
    if elapsed_s >= TIME_BONUS_WINDOW_S {
        return 0;
    }
    TIME_BONUS * (TIME_BONUS_WINDOW_S - elapsed_s) / TIME_BONUS_WINDOW_S
}

/// Score a winning lock-in
pub fn score_round(
    distance: u8,
    tolerance: u8,
    elapsed_s: u32,
    difficulty: Difficulty,
) -> ScoreBreakdown {
    let accuracy = accuracy_score(distance, tolerance);
    let time_bonus = time_bonus(elapsed_s);
    let total = (BASE_SCORE + accuracy + time_bonus) * difficulty.multiplier();

    ScoreBreakdown {
        accuracy,
        time_bonus,
        total,
    }
}
