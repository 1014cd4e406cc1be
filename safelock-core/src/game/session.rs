//! Session and round bookkeeping

use crate::config::Difficulty;

/// Per power-on session state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Session {
    /// Accumulated score, never decreases
    pub score: u32,
    pub attempts_remaining: u8,
    pub attempts_used: u8,
    /// Uptime at power-on (ms)
    pub started_ms: u32,
}

impl Session {
    pub fn new(now_ms: u32, attempts: u8) -> Self {
        Self {
            score: 0,
            attempts_remaining: attempts,
            attempts_used: 0,
            started_ms: now_ms,
        }
    }

    /// Whole seconds since power-on
    pub fn elapsed_s(&self, now_ms: u32) -> u32 {
        now_ms.wrapping_sub(self.started_ms) / 1000
    }

    /// Count a lock-in
    pub fn record_attempt(&mut self) {
        self.attempts_used = self.attempts_used.saturating_add(1);
    }

    /// Spend an attempt on a miss, returning what is left
    pub fn record_miss(&mut self) -> u8 {
        self.attempts_remaining = self.attempts_remaining.saturating_sub(1);
        self.attempts_remaining
    }

    /// Bank a round score, returning the new total
    pub fn add_score(&mut self, points: u32) -> u32 {
        self.score = self.score.saturating_add(points);
        self.score
    }
}

/// Hidden combination for the current round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Round {
    /// Target angle (degrees)
    pub target: u8,
    /// Hit window either side of the target (degrees)
    pub tolerance: u8,
}

impl Round {
    pub fn new(target: u8, difficulty: Difficulty) -> Self {
        Self {
            target,
            tolerance: difficulty.tolerance_deg(),
        }
    }

    /// Degrees between `angle` and the target
    pub fn distance(&self, angle: u8) -> u8 {
        angle.abs_diff(self.target)
    }

    pub fn is_hit(&self, angle: u8) -> bool {
        self.distance(angle) <= self.tolerance
    }
}
