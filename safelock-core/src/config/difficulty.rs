//! Difficulty levels and their tuning tables

/// Degrees of slack around the target that still count as a hit
const TOLERANCE_DEG: [u8; 3] = [12, 8, 5];

/// Degrees the dial advances per sweep step
const SWEEP_SPEED_DEG: [u8; 3] = [1, 2, 3];

/// Round score multiplier
const SCORE_MULTIPLIER: [u32; 3] = [1, 2, 3];

/// Game difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Expert,
}

impl Difficulty {
    /// All levels, easiest first
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Expert];

    /// Look up a level (`0..=2`); `None` for anything else
    pub fn from_level(level: u8) -> Option<Self> {
        Self::ALL.get(level as usize).copied()
    }

    /// Wire level (0, 1 or 2)
    pub const fn level(self) -> u8 {
        self as u8
    }

    /// Hit window in degrees either side of the target
    pub const fn tolerance_deg(self) -> u8 {
        TOLERANCE_DEG[self as usize]
    }

    /// Dial travel per sweep step in degrees
    pub const fn sweep_speed(self) -> u8 {
        SWEEP_SPEED_DEG[self as usize]
    }

    /// Score multiplier applied to a winning round
    pub const fn multiplier(self) -> u32 {
        SCORE_MULTIPLIER[self as usize]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Expert => "expert",
        }
    }
}
