//! Distance-to-target LED feedback
//!
//! The closer the dial is to the hidden target, the "hotter" the lit
//! colors. Five fixed bands, no hysteresis.

use safelock_protocol::Indicator;

/// Upper bound (inclusive) of the green band
pub const HOT_DEG: u8 = 5;
/// Upper bound (inclusive) of the orange+green band
pub const WARM_DEG: u8 = 15;
/// Upper bound (inclusive) of the orange band
pub const TEPID_DEG: u8 = 25;
/// Upper bound (inclusive) of the blue band
pub const COOL_DEG: u8 = 40;

/// Set of lit indicators, one bit per [`Indicator`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LedPattern(u8);

impl LedPattern {
    /// Everything dark
    pub const OFF: LedPattern = LedPattern(0);
    /// Every indicator lit
    pub const ALL: LedPattern = LedPattern(0b1111);

    /// Pattern with a single indicator lit
    pub const fn single(led: Indicator) -> Self {
        LedPattern(1 << led as u8)
    }

    /// This pattern plus `led`
    pub const fn with(self, led: Indicator) -> Self {
        LedPattern(self.0 | (1 << led as u8))
    }

    /// This pattern minus `led`
    pub const fn without(self, led: Indicator) -> Self {
        LedPattern(self.0 & !(1 << led as u8))
    }

    pub const fn is_lit(self, led: Indicator) -> bool {
        self.0 & (1 << led as u8) != 0
    }

    pub const fn is_off(self) -> bool {
        self.0 == 0
    }

    /// Raw bit mask in wiring order
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Indicators lit in this pattern, in wiring order
    pub fn lit(self) -> impl Iterator<Item = Indicator> {
        Indicator::ALL.into_iter().filter(move |led| self.is_lit(*led))
    }
}

/// Feedback band for a distance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Heat {
    Hot,
    Warm,
    Tepid,
    Cool,
    Cold,
}

impl Heat {
    pub fn from_distance(distance: u8) -> Self {
        match distance {
            d if d <= HOT_DEG => Heat::Hot,
            d if d <= WARM_DEG => Heat::Warm,
            d if d <= TEPID_DEG => Heat::Tepid,
            d if d <= COOL_DEG => Heat::Cool,
            _ => Heat::Cold,
        }
    }

    pub fn pattern(self) -> LedPattern {
        match self {
            Heat::Hot => LedPattern::single(Indicator::Green),
            Heat::Warm => LedPattern::single(Indicator::Orange).with(Indicator::Green),
            Heat::Tepid => LedPattern::single(Indicator::Orange),
            Heat::Cool => LedPattern::single(Indicator::Blue),
            Heat::Cold => LedPattern::single(Indicator::Red).with(Indicator::Blue),
        }
    }
}

/// LEDs to show for a dial `distance` degrees away from the target
pub fn pattern_for_distance(distance: u8) -> LedPattern {
    Heat::from_distance(distance).pattern()
}
