//! Effects requested by the engine
//!
//! The engine never touches hardware or the serial port. Each operation
//! appends effects to an [`Outbox`] in the order they must happen; the
//! controller drains the outbox and plays the effects back before it looks
//! at the next command.

use heapless::Vec;
use safelock_protocol::Report;

use crate::animation::Animation;
use crate::feedback::LedPattern;

/// Capacity of an outbox between drains
pub const MAX_EFFECTS: usize = 32;

/// One ordered side effect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Effect {
    /// Send a report line to the host
    Report(Report),
    /// Move the dial
    Servo(u8),
    /// Light exactly these indicators
    Leds(LedPattern),
    /// Play an animation to completion
    Play(Animation),
    /// Block for this many milliseconds
    Pause(u32),
}

/// Ordered queue of pending effects
#[derive(Debug, Default)]
pub struct Outbox {
    effects: Vec<Effect, MAX_EFFECTS>,
    dropped: u16,
}

impl Outbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an effect; counts it as dropped when full
    pub fn push(&mut self, effect: Effect) {
        if self.effects.push(effect).is_err() {
            self.dropped = self.dropped.saturating_add(1);
        }
    }

    pub fn report(&mut self, report: Report) {
        self.push(Effect::Report(report));
    }

    /// Take every pending effect, leaving the outbox empty
    pub fn take(&mut self) -> Vec<Effect, MAX_EFFECTS> {
        core::mem::take(&mut self.effects)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Effect> {
        self.effects.iter()
    }

    /// Pending reports only, in order
    pub fn reports(&self) -> impl Iterator<Item = &Report> {
        self.effects.iter().filter_map(|effect| match effect {
            Effect::Report(report) => Some(report),
            _ => None,
        })
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Effects lost to overflow since the last call; resets the count
    pub fn take_dropped(&mut self) -> u16 {
        core::mem::take(&mut self.dropped)
    }
}
