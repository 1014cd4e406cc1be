//! Effect playback
//!
//! The [`Rig`] owns the servo, the LEDs and a delay source, and carries
//! out the effects the game engine queues. Reports are handed back to the
//! caller, which owns the serial link. Animations and pauses block for
//! their full length.

use embedded_hal_async::delay::DelayNs;
use safelock_core::animation::Animation;
use safelock_core::config::GameConfig;
use safelock_core::game::Effect;
use safelock_core::traits::{Actuator, HardwareError, Indicators};
use safelock_protocol::Report;

/// Servo, LEDs and timing for one dial
pub struct Rig<A, I, D> {
    actuator: A,
    indicators: I,
    delay: D,
    config: GameConfig,
}

impl<A, I, D> Rig<A, I, D>
where
    A: Actuator,
    I: Indicators,
    D: DelayNs,
{
    pub fn new(actuator: A, indicators: I, delay: D, config: GameConfig) -> Self {
        Self {
            actuator,
            indicators,
            delay,
            config,
        }
    }

    pub fn actuator(&self) -> &A {
        &self.actuator
    }

    pub fn indicators(&self) -> &I {
        &self.indicators
    }

    /// Carry out one effect
    ///
    /// Returns the report to transmit, if the effect is one. Hardware errors
    /// do not cut an animation short; the first one is returned once it
    /// finishes.
    pub async fn execute(&mut self, effect: Effect) -> Result<Option<Report>, HardwareError> {
        match effect {
            Effect::Report(report) => return Ok(Some(report)),
            Effect::Servo(angle) => self.actuator.set_angle(angle)?,
            Effect::Leds(pattern) => self.indicators.show(pattern)?,
            Effect::Play(animation) => self.play(animation).await?,
            Effect::Pause(ms) => self.delay.delay_ms(ms).await,
        }
        Ok(None)
    }

    /// Play an animation to the end
    pub async fn play(&mut self, animation: Animation) -> Result<(), HardwareError> {
        let mut first_error = None;

        for step in animation.script(&self.config) {
            if let Some(angle) = step.servo {
                if let Err(e) = self.actuator.set_angle(angle) {
                    first_error.get_or_insert(e);
                }
            }
            if let Some(leds) = step.leds {
                if let Err(e) = self.indicators.show(leds) {
                    first_error.get_or_insert(e);
                }
            }
            if step.hold_ms > 0 {
                self.delay.delay_ms(step.hold_ms as u32).await;
            }
        }

        first_error.map_or(Ok(()), Err)
    }
}
