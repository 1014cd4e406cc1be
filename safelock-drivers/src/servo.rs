//! Hobby servo driver
//!
//! SG90-class servos expect a pulse every 20 ms whose width encodes the
//! angle: 500 µs at 0° up to 2500 µs at 180°. The PWM channel must already
//! run at 50 Hz; this driver only sets the duty cycle.

use embedded_hal::pwm::SetDutyCycle;
use safelock_core::config::MAX_ANGLE;
use safelock_core::traits::{Actuator, HardwareError};

/// PWM period at 50 Hz (µs)
pub const PERIOD_US: u16 = 20_000;

/// Pulse width at 0° (µs)
pub const MIN_PULSE_US: u16 = 500;

/// Pulse width at 180° (µs)
pub const MAX_PULSE_US: u16 = 2_500;

/// Pulse width for `angle` degrees, clamped to the servo range
pub fn pulse_width_us(angle: u8) -> u16 {
    let angle = angle.min(MAX_ANGLE) as u32;
    let span = (MAX_PULSE_US - MIN_PULSE_US) as u32;
    MIN_PULSE_US + (span * angle / MAX_ANGLE as u32) as u16
}

/// Servo on a PWM channel
pub struct ServoDriver<P> {
    pwm: P,
    angle: Option<u8>,
}

impl<P: SetDutyCycle> ServoDriver<P> {
    /// Wrap a PWM channel configured for a 20 ms period
    ///
    /// The output stays as the channel left it until the first command.
    pub fn new(pwm: P) -> Self {
        Self { pwm, angle: None }
    }
}

impl<P: SetDutyCycle> Actuator for ServoDriver<P> {
    fn set_angle(&mut self, angle: u8) -> Result<(), HardwareError> {
        if angle > MAX_ANGLE {
            return Err(HardwareError::AngleOutOfRange);
        }
        self.pwm
            .set_duty_cycle_fraction(pulse_width_us(angle), PERIOD_US)
            .map_err(|_| HardwareError::Pwm)?;
        self.angle = Some(angle);
        Ok(())
    }

    fn angle(&self) -> Option<u8> {
        self.angle
    }
}
