//! Hardware abstraction traits
//!
//! These traits define the interface between the game logic and the
//! board-specific servo and LED drivers.

pub mod actuator;
pub mod indicators;

pub use actuator::Actuator;
pub use indicators::Indicators;

/// Errors reported by output drivers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HardwareError {
    /// Angle outside what the actuator can reach
    AngleOutOfRange,
    /// Underlying PWM channel refused the duty cycle
    Pwm,
    /// Underlying GPIO refused the write
    Gpio,
}
