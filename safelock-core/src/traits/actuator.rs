//! Dial actuator trait

use super::HardwareError;

/// Positional actuator turning the dial
///
/// Implemented by hobby-servo drivers. Angles are whole degrees in
/// `0..=180`; implementations reject anything larger.
pub trait Actuator {
    /// Command the dial to `angle` degrees
    fn set_angle(&mut self, angle: u8) -> Result<(), HardwareError>;

    /// Last commanded angle, `None` before the first command
    fn angle(&self) -> Option<u8>;
}
