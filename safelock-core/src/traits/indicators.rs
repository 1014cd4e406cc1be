//! Status LED trait

use super::HardwareError;
use crate::feedback::LedPattern;

/// Bank of the four status indicators
pub trait Indicators {
    /// Light exactly the indicators in `pattern`
    fn show(&mut self, pattern: LedPattern) -> Result<(), HardwareError>;

    /// Pattern currently shown
    fn pattern(&self) -> LedPattern;
}
