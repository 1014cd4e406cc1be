//! Indicator LED bank
//!
//! Four GPIO outputs driving the orange, red, green and blue LEDs, active
//! high.

use embedded_hal::digital::OutputPin;
use safelock_core::feedback::LedPattern;
use safelock_core::traits::{HardwareError, Indicators};
use safelock_protocol::Indicator;

/// Four LEDs on GPIO outputs
pub struct LedBank<P> {
    /// Pins in [`Indicator`] wiring order
    pins: [P; 4],
    pattern: LedPattern,
}

impl<P: OutputPin> LedBank<P> {
    /// Take the pins in wiring order: orange, red, green, blue
    ///
    /// Pins are expected to start low.
    pub fn new(pins: [P; 4]) -> Self {
        Self {
            pins,
            pattern: LedPattern::OFF,
        }
    }

    /// Drive one LED without touching the others
    pub fn set(&mut self, led: Indicator, on: bool) -> Result<(), HardwareError> {
        let pin = &mut self.pins[led.index()];
        let result = if on { pin.set_high() } else { pin.set_low() };
        result.map_err(|_| HardwareError::Gpio)?;

        self.pattern = if on {
            self.pattern.with(led)
        } else {
            self.pattern.without(led)
        };
        Ok(())
    }
}

impl<P: OutputPin> Indicators for LedBank<P> {
    fn show(&mut self, pattern: LedPattern) -> Result<(), HardwareError> {
        for led in Indicator::ALL {
            self.set(led, pattern.is_lit(led))?;
        }
        Ok(())
    }

    fn pattern(&self) -> LedPattern {
        self.pattern
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::digital::{ErrorKind, ErrorType};

    #[derive(Default)]
    struct MockPin {
        high: bool,
    }

    impl ErrorType for MockPin {
        type Error = Infallible;
    }

    impl OutputPin for MockPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.high = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.high = true;
            Ok(())
        }
    }

    struct BrokenPin;

    impl ErrorType for BrokenPin {
        type Error = ErrorKind;
    }

    impl OutputPin for BrokenPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            Err(ErrorKind::Other)
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            Err(ErrorKind::Other)
        }
    }

    fn levels(bank: &LedBank<MockPin>) -> [bool; 4] {
        [0, 1, 2, 3].map(|i| bank.pins[i].high)
    }

    #[test]
    fn test_show_drives_pins() {
        let mut bank: LedBank<MockPin> = LedBank::new(Default::default());

        let pattern = LedPattern::single(Indicator::Red).with(Indicator::Blue);
        bank.show(pattern).unwrap();
        assert_eq!(levels(&bank), [false, true, false, true]);
        assert_eq!(bank.pattern(), pattern);

        bank.show(LedPattern::single(Indicator::Green)).unwrap();
        assert_eq!(levels(&bank), [false, false, true, false]);

        bank.show(LedPattern::OFF).unwrap();
        assert_eq!(levels(&bank), [false; 4]);
        assert_eq!(bank.pattern(), LedPattern::OFF);
    }

    #[test]
    fn test_single_led() {
        let mut bank: LedBank<MockPin> = LedBank::new(Default::default());
        bank.set(Indicator::Orange, true).unwrap();
        bank.set(Indicator::Green, true).unwrap();
        bank.set(Indicator::Orange, false).unwrap();
        assert_eq!(bank.pattern(), LedPattern::single(Indicator::Green));
    }

    #[test]
    fn test_gpio_failure_reported() {
        let mut bank = LedBank::new([BrokenPin, BrokenPin, BrokenPin, BrokenPin]);
        assert_eq!(bank.show(LedPattern::ALL), Err(HardwareError::Gpio));
        assert_eq!(bank.pattern(), LedPattern::OFF);
    }
}
