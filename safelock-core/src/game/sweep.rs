//! Ping-pong dial sweep

/// Direction of travel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SweepDirection {
    /// Increasing angle
    #[default]
    Up,
    /// Decreasing angle
    Down,
}

impl SweepDirection {
    pub fn opposite(self) -> Self {
        match self {
            SweepDirection::Up => SweepDirection::Down,
            SweepDirection::Down => SweepDirection::Up,
        }
    }

    fn sign(self) -> i16 {
        match self {
            SweepDirection::Up => 1,
            SweepDirection::Down => -1,
        }
    }
}

/// Sweep position and pacing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SweepState {
    pub angle: u8,
    pub direction: SweepDirection,
    /// Uptime of the last step (ms)
    pub last_step_ms: u32,
}

impl SweepState {
    /// Start a sweep at `angle`, heading up
    pub fn arm(angle: u8, now_ms: u32) -> Self {
        Self {
            angle,
            direction: SweepDirection::Up,
            last_step_ms: now_ms,
        }
    }

    /// Step if `delay_ms` has passed since the last step
    ///
    /// Returns the new angle when the dial moved.
    pub fn tick(&mut self, now_ms: u32, delay_ms: u32, min: u8, max: u8, speed: u8) -> Option<u8> {
        if now_ms.wrapping_sub(self.last_step_ms) < delay_ms {
            return None;
        }
        self.last_step_ms = now_ms;
        Some(self.advance(min, max, speed))
    }

    /// Move one step, bouncing off either bound
    pub fn advance(&mut self, min: u8, max: u8, speed: u8) -> u8 {
        let next = self.angle as i16 + self.direction.sign() * speed as i16;

        let next = if next >= max as i16 {
            self.direction = SweepDirection::Down;
            max
        } else if next <= min as i16 {
            self.direction = SweepDirection::Up;
            min
        } else {
            next as u8
        };

        self.angle = next;
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_bounces_at_max() {
        let mut sweep = SweepState::arm(86, 0);
        assert_eq!(sweep.advance(0, 90, 3), 89);
        assert_eq!(sweep.advance(0, 90, 3), 90);
        assert_eq!(sweep.direction, SweepDirection::Down);
        assert_eq!(sweep.advance(0, 90, 3), 87);
    }

    #[test]
    fn test_bounces_at_min() {
        let mut sweep = SweepState {
            angle: 1,
            direction: SweepDirection::Down,
            last_step_ms: 0,
        };
        assert_eq!(sweep.advance(0, 90, 2), 0);
        assert_eq!(sweep.direction, SweepDirection::Up);
        assert_eq!(sweep.advance(0, 90, 2), 2);
    }

    #[test]
    fn test_tick_paced_by_delay() {
        let mut sweep = SweepState::arm(0, 1_000);
        assert_eq!(sweep.tick(1_049, 50, 0, 90, 2), None);
        assert_eq!(sweep.tick(1_050, 50, 0, 90, 2), Some(2));
        assert_eq!(sweep.tick(1_060, 50, 0, 90, 2), None);
        assert_eq!(sweep.tick(1_100, 50, 0, 90, 2), Some(4));
    }

    #[test]
    fn test_tick_across_timer_wrap() {
        let mut sweep = SweepState::arm(10, u32::MAX - 20);
        assert_eq!(sweep.tick(29, 50, 0, 90, 1), Some(11));
    }

    proptest! {
        #[test]
        fn prop_sweep_stays_in_bounds(
            min in 0u8..90,
            span in 1u8..=90,
            speed in 1u8..=3,
            steps in 1usize..400,
        ) {
            let max = min.saturating_add(span).min(180);
            prop_assume!(min < max);

            let mut sweep = SweepState::arm(min, 0);
            for _ in 0..steps {
                let before = sweep.direction;
                let angle = sweep.advance(min, max, speed);
                prop_assert!(angle >= min && angle <= max);

                // Direction only flips on a bound
                if sweep.direction != before {
                    prop_assert!(angle == min || angle == max);
                }
            }
        }
    }
}
