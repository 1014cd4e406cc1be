//! Phase definition
//!
//! Everything the engine does to the dial and LEDs is gated on the current
//! phase.

use super::events::Event;

/// Round phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Powered off, waiting for `P`
    #[default]
    Standby,
    /// Dial sweeping, LEDs showing distance feedback
    Sweeping,
    /// Lock-in received, result being computed
    Evaluating,
    /// Round won, lid unlocked
    Success,
    /// Round missed, waiting out the retry pause
    FailedRetry,
    /// Attempts exhausted
    GameOver,
}

impl Phase {
    /// Check if a session exists
    pub fn is_on(&self) -> bool {
        !matches!(self, Phase::Standby)
    }

    /// Check if a round is still being played
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            Phase::Sweeping | Phase::Evaluating | Phase::FailedRetry
        )
    }

    /// Check if the dial is sweeping
    pub fn is_sweeping(&self) -> bool {
        matches!(self, Phase::Sweeping)
    }

    /// Check if the round has ended either way
    pub fn is_round_over(&self) -> bool {
        matches!(self, Phase::Success | Phase::GameOver)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Standby => "standby",
            Phase::Sweeping => "sweeping",
            Phase::Evaluating => "evaluating",
            Phase::Success => "success",
            Phase::FailedRetry => "failed-retry",
            Phase::GameOver => "game-over",
        }
    }

    /// Process an event and return the next phase
    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use Phase::*;

        match (self, event) {
            // Power-off tears down from anywhere
            (_, PowerOff) => Standby,

            (Standby, PowerOn) => Sweeping,

            (Sweeping, LockIn) => Evaluating,

            (Evaluating, Hit) => Success,
            (Evaluating, Miss) => FailedRetry,
            (Evaluating, AttemptsExhausted) => GameOver,

            (FailedRetry, Resume) => Sweeping,

            // Default: stay in current phase
            _ => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Phase; 6] = [
        Phase::Standby,
        Phase::Sweeping,
        Phase::Evaluating,
        Phase::Success,
        Phase::FailedRetry,
        Phase::GameOver,
    ];

    #[test]
    fn test_full_round() {
        let phase = Phase::Standby
            .transition(Event::PowerOn)
            .transition(Event::LockIn)
            .transition(Event::Miss)
            .transition(Event::Resume)
            .transition(Event::LockIn)
            .transition(Event::Hit);
        assert_eq!(phase, Phase::Success);
    }

    #[test]
    fn test_power_off_from_any_phase() {
        for phase in ALL {
            assert_eq!(phase.transition(Event::PowerOff), Phase::Standby);
        }
    }

    #[test]
    fn test_power_on_only_from_standby() {
        assert_eq!(Phase::Standby.transition(Event::PowerOn), Phase::Sweeping);
        for phase in ALL.into_iter().filter(|p| p.is_on()) {
            assert_eq!(phase.transition(Event::PowerOn), phase);
        }
    }

    #[test]
    fn test_lock_in_only_while_sweeping() {
        for phase in ALL {
            let next = phase.transition(Event::LockIn);
            if phase == Phase::Sweeping {
                assert_eq!(next, Phase::Evaluating);
            } else {
                assert_eq!(next, phase);
            }
        }
    }

    #[test]
    fn test_exhausted_ends_round() {
        let phase = Phase::Evaluating.transition(Event::AttemptsExhausted);
        assert_eq!(phase, Phase::GameOver);
        assert!(phase.is_round_over());
        assert!(!phase.is_active());
        assert!(phase.is_on());
    }

    #[test]
    fn test_exactly_one_round_condition() {
        for phase in ALL.into_iter().filter(|p| p.is_on()) {
            let sweeping = phase.is_sweeping();
            let evaluating = matches!(phase, Phase::Evaluating | Phase::FailedRetry);
            let finished = phase.is_round_over();
            assert_eq!(
                [sweeping, evaluating, finished].iter().filter(|b| **b).count(),
                1,
                "{}",
                phase.as_str()
            );
        }
    }

    #[test]
    fn test_results_ignored_outside_evaluation() {
        for event in [Event::Hit, Event::Miss, Event::AttemptsExhausted] {
            assert_eq!(Phase::Sweeping.transition(event), Phase::Sweeping);
            assert_eq!(Phase::Standby.transition(event), Phase::Standby);
        }
    }
}
