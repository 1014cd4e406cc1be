//! Events that trigger phase transitions

/// Events that can trigger phase transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    // Session events
    /// Session started and the first round armed
    PowerOn,
    /// Session torn down
    PowerOff,

    // Player events
    /// Player locked in the current dial position
    LockIn,

    // Evaluation results
    /// Lock-in landed within tolerance
    Hit,
    /// Lock-in missed, attempts remain
    Miss,
    /// Lock-in missed and no attempts remain
    AttemptsExhausted,

    /// Retry pause elapsed
    Resume,
}
