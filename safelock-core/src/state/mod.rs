//! Round state machine
//!
//! The phase is the single source of truth for whether the game is on,
//! whether a round is live, and whether the dial is sweeping. Transitions
//! are explicit and deterministic.

pub mod events;
pub mod machine;

pub use events::Event;
pub use machine::Phase;
