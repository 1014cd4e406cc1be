//! Game engine
//!
//! Owns the session, the round and the sweep, and turns commands and ticks
//! into ordered effects.

pub mod effects;
pub mod engine;
pub mod session;
pub mod sweep;

pub use effects::{Effect, Outbox, MAX_EFFECTS};
pub use engine::{Game, LockOutcome};
pub use session::{Round, Session};
pub use sweep::{SweepDirection, SweepState};
