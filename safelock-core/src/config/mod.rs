//! Configuration types
//!
//! Board-agnostic game configuration, difficulty tables, and the reader
//! for the `game.toml` file embedded in the firmware.

pub mod difficulty;
pub mod toml;
pub mod types;

pub use difficulty::Difficulty;
pub use toml::{parse_config, ParseError};
pub use types::*;
