//! Board-agnostic game logic for the Safelock servo dial
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (servo actuator, indicator LEDs)
//! - Round state machine
//! - Game engine: sweep, lock-in evaluation, session bookkeeping
//! - Scoring and distance-to-LED feedback
//! - Animation scripts
//! - Configuration types and the `game.toml` reader

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod animation;
pub mod config;
pub mod feedback;
pub mod game;
pub mod scoring;
pub mod state;
pub mod traits;
