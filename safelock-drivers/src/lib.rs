//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in safelock-core on top of `embedded-hal`:
//!
//! - Hobby servo on a 50 Hz PWM channel
//! - Four-LED indicator bank on GPIO outputs
//! - [`Rig`], which plays engine effects back on real hardware

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod indicator;
pub mod rig;
pub mod servo;

pub use indicator::LedBank;
pub use rig::Rig;
pub use servo::ServoDriver;
