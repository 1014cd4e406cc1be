//! Safelock Serial Protocol
//!
//! This crate defines the text protocol between the safe dial (device) and
//! the web driver (host). The protocol is line-oriented ASCII at 9600 baud.
//!
//! # Protocol Overview
//!
//! ```text
//! host → device   P | O | L | T | U | K | D:<n>          one per line
//! device → host   KEY:value[,value...]                   one per line
//! ```
//!
//! The device never acknowledges commands explicitly; the host follows the
//! game by watching `STATUS:` and the other report lines.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod command;
pub mod line;
pub mod report;

pub use command::{clamp_level, Command, CommandError, MAX_DIFFICULTY_LEVEL};
pub use line::{Line, LineError, LineParser, LINE_END, MAX_LINE_LEN};
pub use report::{
    GameStatus, Indicator, LedTestStep, LockState, Report, ReportLine, ReportTooLong, StatusCode,
    MAX_REPORT_LEN,
};
