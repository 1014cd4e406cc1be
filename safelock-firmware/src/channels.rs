//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.
//! Uses embassy-sync primitives for safe async communication.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use portable_atomic::{AtomicU32, Ordering};

use safelock_protocol::{Command, Report};

/// Channel capacity for decoded commands
///
/// Commands queue here while the controller is busy with an animation.
const COMMAND_CHANNEL_SIZE: usize = 8;

/// Channel capacity for outbound report lines
const REPORT_CHANNEL_SIZE: usize = 32;

/// Commands decoded from the serial link
pub static COMMAND_CHANNEL: Channel<CriticalSectionRawMutex, Command, COMMAND_CHANNEL_SIZE> =
    Channel::new();

/// Report lines waiting for the UART
pub static REPORT_CHANNEL: Channel<CriticalSectionRawMutex, Report, REPORT_CHANNEL_SIZE> =
    Channel::new();

/// Commands lost because the controller fell behind
static DROPPED_COMMANDS: AtomicU32 = AtomicU32::new(0);

/// Count one dropped command, returning the new total
pub fn record_dropped_command() -> u32 {
    DROPPED_COMMANDS.fetch_add(1, Ordering::Relaxed) + 1
}

/// Total commands dropped since boot
pub fn dropped_commands() -> u32 {
    DROPPED_COMMANDS.load(Ordering::Relaxed)
}
