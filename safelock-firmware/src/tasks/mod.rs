//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod controller;
pub mod serial_rx;
pub mod serial_tx;
pub mod tick;

pub use controller::{controller_task, FirmwareRig};
pub use serial_rx::serial_rx_task;
pub use serial_tx::serial_tx_task;
pub use tick::tick_task;
