//! Serial receive task
//!
//! Assembles command lines from the UART and hands decoded commands to
//! the controller.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use safelock_protocol::{Command, CommandError, LineParser};

use crate::channels::{record_dropped_command, COMMAND_CHANNEL};

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 32;

/// Serial RX task - receives and decodes command lines
#[embassy_executor::task]
pub async fn serial_rx_task(mut rx: BufferedUartRx) {
    info!("Serial RX task started");

    let mut parser = LineParser::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("RX: {} bytes", n);

                for &byte in &buf[..n] {
                    match parser.feed(byte) {
                        Ok(Some(line)) => dispatch_line(&line),
                        Ok(None) => {
                            // Need more bytes
                        }
                        Err(e) => {
                            warn!("Dropped input line: {:?}", e);
                        }
                    }
                }
            }
            Ok(_) => {
                // No bytes read, continue
            }
            Err(e) => {
                // Partial line is suspect after a framing or overrun error
                warn!("UART read error: {:?}", e);
                parser.reset();
            }
        }
    }
}

/// Decode one line and queue the command
fn dispatch_line(line: &str) {
    match Command::parse(line) {
        Ok(command) => {
            debug!("Command: {:?}", command);
            if COMMAND_CHANNEL.try_send(command).is_err() {
                let total = record_dropped_command();
                warn!(
                    "Command channel full, dropping {} ({} so far)",
                    command.token(),
                    total
                );
            }
        }
        Err(CommandError::Empty) => {}
        Err(e) => {
            warn!("Ignoring line '{}': {:?}", line, e);
        }
    }
}
