//! Serial transmit task
//!
//! Renders reports from the controller as text lines on the UART.

use defmt::*;
use embassy_rp::uart::BufferedUartTx;
use embedded_io_async::Write;

use safelock_protocol::{Report, LINE_END};

use crate::channels::REPORT_CHANNEL;

/// Serial TX task - writes one line per report
#[embassy_executor::task]
pub async fn serial_tx_task(mut tx: BufferedUartTx) {
    info!("Serial TX task started");

    loop {
        let report = REPORT_CHANNEL.receive().await;
        send_report(&mut tx, &report).await;
    }
}

async fn send_report(tx: &mut BufferedUartTx, report: &Report) {
    let line = match report.encode() {
        Ok(line) => line,
        Err(_) => {
            warn!("Report does not fit a line: {:?}", report);
            return;
        }
    };

    if let Err(e) = tx.write_all(line.as_bytes()).await {
        warn!("Failed to send report: {:?}", e);
        return;
    }
    if let Err(e) = tx.write_all(&[LINE_END]).await {
        warn!("Failed to send line end: {:?}", e);
        return;
    }
    trace!("TX: {}", line.as_str());
}
