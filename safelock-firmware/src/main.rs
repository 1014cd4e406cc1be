//! Safelock - Servo Dial Safe-Cracker Firmware
//!
//! Main firmware binary for RP2040-based dial boxes. A hobby servo sweeps
//! the dial, four LEDs give hot/cold feedback, and a web driver plays the
//! game over a 9600 baud line protocol on UART0.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::UART0;
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use embassy_time::Delay;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use safelock_core::config::{parse_config, GameConfig};
use safelock_drivers::servo::PERIOD_US;
use safelock_drivers::{LedBank, Rig, ServoDriver};

mod channels;
mod tasks;

/// Embedded game configuration (compiled into firmware)
/// Edit game.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../game.toml");

/// Link speed expected by the web driver
const BAUD_RATE: u32 = 9600;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 64]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Safelock firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = load_config();
    info!(
        "Sweep {}-{} deg, targets {}-{} deg, lid: {}",
        config.sweep_min,
        config.sweep_max,
        config.target_min,
        config.target_max,
        config.lid.is_some()
    );

    // Serial link to the web driver
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = BAUD_RATE;

    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 64]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();

    info!("UART initialized at {} baud", BAUD_RATE);

    // Servo on GPIO16 (PWM slice 0, channel A), 50 Hz frame with 1 us counts
    let mut pwm_config = PwmConfig::default();
    pwm_config.divider = ((embassy_rp::clocks::clk_sys_freq() / 1_000_000) as u8).into();
    pwm_config.top = PERIOD_US - 1;
    pwm_config.compare_a = 0;

    let pwm = Pwm::new_output_a(p.PWM_SLICE0, p.PIN_16, pwm_config);
    let (Some(servo_pwm), _) = pwm.split() else {
        defmt::panic!("PWM slice 0 channel A unavailable");
    };
    let servo = ServoDriver::new(servo_pwm);

    // Feedback LEDs on GPIO2-5, in indicator wiring order
    let leds = LedBank::new([
        Output::new(p.PIN_2, Level::Low), // orange
        Output::new(p.PIN_3, Level::Low), // red
        Output::new(p.PIN_4, Level::Low), // green
        Output::new(p.PIN_5, Level::Low), // blue
    ]);

    info!("Servo and LEDs initialized");

    let rig = Rig::new(servo, leds, Delay, config);

    // Spawn tasks
    spawner.spawn(tasks::tick_task()).unwrap();
    spawner.spawn(tasks::serial_rx_task(rx)).unwrap();
    spawner.spawn(tasks::serial_tx_task(tx)).unwrap();
    spawner.spawn(tasks::controller_task(config, rig)).unwrap();

    info!("All tasks spawned, firmware running");

    // All work happens in spawned tasks
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!(
            "Heartbeat, {} commands dropped",
            channels::dropped_commands()
        );
    }
}

/// Parse the embedded `game.toml`
///
/// build.rs already checks the file, so a failure here means the
/// on-device reader and the build check disagree. Falls back to the
/// cam-lock preset.
fn load_config() -> GameConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Parsed embedded configuration successfully");
            config
        }
        Err(e) => {
            error!("Failed to parse embedded config: {:?}", e);
            error!("Using cam-lock fallback configuration");
            GameConfig::cam_lock()
        }
    }
}
