//! Main controller task
//!
//! Owns the game engine and the hardware rig. Waits for a command or a
//! tick, feeds the engine, and plays back every effect before looking at
//! the next input. Animations block this loop for their full length.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_rp::gpio::Output;
use embassy_rp::pwm::PwmOutput;
use embassy_time::Delay;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use safelock_core::config::GameConfig;
use safelock_core::game::{Effect, Game, Outbox};
use safelock_core::traits::{Actuator, Indicators};
use safelock_drivers::{LedBank, Rig, ServoDriver};
use safelock_protocol::Command;

use crate::channels::{COMMAND_CHANNEL, REPORT_CHANNEL};
use crate::tasks::tick::{uptime_ms, TICK_SIGNAL};

/// Servo, LED bank and delay as wired on the board
pub type FirmwareRig = Rig<ServoDriver<PwmOutput<'static>>, LedBank<Output<'static>>, Delay>;

/// Controller task - main game loop
#[embassy_executor::task]
pub async fn controller_task(config: GameConfig, mut rig: FirmwareRig) {
    info!("Controller task started");

    let mut game = Game::new(config);
    let mut out = Outbox::new();

    // Seeded on the first command so the player's timing feeds the seed
    let mut rng: Option<Pcg32> = None;

    game.boot(&mut out);
    flush(&mut rig, &mut out).await;
    info!("Boot complete, waiting for power-on");

    loop {
        match select(COMMAND_CHANNEL.receive(), TICK_SIGNAL.wait()).await {
            Either::First(command) => {
                let now_ms = uptime_ms();
                let rng = rng.get_or_insert_with(|| {
                    Pcg32::seed_from_u64(embassy_time::Instant::now().as_ticks())
                });

                if command.is_debug() {
                    info!("Lid override {}", command.token());
                }

                let before = game.phase();
                game.handle(command, now_ms, rng, &mut out);
                let after = game.phase();

                if before != after {
                    info!("Phase: {} -> {}", before.as_str(), after.as_str());
                    if after.is_round_over() {
                        info!("Round over, waiting for power-off");
                    }
                } else {
                    debug!("Command {} left phase at {}", command.token(), after.as_str());
                }

                if let Command::SetDifficulty(_) = command {
                    info!("Difficulty: {}", game.difficulty().as_str());
                }
            }

            Either::Second(now_ms) => {
                game.tick(now_ms, &mut out);
            }
        }

        flush(&mut rig, &mut out).await;
    }
}

/// Play back every pending effect in order
async fn flush(rig: &mut FirmwareRig, out: &mut Outbox) {
    let dropped = out.take_dropped();
    if dropped > 0 {
        warn!("Outbox overflowed, {} effects dropped", dropped);
    }

    for effect in out.take() {
        match effect {
            Effect::Play(animation) => trace!("Playing {}", animation.as_str()),
            _ => trace!("Effect: {:?}", effect),
        }
        match rig.execute(effect).await {
            Ok(Some(report)) => REPORT_CHANNEL.send(report).await,
            Ok(None) => {}
            Err(e) => warn!(
                "Hardware error: {:?} (servo {:?}, leds {=u8:b})",
                e,
                rig.actuator().angle(),
                rig.indicators().pattern().bits()
            ),
        }
    }
}
