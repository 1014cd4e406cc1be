//! Canned servo and LED sequences
//!
//! Animations carry no game state. Each one expands into a bounded list of
//! [`Step`]s computed from the [`GameConfig`] so the same script works for
//! both dial builds; the executor plays them back in order.

use heapless::Vec;
use safelock_protocol::Indicator;

use crate::config::GameConfig;
use crate::feedback::LedPattern;

/// Upper bound on steps in any script
pub const MAX_STEPS: usize = 48;

/// Degrees between frames of the welcome sweep
const WELCOME_STEP_DEG: usize = 10;

/// Shake angles of the alarm, clamped into the sweep range
const ALARM_SHAKE_DEG: (u8, u8) = (30, 60);

/// Order of the celebration chase
const UNLOCK_CHASE: [Indicator; 4] = [
    Indicator::Blue,
    Indicator::Red,
    Indicator::Orange,
    Indicator::Green,
];

/// One frame of an animation
///
/// Outputs left as `None` keep their previous state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Step {
    pub servo: Option<u8>,
    pub leds: Option<LedPattern>,
    pub hold_ms: u16,
}

impl Step {
    const fn leds(leds: LedPattern, hold_ms: u16) -> Self {
        Self {
            servo: None,
            leds: Some(leds),
            hold_ms,
        }
    }

    const fn servo(angle: u8, hold_ms: u16) -> Self {
        Self {
            servo: Some(angle),
            leds: None,
            hold_ms,
        }
    }

    const fn both(angle: u8, leds: LedPattern, hold_ms: u16) -> Self {
        Self {
            servo: Some(angle),
            leds: Some(leds),
            hold_ms,
        }
    }
}

/// Expanded animation
pub type Script = Vec<Step, MAX_STEPS>;

/// Named animations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Animation {
    /// Dial sweep with an LED chase on power-on
    Welcome,
    /// Green blinks and a nudge toward the lid after a hit
    SuccessTease,
    /// Red and blue flashes after a miss
    FailureFlash,
    /// LED chase and open/close swings after the lid unlocks
    Unlock,
    /// Flashing and dial shake when attempts run out
    Alarm,
    /// Red blinks on power-off
    Standby,
}

impl Animation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Animation::Welcome => "welcome",
            Animation::SuccessTease => "success-tease",
            Animation::FailureFlash => "failure-flash",
            Animation::Unlock => "unlock",
            Animation::Alarm => "alarm",
            Animation::Standby => "standby",
        }
    }

    /// Expand into frames for `config`
    pub fn script(&self, config: &GameConfig) -> Script {
        let mut script = ScriptBuilder::default();
        match self {
            Animation::Welcome => welcome(&mut script, config),
            Animation::SuccessTease => success_tease(&mut script, config),
            Animation::FailureFlash => {
                let flash = LedPattern::single(Indicator::Red).with(Indicator::Blue);
                script.blink(flash, 3, 300, 300);
            }
            Animation::Unlock => unlock(&mut script, config),
            Animation::Alarm => alarm(&mut script, config),
            Animation::Standby => {
                script.blink(LedPattern::single(Indicator::Red), 3, 200, 200);
            }
        }
        script.steps
    }

    /// Total playback time in milliseconds
    pub fn duration_ms(&self, config: &GameConfig) -> u32 {
        self.script(config)
            .iter()
            .map(|step| step.hold_ms as u32)
            .sum()
    }

    /// Servo angle left behind, if the animation moves the servo
    pub fn rest_angle(&self, config: &GameConfig) -> Option<u8> {
        self.script(config).iter().rev().find_map(|step| step.servo)
    }

    /// LEDs left lit, if the animation touches them
    pub fn rest_leds(&self, config: &GameConfig) -> Option<LedPattern> {
        self.script(config).iter().rev().find_map(|step| step.leds)
    }
}

#[derive(Default)]
struct ScriptBuilder {
    steps: Script,
}

impl ScriptBuilder {
    fn push(&mut self, step: Step) {
        // Every script is well under MAX_STEPS; extra frames are dropped
        let _ = self.steps.push(step);
    }

    fn blink(&mut self, leds: LedPattern, times: usize, on_ms: u16, off_ms: u16) {
        for _ in 0..times {
            self.push(Step::leds(leds, on_ms));
            self.push(Step::leds(LedPattern::OFF, off_ms));
        }
    }
}

fn welcome(script: &mut ScriptBuilder, config: &GameConfig) {
    let min = config.sweep_min;
    let span = config.sweep_max.saturating_sub(min).max(1) as usize;
    let last = Indicator::ALL.len() - 1;

    for angle in (min..=config.sweep_max).step_by(WELCOME_STEP_DEG) {
        let index = (angle - min) as usize * last / span;
        let led = Indicator::ALL[index.min(last)];
        script.push(Step::both(angle, LedPattern::single(led), 100));
    }
    script.push(Step::both(config.park_angle(), LedPattern::OFF, 500));
}

fn success_tease(script: &mut ScriptBuilder, config: &GameConfig) {
    script.blink(LedPattern::single(Indicator::Green), 5, 200, 200);
    if let Some(tease) = config.tease_angle {
        script.push(Step::servo(tease, 500));
        script.push(Step::servo(config.park_angle(), 300));
    }
}

fn unlock(script: &mut ScriptBuilder, config: &GameConfig) {
    for _ in 0..3 {
        for led in UNLOCK_CHASE {
            script.push(Step::leds(LedPattern::single(led), 150));
        }
        script.push(Step::leds(LedPattern::OFF, 150));
    }
    for _ in 0..3 {
        script.push(Step::both(config.open_angle(), LedPattern::ALL, 300));
        script.push(Step::both(config.unlock_angle(), LedPattern::OFF, 300));
    }
}

fn alarm(script: &mut ScriptBuilder, config: &GameConfig) {
    script.blink(LedPattern::ALL, 10, 100, 100);

    let low = config.clamp_to_sweep(ALARM_SHAKE_DEG.0);
    let high = config.clamp_to_sweep(ALARM_SHAKE_DEG.1);
    for _ in 0..5 {
        script.push(Step::servo(low, 200));
        script.push(Step::servo(high, 200));
    }
    script.push(Step::servo(config.park_angle(), 0));
}
