//! The game engine
//!
//! [`Game`] owns the phase, the session, the round and the sweep. Commands
//! and ticks go in; ordered [`Effect`]s come out through an [`Outbox`].
//! Nothing here blocks or allocates; pauses and animations are requests the
//! controller carries out before feeding the engine again.

use rand::Rng;
use safelock_protocol::{Command, GameStatus, Indicator, LedTestStep, Report, StatusCode};

use super::effects::{Effect, Outbox};
use super::session::{Round, Session};
use super::sweep::SweepState;
use crate::animation::Animation;
use crate::config::{Difficulty, GameConfig};
use crate::feedback::{pattern_for_distance, LedPattern};
use crate::scoring::{score_round, ScoreBreakdown};
use crate::state::{Event, Phase};

/// Settle time after parking or moving the cam
const SETTLE_MS: u32 = 500;

/// Hold on the unlock angle before the celebration
const UNLOCK_HOLD_MS: u32 = 1000;

/// Each LED alone during the self-test
const LED_TEST_SINGLE_MS: u32 = 500;

/// All LEDs together during the self-test
const LED_TEST_ALL_MS: u32 = 1000;

/// Result of evaluating one lock-in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LockOutcome {
    /// Within tolerance; round won
    Hit(ScoreBreakdown),
    /// Missed, attempts remain
    Miss { remaining: u8 },
    /// Missed on the last attempt
    GameOver,
}

/// Safe-cracker game engine
#[derive(Debug)]
pub struct Game {
    config: GameConfig,
    difficulty: Difficulty,
    phase: Phase,
    session: Option<Session>,
    round: Option<Round>,
    sweep: SweepState,
    /// Last angle sent to the servo, animations included
    servo_angle: Option<u8>,
    /// Last pattern sent to the LEDs, `None` when unknown
    shown: Option<LedPattern>,
    last_status_ms: Option<u32>,
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        Self {
            difficulty: config.difficulty,
            config,
            phase: Phase::Standby,
            session: None,
            round: None,
            sweep: SweepState::default(),
            servo_angle: None,
            shown: None,
            last_status_ms: None,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    /// Current sweep angle
    pub fn dial_angle(&self) -> u8 {
        self.sweep.angle
    }

    /// Last angle commanded to the servo
    pub fn servo_angle(&self) -> Option<u8> {
        self.servo_angle
    }

    /// Park the dial and announce standby after reset
    pub fn boot(&mut self, out: &mut Outbox) {
        self.move_servo(self.config.park_angle(), out);
        self.show(LedPattern::OFF, out);
        out.report(Report::Status(StatusCode::Standby));
        self.report_lock_status(out);
        self.standby(out);
    }

    /// Dispatch a decoded command
    pub fn handle<R: Rng + ?Sized>(
        &mut self,
        command: Command,
        now_ms: u32,
        rng: &mut R,
        out: &mut Outbox,
    ) {
        match command {
            Command::PowerOn => self.power_on(now_ms, rng, out),
            Command::PowerOff => self.power_off(out),
            Command::LockIn => {
                self.lock_in(now_ms, out);
            }
            Command::LedTest => self.led_self_test(out),
            Command::SetDifficulty(level) => {
                if let Some(difficulty) = Difficulty::from_level(level) {
                    self.set_difficulty(difficulty, out);
                }
            }
            Command::ManualUnlock => self.manual_unlock(out),
            Command::ManualLock => self.manual_lock(out),
        }
    }

    /// Start a session and arm the first round
    ///
    /// No-op while a session exists.
    pub fn power_on<R: Rng + ?Sized>(&mut self, now_ms: u32, rng: &mut R, out: &mut Outbox) {
        if self.phase.is_on() {
            return;
        }
        let target = rng.random_range(self.config.target_min..=self.config.target_max);
        self.power_on_with_target(now_ms, target, out);
    }

    fn power_on_with_target(&mut self, now_ms: u32, target: u8, out: &mut Outbox) {
        if self.phase.is_on() {
            return;
        }

        let mut session = Session::new(now_ms, self.config.attempts);
        out.report(Report::Status(StatusCode::PowerOn));
        out.report(Report::Difficulty(self.difficulty.level()));

        self.move_servo(self.config.park_angle(), out);
        out.push(Effect::Pause(SETTLE_MS));
        self.report_lock_status(out);

        out.report(Report::Status(StatusCode::WelcomeAnimation));
        self.play(Animation::Welcome, out);

        out.report(Report::Status(StatusCode::GeneratingCombination));
        let round = Round::new(target, self.difficulty);
        session.attempts_remaining = self.config.attempts;

        out.report(Report::Target(round.target));
        out.report(Report::Tolerance(round.tolerance));
        out.report(Report::Attempts(session.attempts_remaining));
        out.report(Report::Score(session.score));

        self.session = Some(session);
        self.round = Some(round);
        self.phase = self.phase.transition(Event::PowerOn);
        self.arm_sweep(now_ms, out);
    }

    /// End the session and return to standby
    ///
    /// No-op while off.
    pub fn power_off(&mut self, out: &mut Outbox) {
        if !self.phase.is_on() {
            return;
        }

        let score = self.session.map_or(0, |s| s.score);
        self.phase = self.phase.transition(Event::PowerOff);
        self.session = None;
        self.round = None;
        self.last_status_ms = None;

        out.report(Report::Status(StatusCode::PowerOff));
        out.report(Report::FinalScore(score));

        self.move_servo(self.config.park_angle(), out);
        self.show(LedPattern::OFF, out);
        out.push(Effect::Pause(SETTLE_MS));
        self.report_lock_status(out);
        self.standby(out);
    }

    /// Evaluate the current dial position against the target
    ///
    /// Ignored unless the dial is sweeping; returns the outcome otherwise.
    pub fn lock_in(&mut self, now_ms: u32, out: &mut Outbox) -> Option<LockOutcome> {
        if !self.phase.is_sweeping() {
            return None;
        }
        let (Some(session), Some(round)) = (self.session.as_mut(), self.round) else {
            return None;
        };

        self.phase = self.phase.transition(Event::LockIn);
        session.record_attempt();

        let angle = self.sweep.angle;
        let distance = round.distance(angle);
        out.report(Report::LockAttempt {
            current: angle,
            target: round.target,
            distance,
            remaining: session.attempts_remaining,
        });

        if round.is_hit(angle) {
            let score = score_round(
                distance,
                round.tolerance,
                session.elapsed_s(now_ms),
                self.difficulty,
            );
            let total = session.add_score(score.total);
            let attempts_used = session.attempts_used;

            self.phase = self.phase.transition(Event::Hit);
            out.report(Report::Correct);
            out.report(Report::RoundScore(score.total));
            out.report(Report::TotalScore(total));
            self.play(Animation::SuccessTease, out);
            self.unlock(total, attempts_used, out);
            return Some(LockOutcome::Hit(score));
        }

        let remaining = session.record_miss();
        let total = session.score;
        out.report(Report::Wrong { remaining });
        self.play(Animation::FailureFlash, out);

        if remaining == 0 {
            self.phase = self.phase.transition(Event::AttemptsExhausted);
            self.game_over(round.target, total, out);
            return Some(LockOutcome::GameOver);
        }

        self.phase = self.phase.transition(Event::Miss);
        out.push(Effect::Pause(self.config.retry_pause_ms));
        self.phase = self.phase.transition(Event::Resume);
        out.report(Report::Status(StatusCode::Sweeping));
        Some(LockOutcome::Miss { remaining })
    }

    /// Change difficulty; the live round keeps its target
    pub fn set_difficulty(&mut self, difficulty: Difficulty, out: &mut Outbox) {
        self.difficulty = difficulty;
        if let Some(round) = self.round.as_mut() {
            round.tolerance = self.difficulty.tolerance_deg();
        }
        out.report(Report::Difficulty(self.difficulty.level()));
    }

    /// Light each LED in turn, then all, then none
    pub fn led_self_test(&mut self, out: &mut Outbox) {
        out.report(Report::Status(StatusCode::LedTest));

        for led in Indicator::ALL {
            out.push(Effect::Leds(LedPattern::single(led)));
            out.report(Report::LedTest(LedTestStep::Single(led)));
            out.push(Effect::Pause(LED_TEST_SINGLE_MS));
        }

        out.push(Effect::Leds(LedPattern::ALL));
        out.report(Report::LedTest(LedTestStep::AllOn));
        out.push(Effect::Pause(LED_TEST_ALL_MS));

        out.push(Effect::Leds(LedPattern::OFF));
        self.shown = Some(LedPattern::OFF);
        out.report(Report::LedTest(LedTestStep::Complete));
    }

    /// Swing the cam to the unlocked angle; lid builds only
    pub fn manual_unlock(&mut self, out: &mut Outbox) {
        if let Some(lid) = self.config.lid {
            self.move_servo(lid.unlocked, out);
            out.push(Effect::Pause(SETTLE_MS));
            self.report_lock_status(out);
        }
    }

    /// Swing the cam to the locked angle; lid builds only
    pub fn manual_lock(&mut self, out: &mut Outbox) {
        if let Some(lid) = self.config.lid {
            self.move_servo(lid.locked, out);
            out.push(Effect::Pause(SETTLE_MS));
            self.report_lock_status(out);
        }
    }

    /// Advance the sweep, refresh feedback and emit periodic status
    pub fn tick(&mut self, now_ms: u32, out: &mut Outbox) {
        if !self.phase.is_active() {
            return;
        }

        if self.phase.is_sweeping() {
            let stepped = self.sweep.tick(
                now_ms,
                self.config.sweep_delay_ms,
                self.config.sweep_min,
                self.config.sweep_max,
                self.difficulty.sweep_speed(),
            );
            if let Some(angle) = stepped {
                self.move_servo(angle, out);
            }
            if let Some(round) = self.round {
                self.show(pattern_for_distance(round.distance(self.sweep.angle)), out);
            }
        }

        let due = self
            .last_status_ms
            .map_or(true, |last| now_ms.wrapping_sub(last) >= self.config.status_interval_ms);
        if due {
            if let Some(status) = self.status(now_ms) {
                self.last_status_ms = Some(now_ms);
                out.report(Report::GameStatus(status));
            }
        }
    }

    /// Snapshot of the live round
    pub fn status(&self, now_ms: u32) -> Option<GameStatus> {
        let session = self.session.as_ref()?;
        let round = self.round.as_ref()?;
        Some(GameStatus {
            angle: self.sweep.angle,
            target: round.target,
            attempts_remaining: session.attempts_remaining,
            score: session.score,
            elapsed_s: session.elapsed_s(now_ms),
            difficulty: self.difficulty.level(),
        })
    }

    fn arm_sweep(&mut self, now_ms: u32, out: &mut Outbox) {
        let start = self.config.sweep_start();
        self.sweep = SweepState::arm(start, now_ms);
        self.last_status_ms = None;

        self.move_servo(start, out);
        self.show(LedPattern::OFF, out);
        out.report(Report::Status(StatusCode::Sweeping));
    }

    fn unlock(&mut self, total: u32, attempts_used: u8, out: &mut Outbox) {
        let unlocked = self.config.unlock_angle();

        out.report(Report::Status(StatusCode::SafeUnlocked));
        out.report(Report::FinalScore(total));
        out.report(Report::AttemptsUsed(attempts_used));

        self.move_servo(unlocked, out);
        out.push(Effect::Pause(UNLOCK_HOLD_MS));
        self.report_lock_status(out);

        self.play(Animation::Unlock, out);
        self.move_servo(unlocked, out);
        out.report(Report::Status(StatusCode::GameComplete));
    }

    fn game_over(&mut self, target: u8, total: u32, out: &mut Outbox) {
        out.report(Report::Status(StatusCode::GameOver));
        out.report(Report::FinalTarget(target));
        out.report(Report::FinalScore(total));

        self.move_servo(self.config.park_angle(), out);
        out.push(Effect::Pause(SETTLE_MS));
        self.report_lock_status(out);

        self.play(Animation::Alarm, out);
        out.report(Report::Status(StatusCode::RestartAvailable));
    }

    fn standby(&mut self, out: &mut Outbox) {
        self.play(Animation::Standby, out);
        out.report(Report::Status(StatusCode::Standby));
    }

    fn move_servo(&mut self, angle: u8, out: &mut Outbox) {
        self.servo_angle = Some(angle);
        out.push(Effect::Servo(angle));
    }

    /// Send `pattern` unless it is already showing
    fn show(&mut self, pattern: LedPattern, out: &mut Outbox) {
        if self.shown != Some(pattern) {
            self.shown = Some(pattern);
            out.push(Effect::Leds(pattern));
        }
    }

    fn play(&mut self, animation: Animation, out: &mut Outbox) {
        out.push(Effect::Play(animation));
        if let Some(angle) = animation.rest_angle(&self.config) {
            self.servo_angle = Some(angle);
        }
        if let Some(leds) = animation.rest_leds(&self.config) {
            self.shown = Some(leds);
        }
    }

    fn report_lock_status(&self, out: &mut Outbox) {
        if let Some(state) = self
            .servo_angle
            .and_then(|angle| self.config.lock_state(angle))
        {
            out.report(Report::LockStatus(state));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use safelock_protocol::LockState;

    fn drain(out: &mut Outbox) -> Vec<Effect> {
        out.take().into_iter().collect()
    }

    fn reports(out: &mut Outbox) -> Vec<Report> {
        drain(out)
            .into_iter()
            .filter_map(|effect| match effect {
                Effect::Report(report) => Some(report),
                _ => None,
            })
            .collect()
    }

    /// Cam-lock game powered on with the target at 50, sweep at 0
    fn running_game() -> (Game, Outbox) {
        let mut game = Game::new(GameConfig::cam_lock());
        let mut out = Outbox::new();
        game.power_on_with_target(0, 50, &mut out);
        out.take();
        (game, out)
    }

    /// Run the sweep until the dial sits at `angle`
    fn sweep_to(game: &mut Game, angle: u8, now: &mut u32, out: &mut Outbox) {
        while game.dial_angle() != angle {
            *now += game.config().sweep_delay_ms;
            game.tick(*now, out);
            out.take();
            assert!(*now < 60_000, "dial never reached {}", angle);
        }
    }

    #[test]
    fn test_boot_banner() {
        let mut game = Game::new(GameConfig::cam_lock());
        let mut out = Outbox::new();
        game.boot(&mut out);

        let effects = drain(&mut out);
        assert_eq!(effects[0], Effect::Servo(0));
        assert_eq!(effects[1], Effect::Leds(LedPattern::OFF));
        assert_eq!(effects[2], Effect::Report(Report::Status(StatusCode::Standby)));
        assert_eq!(
            effects[3],
            Effect::Report(Report::LockStatus(LockState::Locked))
        );
        assert_eq!(effects[4], Effect::Play(Animation::Standby));
        assert_eq!(game.phase(), Phase::Standby);
    }

    #[test]
    fn test_power_on_sequence() {
        let mut game = Game::new(GameConfig::cam_lock());
        let mut out = Outbox::new();
        game.power_on_with_target(1_000, 42, &mut out);

        let effects = drain(&mut out);
        let expected = [
            Effect::Report(Report::Status(StatusCode::PowerOn)),
            Effect::Report(Report::Difficulty(1)),
            Effect::Servo(0),
            Effect::Pause(500),
            Effect::Report(Report::LockStatus(LockState::Locked)),
            Effect::Report(Report::Status(StatusCode::WelcomeAnimation)),
            Effect::Play(Animation::Welcome),
            Effect::Report(Report::Status(StatusCode::GeneratingCombination)),
            Effect::Report(Report::Target(42)),
            Effect::Report(Report::Tolerance(8)),
            Effect::Report(Report::Attempts(3)),
            Effect::Report(Report::Score(0)),
            Effect::Servo(0),
            Effect::Report(Report::Status(StatusCode::Sweeping)),
        ];
        assert_eq!(effects.as_slice(), &expected);
        assert_eq!(game.phase(), Phase::Sweeping);
        assert_eq!(game.dial_angle(), 0);
    }

    #[test]
    fn test_power_on_while_on_is_noop() {
        let (mut game, mut out) = running_game();
        let before = (game.phase(), *game.session().unwrap(), *game.round().unwrap());

        let mut rng = Pcg32::seed_from_u64(7);
        game.power_on(5_000, &mut rng, &mut out);

        assert!(out.is_empty());
        assert_eq!(
            (game.phase(), *game.session().unwrap(), *game.round().unwrap()),
            before
        );
    }

    #[test]
    fn test_power_off_while_off_is_noop() {
        let mut game = Game::new(GameConfig::cam_lock());
        let mut out = Outbox::new();
        game.power_off(&mut out);
        assert!(out.is_empty());
        assert_eq!(game.phase(), Phase::Standby);
    }

    #[test]
    fn test_power_off_sequence() {
        let (mut game, mut out) = running_game();
        game.power_off(&mut out);

        let effects = drain(&mut out);
        assert_eq!(
            effects[..2],
            [
                Effect::Report(Report::Status(StatusCode::PowerOff)),
                Effect::Report(Report::FinalScore(0)),
            ]
        );
        assert_eq!(effects.last(), Some(&Effect::Report(Report::Status(StatusCode::Standby))));
        assert!(effects.contains(&Effect::Play(Animation::Standby)));
        assert!(game.session().is_none());
        assert!(game.round().is_none());
        assert_eq!(game.phase(), Phase::Standby);
    }

    #[test]
    fn test_winning_scenario_scores_296() {
        let (mut game, mut out) = running_game();
        let mut now = 0;
        sweep_to(&mut game, 54, &mut now, &mut out);
        assert!(now < 10_000);

        // Lock in exactly ten seconds after power-on
        let outcome = game.lock_in(10_000, &mut out);
        let Some(LockOutcome::Hit(score)) = outcome else {
            panic!("expected a hit, got {:?}", outcome);
        };
        assert_eq!(score.total, 296);

        let lines = reports(&mut out);
        assert_eq!(
            lines[..4],
            [
                Report::LockAttempt {
                    current: 54,
                    target: 50,
                    distance: 4,
                    remaining: 3,
                },
                Report::Correct,
                Report::RoundScore(296),
                Report::TotalScore(296),
            ]
        );
        assert!(lines.contains(&Report::Status(StatusCode::SafeUnlocked)));
        assert!(lines.contains(&Report::AttemptsUsed(1)));
        assert!(lines.contains(&Report::LockStatus(LockState::Unlocked)));
        assert_eq!(lines.last(), Some(&Report::Status(StatusCode::GameComplete)));

        assert_eq!(game.phase(), Phase::Success);
        assert_eq!(game.servo_angle(), Some(120));
        assert_eq!(game.session().unwrap().score, 296);
    }

    #[test]
    fn test_three_misses_end_the_game() {
        let (mut game, mut out) = running_game();
        // Dial starts at 0, fifty degrees from the target

        for expected in [2u8, 1] {
            let outcome = game.lock_in(1_000, &mut out);
            assert_eq!(outcome, Some(LockOutcome::Miss { remaining: expected }));
            assert_eq!(game.phase(), Phase::Sweeping);
            let lines = reports(&mut out);
            assert!(lines.contains(&Report::Wrong { remaining: expected }));
            assert_eq!(lines.last(), Some(&Report::Status(StatusCode::Sweeping)));
        }

        let outcome = game.lock_in(1_000, &mut out);
        assert_eq!(outcome, Some(LockOutcome::GameOver));
        assert_eq!(game.phase(), Phase::GameOver);
        assert_eq!(game.session().unwrap().attempts_remaining, 0);

        let lines = reports(&mut out);
        assert!(lines.contains(&Report::Wrong { remaining: 0 }));
        let over = lines
            .iter()
            .position(|r| *r == Report::Status(StatusCode::GameOver))
            .unwrap();
        assert_eq!(lines[over + 1], Report::FinalTarget(50));
        assert_eq!(lines[over + 2], Report::FinalScore(0));
        assert_eq!(lines.last(), Some(&Report::Status(StatusCode::RestartAvailable)));

        // Further lock-ins are ignored
        assert_eq!(game.lock_in(2_000, &mut out), None);
        assert!(out.is_empty());
    }

    #[test]
    fn test_miss_pauses_before_resuming() {
        let (mut game, mut out) = running_game();
        game.lock_in(0, &mut out);
        let effects = drain(&mut out);
        let flash = effects
            .iter()
            .position(|e| *e == Effect::Play(Animation::FailureFlash))
            .unwrap();
        assert_eq!(effects[flash + 1], Effect::Pause(1500));
    }

    #[test]
    fn test_lock_in_ignored_when_off() {
        let mut game = Game::new(GameConfig::cam_lock());
        let mut out = Outbox::new();
        assert_eq!(game.lock_in(0, &mut out), None);
        assert!(out.is_empty());
    }

    #[test]
    fn test_restart_after_game_over() {
        let (mut game, mut out) = running_game();
        for _ in 0..3 {
            game.lock_in(0, &mut out);
        }
        out.take();

        // P alone does nothing until the session is closed
        let mut rng = Pcg32::seed_from_u64(1);
        game.power_on(0, &mut rng, &mut out);
        assert!(out.is_empty());

        game.power_off(&mut out);
        game.power_on(0, &mut rng, &mut out);
        assert_eq!(game.phase(), Phase::Sweeping);
        assert_eq!(game.session().unwrap().attempts_remaining, 3);
    }

    #[test]
    fn test_difficulty_refreshes_tolerance() {
        let (mut game, mut out) = running_game();
        game.set_difficulty(Difficulty::Expert, &mut out);
        assert_eq!(reports(&mut out), [Report::Difficulty(2)]);
        assert_eq!(game.round().unwrap().tolerance, 5);
        assert_eq!(game.round().unwrap().target, 50);
        assert_eq!(game.phase(), Phase::Sweeping);
    }

    #[test]
    fn test_difficulty_while_off_carries_into_session() {
        let mut game = Game::new(GameConfig::cam_lock());
        let mut out = Outbox::new();
        let mut rng = Pcg32::seed_from_u64(3);

        game.handle(Command::SetDifficulty(0), 0, &mut rng, &mut out);
        out.take();
        game.power_on_with_target(0, 30, &mut out);

        let lines = reports(&mut out);
        assert!(lines.contains(&Report::Difficulty(0)));
        assert!(lines.contains(&Report::Tolerance(12)));
    }

    #[test]
    fn test_out_of_range_difficulty_command_lands_on_expert() {
        let (mut game, mut out) = running_game();
        let mut rng = Pcg32::seed_from_u64(5);

        let command = Command::parse("D:9").unwrap();
        game.handle(command, 0, &mut rng, &mut out);

        assert_eq!(game.difficulty(), Difficulty::Expert);
        assert_eq!(reports(&mut out), [Report::Difficulty(2)]);
        assert_eq!(game.round().unwrap().tolerance, 5);
    }

    #[test]
    fn test_sweep_speed_follows_difficulty() {
        let (mut game, mut out) = running_game();
        game.set_difficulty(Difficulty::Expert, &mut out);
        game.tick(50, &mut out);
        assert_eq!(game.dial_angle(), 3);
    }

    #[test]
    fn test_tick_emits_feedback_only_on_change() {
        let (mut game, mut out) = running_game();

        // 50 degrees away: red + blue
        game.tick(10, &mut out);
        let effects = drain(&mut out);
        let cold = LedPattern::single(Indicator::Red).with(Indicator::Blue);
        assert!(effects.contains(&Effect::Leds(cold)));

        game.tick(20, &mut out);
        let effects = drain(&mut out);
        assert!(!effects.iter().any(|e| matches!(e, Effect::Leds(_))));
    }

    #[test]
    fn test_status_cadence() {
        let (mut game, mut out) = running_game();

        game.tick(10, &mut out);
        let count = |out: &mut Outbox| {
            reports(out)
                .iter()
                .filter(|r| matches!(r, Report::GameStatus(_)))
                .count()
        };
        assert_eq!(count(&mut out), 1);

        game.tick(400, &mut out);
        assert_eq!(count(&mut out), 0);

        game.tick(510, &mut out);
        assert_eq!(count(&mut out), 1);
    }

    #[test]
    fn test_status_cadence_across_timer_wrap() {
        let mut game = Game::new(GameConfig::cam_lock());
        let mut out = Outbox::new();
        let start = u32::MAX - 100;
        game.power_on_with_target(start, 50, &mut out);
        out.take();

        let statuses = |out: &mut Outbox| -> Vec<GameStatus> {
            reports(out)
                .into_iter()
                .filter_map(|r| match r {
                    Report::GameStatus(status) => Some(status),
                    _ => None,
                })
                .collect()
        };

        game.tick(u32::MAX - 90, &mut out);
        assert_eq!(statuses(&mut out).len(), 1);

        // 391 ms after the last status
        game.tick(300, &mut out);
        assert!(statuses(&mut out).is_empty());

        // 501 ms after the last status
        game.tick(410, &mut out);
        let sent = statuses(&mut out);
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].elapsed_s, 0);
    }

    #[test]
    fn test_game_status_contents() {
        let (mut game, mut out) = running_game();
        game.tick(2_500, &mut out);
        let status = game.status(2_500).unwrap();
        assert_eq!(status.target, 50);
        assert_eq!(status.attempts_remaining, 3);
        assert_eq!(status.elapsed_s, 2);
        assert_eq!(status.difficulty, 1);
        assert_eq!(status.angle, game.dial_angle());
    }

    #[test]
    fn test_no_ticks_after_round_ends() {
        let (mut game, mut out) = running_game();
        for _ in 0..3 {
            game.lock_in(0, &mut out);
        }
        out.take();

        game.tick(5_000, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn test_led_self_test_sequence() {
        let mut game = Game::new(GameConfig::cam_lock());
        let mut out = Outbox::new();
        game.led_self_test(&mut out);

        let lines = reports(&mut out);
        assert_eq!(
            lines,
            [
                Report::Status(StatusCode::LedTest),
                Report::LedTest(LedTestStep::Single(Indicator::Orange)),
                Report::LedTest(LedTestStep::Single(Indicator::Red)),
                Report::LedTest(LedTestStep::Single(Indicator::Green)),
                Report::LedTest(LedTestStep::Single(Indicator::Blue)),
                Report::LedTest(LedTestStep::AllOn),
                Report::LedTest(LedTestStep::Complete),
            ]
        );
    }

    #[test]
    fn test_led_test_during_sweep_restores_feedback() {
        let (mut game, mut out) = running_game();
        game.tick(10, &mut out);
        out.take();

        game.led_self_test(&mut out);
        out.take();

        game.tick(20, &mut out);
        assert!(out.iter().any(|e| matches!(e, Effect::Leds(_))));
    }

    #[test]
    fn test_manual_lid_overrides() {
        let mut game = Game::new(GameConfig::cam_lock());
        let mut out = Outbox::new();

        game.manual_unlock(&mut out);
        assert_eq!(
            drain(&mut out),
            [
                Effect::Servo(120),
                Effect::Pause(500),
                Effect::Report(Report::LockStatus(LockState::Unlocked)),
            ]
        );

        game.manual_lock(&mut out);
        assert_eq!(
            drain(&mut out),
            [
                Effect::Servo(0),
                Effect::Pause(500),
                Effect::Report(Report::LockStatus(LockState::Locked)),
            ]
        );
    }

    #[test]
    fn test_open_dial_has_no_lid() {
        let mut game = Game::new(GameConfig::full_sweep());
        let mut out = Outbox::new();

        game.manual_unlock(&mut out);
        game.manual_lock(&mut out);
        assert!(out.is_empty());

        game.power_on_with_target(0, 100, &mut out);
        assert!(!out
            .reports()
            .any(|r| matches!(r, Report::LockStatus(_))));
    }

    proptest! {
        #[test]
        fn prop_targets_inside_configured_range(seed in any::<u64>()) {
            for config in [GameConfig::cam_lock(), GameConfig::full_sweep()] {
                let mut game = Game::new(config);
                let mut out = Outbox::new();
                let mut rng = Pcg32::seed_from_u64(seed);
                game.power_on(0, &mut rng, &mut out);

                let target = game.round().unwrap().target;
                prop_assert!(target >= config.target_min && target <= config.target_max);
            }
        }

        #[test]
        fn prop_dial_stays_in_sweep(
            difficulty in proptest::sample::select(Difficulty::ALL.to_vec()),
            ticks in 1u32..600,
        ) {
            let (mut game, mut out) = running_game();
            game.set_difficulty(difficulty, &mut out);
            for i in 1..=ticks {
                game.tick(i * 50, &mut out);
                out.take();
                let angle = game.dial_angle();
                prop_assert!(angle <= game.config().sweep_max);
            }
        }

        #[test]
        fn prop_misses_count_down(misses in 1usize..6) {
            let (mut game, mut out) = running_game();
            for i in 0..misses {
                let before = game.session().unwrap().attempts_remaining;
                game.lock_in(0, &mut out);
                out.take();
                let after = game.session().unwrap().attempts_remaining;
                if i < 3 {
                    prop_assert_eq!(after, before - 1);
                } else {
                    prop_assert_eq!(after, 0);
                }
            }
            prop_assert_eq!(game.phase() == Phase::GameOver, misses >= 3);
        }
    }
}
