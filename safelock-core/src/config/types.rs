//! Game configuration types
//!
//! One `GameConfig` covers both dial builds: the cam-lock box whose sweep
//! stays below the unlock angle, and the open dial that uses the full servo
//! travel without a lid.

use safelock_protocol::LockState;

use super::Difficulty;

/// Largest angle a hobby servo accepts
pub const MAX_ANGLE: u8 = 180;

/// Milliseconds between sweep steps
pub const SWEEP_DELAY_MS: u32 = 50;

/// Milliseconds between `GAME_STATUS` snapshots
pub const STATUS_INTERVAL_MS: u32 = 500;

/// Pause after a wrong guess before the sweep resumes
pub const RETRY_PAUSE_MS: u32 = 1500;

/// Lock-in attempts per round
pub const DEFAULT_ATTEMPTS: u8 = 3;

/// The cam reads as unlocked within this many degrees of the unlock angle
pub const LOCK_STATUS_MARGIN_DEG: u8 = 10;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Sweep min must be below sweep max
    InvalidSweepRange,
    /// Target min must not exceed target max
    InvalidTargetRange,
    /// Target range must sit inside the sweep range
    TargetOutsideSweep,
    /// An angle exceeds [`MAX_ANGLE`]
    AngleOutOfRange,
    /// Lid angles must satisfy locked < unlocked <= open
    InvalidLid,
    /// Sweep reaches far enough to read as unlocked
    SweepOpensLid,
    /// At least one attempt is required
    NoAttempts,
    /// Timing intervals must be non-zero
    ZeroInterval,
}

/// Cam angles for builds with a sliding lid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LidLock {
    /// Cam flat edge blocks the lid
    pub locked: u8,
    /// Cam round edge lets the lid slide
    pub unlocked: u8,
    /// Celebration swing position
    pub open: u8,
}

impl Default for LidLock {
    fn default() -> Self {
        Self {
            locked: 0,
            unlocked: 120,
            open: 180,
        }
    }
}

/// Game configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GameConfig {
    /// Lowest sweep angle (degrees)
    pub sweep_min: u8,
    /// Highest sweep angle (degrees)
    pub sweep_max: u8,
    /// Milliseconds between sweep steps
    pub sweep_delay_ms: u32,
    /// Lowest possible target angle
    pub target_min: u8,
    /// Highest possible target angle (inclusive)
    pub target_max: u8,
    /// Cam lock angles, if the build has a lid
    pub lid: Option<LidLock>,
    /// Angle nudged toward on a hit before unlocking
    pub tease_angle: Option<u8>,
    /// Milliseconds between status snapshots
    pub status_interval_ms: u32,
    /// Pause after a wrong guess
    pub retry_pause_ms: u32,
    /// Lock-in attempts per round
    pub attempts: u8,
    /// Difficulty at boot
    pub difficulty: Difficulty,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::cam_lock()
    }
}

impl GameConfig {
    /// Cam-lock box: 0-90° sweep, lid unlocks at 120°
    pub const fn cam_lock() -> Self {
        Self {
            sweep_min: 0,
            sweep_max: 90,
            sweep_delay_ms: SWEEP_DELAY_MS,
            target_min: 20,
            target_max: 89,
            lid: Some(LidLock {
                locked: 0,
                unlocked: 120,
                open: 180,
            }),
            tease_angle: Some(60),
            status_interval_ms: STATUS_INTERVAL_MS,
            retry_pause_ms: RETRY_PAUSE_MS,
            attempts: DEFAULT_ATTEMPTS,
            difficulty: Difficulty::Normal,
        }
    }

    /// Open dial: full 0-180° sweep, no lid
    pub const fn full_sweep() -> Self {
        Self {
            sweep_min: 0,
            sweep_max: 180,
            sweep_delay_ms: SWEEP_DELAY_MS,
            target_min: 20,
            target_max: 159,
            lid: None,
            tease_angle: None,
            status_interval_ms: STATUS_INTERVAL_MS,
            retry_pause_ms: RETRY_PAUSE_MS,
            attempts: DEFAULT_ATTEMPTS,
            difficulty: Difficulty::Normal,
        }
    }

    /// Check internal consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sweep_max > MAX_ANGLE || self.target_max > MAX_ANGLE {
            return Err(ConfigError::AngleOutOfRange);
        }
        if self.tease_angle.is_some_and(|a| a > MAX_ANGLE) {
            return Err(ConfigError::AngleOutOfRange);
        }
        if self.sweep_min >= self.sweep_max {
            return Err(ConfigError::InvalidSweepRange);
        }
        if self.target_min > self.target_max {
            return Err(ConfigError::InvalidTargetRange);
        }
        if self.target_min < self.sweep_min || self.target_max > self.sweep_max {
            return Err(ConfigError::TargetOutsideSweep);
        }
        if let Some(lid) = self.lid {
            if lid.open > MAX_ANGLE {
                return Err(ConfigError::AngleOutOfRange);
            }
            if lid.locked >= lid.unlocked || lid.unlocked > lid.open {
                return Err(ConfigError::InvalidLid);
            }
            if self.sweep_max >= lid.unlocked.saturating_sub(LOCK_STATUS_MARGIN_DEG) {
                return Err(ConfigError::SweepOpensLid);
            }
        }
        if self.attempts == 0 {
            return Err(ConfigError::NoAttempts);
        }
        if self.sweep_delay_ms == 0 || self.status_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        Ok(())
    }

    /// Resting angle: the locked cam position, or the low end of the sweep
    pub fn park_angle(&self) -> u8 {
        self.lid.map_or(self.sweep_min, |lid| lid.locked)
    }

    /// Angle held after a win
    pub fn unlock_angle(&self) -> u8 {
        self.lid.map_or(self.sweep_max, |lid| lid.unlocked)
    }

    /// Far end of the celebration swing
    pub fn open_angle(&self) -> u8 {
        self.lid.map_or(self.sweep_max, |lid| lid.open)
    }

    /// Clamp an angle into the sweep range
    pub fn clamp_to_sweep(&self, angle: u8) -> u8 {
        angle.clamp(self.sweep_min, self.sweep_max)
    }

    /// Where each round's sweep starts
    pub fn sweep_start(&self) -> u8 {
        self.clamp_to_sweep(self.park_angle())
    }

    /// Lid state implied by a cam angle, `None` on builds without a lid
    pub fn lock_state(&self, angle: u8) -> Option<LockState> {
        self.lid.map(|lid| {
            if angle >= lid.unlocked.saturating_sub(LOCK_STATUS_MARGIN_DEG) {
                LockState::Unlocked
            } else {
                LockState::Locked
            }
        })
    }
}
