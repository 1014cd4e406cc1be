//! Status lines sent back to the web driver
//!
//! Every report renders as `KEY:value[,value...]` on its own line. The
//! driver keys off the prefix, so the spelling here is the wire contract.

use core::fmt::{self, Write};

use heapless::String;

/// Longest rendered report, excluding the line terminator
pub const MAX_REPORT_LEN: usize = 64;

/// Rendered report line
pub type ReportLine = String<MAX_REPORT_LEN>;

/// Error returned when a report does not fit in [`MAX_REPORT_LEN`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReportTooLong;

/// Values carried by `STATUS:` lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StatusCode {
    Standby,
    PowerOn,
    PowerOff,
    WelcomeAnimation,
    GeneratingCombination,
    Sweeping,
    SafeUnlocked,
    GameComplete,
    GameOver,
    RestartAvailable,
    LedTest,
}

impl StatusCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusCode::Standby => "STANDBY",
            StatusCode::PowerOn => "POWER_ON",
            StatusCode::PowerOff => "POWER_OFF",
            StatusCode::WelcomeAnimation => "WELCOME_ANIMATION",
            StatusCode::GeneratingCombination => "GENERATING_COMBINATION",
            StatusCode::Sweeping => "SWEEPING",
            StatusCode::SafeUnlocked => "SAFE_UNLOCKED",
            StatusCode::GameComplete => "GAME_COMPLETE",
            StatusCode::GameOver => "GAME_OVER",
            StatusCode::RestartAvailable => "RESTART_AVAILABLE",
            StatusCode::LedTest => "LED_TEST",
        }
    }
}

/// The four status LEDs, in wiring order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Indicator {
    Orange,
    Red,
    Green,
    Blue,
}

impl Indicator {
    /// All indicators in wiring order
    pub const ALL: [Indicator; 4] = [
        Indicator::Orange,
        Indicator::Red,
        Indicator::Green,
        Indicator::Blue,
    ];

    /// Position in the LED bank
    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Indicator::Orange => "ORANGE",
            Indicator::Red => "RED",
            Indicator::Green => "GREEN",
            Indicator::Blue => "BLUE",
        }
    }
}

/// Progress markers of the LED self-test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedTestStep {
    /// One LED lit on its own
    Single(Indicator),
    /// All LEDs lit together
    AllOn,
    /// Test finished, LEDs off
    Complete,
}

/// Cam position as seen by the sliding lid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LockState {
    Locked,
    Unlocked,
}

/// Periodic snapshot sent while a round is live
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GameStatus {
    pub angle: u8,
    pub target: u8,
    pub attempts_remaining: u8,
    pub score: u32,
    pub elapsed_s: u32,
    pub difficulty: u8,
}

/// One outbound status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Report {
    /// `STATUS:<code>`
    Status(StatusCode),
    /// `DIFFICULTY:<n>`
    Difficulty(u8),
    /// `TARGET:<angle>`
    Target(u8),
    /// `TOLERANCE:<deg>`
    Tolerance(u8),
    /// `ATTEMPTS:<n>`
    Attempts(u8),
    /// `SCORE:<n>`
    Score(u32),
    /// `LOCK_ATTEMPT:<current>,<target>,<distance>,<remaining>`
    LockAttempt {
        current: u8,
        target: u8,
        distance: u8,
        remaining: u8,
    },
    /// `RESULT:CORRECT`
    Correct,
    /// `RESULT:WRONG,<remaining>`
    Wrong { remaining: u8 },
    /// `ROUND_SCORE:<n>`
    RoundScore(u32),
    /// `TOTAL_SCORE:<n>`
    TotalScore(u32),
    /// `GAME_STATUS:<angle>,<target>,<remaining>,<score>,<elapsed>,<difficulty>`
    GameStatus(GameStatus),
    /// `FINAL_SCORE:<n>`
    FinalScore(u32),
    /// `FINAL_TARGET:<angle>`
    FinalTarget(u8),
    /// `ATTEMPTS_USED:<n>`
    AttemptsUsed(u8),
    /// `LED_TEST:<step>`
    LedTest(LedTestStep),
    /// `LOCK_STATUS:<state>`
    LockStatus(LockState),
}

impl Report {
    /// Render this report without the line terminator
    pub fn encode(&self) -> Result<ReportLine, ReportTooLong> {
        let mut line = ReportLine::new();
        write!(line, "{}", self).map_err(|_| ReportTooLong)?;
        Ok(line)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::Status(code) => write!(f, "STATUS:{}", code.as_str()),
            Report::Difficulty(n) => write!(f, "DIFFICULTY:{}", n),
            Report::Target(angle) => write!(f, "TARGET:{}", angle),
            Report::Tolerance(deg) => write!(f, "TOLERANCE:{}", deg),
            Report::Attempts(n) => write!(f, "ATTEMPTS:{}", n),
            Report::Score(n) => write!(f, "SCORE:{}", n),
            Report::LockAttempt {
                current,
                target,
                distance,
                remaining,
            } => write!(
                f,
                "LOCK_ATTEMPT:{},{},{},{}",
                current, target, distance, remaining
            ),
            Report::Correct => f.write_str("RESULT:CORRECT"),
            Report::Wrong { remaining } => write!(f, "RESULT:WRONG,{}", remaining),
            Report::RoundScore(n) => write!(f, "ROUND_SCORE:{}", n),
            Report::TotalScore(n) => write!(f, "TOTAL_SCORE:{}", n),
            Report::GameStatus(s) => write!(
                f,
                "GAME_STATUS:{},{},{},{},{},{}",
                s.angle, s.target, s.attempts_remaining, s.score, s.elapsed_s, s.difficulty
            ),
            Report::FinalScore(n) => write!(f, "FINAL_SCORE:{}", n),
            Report::FinalTarget(angle) => write!(f, "FINAL_TARGET:{}", angle),
            Report::AttemptsUsed(n) => write!(f, "ATTEMPTS_USED:{}", n),
            Report::LedTest(step) => match step {
                LedTestStep::Single(led) => write!(f, "LED_TEST:{}", led.as_str()),
                LedTestStep::AllOn => f.write_str("LED_TEST:ALL_ON"),
                LedTestStep::Complete => f.write_str("LED_TEST:COMPLETE"),
            },
            Report::LockStatus(state) => match state {
                LockState::Locked => f.write_str("LOCK_STATUS:LOCKED"),
                LockState::Unlocked => f.write_str("LOCK_STATUS:UNLOCKED"),
            },
        }
    }
}
