//! Commands sent by the web driver
//!
//! Every command is a single line. Most are one letter; difficulty carries
//! a numeric argument after `D:`.

/// Highest difficulty level accepted on the wire
pub const MAX_DIFFICULTY_LEVEL: u8 = 2;

// Wire tokens
const CMD_POWER_ON: &str = "P";
const CMD_POWER_OFF: &str = "O";
const CMD_LOCK_IN: &str = "L";
const CMD_LED_TEST: &str = "T";
const CMD_UNLOCK: &str = "U";
const CMD_LOCK: &str = "K";
const CMD_DIFFICULTY_PREFIX: &str = "D:";

/// Commands accepted from the serial peer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// `P` - start a session
    PowerOn,
    /// `O` - end the session
    PowerOff,
    /// `L` - lock in the current dial position
    LockIn,
    /// `T` - run the LED self-test
    LedTest,
    /// `D:<n>` - set difficulty, already clamped to `0..=2`
    SetDifficulty(u8),
    /// `U` - debug: drive the cam to the unlocked angle
    ManualUnlock,
    /// `K` - debug: drive the cam to the locked angle
    ManualLock,
}

/// Reasons a line did not decode to a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandError {
    /// Line was blank after trimming
    Empty,
    /// Unrecognized command token
    Unknown,
    /// `D:` argument was not an integer
    InvalidArgument,
}

impl Command {
    /// Decode a command from one line of input
    ///
    /// Surrounding whitespace is ignored. Difficulty arguments outside
    /// `0..=2` are clamped rather than rejected.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        match line {
            "" => Err(CommandError::Empty),
            CMD_POWER_ON => Ok(Command::PowerOn),
            CMD_POWER_OFF => Ok(Command::PowerOff),
            CMD_LOCK_IN => Ok(Command::LockIn),
            CMD_LED_TEST => Ok(Command::LedTest),
            CMD_UNLOCK => Ok(Command::ManualUnlock),
            CMD_LOCK => Ok(Command::ManualLock),
            _ => match line.strip_prefix(CMD_DIFFICULTY_PREFIX) {
                Some(arg) => {
                    let level: i32 = arg
                        .trim()
                        .parse()
                        .map_err(|_| CommandError::InvalidArgument)?;
                    Ok(Command::SetDifficulty(clamp_level(level)))
                }
                None => Err(CommandError::Unknown),
            },
        }
    }

    /// Short wire token for logging
    pub fn token(&self) -> &'static str {
        match self {
            Command::PowerOn => CMD_POWER_ON,
            Command::PowerOff => CMD_POWER_OFF,
            Command::LockIn => CMD_LOCK_IN,
            Command::LedTest => CMD_LED_TEST,
            Command::SetDifficulty(_) => CMD_DIFFICULTY_PREFIX,
            Command::ManualUnlock => CMD_UNLOCK,
            Command::ManualLock => CMD_LOCK,
        }
    }

    /// Returns true for the lid override commands
    pub fn is_debug(&self) -> bool {
        matches!(self, Command::ManualUnlock | Command::ManualLock)
    }
}

/// Clamp a raw difficulty level into the accepted range
pub fn clamp_level(level: i32) -> u8 {
    level.clamp(0, MAX_DIFFICULTY_LEVEL as i32) as u8
}
