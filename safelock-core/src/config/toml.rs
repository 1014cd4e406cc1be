//! Minimal TOML reader for `game.toml`
//!
//! Handles only the subset the game config needs and never allocates.
//!
//! Supported features:
//! - `[section]` headers: `sweep`, `target`, `lid`, `timing`, `game`
//! - `key = <integer>` pairs
//! - Comments (`# ...`), full-line or trailing
//!
//! NOT supported:
//! - Strings, floats, booleans, arrays or inline tables
//! - Dotted keys or nested sections
//!
//! A `[lid]` section turns the lid on (starting from [`LidLock::default`]);
//! leaving it out describes a build without a lid.

use super::{ConfigError, Difficulty, GameConfig, LidLock};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection { line: u16 },
    /// Key not recognized in its section
    UnknownKey { line: u16 },
    /// Line is neither a header nor `key = value`
    Malformed { line: u16 },
    /// Value is not an integer or does not fit its field
    InvalidValue { line: u16 },
    /// File parsed but the result failed validation
    Invalid(ConfigError),
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Sweep,
    Target,
    Lid,
    Timing,
    Game,
}

/// Parse `game.toml` into a validated [`GameConfig`]
///
/// Keys left out keep their [`GameConfig::cam_lock`] values; the lid and
/// tease angle are off unless a `[lid]` section is present.
pub fn parse_config(input: &str) -> Result<GameConfig, ParseError> {
    let mut config = GameConfig {
        lid: None,
        tease_angle: None,
        ..GameConfig::cam_lock()
    };
    let mut section = Section::Root;

    for (index, raw) in input.lines().enumerate() {
        let line_no = (index + 1).min(u16::MAX as usize) as u16;
        let line = strip_comment(raw).trim();

        if line.is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix('[') {
            let name = header
                .strip_suffix(']')
                .ok_or(ParseError::InvalidSection { line: line_no })?;
            section = parse_section_header(name.trim())
                .ok_or(ParseError::InvalidSection { line: line_no })?;
            if section == Section::Lid && config.lid.is_none() {
                config.lid = Some(LidLock::default());
            }
            continue;
        }

        let (key, value) = line
            .split_once('=')
            .ok_or(ParseError::Malformed { line: line_no })?;
        let value: u32 = value
            .trim()
            .parse()
            .map_err(|_| ParseError::InvalidValue { line: line_no })?;

        apply_key(&mut config, section, key.trim(), value, line_no)?;
    }

    config.validate().map_err(ParseError::Invalid)?;
    Ok(config)
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

fn parse_section_header(name: &str) -> Option<Section> {
    match name {
        "sweep" => Some(Section::Sweep),
        "target" => Some(Section::Target),
        "lid" => Some(Section::Lid),
        "timing" => Some(Section::Timing),
        "game" => Some(Section::Game),
        _ => None,
    }
}

fn apply_key(
    config: &mut GameConfig,
    section: Section,
    key: &str,
    value: u32,
    line: u16,
) -> Result<(), ParseError> {
    let narrow = || u8::try_from(value).map_err(|_| ParseError::InvalidValue { line });

    match (section, key) {
        (Section::Sweep, "min") => config.sweep_min = narrow()?,
        (Section::Sweep, "max") => config.sweep_max = narrow()?,
        (Section::Sweep, "delay_ms") => config.sweep_delay_ms = value,

        (Section::Target, "min") => config.target_min = narrow()?,
        (Section::Target, "max") => config.target_max = narrow()?,

        (Section::Lid, "tease") => config.tease_angle = Some(narrow()?),
        (Section::Lid, field) => {
            let lid = config.lid.get_or_insert_with(LidLock::default);
            match field {
                "locked" => lid.locked = narrow()?,
                "unlocked" => lid.unlocked = narrow()?,
                "open" => lid.open = narrow()?,
                _ => return Err(ParseError::UnknownKey { line }),
            }
        }

        (Section::Timing, "status_interval_ms") => config.status_interval_ms = value,
        (Section::Timing, "retry_pause_ms") => config.retry_pause_ms = value,

        (Section::Game, "attempts") => config.attempts = narrow()?,
        (Section::Game, "difficulty") => {
            config.difficulty = Difficulty::from_level(narrow()?)
                .ok_or(ParseError::InvalidValue { line })?;
        }

        _ => return Err(ParseError::UnknownKey { line }),
    }

    Ok(())
}
