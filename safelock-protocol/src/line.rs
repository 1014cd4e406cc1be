//! Line framing for the serial link.
//!
//! Commands arrive as ASCII text terminated by `\n`. A trailing `\r` is
//! dropped so CRLF terminals work unchanged. Lines longer than
//! [`MAX_LINE_LEN`] are discarded up to the next terminator.

use heapless::String;

/// Line terminator
pub const LINE_END: u8 = b'\n';

/// Longest accepted command line, excluding the terminator
pub const MAX_LINE_LEN: usize = 32;

/// Errors reported while assembling a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineError {
    /// Line exceeded [`MAX_LINE_LEN`]; bytes are dropped until the next `\n`
    Overflow,
    /// Line contained a non-ASCII byte and was dropped
    NonAscii,
}

/// A complete, non-blank command line
pub type Line = String<MAX_LINE_LEN>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// Accumulating bytes of the current line
    Collecting,
    /// Current line overflowed, skipping to the terminator
    Discarding,
    /// Current line held a non-ASCII byte, skipping to the terminator
    Rejected,
}

/// Byte-at-a-time line assembler
#[derive(Debug, Clone)]
pub struct LineParser {
    state: ParseState,
    buffer: Line,
}

impl Default for LineParser {
    fn default() -> Self {
        Self::new()
    }
}

impl LineParser {
    /// Create a new line parser
    pub const fn new() -> Self {
        Self {
            state: ParseState::Collecting,
            buffer: String::new(),
        }
    }

    /// Reset the parser, dropping any partial line
    pub fn reset(&mut self) {
        self.state = ParseState::Collecting;
        self.buffer.clear();
    }

    /// Feed a single byte to the parser
    ///
    /// Returns `Ok(Some(line))` when a terminator completes a non-blank line,
    /// `Ok(None)` when more bytes are needed, or `Err` once per dropped line.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Line>, LineError> {
        if byte == LINE_END {
            let state = self.state;
            let line = core::mem::take(&mut self.buffer);
            self.state = ParseState::Collecting;

            return match state {
                ParseState::Collecting if line.trim().is_empty() => Ok(None),
                ParseState::Collecting => Ok(Some(line)),
                ParseState::Discarding => Err(LineError::Overflow),
                ParseState::Rejected => Err(LineError::NonAscii),
            };
        }

        if self.state != ParseState::Collecting || byte == b'\r' {
            return Ok(None);
        }

        if !byte.is_ascii() {
            self.buffer.clear();
            self.state = ParseState::Rejected;
            return Ok(None);
        }

        if self.buffer.push(byte as char).is_err() {
            self.buffer.clear();
            self.state = ParseState::Discarding;
        }
        Ok(None)
    }

    /// Number of bytes buffered for the line in progress
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }
}
