//! Single-key interactive commands.

use std::fmt;

/// A command decoded from one input byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    RaiseHigh,
    LowerHigh,
    RaiseLow,
    LowerLow,
    ClearHistory,
    Quit,
    NoOp,
}

impl Command {
    /// Commands shown in the dashboard help, in display order.
    pub const BOUND: [Command; 6] = [
        Command::RaiseHigh,
        Command::RaiseLow,
        Command::LowerHigh,
        Command::LowerLow,
        Command::ClearHistory,
        Command::Quit,
    ];

    /// Decodes an input byte. Unknown bytes are no-ops.
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            b'h' => Command::RaiseHigh,
            b'H' => Command::LowerHigh,
            b'l' => Command::RaiseLow,
            b'L' => Command::LowerLow,
            b'r' => Command::ClearHistory,
            b'q' => Command::Quit,
            _ => Command::NoOp,
        }
    }

    /// Returns the key bound to this command.
    pub fn key(&self) -> Option<char> {
        match self {
            Command::RaiseHigh => Some('h'),
            Command::LowerHigh => Some('H'),
            Command::RaiseLow => Some('l'),
            Command::LowerLow => Some('L'),
            Command::ClearHistory => Some('r'),
            Command::Quit => Some('q'),
            Command::NoOp => None,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::RaiseHigh => write!(f, "Increase high threshold"),
            Command::LowerHigh => write!(f, "Decrease high threshold"),
            Command::RaiseLow => write!(f, "Increase low threshold"),
            Command::LowerLow => write!(f, "Decrease low threshold"),
            Command::ClearHistory => write!(f, "Reset log"),
            Command::Quit => write!(f, "Quit"),
            Command::NoOp => write!(f, "No-op"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_byte() {
        assert_eq!(Command::from_byte(b'h'), Command::RaiseHigh);
        assert_eq!(Command::from_byte(b'H'), Command::LowerHigh);
        assert_eq!(Command::from_byte(b'l'), Command::RaiseLow);
        assert_eq!(Command::from_byte(b'L'), Command::LowerLow);
        assert_eq!(Command::from_byte(b'r'), Command::ClearHistory);
        assert_eq!(Command::from_byte(b'q'), Command::Quit);
    }

    #[test]
    fn test_unknown_is_noop() {
        for byte in [b'x', b'R', b'Q', b' ', 0u8, 0x1B, 0xFF] {
            assert_eq!(Command::from_byte(byte), Command::NoOp);
        }
    }

    #[test]
    fn test_key_matches_decode() {
        for command in Command::BOUND {
            let key = command.key().unwrap();
            assert_eq!(Command::from_byte(key as u8), command);
        }
        assert_eq!(Command::NoOp.key(), None);
    }
}
