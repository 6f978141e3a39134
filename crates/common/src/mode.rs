//! Parameter addressing modes.

use crate::Word;
use std::fmt;

/// How a parameter cell is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// The parameter is an absolute address to dereference.
    #[default]
    Position,
    /// The parameter is the value itself. Never valid for write targets.
    Immediate,
    /// The parameter is an offset from the relative base, then dereferenced.
    Relative,
}

/// All addressing modes, by digit.
pub const ALL_MODES: [Mode; 3] = [Mode::Position, Mode::Immediate, Mode::Relative];

impl TryFrom<Word> for Mode {
    type Error = Word;

    /// Convert a single mode digit. The error carries the rejected digit.
    fn try_from(digit: Word) -> Result<Self, Self::Error> {
        match digit {
            0 => Ok(Mode::Position),
            1 => Ok(Mode::Immediate),
            2 => Ok(Mode::Relative),
            other => Err(other),
        }
    }
}

impl Mode {
    /// The decimal digit that selects this mode.
    pub fn digit(&self) -> Word {
        match self {
            Mode::Position => 0,
            Mode::Immediate => 1,
            Mode::Relative => 2,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Position => write!(f, "pos"),
            Mode::Immediate => write!(f, "imm"),
            Mode::Relative => write!(f, "rel"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digit_roundtrip() {
        for &mode in &ALL_MODES {
            assert_eq!(Mode::try_from(mode.digit()), Ok(mode));
        }
    }

    #[test]
    fn rejects_out_of_range_digits() {
        assert_eq!(Mode::try_from(3), Err(3));
        assert_eq!(Mode::try_from(9), Err(9));
        assert_eq!(Mode::try_from(-1), Err(-1));
    }

    #[test]
    fn default_is_position() {
        assert_eq!(Mode::default(), Mode::Position);
    }
}
