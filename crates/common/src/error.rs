//! Decode and parse errors for Intcode programs.

use crate::Word;
use thiserror::Error;

/// Errors that occur while decoding a single instruction cell.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The low two digits of the cell do not name an operation, or the
    /// cell is negative.
    #[error("illegal opcode in cell {0}")]
    IllegalOpcode(Word),

    /// A parameter mode digit is not 0, 1 or 2.
    #[error("invalid parameter mode {digit} in cell {raw}")]
    InvalidMode { raw: Word, digit: Word },
}

/// Errors that occur while parsing program text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The text contained no integers at all.
    #[error("empty program")]
    Empty,

    /// A comma-separated token is not a signed decimal integer.
    #[error("invalid integer '{token}' at position {index}")]
    InvalidInteger { index: usize, token: String },
}
