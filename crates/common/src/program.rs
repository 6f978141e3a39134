//! Program representation for Intcode.
//!
//! A program is a flat sequence of signed integers, the initial contents of
//! memory starting at address 0. Its only exchange format is text: signed
//! decimal integers separated by commas.

use crate::error::ParseError;
use crate::Word;
use std::fmt;
use std::str::FromStr;

/// An Intcode program: the initial memory image.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Program {
    /// The cells, loaded at addresses `0..len`.
    pub cells: Vec<Word>,
}

impl Program {
    /// Create a new program from a vector of cells.
    pub fn new(cells: Vec<Word>) -> Self {
        Self { cells }
    }

    /// Parse comma-separated program text.
    ///
    /// Whitespace around tokens and a single trailing comma are accepted,
    /// so files ending in a newline parse as expected.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let trimmed = text.trim();
        let trimmed = trimmed.strip_suffix(',').unwrap_or(trimmed);
        if trimmed.is_empty() {
            return Err(ParseError::Empty);
        }

        let cells = trimmed
            .split(',')
            .enumerate()
            .map(|(index, token)| {
                let token = token.trim();
                token.parse::<Word>().map_err(|_| ParseError::InvalidInteger {
                    index,
                    token: token.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { cells })
    }

    /// Number of cells in the program.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns true if the program has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl From<Vec<Word>> for Program {
    fn from(cells: Vec<Word>) -> Self {
        Self::new(cells)
    }
}

impl FromStr for Program {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, cell) in self.cells.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{cell}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple() {
        let program = Program::parse("1,9,10,3,2,3,11,0,99,30,40,50").unwrap();
        assert_eq!(program.len(), 12);
        assert_eq!(program.cells[0], 1);
        assert_eq!(program.cells[11], 50);
    }

    #[test]
    fn parse_negative_and_large() {
        let program = Program::parse("104,1125899906842624,-7,99").unwrap();
        assert_eq!(program.cells, vec![104, 1125899906842624, -7, 99]);
    }

    #[test]
    fn parse_tolerates_whitespace_and_trailing_newline() {
        let program = Program::parse(" 3, 0 ,4,0,99\n").unwrap();
        assert_eq!(program.cells, vec![3, 0, 4, 0, 99]);
    }

    #[test]
    fn parse_tolerates_trailing_comma() {
        let program = Program::parse("99,\n").unwrap();
        assert_eq!(program.cells, vec![99]);
    }

    #[test]
    fn parse_empty_is_error() {
        assert_eq!(Program::parse(""), Err(ParseError::Empty));
        assert_eq!(Program::parse("  \n"), Err(ParseError::Empty));
    }

    #[test]
    fn parse_invalid_token_reports_position() {
        assert_eq!(
            Program::parse("1,2,three,4"),
            Err(ParseError::InvalidInteger {
                index: 2,
                token: "three".into()
            })
        );
    }

    #[test]
    fn parse_empty_token_is_error() {
        assert_eq!(
            Program::parse("1,,2"),
            Err(ParseError::InvalidInteger {
                index: 1,
                token: String::new()
            })
        );
    }

    #[test]
    fn display_is_canonical() {
        let program = Program::new(vec![1, -2, 99]);
        assert_eq!(program.to_string(), "1,-2,99");
    }

    #[test]
    fn from_str_matches_parse() {
        let a: Program = "4,3,99".parse().unwrap();
        assert_eq!(a, Program::parse("4,3,99").unwrap());
    }

    #[test]
    fn empty_program() {
        let program = Program::default();
        assert!(program.is_empty());
        assert_eq!(program.len(), 0);
    }
}
