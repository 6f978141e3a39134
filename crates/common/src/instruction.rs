//! Instruction decoding for the Intcode instruction set.
//!
//! An instruction cell packs the opcode and the parameter modes as decimal
//! digits:
//! ```text
//!   A B C D E
//!   | | | +-+-- opcode (raw % 100)
//!   | | +------ mode of parameter 1
//!   | +-------- mode of parameter 2
//!   +---------- mode of parameter 3
//! ```
//! Missing digits are mode 0 (position). Digits above the opcode's declared
//! parameters are ignored.

use crate::error::DecodeError;
use crate::mode::Mode;
use crate::opcode::Opcode;
use crate::Word;
use std::fmt;

/// Largest parameter count of any opcode.
pub const MAX_PARAMS: usize = 3;

/// A decoded instruction cell: opcode plus one addressing mode per parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    /// The operation to perform.
    pub opcode: Opcode,
    /// Addressing modes; entries beyond `opcode.param_count()` are `Position`.
    pub modes: [Mode; MAX_PARAMS],
}

impl Instruction {
    /// Create an instruction with all parameters in position mode.
    pub fn new(opcode: Opcode) -> Self {
        Self {
            opcode,
            modes: [Mode::Position; MAX_PARAMS],
        }
    }

    /// Create an instruction with explicit modes.
    ///
    /// Modes beyond the opcode's arity are reset to `Position` so that
    /// `decode(encode(x)) == x` holds.
    pub fn with_modes(opcode: Opcode, modes: [Mode; MAX_PARAMS]) -> Self {
        let mut modes = modes;
        for mode in modes.iter_mut().skip(opcode.param_count()) {
            *mode = Mode::Position;
        }
        Self { opcode, modes }
    }

    /// Decode a raw memory cell into an opcode and its parameter modes.
    pub fn decode(raw: Word) -> Result<Self, DecodeError> {
        if raw < 0 {
            return Err(DecodeError::IllegalOpcode(raw));
        }

        let opcode = Opcode::try_from(raw % 100).map_err(|_| DecodeError::IllegalOpcode(raw))?;

        let mut modes = [Mode::Position; MAX_PARAMS];
        let mut digits = raw / 100;
        for mode in modes.iter_mut().take(opcode.param_count()) {
            *mode = Mode::try_from(digits % 10)
                .map_err(|digit| DecodeError::InvalidMode { raw, digit })?;
            digits /= 10;
        }

        Ok(Self { opcode, modes })
    }

    /// Encode back into a raw cell (the shortest form: no superfluous digits).
    pub fn encode(&self) -> Word {
        let mut raw = self.opcode as u8 as Word;
        let mut place = 100;
        for mode in self.params() {
            raw += mode.digit() * place;
            place *= 10;
        }
        raw
    }

    /// The modes of the declared parameters only.
    pub fn params(&self) -> &[Mode] {
        &self.modes[..self.opcode.param_count()]
    }

    /// Mode of parameter `index` (zero-based).
    pub fn mode(&self, index: usize) -> Mode {
        self.modes[index]
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.opcode.mnemonic())?;
        for mode in self.params() {
            write!(f, " {mode}")?;
        }
        Ok(())
    }
}
