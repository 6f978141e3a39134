//! Opcode definitions for the Intcode instruction set.
//!
//! An opcode is the low two decimal digits of an instruction cell. Each
//! opcode declares how many parameter cells follow it.

use crate::error::DecodeError;
use crate::Word;

/// Identifies the operation to perform.
///
/// The discriminant is the two-digit numeric opcode as it appears in
/// program memory.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    // Arithmetic
    /// `p3 = p1 + p2`.
    Add = 1,
    /// `p3 = p1 * p2`.
    Multiply = 2,

    // I/O
    /// Take the next input value and store it at `p1`.
    Input = 3,
    /// Emit `p1` to the output queue.
    Output = 4,

    // Control transfer
    /// Jump to `p2` if `p1` is non-zero.
    JumpIfTrue = 5,
    /// Jump to `p2` if `p1` is zero.
    JumpIfFalse = 6,

    // Comparison
    /// `p3 = 1` if `p1 < p2`, else `0`.
    LessThan = 7,
    /// `p3 = 1` if `p1 == p2`, else `0`.
    Equals = 8,

    // Base adjustment
    /// `relative_base += p1`.
    AdjustRelativeBase = 9,

    // Machine control
    /// Stop the machine. Terminal.
    Halt = 99,
}

/// All valid opcodes, in numeric order. Useful for exhaustive testing.
pub const ALL_OPCODES: [Opcode; 10] = [
    Opcode::Add,
    Opcode::Multiply,
    Opcode::Input,
    Opcode::Output,
    Opcode::JumpIfTrue,
    Opcode::JumpIfFalse,
    Opcode::LessThan,
    Opcode::Equals,
    Opcode::AdjustRelativeBase,
    Opcode::Halt,
];

impl TryFrom<Word> for Opcode {
    type Error = DecodeError;

    /// Interpret `value` as a bare two-digit opcode (no mode digits).
    fn try_from(value: Word) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Opcode::Add),
            2 => Ok(Opcode::Multiply),
            3 => Ok(Opcode::Input),
            4 => Ok(Opcode::Output),
            5 => Ok(Opcode::JumpIfTrue),
            6 => Ok(Opcode::JumpIfFalse),
            7 => Ok(Opcode::LessThan),
            8 => Ok(Opcode::Equals),
            9 => Ok(Opcode::AdjustRelativeBase),
            99 => Ok(Opcode::Halt),
            _ => Err(DecodeError::IllegalOpcode(value)),
        }
    }
}

impl Opcode {
    /// Number of parameter cells following the opcode cell.
    pub fn param_count(&self) -> usize {
        match self {
            Opcode::Add | Opcode::Multiply | Opcode::LessThan | Opcode::Equals => 3,
            Opcode::JumpIfTrue | Opcode::JumpIfFalse => 2,
            Opcode::Input | Opcode::Output | Opcode::AdjustRelativeBase => 1,
            Opcode::Halt => 0,
        }
    }

    /// Instruction width in cells: the opcode cell plus its parameters.
    ///
    /// This is how far the instruction pointer advances when the
    /// instruction does not transfer control.
    pub fn width(&self) -> usize {
        self.param_count() + 1
    }

    /// Index of the parameter this opcode writes to, if any.
    pub fn write_param(&self) -> Option<usize> {
        match self {
            Opcode::Add | Opcode::Multiply | Opcode::LessThan | Opcode::Equals => Some(2),
            Opcode::Input => Some(0),
            _ => None,
        }
    }

    /// Returns the assembly-style mnemonic for this opcode.
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Opcode::Add => "ADD",
            Opcode::Multiply => "MUL",
            Opcode::Input => "IN",
            Opcode::Output => "OUT",
            Opcode::JumpIfTrue => "JNZ",
            Opcode::JumpIfFalse => "JZ",
            Opcode::LessThan => "LT",
            Opcode::Equals => "EQ",
            Opcode::AdjustRelativeBase => "ARB",
            Opcode::Halt => "HALT",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_opcodes_count() {
        assert_eq!(ALL_OPCODES.len(), 10);
    }

    #[test]
    fn roundtrip_all_valid_opcodes() {
        for &opcode in &ALL_OPCODES {
            let value = opcode as u8 as Word;
            assert_eq!(Opcode::try_from(value), Ok(opcode));
        }
    }

    #[test]
    fn zero_is_illegal() {
        assert_eq!(Opcode::try_from(0), Err(DecodeError::IllegalOpcode(0)));
    }

    #[test]
    fn gap_between_nine_and_ninety_nine_is_illegal() {
        for value in 10..99 {
            assert_eq!(
                Opcode::try_from(value),
                Err(DecodeError::IllegalOpcode(value))
            );
        }
    }

    #[test]
    fn negative_is_illegal() {
        assert_eq!(Opcode::try_from(-1), Err(DecodeError::IllegalOpcode(-1)));
    }

    #[test]
    fn arity_table() {
        assert_eq!(Opcode::Add.param_count(), 3);
        assert_eq!(Opcode::Multiply.param_count(), 3);
        assert_eq!(Opcode::Input.param_count(), 1);
        assert_eq!(Opcode::Output.param_count(), 1);
        assert_eq!(Opcode::JumpIfTrue.param_count(), 2);
        assert_eq!(Opcode::JumpIfFalse.param_count(), 2);
        assert_eq!(Opcode::LessThan.param_count(), 3);
        assert_eq!(Opcode::Equals.param_count(), 3);
        assert_eq!(Opcode::AdjustRelativeBase.param_count(), 1);
        assert_eq!(Opcode::Halt.param_count(), 0);
    }

    #[test]
    fn width_is_params_plus_one() {
        for &opcode in &ALL_OPCODES {
            assert_eq!(opcode.width(), opcode.param_count() + 1);
        }
    }

    #[test]
    fn write_param_is_within_arity() {
        for &opcode in &ALL_OPCODES {
            if let Some(index) = opcode.write_param() {
                assert!(index < opcode.param_count(), "{opcode:?}");
            }
        }
    }

    #[test]
    fn mnemonics_are_uppercase() {
        for &opcode in &ALL_OPCODES {
            let m = opcode.mnemonic();
            assert!(!m.is_empty(), "empty mnemonic for {opcode:?}");
            assert_eq!(m, m.to_uppercase(), "mnemonic should be uppercase: {m}");
        }
    }
}
