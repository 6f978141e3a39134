//! Intcode common types and instruction decoding.
//!
//! This crate provides the shared vocabulary for the Intcode machine:
//!
//! - [`Word`]: the signed cell type used for memory, operands and I/O
//! - [`Opcode`]: the ten operations and their arities
//! - [`Mode`]: position, immediate and relative addressing
//! - [`Instruction`]: a decoded instruction cell
//! - [`Program`]: a parsed program image
//! - [`DecodeError`], [`ParseError`]: decode and text-format errors

pub mod error;
pub mod instruction;
pub mod mode;
pub mod opcode;
pub mod program;

// Re-export commonly used types at the crate root.
pub use error::{DecodeError, ParseError};
pub use instruction::{Instruction, MAX_PARAMS};
pub use mode::Mode;
pub use opcode::Opcode;
pub use program::Program;

/// A memory cell, operand, or I/O value.
///
/// 64 bits covers every value real programs produce; the machine checks
/// arithmetic and reports overflow rather than wrapping.
pub type Word = i64;

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_opcode() -> impl Strategy<Value = Opcode> {
        prop::sample::select(&opcode::ALL_OPCODES[..])
    }

    fn arb_mode() -> impl Strategy<Value = Mode> {
        prop::sample::select(&mode::ALL_MODES[..])
    }

    fn arb_instruction() -> impl Strategy<Value = Instruction> {
        (arb_opcode(), prop::array::uniform3(arb_mode()))
            .prop_map(|(op, modes)| Instruction::with_modes(op, modes))
    }

    proptest! {
        /// The opcode is always the low two digits of the cell.
        #[test]
        fn opcode_is_low_two_digits(instr in arb_instruction()) {
            let raw = instr.encode();
            prop_assert_eq!(raw % 100, instr.opcode as u8 as Word);
            prop_assert_eq!(Instruction::decode(raw).unwrap(), instr);
        }

        /// Any non-negative cell decodes or fails with a specific error;
        /// decoding never panics.
        #[test]
        fn arbitrary_cells_decode_or_fail_cleanly(raw in 0..Word::MAX) {
            match Instruction::decode(raw) {
                Ok(instr) => prop_assert_eq!(instr.opcode as u8 as Word, raw % 100),
                Err(DecodeError::IllegalOpcode(r)) | Err(DecodeError::InvalidMode { raw: r, .. }) => {
                    prop_assert_eq!(r, raw)
                }
            }
        }

        /// Program text survives a format/parse cycle.
        #[test]
        fn program_text_roundtrip(cells in prop::collection::vec(any::<Word>(), 1..64)) {
            let program = Program::new(cells);
            let parsed = Program::parse(&program.to_string()).unwrap();
            prop_assert_eq!(parsed, program);
        }
    }
}
