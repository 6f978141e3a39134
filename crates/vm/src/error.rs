//! Runtime errors for the Intcode machine.
//!
//! Every error that arises while executing an instruction carries the
//! instruction pointer (`at`) of that instruction for debugging. All of
//! them are fatal to the machine instance that raised them.

use intcode_common::{DecodeError, Word};
use thiserror::Error;

/// Errors that occur during program execution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// A read, write or jump target resolved to an address below zero.
    #[error("negative address {address} at instruction {at}")]
    NegativeAddress { at: usize, address: Word },

    /// A write-target parameter was encoded in immediate mode.
    #[error("immediate-mode write target (parameter {param}) at instruction {at}")]
    InvalidWriteMode { at: usize, param: usize },

    /// The opcode cell names no known operation.
    #[error("illegal opcode in cell {raw} at instruction {at}")]
    IllegalOpcode { at: usize, raw: Word },

    /// A parameter mode digit is not 0, 1 or 2.
    #[error("invalid parameter mode {digit} in cell {raw} at instruction {at}")]
    InvalidMode { at: usize, raw: Word, digit: Word },

    /// An input instruction ran with no pending input and the machine
    /// is not allowed to suspend.
    #[error("input required but none available at instruction {at}")]
    InputUnderflow { at: usize },

    /// A step or resume was requested after the machine halted.
    #[error("machine has already halted")]
    AlreadyHalted,

    /// An arithmetic result does not fit in a machine word.
    #[error("arithmetic overflow in {mnemonic} at instruction {at}")]
    Overflow { at: usize, mnemonic: &'static str },
}

impl RuntimeError {
    /// Attach the instruction pointer to a decode failure.
    pub(crate) fn from_decode(at: usize, err: DecodeError) -> Self {
        match err {
            DecodeError::IllegalOpcode(raw) => RuntimeError::IllegalOpcode { at, raw },
            DecodeError::InvalidMode { raw, digit } => RuntimeError::InvalidMode { at, raw, digit },
        }
    }
}

/// Errors raised while driving several machines as one circuit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CircuitError {
    /// A circuit needs at least one stage.
    #[error("circuit has no stages")]
    Empty,

    /// A stage failed with a runtime error.
    #[error("stage {stage} failed: {source}")]
    Runtime {
        stage: usize,
        #[source]
        source: RuntimeError,
    },

    /// A stage asked for input that the circuit cannot supply.
    #[error("stage {stage} is waiting for input that will never arrive")]
    Stalled { stage: usize },

    /// A stage halted without producing the signal the next stage needs.
    #[error("stage {stage} halted without producing output")]
    NoOutput { stage: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formats() {
        assert_eq!(
            RuntimeError::NegativeAddress { at: 4, address: -3 }.to_string(),
            "negative address -3 at instruction 4"
        );
        assert_eq!(
            RuntimeError::IllegalOpcode { at: 0, raw: 42 }.to_string(),
            "illegal opcode in cell 42 at instruction 0"
        );
        assert_eq!(
            RuntimeError::AlreadyHalted.to_string(),
            "machine has already halted"
        );
        assert_eq!(
            RuntimeError::Overflow {
                at: 8,
                mnemonic: "MUL"
            }
            .to_string(),
            "arithmetic overflow in MUL at instruction 8"
        );
    }

    #[test]
    fn decode_errors_gain_position() {
        assert_eq!(
            RuntimeError::from_decode(7, DecodeError::IllegalOpcode(55)),
            RuntimeError::IllegalOpcode { at: 7, raw: 55 }
        );
        assert_eq!(
            RuntimeError::from_decode(2, DecodeError::InvalidMode { raw: 401, digit: 4 }),
            RuntimeError::InvalidMode {
                at: 2,
                raw: 401,
                digit: 4
            }
        );
    }

    #[test]
    fn circuit_error_wraps_source() {
        let err = CircuitError::Runtime {
            stage: 2,
            source: RuntimeError::InputUnderflow { at: 0 },
        };
        assert_eq!(
            err.to_string(),
            "stage 2 failed: input required but none available at instruction 0"
        );
        assert!(std::error::Error::source(&err).is_some());
    }
}
