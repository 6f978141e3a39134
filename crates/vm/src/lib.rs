//! Intcode virtual machine: a suspendable interpreter for Intcode programs.
//!
//! Each [`Machine`] owns:
//! - An auto-growing [`Memory`] loaded from a [`Program`]
//! - An instruction pointer and a relative base
//! - FIFO input and output queues
//!
//! Execution is cooperative. [`Machine::resume`] runs until the program
//! emits a value, needs a value it does not have, or halts, and reports
//! which with a [`Signal`]. The caller feeds input and drains output
//! between calls, which is how several machines are composed into a
//! [`Circuit`] on a single thread.
//!
//! # Usage
//!
//! ```
//! use intcode_common::Program;
//! use intcode_vm::{Machine, Signal};
//!
//! let program = Program::parse("3,0,4,0,99").unwrap();
//! let mut machine = Machine::new(&program);
//!
//! assert_eq!(machine.resume().unwrap(), Signal::NeedsInput);
//! machine.provide_input(42);
//! assert_eq!(machine.resume().unwrap(), Signal::Output(42));
//! assert_eq!(machine.resume().unwrap(), Signal::Halted);
//! ```

pub mod circuit;
pub mod error;
pub mod execute;
pub mod machine;
pub mod memory;

pub use circuit::{Circuit, Topology};
pub use error::{CircuitError, RuntimeError};
pub use machine::{InputMode, Machine, Signal, State, Suspension};
pub use memory::Memory;

use intcode_common::{Program, Word};

/// Run a program to completion on a fixed list of inputs and return
/// everything it printed.
///
/// The machine runs in [`InputMode::Immediate`]: asking for more input than
/// was supplied is an error rather than a suspension.
///
/// # Errors
///
/// Returns [`RuntimeError`] if execution fails (illegal opcode, negative
/// address, input underflow, etc.).
pub fn run(program: &Program, inputs: &[Word]) -> Result<Vec<Word>, RuntimeError> {
    let mut machine = Machine::new(program).with_input_mode(InputMode::Immediate);
    machine.provide_inputs(inputs.iter().copied());
    machine.run_to_halt()
}
