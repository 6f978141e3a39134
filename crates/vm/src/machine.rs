//! Machine state: memory, instruction pointer, relative base, I/O queues,
//! and operand resolution.

use crate::error::RuntimeError;
use crate::memory::Memory;
use intcode_common::{Instruction, Mode, Program, Word, MAX_PARAMS};
use std::collections::VecDeque;

/// What an input instruction does when the input queue is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Stop in place and report [`Signal::NeedsInput`]. The instruction is
    /// retried on the next resume.
    #[default]
    Suspend,
    /// Fail with [`RuntimeError::InputUnderflow`].
    Immediate,
}

/// Why a suspended machine handed control back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Suspension {
    NeedsInput,
    ProducedOutput,
}

/// Lifecycle of a machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Freshly constructed; nothing executed yet.
    Ready,
    /// Between instructions with no pending event.
    Running,
    /// Stopped at an I/O suspend point.
    Suspended(Suspension),
    /// Executed a halt instruction. Terminal.
    Halted,
    /// Returned a fatal error. Terminal.
    Faulted,
}

/// An observable event that returns control to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// An output instruction emitted this value.
    Output(Word),
    /// An input instruction found the input queue empty.
    NeedsInput,
    /// The machine executed halt.
    Halted,
}

/// One Intcode machine. Owns its memory, registers and queues exclusively.
#[derive(Debug, Clone)]
pub struct Machine {
    pub(crate) memory: Memory,
    /// Address of the next opcode cell.
    pub(crate) ip: usize,
    /// Offset applied to relative-mode parameters.
    pub(crate) relative_base: Word,
    /// Pending input values, consumed front first.
    pub(crate) input: VecDeque<Word>,
    /// Emitted values not yet taken by the caller.
    pub(crate) output: VecDeque<Word>,
    pub(crate) input_mode: InputMode,
    pub(crate) state: State,
    /// The error that faulted the machine, replayed on later calls.
    pub(crate) fault: Option<RuntimeError>,
}

impl Machine {
    /// Create a machine with `program` loaded at address 0.
    pub fn new(program: &Program) -> Self {
        Self {
            memory: Memory::with_cells(&program.cells),
            ip: 0,
            relative_base: 0,
            input: VecDeque::new(),
            output: VecDeque::new(),
            input_mode: InputMode::default(),
            state: State::Ready,
            fault: None,
        }
    }

    /// Select what happens when input runs out.
    pub fn with_input_mode(mut self, mode: InputMode) -> Self {
        self.input_mode = mode;
        self
    }

    /// Append a value to the input queue.
    pub fn provide_input(&mut self, value: Word) {
        self.input.push_back(value);
    }

    /// Append several values to the input queue, in order.
    pub fn provide_inputs<I: IntoIterator<Item = Word>>(&mut self, values: I) {
        self.input.extend(values);
    }

    /// Take the oldest emitted value that has not been taken yet.
    pub fn take_output(&mut self) -> Option<Word> {
        self.output.pop_front()
    }

    /// Take every emitted value that has not been taken yet.
    pub fn drain_output(&mut self) -> Vec<Word> {
        self.output.drain(..).collect()
    }

    /// Number of queued input values.
    pub fn pending_input(&self) -> usize {
        self.input.len()
    }

    /// Number of emitted values waiting to be taken.
    pub fn pending_output(&self) -> usize {
        self.output.len()
    }

    /// Read memory directly.
    pub fn peek_memory(&self, address: Word) -> Result<Word, RuntimeError> {
        self.read(address)
    }

    /// Write memory directly, e.g. to patch a program before running it.
    pub fn poke_memory(&mut self, address: Word, value: Word) -> Result<(), RuntimeError> {
        let address = self.address(address)?;
        self.memory.write(address, value);
        Ok(())
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn ip(&self) -> usize {
        self.ip
    }

    pub fn relative_base(&self) -> Word {
        self.relative_base
    }

    pub fn input_mode(&self) -> InputMode {
        self.input_mode
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn is_halted(&self) -> bool {
        self.state == State::Halted
    }

    // ---- Operand resolution ----

    /// Validate an absolute address.
    pub(crate) fn address(&self, address: Word) -> Result<usize, RuntimeError> {
        if address < 0 {
            return Err(RuntimeError::NegativeAddress {
                at: self.ip,
                address,
            });
        }
        Ok(address as usize)
    }

    /// Read the cell at an absolute address.
    pub(crate) fn read(&self, address: Word) -> Result<Word, RuntimeError> {
        Ok(self.memory.read(self.address(address)?))
    }

    /// Raw parameter cells of the instruction at the current IP.
    ///
    /// Slots beyond the opcode's arity are left at 0 and never read.
    pub(crate) fn fetch_params(&self, instr: &Instruction) -> [Word; MAX_PARAMS] {
        let mut params = [0; MAX_PARAMS];
        for (i, param) in params
            .iter_mut()
            .enumerate()
            .take(instr.opcode.param_count())
        {
            *param = self.memory.read(self.ip + 1 + i);
        }
        params
    }

    /// `relative_base + raw`, failing instead of wrapping.
    fn relative_address(&self, instr: &Instruction, raw: Word) -> Result<Word, RuntimeError> {
        self.relative_base
            .checked_add(raw)
            .ok_or(RuntimeError::Overflow {
                at: self.ip,
                mnemonic: instr.opcode.mnemonic(),
            })
    }

    /// Effective value of parameter `index`.
    pub(crate) fn resolve_read(
        &self,
        instr: &Instruction,
        params: &[Word; MAX_PARAMS],
        index: usize,
    ) -> Result<Word, RuntimeError> {
        let raw = params[index];
        match instr.mode(index) {
            Mode::Position => self.read(raw),
            Mode::Immediate => Ok(raw),
            Mode::Relative => self.read(self.relative_address(instr, raw)?),
        }
    }

    /// Effective address of write-target parameter `index`.
    pub(crate) fn resolve_write_address(
        &self,
        instr: &Instruction,
        params: &[Word; MAX_PARAMS],
        index: usize,
    ) -> Result<usize, RuntimeError> {
        let raw = params[index];
        match instr.mode(index) {
            Mode::Position => self.address(raw),
            Mode::Immediate => Err(RuntimeError::InvalidWriteMode {
                at: self.ip,
                param: index + 1,
            }),
            Mode::Relative => self.address(self.relative_address(instr, raw)?),
        }
    }
}
