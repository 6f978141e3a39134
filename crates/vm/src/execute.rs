//! Fetch-decode-execute loop and opcode dispatch.
//!
//! Every operation is responsible for its own IP update: fixed-width
//! instructions advance by [`Opcode::width`], taken jumps set the IP to the
//! target, and instructions that suspend leave it untouched so the same
//! instruction is retried.

use crate::error::RuntimeError;
use crate::machine::{InputMode, Machine, Signal, State, Suspension};
use intcode_common::{Instruction, Opcode, Word, MAX_PARAMS};

type Params = [Word; MAX_PARAMS];

impl Machine {
    /// Execute exactly one instruction.
    ///
    /// Returns `Ok(None)` when the instruction completed without an
    /// observable event, or the signal it raised.
    pub fn step(&mut self) -> Result<Option<Signal>, RuntimeError> {
        if let Some(err) = &self.fault {
            return Err(err.clone());
        }
        if self.state == State::Halted {
            return Err(RuntimeError::AlreadyHalted);
        }

        match self.execute_one() {
            Ok(signal) => {
                self.state = match signal {
                    None => State::Running,
                    Some(Signal::Output(_)) => State::Suspended(Suspension::ProducedOutput),
                    Some(Signal::NeedsInput) => State::Suspended(Suspension::NeedsInput),
                    Some(Signal::Halted) => State::Halted,
                };
                Ok(signal)
            }
            Err(err) => {
                log::debug!("machine faulted: {err}");
                self.state = State::Faulted;
                self.fault = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Run until the next output, input request, or halt.
    pub fn resume(&mut self) -> Result<Signal, RuntimeError> {
        loop {
            if let Some(signal) = self.step()? {
                return Ok(signal);
            }
        }
    }

    /// Run past outputs (leaving them queued) until the machine needs
    /// input or halts.
    pub fn run_until_blocked(&mut self) -> Result<Signal, RuntimeError> {
        loop {
            match self.resume()? {
                Signal::Output(_) => continue,
                signal => return Ok(signal),
            }
        }
    }

    /// Run to completion on the already queued input and return every
    /// value emitted that had not been taken.
    ///
    /// Running out of input is reported as [`RuntimeError::InputUnderflow`]
    /// regardless of the input mode; the machine itself stays resumable.
    pub fn run_to_halt(&mut self) -> Result<Vec<Word>, RuntimeError> {
        match self.run_until_blocked()? {
            Signal::Halted => Ok(self.drain_output()),
            _ => Err(RuntimeError::InputUnderflow { at: self.ip }),
        }
    }

    fn execute_one(&mut self) -> Result<Option<Signal>, RuntimeError> {
        let instr = self.fetch()?;
        let params = self.fetch_params(&instr);
        log::trace!(
            "{:>6}: {} {:?} (rb {})",
            self.ip,
            instr,
            &params[..instr.opcode.param_count()],
            self.relative_base
        );

        match instr.opcode {
            Opcode::Add => self.exec_binary(&instr, &params, |a, b| a.checked_add(b)),
            Opcode::Multiply => self.exec_binary(&instr, &params, |a, b| a.checked_mul(b)),
            Opcode::Input => self.exec_input(&instr, &params),
            Opcode::Output => self.exec_output(&instr, &params),
            Opcode::JumpIfTrue => self.exec_jump(&instr, &params, |v| v != 0),
            Opcode::JumpIfFalse => self.exec_jump(&instr, &params, |v| v == 0),
            Opcode::LessThan => self.exec_binary(&instr, &params, |a, b| Some(Word::from(a < b))),
            Opcode::Equals => self.exec_binary(&instr, &params, |a, b| Some(Word::from(a == b))),
            Opcode::AdjustRelativeBase => self.exec_adjust_relative_base(&instr, &params),
            Opcode::Halt => {
                log::debug!("halt at {}", self.ip);
                Ok(Some(Signal::Halted))
            }
        }
    }

    /// Decode the cell at the current IP.
    fn fetch(&self) -> Result<Instruction, RuntimeError> {
        let raw = self.memory.read(self.ip);
        Instruction::decode(raw).map_err(|e| RuntimeError::from_decode(self.ip, e))
    }

    fn advance(&mut self, instr: &Instruction) {
        self.ip += instr.opcode.width();
    }

    // ---- Operations ----

    /// Add, multiply and the comparisons: `p3 = f(p1, p2)`.
    fn exec_binary(
        &mut self,
        instr: &Instruction,
        params: &Params,
        f: impl Fn(Word, Word) -> Option<Word>,
    ) -> Result<Option<Signal>, RuntimeError> {
        let a = self.resolve_read(instr, params, 0)?;
        let b = self.resolve_read(instr, params, 1)?;
        let target = self.resolve_write_address(instr, params, 2)?;
        let value = f(a, b).ok_or(RuntimeError::Overflow {
            at: self.ip,
            mnemonic: instr.opcode.mnemonic(),
        })?;
        self.memory.write(target, value);
        self.advance(instr);
        Ok(None)
    }

    fn exec_input(
        &mut self,
        instr: &Instruction,
        params: &Params,
    ) -> Result<Option<Signal>, RuntimeError> {
        let target = self.resolve_write_address(instr, params, 0)?;
        match self.input.pop_front() {
            Some(value) => {
                self.memory.write(target, value);
                self.advance(instr);
                Ok(None)
            }
            None => match self.input_mode {
                InputMode::Suspend => {
                    log::debug!("waiting for input at {}", self.ip);
                    Ok(Some(Signal::NeedsInput))
                }
                InputMode::Immediate => Err(RuntimeError::InputUnderflow { at: self.ip }),
            },
        }
    }

    fn exec_output(
        &mut self,
        instr: &Instruction,
        params: &Params,
    ) -> Result<Option<Signal>, RuntimeError> {
        let value = self.resolve_read(instr, params, 0)?;
        log::debug!("output {value} at {}", self.ip);
        self.output.push_back(value);
        self.advance(instr);
        Ok(Some(Signal::Output(value)))
    }

    /// Jump to `p2` when `taken(p1)`; otherwise fall through.
    fn exec_jump(
        &mut self,
        instr: &Instruction,
        params: &Params,
        taken: impl Fn(Word) -> bool,
    ) -> Result<Option<Signal>, RuntimeError> {
        let condition = self.resolve_read(instr, params, 0)?;
        let target = self.resolve_read(instr, params, 1)?;
        if taken(condition) {
            self.ip = self.address(target)?;
        } else {
            self.advance(instr);
        }
        Ok(None)
    }

    fn exec_adjust_relative_base(
        &mut self,
        instr: &Instruction,
        params: &Params,
    ) -> Result<Option<Signal>, RuntimeError> {
        let delta = self.resolve_read(instr, params, 0)?;
        self.relative_base =
            self.relative_base
                .checked_add(delta)
                .ok_or(RuntimeError::Overflow {
                    at: self.ip,
                    mnemonic: instr.opcode.mnemonic(),
                })?;
        self.advance(instr);
        Ok(None)
    }
}
