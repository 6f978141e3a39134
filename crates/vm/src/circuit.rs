//! Multi-machine circuits.
//!
//! A circuit is an ordered list of machines where each stage's output is
//! the next stage's input. Stages are driven cooperatively on the calling
//! thread, one suspend/resume cycle at a time; they share no state.

use crate::error::CircuitError;
use crate::machine::{Machine, Signal};
use intcode_common::{Program, Word};

/// How stage outputs are wired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Topology {
    /// One pass, first stage to last.
    #[default]
    Chain,
    /// The last stage feeds the first until the last stage halts.
    Feedback,
}

/// An ordered chain of machines.
#[derive(Debug, Clone)]
pub struct Circuit {
    stages: Vec<Machine>,
}

impl Circuit {
    /// Build one machine per phase setting, each running `program` and
    /// seeded with its phase as its first input.
    pub fn new(program: &Program, phases: &[Word]) -> Result<Self, CircuitError> {
        let stages = phases
            .iter()
            .map(|&phase| {
                let mut machine = Machine::new(program);
                machine.provide_input(phase);
                machine
            })
            .collect();
        Self::from_machines(stages)
    }

    /// Wire up already configured machines, in order.
    pub fn from_machines(stages: Vec<Machine>) -> Result<Self, CircuitError> {
        if stages.is_empty() {
            return Err(CircuitError::Empty);
        }
        Ok(Self { stages })
    }

    /// Number of stages.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn stages(&self) -> &[Machine] {
        &self.stages
    }

    /// Pass `input` through every stage once and return the last stage's
    /// output.
    pub fn run_chain(&mut self, input: Word) -> Result<Word, CircuitError> {
        let mut signal = input;
        for stage in 0..self.stages.len() {
            signal = self
                .pass(stage, Some(signal))?
                .ok_or(CircuitError::NoOutput { stage })?;
        }
        Ok(signal)
    }

    /// Feed the last stage's output back into the first until the last
    /// stage halts; return the last value it emitted.
    ///
    /// A stage that halts stops contributing signals; downstream stages are
    /// resumed without new input so they can halt in turn.
    pub fn run_feedback(&mut self, input: Word) -> Result<Word, CircuitError> {
        let last = self.stages.len() - 1;
        let mut signal = Some(input);
        let mut result = None;

        loop {
            for stage in 0..self.stages.len() {
                signal = self.pass(stage, signal)?;
                if stage == last {
                    match signal {
                        Some(value) => result = Some(value),
                        None => return result.ok_or(CircuitError::NoOutput { stage }),
                    }
                }
            }
        }
    }

    /// Run the circuit once in the given topology.
    pub fn run(&mut self, topology: Topology, input: Word) -> Result<Word, CircuitError> {
        match topology {
            Topology::Chain => self.run_chain(input),
            Topology::Feedback => self.run_feedback(input),
        }
    }

    /// Try every ordering of `phase_set` on fresh machines and return the
    /// ordering with the largest final signal, with that signal.
    ///
    /// Ties keep the ordering found first. Any stage error aborts the
    /// search.
    pub fn max_signal(
        program: &Program,
        phase_set: &[Word],
        input: Word,
        topology: Topology,
    ) -> Result<(Vec<Word>, Word), CircuitError> {
        let mut best: Option<(Vec<Word>, Word)> = None;
        for phases in permutations(phase_set) {
            let signal = Self::new(program, &phases)?.run(topology, input)?;
            log::debug!("phases {phases:?} -> {signal}");
            if best.as_ref().map_or(true, |(_, top)| signal > *top) {
                best = Some((phases, signal));
            }
        }
        best.ok_or(CircuitError::Empty)
    }

    /// Deliver `input` (if any) to `stage` and run it to its next event.
    ///
    /// Returns the value it emitted, or `None` once it has halted.
    fn pass(&mut self, stage: usize, input: Option<Word>) -> Result<Option<Word>, CircuitError> {
        let machine = &mut self.stages[stage];
        if machine.is_halted() {
            return Ok(None);
        }
        if let Some(value) = input {
            machine.provide_input(value);
        }

        let signal = machine
            .resume()
            .map_err(|source| CircuitError::Runtime { stage, source })?;
        match signal {
            Signal::Output(value) => {
                machine.take_output();
                log::debug!("stage {stage} -> {value}");
                Ok(Some(value))
            }
            Signal::Halted => {
                log::debug!("stage {stage} halted");
                Ok(None)
            }
            Signal::NeedsInput => Err(CircuitError::Stalled { stage }),
        }
    }
}

/// Every ordering of `items`, in index order.
fn permutations(items: &[Word]) -> Vec<Vec<Word>> {
    if items.len() <= 1 {
        return vec![items.to_vec()];
    }
    let mut all = Vec::new();
    for i in 0..items.len() {
        let mut rest = items.to_vec();
        let head = rest.remove(i);
        for mut tail in permutations(&rest) {
            tail.insert(0, head);
            all.push(tail);
        }
    }
    all
}
