//! This module defines the `TuringMachine` struct, the execution engine that
//! drives a [`Tape`] through the transitions of a [`Program`] until a halting
//! state is reached or no transition applies.

use crate::tape::Tape;
use crate::types::{Halt, Program, State, Step, TuringMachineError};

/// Name of the synthetic state the machine parks in when no transition
/// matches. The `halt` prefix makes it terminal like any other halt state.
const REJECT_STATE: &str = "halt-reject";

/// A single-tape Turing machine.
///
/// Owns its program, tape, current state, and step counter. The table is
/// parsed once; the machine can be reset and re-run against different inputs
/// without reparsing.
pub struct TuringMachine {
    program: Program,
    state: State,
    tape: Tape,
    step_count: usize,
}

impl TuringMachine {
    /// Creates a machine in the program's initial state with an unseeded
    /// (single blank cell) tape. Call [`reset`](Self::reset) to load input.
    pub fn new(program: Program) -> Self {
        let state = program.initial_state.clone();

        Self {
            program,
            state,
            tape: Tape::new(""),
            step_count: 0,
        }
    }

    /// Executes a single transition.
    ///
    /// Looks up the current (state, symbol) pair - exact symbol entry first,
    /// wildcard second - applies the write and move, enters the next state,
    /// and increments the step counter.
    ///
    /// Both normal termination paths come back as `Ok(Step::Halted(_))`: a
    /// `halt`-prefixed state was entered, or no transition matched (the
    /// machine then parks in a synthetic reject state and the counter is left
    /// untouched). An `Err` means the run terminated abnormally, e.g. on an
    /// unrecognized direction token.
    pub fn step(&mut self) -> Result<Step, TuringMachineError> {
        if self.state.is_halting() {
            return Ok(Step::Halted(Halt::State(self.state.name().to_string())));
        }

        let symbol = self.tape.current_symbol();
        let transition = match self.program.transition(&self.state, symbol) {
            Some(transition) => transition.clone(),
            None => {
                let halt = Halt::NoTransition {
                    state: self.state.name().to_string(),
                    symbol,
                };
                self.state = State::new(REJECT_STATE);
                return Ok(Step::Halted(halt));
            }
        };

        self.tape
            .write_and_move(transition.write, transition.direction)?;
        self.state = transition.next;
        self.step_count += 1;

        if self.state.is_halting() {
            Ok(Step::Halted(Halt::State(self.state.name().to_string())))
        } else {
            Ok(Step::Continue)
        }
    }

    /// Runs the machine until it halts.
    ///
    /// There is no built-in step limit: a table with no reachable halting
    /// state loops forever, matching the classical model of possible
    /// non-termination.
    pub fn run(&mut self) -> Result<Halt, TuringMachineError> {
        loop {
            if let Step::Halted(halt) = self.step()? {
                return Ok(halt);
            }
        }
    }

    /// Discards the current run: step counter to zero, state back to the
    /// program's initial state, and a fresh tape seeded from `input`.
    pub fn reset(&mut self, input: &str) {
        self.step_count = 0;
        self.state = self.program.initial_state.clone();
        self.tape = Tape::new(input);
    }

    /// Returns the current state.
    pub fn state(&self) -> &State {
        &self.state
    }

    /// Number of successfully applied transitions since the last reset.
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    /// Whether the machine is in a terminal state.
    pub fn is_halted(&self) -> bool {
        self.state.is_halting()
    }

    /// Returns the machine's tape.
    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    /// Returns the program the machine executes.
    pub fn program(&self) -> &Program {
        &self.program
    }
}
