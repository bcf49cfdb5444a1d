//! This module defines the core data structures and types used throughout the
//! simulator: reserved symbols, directions, states, transitions, the parsed
//! transition table, execution outcomes, and error types.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use thiserror::Error;

/// The blank symbol, as written in tables and stored on the tape.
pub const BLANK_SYMBOL: char = '_';
/// The wildcard symbol: matches any symbol in a transition's read position,
/// leaves the cell unchanged in its write position. Never a literal tape symbol.
pub const WILDCARD_SYMBOL: char = '*';
/// State names starting with this prefix are terminal. Case-sensitive.
pub const HALT_PREFIX: &str = "halt";

/// Represents the possible directions a tape head can move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Move the head one cell to the left.
    Left,
    /// Move the head one cell to the right.
    Right,
    /// Keep the head where it is.
    Stay,
}

impl TryFrom<char> for Direction {
    type Error = TuringMachineError;

    /// Decodes a raw direction token: `L`/`l` and `R`/`r` move, `*` stays.
    fn try_from(token: char) -> Result<Self, Self::Error> {
        match token {
            'L' | 'l' => Ok(Direction::Left),
            'R' | 'r' => Ok(Direction::Right),
            '*' => Ok(Direction::Stay),
            other => Err(TuringMachineError::InvalidDirection(other.to_string())),
        }
    }
}

/// A machine state: a free-form name tagged with a halting flag.
///
/// The flag is derived once from the `halt` name prefix when the state is
/// constructed, so the prefix comparison is not repeated on every step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    name: String,
    halting: bool,
}

impl State {
    /// Creates a state, deriving the halting flag from the name prefix.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let halting = name.starts_with(HALT_PREFIX);
        Self { name, halting }
    }

    /// The state's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether reaching this state ends the run.
    pub fn is_halting(&self) -> bool {
        self.halting
    }
}

/// A single transition rule, keyed in the table by (current state, read symbol).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    /// Symbol written to the current cell; the wildcard leaves it unchanged.
    pub write: char,
    /// Raw direction token. Validated when the transition is applied to the
    /// tape, so an unrecognized direction surfaces mid-run, not at load time.
    pub direction: char,
    /// State the machine enters after the write and move.
    pub next: State,
}

/// A parsed transition table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    /// State the machine starts in after a reset. Defaults to the source
    /// state of the first parsed transition.
    pub initial_state: State,
    /// State name -> (read symbol -> transition). A wildcard key matches any
    /// symbol that has no exact entry.
    pub rules: HashMap<String, HashMap<char, Transition>>,
    /// Every read/write symbol seen while parsing, minus the two reserved
    /// symbols. Informational; see [`Program::validate_input`].
    pub alphabet: BTreeSet<char>,
}

impl Program {
    /// Finds the transition for `(state, symbol)`, preferring an exact symbol
    /// entry over a wildcard entry when both exist.
    pub fn transition(&self, state: &State, symbol: char) -> Option<&Transition> {
        self.rules.get(state.name()).and_then(|entries| {
            entries
                .get(&symbol)
                .or_else(|| entries.get(&WILDCARD_SYMBOL))
        })
    }

    /// Checks `input` against the alphabet collected at parse time.
    ///
    /// Opt-in: the engine never calls this itself, and a table is free to
    /// rely on wildcard entries for symbols it does not name.
    pub fn validate_input(&self, input: &str) -> Result<(), TuringMachineError> {
        let mut unknown: Vec<char> = input
            .chars()
            .filter(|c| *c != BLANK_SYMBOL && !self.alphabet.contains(c))
            .collect();
        unknown.sort_unstable();
        unknown.dedup();

        if unknown.is_empty() {
            Ok(())
        } else {
            Err(TuringMachineError::UnknownSymbols(unknown))
        }
    }
}

/// Represents the outcome of a single execution step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// A transition applied and the machine can keep going.
    Continue,
    /// The run is over.
    Halted(Halt),
}

/// How a run ended. Both variants are normal terminations, never errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Halt {
    /// A `halt`-prefixed state was entered.
    State(String),
    /// No entry matched the current (state, symbol) pair. The tape content
    /// accumulated so far is still valid output.
    NoTransition { state: String, symbol: char },
}

/// Represents the errors that can occur while loading or running a machine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TuringMachineError {
    /// A table line did not split into exactly five fields.
    #[error("malformed transition on line {line}: {content:?} (expected 5 fields)")]
    MalformedLine { line: usize, content: String },
    /// A read or write token was not exactly one character.
    #[error("invalid symbol {0:?}: expected exactly one character")]
    InvalidSymbol(String),
    /// A direction token was none of `L`, `l`, `R`, `r`, `*`.
    #[error("invalid direction {0:?}")]
    InvalidDirection(String),
    /// The table defined no transitions and no initial state was supplied.
    #[error("transition table is empty")]
    EmptyTable,
    /// Input symbols missing from the table alphabet (opt-in check).
    #[error("input contains symbols outside the table alphabet: {0:?}")]
    UnknownSymbols(Vec<char>),
    /// A file or stream could not be read.
    #[error("file error: {0}")]
    FileError(String),
}
