//! This crate provides the core logic for a single-tape Turing machine
//! simulator. It parses line-oriented transition tables
//! (`state read write direction next_state`, with `;` comments) into
//! programs and executes them on an unbounded bidirectional tape. Loading,
//! input normalization, output rendering, and a set of bundled demo programs
//! sit alongside the engine.

pub mod loader;
pub mod machine;
pub mod parser;
pub mod programs;
pub mod render;
pub mod tape;
pub mod types;

/// Re-exports the `Rule` enum from the parser module, used by the `pest` grammar.
pub use crate::parser::Rule;
/// Re-exports the `ProgramLoader` struct from the loader module.
pub use loader::ProgramLoader;
/// Re-exports the `TuringMachine` struct from the machine module.
pub use machine::TuringMachine;
/// Re-exports the parse functions from the parser module.
pub use parser::{parse, parse_with_initial};
/// Re-exports `ProgramInfo`, `ProgramManager`, and `PROGRAMS` from the programs module.
pub use programs::{ProgramInfo, ProgramManager, PROGRAMS};
/// Re-exports the input/output text helpers from the render module.
pub use render::{normalize_input, render_tape};
/// Re-exports the `Tape` struct from the tape module.
pub use tape::Tape;
/// Re-exports the core types related to machine definition and execution.
pub use types::{
    Direction, Halt, Program, State, Step, Transition, TuringMachineError, BLANK_SYMBOL,
    HALT_PREFIX, WILDCARD_SYMBOL,
};
