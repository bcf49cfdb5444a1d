//! Bundled demo programs, embedded at compile time and parsed into a global
//! registry on first use.

use crate::types::{Program, TuringMachineError};
use std::sync::RwLock;

// Default embedded programs
const PROGRAM_TEXTS: [(&str, &str); 4] = [
    (
        "unary-increment",
        include_str!("../programs/unary-increment.tbl"),
    ),
    ("bit-flipper", include_str!("../programs/bit-flipper.tbl")),
    (
        "binary-increment",
        include_str!("../programs/binary-increment.tbl"),
    ),
    (
        "busy-beaver-3",
        include_str!("../programs/busy-beaver-3.tbl"),
    ),
];

/// A named demo program together with its source text.
#[derive(Debug, Clone)]
pub struct ProgramInfo {
    pub name: String,
    pub source: String,
    pub program: Program,
}

lazy_static::lazy_static! {
    /// Registry of parsed demo programs, filled by [`ProgramManager::load`].
    pub static ref PROGRAMS: RwLock<Vec<ProgramInfo>> = RwLock::new(Vec::new());
}

pub struct ProgramManager;

impl ProgramManager {
    /// Parses the embedded tables into the registry. Safe to call more than
    /// once; an already filled registry is left alone.
    pub fn load() -> Result<(), TuringMachineError> {
        let mut programs = PROGRAMS.write().map_err(|_| {
            TuringMachineError::FileError("demo program registry lock poisoned".to_string())
        })?;

        if !programs.is_empty() {
            return Ok(());
        }

        for (name, source) in PROGRAM_TEXTS {
            let program = crate::parser::parse(source)?;
            programs.push(ProgramInfo {
                name: name.to_string(),
                source: source.to_string(),
                program,
            });
        }

        Ok(())
    }

    /// Names of all bundled programs, in bundling order.
    pub fn names() -> Vec<String> {
        let _ = Self::load();

        PROGRAMS
            .read()
            .map(|programs| programs.iter().map(|info| info.name.clone()).collect())
            .unwrap_or_default()
    }

    /// Number of bundled programs.
    pub fn count() -> usize {
        let _ = Self::load();

        PROGRAMS.read().map(|programs| programs.len()).unwrap_or(0)
    }

    /// Looks up a bundled program by name.
    pub fn get(name: &str) -> Result<Program, TuringMachineError> {
        Self::load()?;

        PROGRAMS
            .read()
            .map_err(|_| {
                TuringMachineError::FileError("demo program registry lock poisoned".to_string())
            })?
            .iter()
            .find(|info| info.name == name)
            .map(|info| info.program.clone())
            .ok_or_else(|| {
                TuringMachineError::FileError(format!("no bundled program named {name:?}"))
            })
    }
}
