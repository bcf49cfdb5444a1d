//! This module provides the `ProgramLoader` struct, responsible for loading
//! transition tables from files, string content, and directories.

use crate::parser::parse;
use crate::types::{Program, TuringMachineError};
use std::fs;
use std::path::{Path, PathBuf};

/// File extension for transition table files.
const TABLE_EXTENSION: &str = "tbl";

/// Utility for loading transition tables from the filesystem.
pub struct ProgramLoader;

impl ProgramLoader {
    /// Loads a single program from the given file path.
    ///
    /// Read failures come back as [`TuringMachineError::FileError`]; parse
    /// failures propagate unchanged, so a malformed line still names its
    /// 1-based line number within the file.
    pub fn load_program(path: &Path) -> Result<Program, TuringMachineError> {
        let content = fs::read_to_string(path).map_err(|e| {
            TuringMachineError::FileError(format!("failed to read {}: {}", path.display(), e))
        })?;

        parse(&content)
    }

    /// Loads a single program from string content, e.g. piped user input.
    pub fn load_program_from_string(content: &str) -> Result<Program, TuringMachineError> {
        parse(content)
    }

    /// Loads every `.tbl` file in `directory`, in directory order.
    ///
    /// Subdirectories and files with other extensions are skipped. The first
    /// unreadable or unparsable table aborts the whole load.
    pub fn load_programs(
        directory: &Path,
    ) -> Result<Vec<(PathBuf, Program)>, TuringMachineError> {
        let entries = fs::read_dir(directory).map_err(|e| {
            TuringMachineError::FileError(format!(
                "failed to read directory {}: {}",
                directory.display(),
                e
            ))
        })?;

        let mut programs = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|e| {
                    TuringMachineError::FileError(format!("failed to read directory entry: {e}"))
                })?
                .path();

            if path.is_dir() || path.extension().is_none_or(|ext| ext != TABLE_EXTENSION) {
                continue;
            }

            let program = Self::load_program(&path)?;
            programs.push((path, program));
        }

        Ok(programs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_load_valid_program() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("increment.tbl");

        let mut file = File::create(&file_path).unwrap();
        file.write_all(b"A 1 1 R A\nA _ 1 R halt\n").unwrap();

        let program = ProgramLoader::load_program(&file_path).unwrap();

        assert_eq!(program.initial_state.name(), "A");
        assert!(program.rules.contains_key("A"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let result = ProgramLoader::load_program(&dir.path().join("absent.tbl"));

        assert!(matches!(result, Err(TuringMachineError::FileError(_))));
    }

    #[test]
    fn test_load_malformed_program_keeps_line_number() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("broken.tbl");

        let mut file = File::create(&file_path).unwrap();
        file.write_all(b"A 1 1 R A\nA _ 1\n").unwrap();

        let error = ProgramLoader::load_program(&file_path).unwrap_err();
        assert!(matches!(
            error,
            TuringMachineError::MalformedLine { line: 2, .. }
        ));
    }

    #[test]
    fn test_load_programs_from_directory() {
        let dir = tempdir().unwrap();

        let mut valid = File::create(dir.path().join("valid.tbl")).unwrap();
        valid.write_all(b"A _ _ * halt\n").unwrap();

        // Not a .tbl file, must be skipped.
        let mut ignored = File::create(dir.path().join("notes.txt")).unwrap();
        ignored.write_all(b"not a table").unwrap();

        let programs = ProgramLoader::load_programs(dir.path()).unwrap();

        assert_eq!(programs.len(), 1);
        assert!(programs[0].0.ends_with("valid.tbl"));
    }

    #[test]
    fn test_load_programs_propagates_parse_failure() {
        let dir = tempdir().unwrap();

        let mut broken = File::create(dir.path().join("broken.tbl")).unwrap();
        broken.write_all(b"A 1 1\n").unwrap();

        let result = ProgramLoader::load_programs(dir.path());
        assert!(matches!(
            result,
            Err(TuringMachineError::MalformedLine { .. })
        ));
    }

    #[test]
    fn test_load_programs_missing_directory() {
        let dir = tempdir().unwrap();
        let result = ProgramLoader::load_programs(&dir.path().join("nowhere"));

        assert!(matches!(result, Err(TuringMachineError::FileError(_))));
    }
}
