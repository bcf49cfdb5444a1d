//! This module defines the text conventions at the edges of the engine: how
//! raw input text becomes tape seed content, and how a finished tape is
//! printed.

use crate::tape::Tape;
use crate::types::BLANK_SYMBOL;

/// Prepares raw input text for seeding a tape.
///
/// Surrounding whitespace is trimmed, then every newline becomes a blank, so
/// multi-line input turns into a single tape with blanks at the line
/// boundaries.
pub fn normalize_input(input: &str) -> String {
    input
        .trim()
        .replace("\r\n", "\n")
        .replace(['\n', '\r'], &BLANK_SYMBOL.to_string())
}

/// Renders the full tape, from its leftmost to its rightmost cell, as a
/// single line: blanks become spaces and surrounding whitespace is trimmed.
pub fn render_tape(tape: &Tape) -> String {
    let line: String = tape
        .iter()
        .map(|symbol| {
            if symbol == BLANK_SYMBOL {
                ' '
            } else {
                symbol
            }
        })
        .collect();

    line.trim().to_string()
}
