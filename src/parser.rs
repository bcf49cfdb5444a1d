//! This module provides the parser for the line-oriented transition table
//! format, utilizing the `pest` crate. Each logical line holds five
//! whitespace-separated fields - `state read write direction next_state` -
//! with `;` comments and blank lines skipped. The grammar is defined in
//! `grammar.pest`.

use crate::types::{
    Program, State, Transition, TuringMachineError, BLANK_SYMBOL, WILDCARD_SYMBOL,
};
use pest::{error::LineColLocation, iterators::Pair, Parser as PestParser};
use pest_derive::Parser as PestParser;
use std::collections::{BTreeSet, HashMap};

/// Derives a `PestParser` for the transition table grammar defined in `grammar.pest`.
#[derive(PestParser)]
#[grammar = "grammar.pest"]
pub struct TableParser;

/// Parses transition table text into a [`Program`].
///
/// The source state of the first transition becomes the program's initial
/// state. A line that does not split into exactly five fields aborts the
/// whole parse with [`TuringMachineError::MalformedLine`] naming the 1-based
/// line number and the offending content; nothing is ever partially loaded.
pub fn parse(input: &str) -> Result<Program, TuringMachineError> {
    parse_with_initial(input, None)
}

/// Parses transition table text, starting the machine in `initial` when one
/// is supplied instead of defaulting to the first line's source state.
pub fn parse_with_initial(
    input: &str,
    initial: Option<&str>,
) -> Result<Program, TuringMachineError> {
    let root = TableParser::parse(Rule::program, input)
        .map_err(malformed_line)?
        .next()
        .unwrap();

    let mut initial_state = initial.map(State::new);
    let mut rules: HashMap<String, HashMap<char, Transition>> = HashMap::new();
    let mut alphabet = BTreeSet::new();

    for pair in root.into_inner() {
        // Everything under `program` is a transition, except the EOI marker.
        if pair.as_rule() != Rule::transition {
            continue;
        }

        let (state, read, transition) = parse_transition(pair, &mut alphabet)?;

        if initial_state.is_none() {
            initial_state = Some(State::new(state.clone()));
        }

        // A duplicate (state, read) pair silently overwrites the earlier
        // entry: last write wins.
        rules.entry(state).or_default().insert(read, transition);
    }

    let initial_state = initial_state.ok_or(TuringMachineError::EmptyTable)?;

    Ok(Program {
        initial_state,
        rules,
        alphabet,
    })
}

/// Extracts `(source state, read symbol, transition)` from a single grammar
/// line, recording its read/write symbols in the alphabet.
fn parse_transition(
    pair: Pair<Rule>,
    alphabet: &mut BTreeSet<char>,
) -> Result<(String, char, Transition), TuringMachineError> {
    // The grammar guarantees exactly five fields per transition.
    let mut fields = pair.into_inner();
    let state = fields.next().unwrap().as_str().to_string();
    let read = parse_symbol(fields.next().unwrap().as_str())?;
    let write = parse_symbol(fields.next().unwrap().as_str())?;
    let direction = parse_direction_token(fields.next().unwrap().as_str())?;
    let next = State::new(fields.next().unwrap().as_str());

    for symbol in [read, write] {
        if symbol != BLANK_SYMBOL && symbol != WILDCARD_SYMBOL {
            alphabet.insert(symbol);
        }
    }

    Ok((
        state,
        read,
        Transition {
            write,
            direction,
            next,
        },
    ))
}

/// A read or write token must be exactly one character.
fn parse_symbol(token: &str) -> Result<char, TuringMachineError> {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(symbol), None) => Ok(symbol),
        _ => Err(TuringMachineError::InvalidSymbol(token.to_string())),
    }
}

/// A direction token must fit in one character to be storable. Whether that
/// character is a recognized direction is only checked when the transition is
/// applied to the tape.
fn parse_direction_token(token: &str) -> Result<char, TuringMachineError> {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(direction), None) => Ok(direction),
        _ => Err(TuringMachineError::InvalidDirection(token.to_string())),
    }
}

/// Maps pest's positional parse error to [`TuringMachineError::MalformedLine`].
fn malformed_line(error: pest::error::Error<Rule>) -> TuringMachineError {
    let line = match error.line_col {
        LineColLocation::Pos((line, _)) => line,
        LineColLocation::Span((line, _), _) => line,
    };

    TuringMachineError::MalformedLine {
        line,
        content: error.line().trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_table() {
        let input = "A 1 1 R A\nA _ 1 R halt\n";

        let program = parse(input).unwrap();

        assert_eq!(program.initial_state, State::new("A"));
        assert_eq!(program.rules.len(), 1);

        let entries = &program.rules["A"];
        assert_eq!(entries.len(), 2);
        assert_eq!(
            entries[&'1'],
            Transition {
                write: '1',
                direction: 'R',
                next: State::new("A"),
            }
        );
        assert_eq!(entries[&BLANK_SYMBOL].next, State::new("halt"));
    }

    #[test]
    fn test_parse_skips_comments_and_blank_lines() {
        let input = "; increments a unary number\n\nA 1 1 R A ; scan right\n   \nA _ 1 R halt\n; done\n";

        let program = parse(input).unwrap();

        assert_eq!(program.initial_state.name(), "A");
        assert_eq!(program.rules["A"].len(), 2);
    }

    #[test]
    fn test_parse_malformed_line_reports_line_number() {
        // Line 3 has four fields.
        let input = "; header\nA 1 1 R A\nA _ 1 R\nA 0 0 R A\n";

        let error = parse(input).unwrap_err();

        match error {
            TuringMachineError::MalformedLine { line, content } => {
                assert_eq!(line, 3);
                assert!(content.contains("A _ 1 R"), "content was {content:?}");
            }
            other => panic!("expected MalformedLine, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_rejects_six_fields() {
        let input = "A 1 1 R A extra\n";

        let error = parse(input).unwrap_err();
        assert!(matches!(
            error,
            TuringMachineError::MalformedLine { line: 1, .. }
        ));
    }

    #[test]
    fn test_parse_rejects_multi_character_symbol() {
        let input = "A 10 1 R halt\n";

        let error = parse(input).unwrap_err();
        assert_eq!(error, TuringMachineError::InvalidSymbol("10".to_string()));
    }

    #[test]
    fn test_parse_rejects_multi_character_direction() {
        let input = "A 1 1 RR halt\n";

        let error = parse(input).unwrap_err();
        assert_eq!(
            error,
            TuringMachineError::InvalidDirection("RR".to_string())
        );
    }

    #[test]
    fn test_parse_accepts_unrecognized_single_char_direction() {
        // A bad direction is only rejected once the transition applies.
        let program = parse("A 1 1 X halt\n").unwrap();
        assert_eq!(program.rules["A"][&'1'].direction, 'X');
    }

    #[test]
    fn test_first_line_sets_initial_state() {
        let input = "begin 0 1 R other\nother 1 0 L begin\n";

        let program = parse(input).unwrap();
        assert_eq!(program.initial_state.name(), "begin");
    }

    #[test]
    fn test_externally_supplied_initial_state() {
        let input = "begin 0 1 R other\nother 1 0 L begin\n";

        let program = parse_with_initial(input, Some("other")).unwrap();
        assert_eq!(program.initial_state.name(), "other");
    }

    #[test]
    fn test_duplicate_entry_last_write_wins() {
        let input = "A 1 0 R B\nA 1 1 L C\n";

        let program = parse(input).unwrap();
        let entry = &program.rules["A"][&'1'];

        assert_eq!(entry.write, '1');
        assert_eq!(entry.direction, 'L');
        assert_eq!(entry.next.name(), "C");
    }

    #[test]
    fn test_alphabet_excludes_reserved_symbols() {
        let input = "A 0 1 R A\nA * x L A\nA _ * R halt\n";

        let program = parse(input).unwrap();
        assert_eq!(
            program.alphabet,
            BTreeSet::from(['0', '1', 'x']),
            "blank and wildcard must not count as alphabet symbols"
        );
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(parse("").unwrap_err(), TuringMachineError::EmptyTable);
        assert_eq!(
            parse("; only comments\n\n").unwrap_err(),
            TuringMachineError::EmptyTable
        );

        // With an external initial state an empty table is a valid program
        // that halts immediately with no transition found.
        let program = parse_with_initial("", Some("A")).unwrap();
        assert_eq!(program.initial_state.name(), "A");
        assert!(program.rules.is_empty());
    }

    #[test]
    fn test_parse_without_trailing_newline() {
        let program = parse("A 1 1 R halt").unwrap();
        assert_eq!(program.rules["A"][&'1'].next.name(), "halt");
    }

    #[test]
    fn test_halting_flag_derived_at_parse_time() {
        let program = parse("A 1 1 R halt-accept\nA 0 0 R B\n").unwrap();

        assert!(program.rules["A"][&'1'].next.is_halting());
        assert!(!program.rules["A"][&'0'].next.is_halting());
    }
}
