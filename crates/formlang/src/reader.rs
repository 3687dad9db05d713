//! Loader for the textual automaton description format.
//!
//! The format is whitespace-separated: the state count, the accepting-state
//! count followed by that many state ids, then any number of transition
//! triples `source symbol target` where `symbol` is a single character. The
//! alphabet is implied by the symbols appearing in the triples, in
//! first-seen order. Several triples for the same `(source, symbol)` pair
//! accumulate into a nondeterministic branch.

use crate::nfa::Nfa;
use crate::state::StateId;
use log::trace;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors produced while loading an automaton description.
#[derive(Debug, Error)]
pub enum ReaderError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("expected {expected}, found {found:?}")]
    MalformedToken {
        expected: &'static str,
        found: String,
    },

    #[error("input ended while reading {expected}")]
    UnexpectedEnd { expected: &'static str },

    #[error("state id {id} is out of range for an automaton with {num_states} states")]
    StateOutOfRange { id: StateId, num_states: StateId },

    #[error("state count must be at least 1")]
    NoStates,
}

/// Load an NFA from the file at `path`.
pub fn read_automaton(path: impl AsRef<Path>) -> Result<Nfa, ReaderError> {
    let path = path.as_ref();
    let input = fs::read_to_string(path).map_err(|source| ReaderError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_automaton(&input)
}

/// Parse an NFA from an automaton description.
pub fn parse_automaton(input: &str) -> Result<Nfa, ReaderError> {
    let mut tokens = input.split_ascii_whitespace();

    let num_states = next_id(&mut tokens, "state count")?;
    if num_states == 0 {
        return Err(ReaderError::NoStates);
    }

    let mut nfa = Nfa::new();
    nfa.ensure_states(num_states);

    let num_accepting = next_id(&mut tokens, "accepting state count")?;
    for _ in 0..num_accepting {
        let state = next_id(&mut tokens, "accepting state id")?;
        check_state(state, num_states)?;
        nfa.add_accepting_state(state);
    }

    // Triples until the input runs out; a partial triple is an error.
    while let Some(token) = tokens.next() {
        let source = parse_id(token, "source state")?;
        check_state(source, num_states)?;

        let symbol = next_symbol(&mut tokens)?;

        let target = next_id(&mut tokens, "target state")?;
        check_state(target, num_states)?;

        trace!("transition {source} {symbol} {target}");
        nfa.add_transition(source, symbol, target);
    }

    Ok(nfa)
}

fn next_id<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
    expected: &'static str,
) -> Result<StateId, ReaderError> {
    let token = tokens
        .next()
        .ok_or(ReaderError::UnexpectedEnd { expected })?;
    parse_id(token, expected)
}

fn parse_id(token: &str, expected: &'static str) -> Result<StateId, ReaderError> {
    token.parse().map_err(|_| ReaderError::MalformedToken {
        expected,
        found: token.to_string(),
    })
}

fn next_symbol<'a>(tokens: &mut impl Iterator<Item = &'a str>) -> Result<char, ReaderError> {
    let token = tokens.next().ok_or(ReaderError::UnexpectedEnd {
        expected: "transition symbol",
    })?;
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(symbol), None) => Ok(symbol),
        _ => Err(ReaderError::MalformedToken {
            expected: "single-character symbol",
            found: token.to_string(),
        }),
    }
}

fn check_state(state: StateId, num_states: StateId) -> Result<(), ReaderError> {
    if state < num_states {
        Ok(())
    } else {
        Err(ReaderError::StateOutOfRange {
            id: state,
            num_states,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_description() {
        let nfa = parse_automaton(
            "2\n\
             1 1\n\
             0 a 0\n\
             0 a 1\n\
             1 a 1\n",
        )
        .unwrap();

        assert_eq!(nfa.num_states(), 2);
        assert!(nfa.accepting_states().contains(1));
        assert_eq!(nfa.alphabet().len(), 1);
        assert!(nfa.accepts("a"));
        assert!(!nfa.accepts(""));
    }

    #[test]
    fn test_parse_is_layout_insensitive() {
        // The whole description on one line parses the same way.
        let nfa = parse_automaton("2 1 1 0 a 1 1 b 1").unwrap();

        assert_eq!(nfa.num_states(), 2);
        assert_eq!(nfa.alphabet().iter().collect::<Vec<_>>(), vec!['a', 'b']);
        assert!(nfa.accepts("a"));
        assert!(nfa.accepts("abb"));
    }

    #[test]
    fn test_parse_accumulates_duplicate_pairs() {
        let nfa = parse_automaton("3 1 2 0 a 1 0 a 2").unwrap();

        let targets = nfa.targets(0, 0).unwrap();
        assert!(targets.contains(1));
        assert!(targets.contains(2));
    }

    #[test]
    fn test_parse_declares_states_without_transitions() {
        let nfa = parse_automaton("4 1 0 0 a 1").unwrap();
        assert_eq!(nfa.num_states(), 4);
    }

    #[test]
    fn test_parse_rejects_zero_states() {
        assert!(matches!(
            parse_automaton("0 0"),
            Err(ReaderError::NoStates)
        ));
    }

    #[test]
    fn test_parse_rejects_out_of_range_state() {
        assert!(matches!(
            parse_automaton("2 1 5"),
            Err(ReaderError::StateOutOfRange { id: 5, .. })
        ));
        assert!(matches!(
            parse_automaton("2 0 0 a 7"),
            Err(ReaderError::StateOutOfRange { id: 7, .. })
        ));
    }

    #[test]
    fn test_parse_rejects_malformed_tokens() {
        assert!(matches!(
            parse_automaton("two"),
            Err(ReaderError::MalformedToken { .. })
        ));
        assert!(matches!(
            parse_automaton("2 0 0 ab 1"),
            Err(ReaderError::MalformedToken { .. })
        ));
    }

    #[test]
    fn test_parse_rejects_truncated_input() {
        assert!(matches!(
            parse_automaton(""),
            Err(ReaderError::UnexpectedEnd { .. })
        ));
        assert!(matches!(
            parse_automaton("2 0 0 a"),
            Err(ReaderError::UnexpectedEnd { .. })
        ));
    }

    #[test]
    fn test_read_automaton_missing_file() {
        let result = read_automaton("/nonexistent/automaton.txt");
        assert!(matches!(result, Err(ReaderError::Io { .. })));
    }
}
