//! Finite automata: determinization, minimization, and word acceptance.
//!
//! This crate provides:
//! - An NFA model with a set-valued transition relation
//! - Subset construction (NFA to DFA conversion)
//! - DFA minimization by Hopcroft's partition refinement
//! - Acceptance testing of input words
//! - A loader for a simple textual automaton description format

mod dfa;
mod nfa;
pub mod reader;
mod state;
mod subset_construction;
mod symbol;

pub use dfa::Dfa;
pub use nfa::Nfa;
pub use reader::{read_automaton, ReaderError};
pub use state::{StateId, StateSet};
pub use subset_construction::determinize;
pub use symbol::{Alphabet, SymbolId};
