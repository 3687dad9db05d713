//! Nondeterministic finite automaton with a set-valued transition relation.

use crate::state::{StateId, StateSet};
use crate::symbol::{Alphabet, SymbolId};
use std::collections::HashMap;
use std::fmt;

/// A nondeterministic finite automaton.
///
/// States are numbered `0..num_states` and state 0 is the initial state.
/// A `(state, symbol)` pair may have any number of target states; a pair
/// with no entry simply has no move on that symbol.
#[derive(Debug, Clone)]
pub struct Nfa {
    /// Number of states (states are numbered 0..num_states).
    num_states: StateId,
    /// Accepting states.
    accepting: StateSet,
    /// Transitions: (source, symbol) -> set of target states.
    transitions: HashMap<(StateId, SymbolId), StateSet>,
    /// Symbols used, in first-seen order.
    alphabet: Alphabet,
}

impl Nfa {
    /// Create an empty NFA.
    pub fn new() -> Self {
        Self {
            num_states: 0,
            accepting: StateSet::with_capacity(16),
            transitions: HashMap::new(),
            alphabet: Alphabet::new(),
        }
    }

    /// Ensure a state exists, expanding the state count if needed.
    fn ensure_state(&mut self, state: StateId) {
        if state >= self.num_states {
            self.num_states = state + 1;
        }
    }

    /// Ensure the automaton has at least `count` states. Lets a caller
    /// declare states that no transition mentions.
    pub fn ensure_states(&mut self, count: StateId) {
        if count > self.num_states {
            self.num_states = count;
        }
    }

    /// Add a transition from `source` to `target` on `symbol`. The symbol
    /// joins the alphabet on first use; repeated calls for the same
    /// `(source, symbol)` accumulate targets.
    pub fn add_transition(&mut self, source: StateId, symbol: char, target: StateId) {
        self.ensure_state(source);
        self.ensure_state(target);

        let symbol_id = self.alphabet.intern(symbol);
        let num_states = self.num_states;
        self.transitions
            .entry((source, symbol_id))
            .or_insert_with(|| StateSet::with_capacity(num_states as usize))
            .insert(target);
    }

    /// Mark a state as accepting.
    pub fn add_accepting_state(&mut self, state: StateId) {
        self.ensure_state(state);
        self.accepting.insert(state);
    }

    /// Number of states.
    pub fn num_states(&self) -> StateId {
        self.num_states
    }

    /// The accepting states.
    pub fn accepting_states(&self) -> &StateSet {
        &self.accepting
    }

    /// The alphabet.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// The targets of `(source, symbol)`, or `None` if the pair has no move.
    pub fn targets(&self, source: StateId, symbol: SymbolId) -> Option<&StateSet> {
        self.transitions.get(&(source, symbol))
    }

    /// The set of states reachable from any member of `states` on `symbol`.
    /// Empty when no member has a move on the symbol.
    pub fn move_on_symbol(&self, states: &StateSet, symbol: SymbolId) -> StateSet {
        let mut reached = StateSet::with_capacity(self.num_states as usize);

        for state in states.iter() {
            if let Some(targets) = self.transitions.get(&(state, symbol)) {
                reached.union_with(targets);
            }
        }

        reached
    }

    /// Evaluate `input` directly on the NFA by tracking the set of states
    /// reachable after each symbol. A symbol outside the alphabet rejects.
    pub fn accepts(&self, input: &str) -> bool {
        if self.num_states == 0 {
            return false;
        }

        let mut current = StateSet::singleton(0, self.num_states as usize);
        for symbol in input.chars() {
            let Some(symbol_id) = self.alphabet.index_of(symbol) else {
                return false;
            };
            current = self.move_on_symbol(&current, symbol_id);
        }

        current.intersects(&self.accepting)
    }

    /// All transitions as `(source, symbol, target)` triples.
    pub fn transitions(&self) -> impl Iterator<Item = (StateId, SymbolId, StateId)> + '_ {
        self.transitions
            .iter()
            .flat_map(|(&(src, sym), targets)| targets.iter().map(move |dst| (src, sym, dst)))
    }
}

impl Default for Nfa {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Nfa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "states: {}", self.num_states)?;

        write!(f, "accepting:")?;
        for state in self.accepting.iter() {
            write!(f, " {state}")?;
        }
        writeln!(f)?;

        write!(f, "alphabet:")?;
        for symbol in self.alphabet.iter() {
            write!(f, " {symbol}")?;
        }
        writeln!(f)?;

        writeln!(f, "transitions:")?;
        let mut triples: Vec<_> = self.transitions().collect();
        triples.sort_unstable();
        for (src, sym, dst) in triples {
            // Symbol ids always come from the alphabet, so the lookup holds.
            let symbol = self.alphabet.symbol(sym).unwrap_or('?');
            writeln!(f, "{src} {symbol} {dst}")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nfa_basic() {
        let mut nfa = Nfa::new();

        // 0 -a-> 1 -b-> 2 (accepting)
        nfa.add_transition(0, 'a', 1);
        nfa.add_transition(1, 'b', 2);
        nfa.add_accepting_state(2);

        assert_eq!(nfa.num_states(), 3);
        assert_eq!(nfa.alphabet().len(), 2);
        assert!(nfa.accepts("ab"));
        assert!(!nfa.accepts("a"));
        assert!(!nfa.accepts("ba"));
    }

    #[test]
    fn test_move_on_symbol_unions_targets() {
        let mut nfa = Nfa::new();

        // 0 -a-> 1, 0 -a-> 2 (nondeterministic branch)
        nfa.add_transition(0, 'a', 1);
        nfa.add_transition(0, 'a', 2);

        let start = StateSet::singleton(0, 3);
        let reached = nfa.move_on_symbol(&start, 0);

        assert!(reached.contains(1));
        assert!(reached.contains(2));
        assert_eq!(reached.len(), 2);
    }

    #[test]
    fn test_move_on_symbol_without_entry_is_empty() {
        let mut nfa = Nfa::new();
        nfa.add_transition(0, 'a', 1);

        let from_target = StateSet::singleton(1, 2);
        assert!(nfa.move_on_symbol(&from_target, 0).is_empty());
    }

    #[test]
    fn test_accepts_rejects_foreign_symbol() {
        let mut nfa = Nfa::new();
        nfa.add_transition(0, 'a', 0);
        nfa.add_accepting_state(0);

        assert!(nfa.accepts("aaa"));
        assert!(!nfa.accepts("ac"));
    }

    #[test]
    fn test_empty_input_depends_on_initial_state() {
        let mut nfa = Nfa::new();
        nfa.add_transition(0, 'a', 1);
        nfa.add_accepting_state(1);
        assert!(!nfa.accepts(""));

        nfa.add_accepting_state(0);
        assert!(nfa.accepts(""));
    }
}
