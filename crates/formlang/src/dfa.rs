//! Deterministic finite automaton with Hopcroft minimization and word
//! acceptance.

use crate::state::{StateId, StateSet};
use crate::symbol::{Alphabet, SymbolId};
use log::debug;
use std::collections::{HashMap, VecDeque};
use std::fmt;

/// A deterministic finite automaton.
///
/// States are numbered `0..num_states` and state 0 is the initial state.
/// Each `(state, symbol)` pair has at most one target; automatons produced
/// by subset construction are total over their state/symbol space, while
/// hand-built ones may leave pairs undefined, which [`Dfa::run`] treats as
/// rejection.
#[derive(Debug, Clone)]
pub struct Dfa {
    /// Number of states.
    num_states: StateId,
    /// Accepting states.
    accepting: StateSet,
    /// Transitions: (source, symbol) -> target.
    transitions: HashMap<(StateId, SymbolId), StateId>,
    /// Reverse transitions: (target, symbol) -> set of sources. Drives the
    /// predecessor lookups of the minimization refinement.
    reverse_transitions: HashMap<(StateId, SymbolId), StateSet>,
    /// Symbols the automaton is defined over, in first-seen order.
    alphabet: Alphabet,
}

impl Dfa {
    /// Create a DFA with no states over the given alphabet.
    pub fn new(alphabet: Alphabet) -> Self {
        Self {
            num_states: 0,
            accepting: StateSet::with_capacity(16),
            transitions: HashMap::new(),
            reverse_transitions: HashMap::new(),
            alphabet,
        }
    }

    /// Add a new state and return its id.
    pub fn add_state(&mut self) -> StateId {
        let id = self.num_states;
        self.num_states += 1;
        id
    }

    /// Mark a state as accepting.
    pub fn add_accepting_state(&mut self, state: StateId) {
        self.accepting.insert(state);
    }

    /// Add a transition. The symbol id must come from this DFA's alphabet.
    pub fn add_transition(&mut self, source: StateId, symbol: SymbolId, target: StateId) {
        self.transitions.insert((source, symbol), target);

        self.reverse_transitions
            .entry((target, symbol))
            .or_insert_with(|| StateSet::with_capacity(self.num_states as usize))
            .insert(source);
    }

    /// The target of `(source, symbol)`, or `None` if the pair is undefined.
    pub fn transition(&self, source: StateId, symbol: SymbolId) -> Option<StateId> {
        self.transitions.get(&(source, symbol)).copied()
    }

    /// Number of states.
    pub fn num_states(&self) -> StateId {
        self.num_states
    }

    /// The accepting states.
    pub fn accepting_states(&self) -> &StateSet {
        &self.accepting
    }

    /// Check whether a state is accepting.
    pub fn is_accepting(&self, state: StateId) -> bool {
        self.accepting.contains(state)
    }

    /// The alphabet.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// All transitions as `(source, symbol, target)` triples.
    pub fn transitions(&self) -> impl Iterator<Item = (StateId, SymbolId, StateId)> + '_ {
        self.transitions
            .iter()
            .map(|(&(src, sym), &dst)| (src, sym, dst))
    }

    /// Run the automaton over `input`, left to right, starting at state 0.
    ///
    /// A symbol outside the alphabet rejects the word outright; so does an
    /// undefined transition. The empty word is accepted iff state 0 is
    /// accepting.
    pub fn run(&self, input: &str) -> bool {
        if self.num_states == 0 {
            return false;
        }

        let mut current: StateId = 0;
        for symbol in input.chars() {
            let Some(symbol_id) = self.alphabet.index_of(symbol) else {
                return false;
            };
            let Some(next) = self.transition(current, symbol_id) else {
                return false;
            };
            current = next;
        }

        self.accepting.contains(current)
    }

    /// Minimize the DFA by partition refinement and return the result.
    ///
    /// Unreachable states are discarded first; the remaining states are
    /// split into accepting and non-accepting blocks, and blocks are
    /// refined until no symbol distinguishes two states of the same block.
    /// The result has one state per surviving block, with the block of the
    /// original state 0 renumbered to 0.
    pub fn minimize(&self) -> Dfa {
        if self.num_states == 0 {
            return Dfa::new(self.alphabet.clone());
        }

        let reachable = self.find_reachable_states();

        // Initial partition: accepting vs. non-accepting, reachable only.
        let accepting = self.accepting.intersection(&reachable);
        let non_accepting = reachable.difference(&self.accepting);

        let mut partitions: Vec<StateSet> = Vec::new();
        if !accepting.is_empty() {
            partitions.push(accepting);
        }
        if !non_accepting.is_empty() {
            partitions.push(non_accepting);
        }

        // Worklist of (block index, symbol) splitters, seeded with every
        // pair; refined blocks re-enter below.
        let mut worklist: VecDeque<(usize, SymbolId)> = VecDeque::new();
        for idx in 0..partitions.len() {
            for symbol in self.alphabet.ids() {
                worklist.push_back((idx, symbol));
            }
        }

        while let Some((splitter_idx, symbol)) = worklist.pop_front() {
            let splitter = partitions[splitter_idx].clone();
            let predecessors = self.find_predecessors(&splitter, symbol);

            if predecessors.is_empty() {
                continue;
            }

            // Split every block the predecessor set straddles. The larger
            // half stays in place; the smaller half becomes a new block and
            // re-enters the worklist (Hopcroft's smaller-half rule).
            let mut splits = Vec::new();
            for (idx, block) in partitions.iter().enumerate() {
                let inside = block.intersection(&predecessors);
                let outside = block.difference(&predecessors);

                if !inside.is_empty() && !outside.is_empty() {
                    let (keep, split_off) = if inside.len() <= outside.len() {
                        (outside, inside)
                    } else {
                        (inside, outside)
                    };
                    splits.push((idx, keep, split_off));
                }
            }

            for (idx, keep, split_off) in splits {
                let new_idx = partitions.len();
                partitions[idx] = keep;
                partitions.push(split_off);

                for sym in self.alphabet.ids() {
                    worklist.push_back((new_idx, sym));
                }
            }
        }

        let minimized = self.build_from_partition(&partitions);
        debug!(
            "minimized {} states to {}",
            self.num_states,
            minimized.num_states()
        );
        minimized
    }

    /// All states reachable from state 0.
    fn find_reachable_states(&self) -> StateSet {
        let mut reachable = StateSet::with_capacity(self.num_states as usize);
        let mut queue = VecDeque::new();
        queue.push_back(0);

        while let Some(state) = queue.pop_front() {
            if reachable.contains(state) {
                continue;
            }
            reachable.insert(state);

            for symbol in self.alphabet.ids() {
                if let Some(next) = self.transition(state, symbol) {
                    if !reachable.contains(next) {
                        queue.push_back(next);
                    }
                }
            }
        }

        reachable
    }

    /// All states with a transition into `targets` on `symbol`.
    fn find_predecessors(&self, targets: &StateSet, symbol: SymbolId) -> StateSet {
        let mut predecessors = StateSet::with_capacity(self.num_states as usize);

        for target in targets.iter() {
            if let Some(sources) = self.reverse_transitions.get(&(target, symbol)) {
                predecessors.union_with(sources);
            }
        }

        predecessors
    }

    /// Build the minimized DFA, one state per block. The block containing
    /// the original state 0 becomes the new state 0.
    fn build_from_partition(&self, partitions: &[StateSet]) -> Dfa {
        let mut order: Vec<usize> = (0..partitions.len()).collect();
        // The block holding the initial state leads the numbering; every
        // reachable state is in exactly one block, so the lookup holds.
        let initial_block = order
            .iter()
            .position(|&idx| partitions[idx].contains(0))
            .unwrap_or(0);
        order.swap(0, initial_block);

        let mut state_to_block: HashMap<StateId, StateId> = HashMap::new();
        for (new_id, &idx) in order.iter().enumerate() {
            for state in partitions[idx].iter() {
                state_to_block.insert(state, new_id as StateId);
            }
        }

        let mut minimized = Dfa::new(self.alphabet.clone());
        for _ in 0..order.len() {
            minimized.add_state();
        }

        for (new_id, &idx) in order.iter().enumerate() {
            let block = &partitions[idx];

            // Blocks of a stable partition agree on acceptance, so any
            // member decides for the whole block.
            if block.intersects(&self.accepting) {
                minimized.add_accepting_state(new_id as StateId);
            }

            // Transition-consistency at stability makes any representative
            // valid for the block's outgoing transitions.
            if let Some(representative) = block.iter().next() {
                for symbol in self.alphabet.ids() {
                    if let Some(target) = self.transition(representative, symbol) {
                        if let Some(&target_block) = state_to_block.get(&target) {
                            minimized.add_transition(new_id as StateId, symbol, target_block);
                        }
                    }
                }
            }
        }

        minimized
    }
}

impl fmt::Display for Dfa {
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
            let symbol = self.alphabet.symbol(sym).unwrap_or('?');
            writeln!(f, "{src} {symbol} {dst}")?;
        }

        Ok(())
    }
}
