//! Subset construction algorithm for converting an NFA to a DFA.

use crate::dfa::Dfa;
use crate::nfa::Nfa;
use crate::state::{StateId, StateSet};
use indexmap::IndexMap;
use log::debug;

/// Convert an NFA to an equivalent DFA using the powerset construction.
///
/// Each DFA state corresponds to a set of NFA states; the memo table maps
/// every discovered subset (keyed by its sorted member list, so lookup is
/// insertion-order independent) to its DFA state id, guaranteeing that no
/// two DFA states share an equal subset. If some subset has no move on a
/// symbol, the empty subset is interned like any other and becomes an
/// explicit reject sink, keeping the DFA total even over a partial NFA.
pub fn determinize(nfa: &Nfa) -> Dfa {
    let mut dfa = Dfa::new(nfa.alphabet().clone());

    if nfa.num_states() == 0 {
        return dfa;
    }

    // Subsets discovered so far, mapped to their DFA state ids.
    let mut state_mapping: IndexMap<Vec<StateId>, StateId> = IndexMap::new();

    // Queue of DFA states whose outgoing transitions are still uncomputed.
    let mut worklist: Vec<StateSet> = Vec::new();

    // The DFA's initial state corresponds to the subset {0}.
    let initial_set = StateSet::singleton(0, nfa.num_states() as usize);
    let initial_dfa_state = dfa.add_state();
    state_mapping.insert(initial_set.to_vec(), initial_dfa_state);

    if initial_set.intersects(nfa.accepting_states()) {
        dfa.add_accepting_state(initial_dfa_state);
    }

    worklist.push(initial_set);

    while let Some(current_set) = worklist.pop() {
        let current_dfa_state = state_mapping[&current_set.to_vec()];

        for symbol in nfa.alphabet().ids() {
            // Union of the NFA moves of every member of the current subset.
            let next_set = nfa.move_on_symbol(&current_set, symbol);
            let next_key = next_set.to_vec();

            let next_dfa_state = if let Some(&existing) = state_mapping.get(&next_key) {
                existing
            } else {
                let new_state = dfa.add_state();
                state_mapping.insert(next_key, new_state);

                if next_set.intersects(nfa.accepting_states()) {
                    dfa.add_accepting_state(new_state);
                }

                worklist.push(next_set);
                new_state
            };

            dfa.add_transition(current_dfa_state, symbol, next_dfa_state);
        }
    }

    debug!(
        "determinized {} NFA states into {} DFA states",
        nfa.num_states(),
        dfa.num_states()
    );

    dfa
}
