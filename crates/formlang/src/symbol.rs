//! Input symbols and the alphabet of an automaton.

use indexmap::IndexSet;

/// A symbol identifier: the index of a symbol within its alphabet.
pub type SymbolId = u32;

/// The alphabet of an automaton: the distinct input symbols, in the order
/// they were first seen. Symbol ids are stable once assigned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Alphabet {
    symbols: IndexSet<char>,
}

impl Alphabet {
    /// Create an empty alphabet.
    pub fn new() -> Self {
        Self {
            symbols: IndexSet::new(),
        }
    }

    /// Return the id of `symbol`, assigning the next free id if the symbol
    /// has not been seen before.
    pub fn intern(&mut self, symbol: char) -> SymbolId {
        let (idx, _) = self.symbols.insert_full(symbol);
        idx as SymbolId
    }

    /// Look up the id of `symbol`, or `None` if it is not in the alphabet.
    pub fn index_of(&self, symbol: char) -> Option<SymbolId> {
        self.symbols.get_index_of(&symbol).map(|idx| idx as SymbolId)
    }

    /// The symbol with the given id, if any.
    pub fn symbol(&self, id: SymbolId) -> Option<char> {
        self.symbols.get_index(id as usize).copied()
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Check whether the alphabet is empty.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// All symbol ids, in first-seen order.
    pub fn ids(&self) -> impl Iterator<Item = SymbolId> {
        0..self.symbols.len() as SymbolId
    }

    /// All symbols, in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.symbols.iter().copied()
    }
}
