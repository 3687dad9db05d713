//! State identifiers and state sets.

use fixedbitset::FixedBitSet;
use std::fmt;

/// A state identifier. States are numbered densely from 0 within an
/// automaton, and state 0 is always the initial state.
pub type StateId = u32;

/// An unordered, duplicate-free set of state ids backed by a bit set.
///
/// One `StateSet` represents a node of the subset-construction power-set
/// space, or a block of the minimization partition. Equality is set
/// equality: membership only, regardless of insertion order or of how far
/// the backing storage has grown.
#[derive(Clone)]
pub struct StateSet {
    bits: FixedBitSet,
}

impl StateSet {
    /// Create an empty set sized for `capacity` states. The capacity is a
    /// hint; inserting past it grows the storage.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bits: FixedBitSet::with_capacity(capacity),
        }
    }

    /// Create a set containing exactly one state.
    pub fn singleton(state: StateId, capacity: usize) -> Self {
        let mut set = Self::with_capacity(capacity);
        set.insert(state);
        set
    }

    /// Insert a state. Inserting a state already present is a no-op.
    pub fn insert(&mut self, state: StateId) {
        let idx = state as usize;
        if idx >= self.bits.len() {
            self.bits.grow(idx + 1);
        }
        self.bits.insert(idx);
    }

    /// Check whether a state is in the set.
    pub fn contains(&self, state: StateId) -> bool {
        let idx = state as usize;
        idx < self.bits.len() && self.bits.contains(idx)
    }

    /// Check whether the set has no members.
    pub fn is_empty(&self) -> bool {
        self.bits.is_clear()
    }

    /// Number of states in the set.
    pub fn len(&self) -> usize {
        self.bits.count_ones(..)
    }

    /// Iterate over the members in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = StateId> + '_ {
        self.bits.ones().map(|i| i as StateId)
    }

    /// Add every member of `other` to this set.
    pub fn union_with(&mut self, other: &StateSet) {
        if other.bits.len() > self.bits.len() {
            self.bits.grow(other.bits.len());
        }
        self.bits.union_with(&other.bits);
    }

    /// Check whether the two sets share at least one member.
    pub fn intersects(&self, other: &StateSet) -> bool {
        self.bits.intersection(&other.bits).next().is_some()
    }

    /// States present in both sets.
    pub fn intersection(&self, other: &StateSet) -> StateSet {
        let mut result = self.clone();
        result.bits.grow(other.bits.len().max(result.bits.len()));
        result.bits.intersect_with(&other.bits);
        result
    }

    /// States present in this set but not in `other`.
    pub fn difference(&self, other: &StateSet) -> StateSet {
        let mut result = self.clone();
        result.bits.difference_with(&other.bits);
        result
    }

    /// The members as a sorted list, usable as a canonical map key.
    pub fn to_vec(&self) -> Vec<StateId> {
        self.iter().collect()
    }
}

// Derived equality would compare raw bit blocks, and two sets with the same
// members can have grown to different capacities. Compare members instead;
// `ones()` yields them in ascending order on both sides.
impl PartialEq for StateSet {
    fn eq(&self, other: &Self) -> bool {
        self.bits.ones().eq(other.bits.ones())
    }
}

impl Eq for StateSet {}

impl fmt::Debug for StateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<StateId> for StateSet {
    fn from_iter<I: IntoIterator<Item = StateId>>(iter: I) -> Self {
        let items: Vec<StateId> = iter.into_iter().collect();
        let capacity = items.iter().copied().max().map_or(0, |m| m as usize + 1);
        let mut set = Self::with_capacity(capacity);
        for state in items {
            set.insert(state);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_contains() {
        let mut set = StateSet::with_capacity(8);
        assert!(set.is_empty());

        set.insert(2);
        set.insert(5);
        set.insert(5);
        assert_eq!(set.len(), 2);
        assert!(set.contains(2));
        assert!(set.contains(5));
        assert!(!set.contains(3));
    }

    #[test]
    fn test_growth_past_capacity() {
        let mut set = StateSet::with_capacity(2);
        set.insert(40);
        assert!(set.contains(40));
        assert!(!set.contains(39));
    }

    #[test]
    fn test_equality_ignores_insertion_order() {
        let a: StateSet = [1, 2, 3].into_iter().collect();
        let b: StateSet = [3, 1, 2].into_iter().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_equality_ignores_capacity() {
        let mut a = StateSet::with_capacity(4);
        a.insert(1);
        let mut b = StateSet::with_capacity(256);
        b.insert(1);
        assert_eq!(a, b);

        b.insert(200);
        assert_ne!(a, b);
    }

    #[test]
    fn test_union() {
        let mut a: StateSet = [1, 3].into_iter().collect();
        let b: StateSet = [2, 3].into_iter().collect();
        a.union_with(&b);
        assert_eq!(a.to_vec(), vec![1, 2, 3]);
    }

    #[test]
    fn test_intersection_and_difference() {
        let a: StateSet = [1, 3, 5].into_iter().collect();
        let b: StateSet = [3, 5, 7].into_iter().collect();

        assert!(a.intersects(&b));
        assert_eq!(a.intersection(&b).to_vec(), vec![3, 5]);
        assert_eq!(a.difference(&b).to_vec(), vec![1]);
        assert_eq!(b.difference(&a).to_vec(), vec![7]);
    }

    #[test]
    fn test_singleton() {
        let set = StateSet::singleton(4, 8);
        assert_eq!(set.len(), 1);
        assert!(set.contains(4));
    }
}
