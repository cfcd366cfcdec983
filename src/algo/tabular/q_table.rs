use std::collections::HashMap;

use super::Hashable;

/// An entry in the table
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Entry {
    /// The current action value estimate
    pub value: f32,
    /// The number of times the pair has been updated, saturating at `u32::MAX`
    pub count: u32,
}

/// A table of action values keyed by state, then action
///
/// Lookups never insert: a pair that has not been written reads as [`Entry::default`].
#[derive(Debug, Clone)]
pub struct QTable<S, A> {
    rows: HashMap<S, HashMap<A, Entry>>,
}

impl<S, A> Default for QTable<S, A> {
    fn default() -> Self {
        Self {
            rows: HashMap::new(),
        }
    }
}

impl<S: Hashable, A: Hashable> QTable<S, A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the entry for a state action pair, or the default entry if it has never been written
    pub fn get(&self, state: &S, action: &A) -> Entry {
        self.rows
            .get(state)
            .and_then(|row| row.get(action))
            .copied()
            .unwrap_or_default()
    }

    /// Get the action value of a state action pair, `0.0` if unseen
    pub fn value(&self, state: &S, action: &A) -> f32 {
        self.get(state, action).value
    }

    /// Get the visit count of a state action pair, `0` if unseen
    pub fn count(&self, state: &S, action: &A) -> u32 {
        self.get(state, action).count
    }

    /// Get a mutable reference to an entry, inserting the default if it is missing
    pub(crate) fn entry_mut(&mut self, state: S, action: A) -> &mut Entry {
        self.rows
            .entry(state)
            .or_default()
            .entry(action)
            .or_default()
    }

    /// The number of state action pairs that have been written
    pub fn len(&self) -> usize {
        self.rows.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate over all written entries in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&S, &A, &Entry)> {
        self.rows
            .iter()
            .flat_map(|(s, row)| row.iter().map(move |(a, e)| (s, a, e)))
    }

    /// Remove every entry
    pub fn clear(&mut self) {
        self.rows.clear();
    }
}
