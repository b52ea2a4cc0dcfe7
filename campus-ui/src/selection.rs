//! Key-based selection tracking for tables and card grids.

use std::collections::HashSet;
use std::hash::Hash;

/// Tracks selected items by their keys.
///
/// Keys are row identities, not positions, so a selection survives sorting
/// and paging.
#[derive(Debug, Clone)]
pub struct Selection<K: Clone + Eq + Hash> {
    selected: HashSet<K>,
}

impl<K: Clone + Eq + Hash> Default for Selection<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone + Eq + Hash> Selection<K> {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self {
            selected: HashSet::new(),
        }
    }

    /// Toggle selection for a key. Returns true if selection changed.
    pub fn toggle(&mut self, key: K) -> bool {
        let selected = self.selected.contains(&key);
        self.set(key, !selected)
    }

    /// Select or deselect a key. Returns true if selection changed.
    pub fn set(&mut self, key: K, selected: bool) -> bool {
        if selected {
            self.selected.insert(key)
        } else {
            self.selected.remove(&key)
        }
    }

    /// Check if a key is selected.
    pub fn is_selected(&self, key: &K) -> bool {
        self.selected.contains(key)
    }

    /// Number of selected keys.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Returns `true` if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Clear all selections. Returns true if anything was selected.
    pub fn clear(&mut self) -> bool {
        let changed = !self.selected.is_empty();
        self.selected.clear();
        changed
    }

    /// Drop keys for which `keep` returns false.
    pub fn retain(&mut self, mut keep: impl FnMut(&K) -> bool) {
        self.selected.retain(|k| keep(k));
    }
}
