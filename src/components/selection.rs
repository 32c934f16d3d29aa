//! Selection state for the data table.
//!
//! Selection is keyed by row ID rather than by position, so it stays
//! stable when sorting or page navigation rearranges the visible rows.

use std::collections::HashSet;

/// ID-based selection state.
///
/// Stored IDs may refer to rows that are not on the current page; those
/// are kept until an explicit reset and simply excluded when the
/// selection is resolved against the page view.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    /// Currently selected IDs
    selected: HashSet<String>,
}

impl Selection {
    /// Create a new empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all selected IDs (sorted for deterministic ordering).
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<_> = self.selected.iter().cloned().collect();
        ids.sort();
        ids
    }

    /// Check if an ID is selected.
    pub fn contains(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    /// Get the number of selected IDs.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Check if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Clear all selection.
    /// Returns `true` if anything was deselected.
    pub fn clear(&mut self) -> bool {
        if self.selected.is_empty() {
            return false;
        }
        self.selected.clear();
        true
    }

    /// Toggle selection of an ID.
    /// Returns `true` if the ID is selected afterwards.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.selected.remove(id) {
            false
        } else {
            self.selected.insert(id.to_string());
            true
        }
    }

    /// Replace the selection with exactly the given IDs.
    /// Returns `true` if the selection changed.
    pub fn replace(&mut self, ids: impl IntoIterator<Item = String>) -> bool {
        let next: HashSet<String> = ids.into_iter().collect();
        if next == self.selected {
            return false;
        }
        self.selected = next;
        true
    }
}
