//! Snapshot-based undo/redo.
//!
//! A bounded linear stack, not a tree: recording after an undo discards
//! the redo branch. Entries are deep, independent copies - later document
//! mutation never alters a stored snapshot.

use serde::{Deserialize, Serialize};

use crate::element::{Element, ElementId};

/// Maximum number of history entries kept.
pub const HISTORY_CAPACITY: usize = 50;

/// An immutable snapshot of the document and selection at a point in
/// time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Element list at snapshot time.
    pub elements: Vec<Element>,
    /// Selected ids at snapshot time.
    pub selected: Vec<ElementId>,
}

/// Bounded linear undo/redo stack.
///
/// The cursor sits one past the entry representing the current state;
/// `record` truncates everything beyond it, pushes, and advances - unless
/// the stack is at capacity, in which case the oldest entry is evicted
/// and the cursor stays put.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
    cursor: usize,
}

impl History {
    /// Create an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a snapshot of the given document state.
    pub fn record(&mut self, elements: Vec<Element>, selected: Vec<ElementId>) {
        self.entries.truncate(self.cursor);
        self.entries.push(HistoryEntry { elements, selected });
        if self.entries.len() > HISTORY_CAPACITY {
            self.entries.remove(0);
        } else {
            self.cursor += 1;
        }
    }

    /// Step back one entry. `None` at the boundary (nothing recorded, or
    /// already at the oldest restorable state).
    pub fn undo(&mut self) -> Option<&HistoryEntry> {
        if self.cursor > 1 {
            self.cursor -= 1;
            self.entries.get(self.cursor - 1)
        } else {
            None
        }
    }

    /// Step forward one entry. `None` at the boundary.
    pub fn redo(&mut self) -> Option<&HistoryEntry> {
        if self.cursor < self.entries.len() {
            let entry = &self.entries[self.cursor];
            self.cursor += 1;
            Some(entry)
        } else {
            None
        }
    }

    /// Whether an undo step is available.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.cursor > 1
    }

    /// Whether a redo step is available.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.cursor < self.entries.len()
    }

    /// Number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
