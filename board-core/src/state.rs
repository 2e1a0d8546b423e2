//! The top-level board state: a [`Scene`] with a [`History`] layered on
//! top.
//!
//! Structural mutations (add, delete, reorder, paste, import) snapshot
//! history themselves. Attribute updates do not - a pointer gesture
//! streams many `update_element` calls and the interaction layer calls
//! [`BoardState::commit_history`] exactly once at gesture end.

use crate::element::{Element, ElementId, ElementPatch};
use crate::error::BoardResult;
use crate::history::History;
use crate::scene::Scene;
use crate::schema::DocumentBlob;

/// A scene plus its undo/redo history.
///
/// Constructed explicitly and passed by reference; independent documents
/// (and tests) never share state.
#[derive(Debug, Clone, Default)]
pub struct BoardState {
    /// The owned document.
    pub scene: Scene,
    history: History,
}

impl BoardState {
    /// Create an empty board with the given viewport size.
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            scene: Scene::new(width, height),
            history: History::new(),
        }
    }

    /// Snapshot the current document and selection.
    ///
    /// The interaction layer calls this once at the end of a drag gesture
    /// to coalesce its stream of updates into a single history entry.
    pub fn commit_history(&mut self) {
        let (elements, selected) = self.scene.snapshot();
        self.history.record(elements, selected);
    }

    /// Append an element and snapshot history.
    pub fn add_element(&mut self, element: Element) -> ElementId {
        let id = self.scene.add(element);
        self.commit_history();
        id
    }

    /// Merge an attribute patch; no history snapshot (see
    /// [`BoardState::commit_history`]).
    pub fn update_element(&mut self, id: ElementId, patch: ElementPatch) {
        self.scene.update(id, patch);
    }

    /// Soft-delete elements and snapshot history.
    pub fn delete_elements(&mut self, ids: &[ElementId]) {
        self.scene.delete(ids);
        self.commit_history();
    }

    /// Soft-delete the current selection and snapshot history.
    pub fn delete_selection(&mut self) {
        let ids = self.scene.selected_ids().to_vec();
        if !ids.is_empty() {
            self.delete_elements(&ids);
        }
    }

    /// Move elements to the top of the z-order and snapshot history.
    pub fn bring_to_front(&mut self, ids: &[ElementId]) {
        self.scene.bring_to_front(ids);
        self.commit_history();
    }

    /// Move elements to the bottom of the z-order and snapshot history.
    pub fn send_to_back(&mut self, ids: &[ElementId]) {
        self.scene.send_to_back(ids);
        self.commit_history();
    }

    /// Move elements one step toward the top and snapshot history.
    pub fn bring_forward(&mut self, ids: &[ElementId]) {
        self.scene.bring_forward(ids);
        self.commit_history();
    }

    /// Move elements one step toward the bottom and snapshot history.
    pub fn send_backward(&mut self, ids: &[ElementId]) {
        self.scene.send_backward(ids);
        self.commit_history();
    }

    /// Capture the selection into the clipboard.
    pub fn copy_selection(&mut self) {
        self.scene.copy_selection();
    }

    /// Paste the clipboard, select the copies, and snapshot history.
    pub fn paste(&mut self) -> Vec<ElementId> {
        let ids = self.scene.paste();
        if !ids.is_empty() {
            self.commit_history();
        }
        ids
    }

    /// Step the document back one history entry; no-op at the boundary.
    pub fn undo(&mut self) {
        if let Some(entry) = self.history.undo() {
            let elements = entry.elements.clone();
            let selected = entry.selected.clone();
            self.scene.restore(elements, selected);
        }
    }

    /// Step the document forward one history entry; no-op at the
    /// boundary.
    pub fn redo(&mut self) {
        if let Some(entry) = self.history.redo() {
            let elements = entry.elements.clone();
            let selected = entry.selected.clone();
            self.scene.restore(elements, selected);
        }
    }

    /// Whether an undo step is available.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Whether a redo step is available.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Number of stored history entries.
    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Export the document as the canonical JSON blob.
    ///
    /// # Errors
    ///
    /// Returns [`crate::BoardError::Serialization`] if encoding fails.
    pub fn export_json(&self) -> BoardResult<String> {
        self.scene.export().to_json()
    }

    /// Import a document from JSON, replacing the element list and
    /// clearing the selection.
    ///
    /// Malformed input or a mismatched type tag is absorbed as a logged
    /// no-op - the prior document and history are left untouched. Returns
    /// whether the blob was applied.
    pub fn import_json(&mut self, json: &str) -> bool {
        let blob = match DocumentBlob::from_json(json) {
            Ok(blob) => blob,
            Err(err) => {
                tracing::warn!("import rejected: {err}");
                return false;
            }
        };
        if self.scene.import(blob) {
            self.commit_history();
            true
        } else {
            false
        }
    }
}
