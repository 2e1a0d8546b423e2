//! The document store - the single source of truth for elements,
//! selection, and the viewport.
//!
//! Elements live in a plain `Vec` whose order *is* the z-order: later
//! entries draw on top and hit-test first. Mutations favor silent no-ops
//! over errors; unknown ids are ignored and malformed import blobs leave
//! the document untouched.

use crate::element::{elements_bounds, Element, ElementId, ElementKind, ElementPatch};
use crate::geometry::{self, Bounds, Point};
use crate::hit;
use crate::schema::DocumentBlob;
use crate::transform;

/// Lower zoom clamp.
pub const ZOOM_MIN: f32 = 0.1;

/// Upper zoom clamp.
pub const ZOOM_MAX: f32 = 5.0;

/// Positional offset applied to pasted elements on both axes.
pub const PASTE_OFFSET: f32 = 20.0;

/// A drawing document: the z-ordered element list, the selection, the
/// clipboard, and the viewport.
#[derive(Debug, Clone)]
pub struct Scene {
    elements: Vec<Element>,
    selected: Vec<ElementId>,
    clipboard: Vec<Element>,
    zoom: f32,
    /// Horizontal scroll offset in screen units.
    pub scroll_x: f32,
    /// Vertical scroll offset in screen units.
    pub scroll_y: f32,
    /// Viewport width in screen units.
    pub viewport_width: f32,
    /// Viewport height in screen units.
    pub viewport_height: f32,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

impl Scene {
    /// Create an empty scene with the given viewport size.
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            elements: Vec::new(),
            selected: Vec::new(),
            clipboard: Vec::new(),
            zoom: 1.0,
            scroll_x: 0.0,
            scroll_y: 0.0,
            viewport_width: width,
            viewport_height: height,
        }
    }

    // -----------------------------------------------------------------------
    // Element CRUD
    // -----------------------------------------------------------------------

    /// Append an element at the top of the z-order.
    pub fn add(&mut self, element: Element) -> ElementId {
        let id = element.id;
        tracing::debug!("add element {id}");
        self.elements.push(element);
        id
    }

    /// Get an element by id, soft-deleted entries included.
    #[must_use]
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    /// Merge a partial update into the element matching `id`; no-op if
    /// absent. Deliberately does *not* snapshot history - gesture-long
    /// streams of updates are coalesced and committed once at gesture end.
    pub fn update(&mut self, id: ElementId, patch: ElementPatch) {
        if let Some(element) = self.elements.iter_mut().find(|e| e.id == id) {
            element.apply_patch(patch);
        }
    }

    /// Soft-delete every element whose id is in `ids` and prune them from
    /// the selection.
    pub fn delete(&mut self, ids: &[ElementId]) {
        for element in &mut self.elements {
            if ids.contains(&element.id) {
                element.is_deleted = true;
            }
        }
        self.selected.retain(|id| !ids.contains(id));
        tracing::debug!("soft-deleted {} element(s)", ids.len());
    }

    /// Physically drop soft-deleted elements from the list.
    pub fn compact(&mut self) {
        self.elements.retain(Element::is_live);
    }

    /// The full element list in z-order, soft-deleted entries included.
    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Live (non-deleted) elements in z-order.
    pub fn live_elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter().filter(|e| e.is_live())
    }

    /// Number of live elements.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.live_elements().count()
    }

    /// Whether the scene has no live elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.element_count() == 0
    }

    /// Replace the text body of a text element.
    ///
    /// A trimmed-empty body drops the element outright rather than
    /// keeping an invisible tombstone; otherwise the element box is
    /// re-fit to the new content.
    pub fn set_text(&mut self, id: ElementId, body: &str) {
        let Some(index) = self.elements.iter().position(|e| e.id == id) else {
            return;
        };
        let ElementKind::Text { font_size, .. } = &self.elements[index].kind else {
            return;
        };
        let size = font_size.unwrap_or(20.0);
        if body.trim().is_empty() {
            self.elements.remove(index);
            self.selected.retain(|sid| *sid != id);
            return;
        }
        let (width, height) = transform::text_autosize(body, size);
        self.elements[index].apply_patch(ElementPatch {
            text: Some(body.to_string()),
            width: Some(width),
            height: Some(height),
            ..ElementPatch::default()
        });
    }

    // -----------------------------------------------------------------------
    // Selection
    // -----------------------------------------------------------------------

    /// Replace the selection verbatim. Ids are not validated here; reads
    /// filter unresolvable ids defensively.
    pub fn set_selection(&mut self, ids: Vec<ElementId>) {
        self.selected = ids;
    }

    /// Empty the selection.
    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    /// The raw selected id list.
    #[must_use]
    pub fn selected_ids(&self) -> &[ElementId] {
        &self.selected
    }

    /// Selected elements, filtering out ids that no longer resolve to a
    /// live element.
    #[must_use]
    pub fn selected_elements(&self) -> Vec<&Element> {
        self.selected
            .iter()
            .filter_map(|id| self.get(*id))
            .filter(|e| e.is_live())
            .collect()
    }

    /// Union bounds of the selection, or `None` when nothing is selected.
    #[must_use]
    pub fn selection_bounds(&self) -> Option<Bounds> {
        elements_bounds(&self.selected_elements())
    }

    // -----------------------------------------------------------------------
    // Hit resolution
    // -----------------------------------------------------------------------

    /// The topmost live element at the given *screen* point, converted
    /// through the current scroll and zoom.
    #[must_use]
    pub fn element_at(&self, screen: Point) -> Option<ElementId> {
        let doc = self.screen_to_document(screen);
        self.elements
            .iter()
            .rev()
            .find(|e| e.is_live() && hit::hit_test(e, doc))
            .map(|e| e.id)
    }

    // -----------------------------------------------------------------------
    // Z-order
    // -----------------------------------------------------------------------

    /// Move the named elements to the top of the z-order, preserving
    /// their relative order among themselves.
    pub fn bring_to_front(&mut self, ids: &[ElementId]) {
        let (moved, rest): (Vec<_>, Vec<_>) = std::mem::take(&mut self.elements)
            .into_iter()
            .partition(|e| ids.contains(&e.id));
        self.elements = rest;
        self.elements.extend(moved);
    }

    /// Move the named elements to the bottom of the z-order, preserving
    /// their relative order among themselves.
    pub fn send_to_back(&mut self, ids: &[ElementId]) {
        let (mut moved, rest): (Vec<_>, Vec<_>) = std::mem::take(&mut self.elements)
            .into_iter()
            .partition(|e| ids.contains(&e.id));
        moved.extend(rest);
        self.elements = moved;
    }

    /// Swap each named element with its next neighbor, one step toward
    /// the top. Processed front-to-back, skipping neighbors that are
    /// themselves part of the moved set, so no element is swapped twice.
    pub fn bring_forward(&mut self, ids: &[ElementId]) {
        let indices: Vec<usize> = (0..self.elements.len())
            .rev()
            .filter(|&i| ids.contains(&self.elements[i].id))
            .collect();
        for index in indices {
            if index + 1 < self.elements.len() && !ids.contains(&self.elements[index + 1].id) {
                self.elements.swap(index, index + 1);
            }
        }
    }

    /// Swap each named element with its previous neighbor, one step
    /// toward the bottom. Processed back-to-front, skipping neighbors in
    /// the moved set, so no element is swapped twice.
    pub fn send_backward(&mut self, ids: &[ElementId]) {
        let indices: Vec<usize> = (0..self.elements.len())
            .filter(|&i| ids.contains(&self.elements[i].id))
            .collect();
        for index in indices {
            if index > 0 && !ids.contains(&self.elements[index - 1].id) {
                self.elements.swap(index, index - 1);
            }
        }
    }

    // -----------------------------------------------------------------------
    // Clipboard
    // -----------------------------------------------------------------------

    /// Capture the current selection into the clipboard.
    pub fn copy_selection(&mut self) {
        self.clipboard = self.selected_elements().into_iter().cloned().collect();
    }

    /// Duplicate the captured elements with fresh ids at a fixed offset,
    /// append them, and select only the copies.
    pub fn paste(&mut self) -> Vec<ElementId> {
        if self.clipboard.is_empty() {
            return Vec::new();
        }
        let mut new_ids = Vec::with_capacity(self.clipboard.len());
        for source in self.clipboard.clone() {
            let mut copy = source;
            copy.id = ElementId::new();
            copy.x += PASTE_OFFSET;
            copy.y += PASTE_OFFSET;
            new_ids.push(copy.id);
            self.elements.push(copy);
        }
        self.selected.clone_from(&new_ids);
        new_ids
    }

    // -----------------------------------------------------------------------
    // Serialization
    // -----------------------------------------------------------------------

    /// Export the full document, soft-deleted entries included.
    #[must_use]
    pub fn export(&self) -> DocumentBlob {
        DocumentBlob::from_elements(self.elements.clone())
    }

    /// Replace the document from an import blob and clear the selection.
    ///
    /// A blob with the wrong type tag is rejected as a logged no-op; the
    /// prior document is left untouched. Returns whether the blob was
    /// applied.
    pub fn import(&mut self, blob: DocumentBlob) -> bool {
        if !blob.matches_type() {
            tracing::warn!("rejected import blob with type tag {:?}", blob.doc_type);
            return false;
        }
        self.elements = blob.elements;
        self.selected.clear();
        true
    }

    // -----------------------------------------------------------------------
    // Viewport
    // -----------------------------------------------------------------------

    /// Current zoom level; always within `[ZOOM_MIN, ZOOM_MAX]`.
    #[must_use]
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Set the zoom level, clamped to `[ZOOM_MIN, ZOOM_MAX]`.
    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom.clamp(ZOOM_MIN, ZOOM_MAX);
    }

    /// Set the scroll offset.
    pub fn set_scroll(&mut self, x: f32, y: f32) {
        self.scroll_x = x;
        self.scroll_y = y;
    }

    /// Set the viewport dimensions.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport_width = width;
        self.viewport_height = height;
    }

    /// Convert a screen-space point into document space through the
    /// current scroll and zoom.
    #[must_use]
    pub fn screen_to_document(&self, point: Point) -> Point {
        geometry::screen_to_document(point, self.scroll_x, self.scroll_y, self.zoom)
    }

    /// Convert a document-space point into screen space.
    #[must_use]
    pub fn document_to_screen(&self, point: Point) -> Point {
        geometry::document_to_screen(point, self.scroll_x, self.scroll_y, self.zoom)
    }

    // -----------------------------------------------------------------------
    // History support
    // -----------------------------------------------------------------------

    /// Point-in-time copy of `(elements, selected ids)` for snapshotting.
    #[must_use]
    pub fn snapshot(&self) -> (Vec<Element>, Vec<ElementId>) {
        (self.elements.clone(), self.selected.clone())
    }

    /// Restore a snapshot by value.
    pub fn restore(&mut self, elements: Vec<Element>, selected: Vec<ElementId>) {
        self.elements = elements;
        self.selected = selected;
    }
}
