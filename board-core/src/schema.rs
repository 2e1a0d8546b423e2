//! Canonical serialized document shared with persistence and transfer
//! collaborators.

use serde::{Deserialize, Serialize};

use crate::element::Element;
use crate::error::{BoardError, BoardResult};

/// Type tag every exported document carries.
pub const DOCUMENT_TYPE: &str = "excalidraw-like";

/// Current document format version.
pub const DOCUMENT_VERSION: u32 = 1;

/// The exported document: the full, order-preserving element array,
/// soft-deleted entries included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentBlob {
    /// Format tag; must equal [`DOCUMENT_TYPE`] on import.
    #[serde(rename = "type")]
    pub doc_type: String,
    /// Format version.
    pub version: u32,
    /// Elements in z-order.
    pub elements: Vec<Element>,
}

impl DocumentBlob {
    /// Wrap an element list in the canonical envelope.
    #[must_use]
    pub fn from_elements(elements: Vec<Element>) -> Self {
        Self {
            doc_type: DOCUMENT_TYPE.to_string(),
            version: DOCUMENT_VERSION,
            elements,
        }
    }

    /// Whether the type tag matches the supported format.
    #[must_use]
    pub fn matches_type(&self) -> bool {
        self.doc_type == DOCUMENT_TYPE
    }

    /// Encode as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Serialization`] if encoding fails.
    pub fn to_json(&self) -> BoardResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Decode from JSON and validate the type tag.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Serialization`] for malformed JSON or a
    /// missing `elements` field, and [`BoardError::InvalidDocument`] for
    /// a mismatched type tag.
    pub fn from_json(json: &str) -> BoardResult<Self> {
        let blob: Self = serde_json::from_str(json)?;
        if !blob.matches_type() {
            return Err(BoardError::InvalidDocument(blob.doc_type));
        }
        Ok(blob)
    }
}
