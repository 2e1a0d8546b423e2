//! # Saorsa Board Core
//!
//! Document and geometry engine for an infinite vector-drawing surface:
//! the typed element model, per-variant bounds and hit-testing, resize
//! transforms, z-order manipulation, and snapshot-based undo/redo.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                 board-core                  │
//! ├─────────────────────────────────────────────┤
//! │  Scene (store)   │  History                 │
//! │  - elements      │  - bounded snapshots     │
//! │  - selection     │  - undo / redo           │
//! │  - z-order       │                          │
//! ├─────────────────────────────────────────────┤
//! │  Geometry        │  Hit + Handles           │
//! │  - bounds        │  - per-variant tests     │
//! │  - rotation      │  - zoom-aware handles    │
//! │  - screen<->doc  │  Transform               │
//! │                  │  - resize / translate    │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Rendering and interaction live outside this crate: the engine only
//! supplies bounds, handles, and attributes, and consumes patches.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod element;
pub mod error;
pub mod geometry;
pub mod history;
pub mod hit;
pub mod scene;
pub mod schema;
pub mod state;
pub mod transform;

pub use element::{Element, ElementId, ElementKind, ElementPatch, TextAlign};
pub use error::{BoardError, BoardResult};
pub use geometry::{Bounds, Point};
pub use history::{History, HistoryEntry, HISTORY_CAPACITY};
pub use hit::{CursorKind, Handle, HandleDirection};
pub use scene::Scene;
pub use schema::{DocumentBlob, DOCUMENT_TYPE, DOCUMENT_VERSION};
pub use state::BoardState;

/// Board core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
