//! Drawing elements - the building blocks of a board document.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry::{Bounds, Point};

/// Padding added around freehand-path bounds so thin strokes stay easy
/// to target.
pub const FREEHAND_BOUNDS_PADDING: f32 = 2.0;

/// Unique identifier for an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementId(Uuid);

impl ElementId {
    /// Create a new unique element ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Parse from the canonical string form.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid UUID.
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    /// Align to the left edge.
    #[default]
    Left,
    /// Center within the element box.
    Center,
    /// Align to the right edge.
    Right,
}

/// The variant tag and variant-specific attributes of an element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ElementKind {
    /// An axis-aligned rectangle.
    Rectangle,

    /// An ellipse inscribed in the element box.
    Ellipse,

    /// A diamond inscribed in the element box.
    Diamond,

    /// A connector with an arrowhead at the last point.
    Arrow {
        /// Ordered points relative to the element origin; length >= 2.
        points: Vec<Point>,
    },

    /// A plain polyline connector.
    Line {
        /// Ordered points relative to the element origin; length >= 2.
        points: Vec<Point>,
    },

    /// A text block.
    Text {
        /// Text body; may contain newlines.
        text: String,
        /// Font size in document units; `None` means auto-fit.
        #[serde(rename = "fontSize", default)]
        font_size: Option<f32>,
        /// Font family name.
        #[serde(rename = "fontFamily", default = "default_font_family")]
        font_family: String,
        /// Horizontal alignment.
        #[serde(rename = "textAlign", default)]
        text_align: TextAlign,
        /// When set, the user pinned the font size and auto-sizing is
        /// suppressed.
        #[serde(rename = "userSetFontSize", default)]
        user_set_font_size: bool,
    },

    /// A freehand stroke.
    #[serde(rename = "freehand-path")]
    Freehand {
        /// Ordered samples relative to the element origin; length >= 1.
        points: Vec<Point>,
    },

    /// A grouping frame; membership is positional, by bounds overlap.
    Frame {
        /// Display label.
        #[serde(default = "default_frame_name")]
        name: String,
    },
}

fn default_font_family() -> String {
    "Arial".to_string()
}

fn default_frame_name() -> String {
    "Frame".to_string()
}

/// One drawable unit in the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    /// Unique identifier; immutable for the element's lifetime.
    pub id: ElementId,
    /// Variant tag and variant-specific attributes.
    #[serde(flatten)]
    pub kind: ElementKind,
    /// Local origin, horizontal.
    pub x: f32,
    /// Local origin, vertical.
    pub y: f32,
    /// Nominal horizontal extent.
    pub width: f32,
    /// Nominal vertical extent.
    pub height: f32,
    /// Stroke color as a CSS-style string.
    #[serde(default = "default_stroke_color")]
    pub stroke_color: String,
    /// Fill color; `"transparent"` means no fill.
    #[serde(default = "default_fill_color")]
    pub fill_color: String,
    /// Stroke width in document units.
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f32,
    /// Opacity, 0-100.
    #[serde(default = "default_opacity")]
    pub opacity: f32,
    /// Sketch-style roughness; opaque to the engine, render-only.
    #[serde(default = "default_roughness")]
    pub roughness: f32,
    /// Rotation angle in radians about the bounds center.
    #[serde(default)]
    pub angle: f32,
    /// Soft-delete flag; deleted elements stay in the list until a
    /// compacting pass removes them.
    #[serde(default)]
    pub is_deleted: bool,
    /// Random seed for visual rendering variation; opaque to the engine.
    #[serde(default)]
    pub seed: u32,
}

fn default_stroke_color() -> String {
    "#1e293b".to_string()
}

fn default_fill_color() -> String {
    "transparent".to_string()
}

const fn default_stroke_width() -> f32 {
    2.0
}

const fn default_opacity() -> f32 {
    100.0
}

const fn default_roughness() -> f32 {
    1.0
}

/// Draw a fresh render seed from UUID randomness.
fn fresh_seed() -> u32 {
    let bytes = *Uuid::new_v4().as_bytes();
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

impl Element {
    /// Create a new element of the given kind at the origin, with the
    /// standard appearance defaults and a fresh id and seed.
    #[must_use]
    pub fn new(kind: ElementKind) -> Self {
        Self {
            id: ElementId::new(),
            kind,
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            stroke_color: default_stroke_color(),
            fill_color: default_fill_color(),
            stroke_width: default_stroke_width(),
            opacity: default_opacity(),
            roughness: default_roughness(),
            angle: 0.0,
            is_deleted: false,
            seed: fresh_seed(),
        }
    }

    /// Set the origin.
    #[must_use]
    pub fn with_position(mut self, x: f32, y: f32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Set the nominal size.
    #[must_use]
    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// The element's point sequence, if its variant carries one.
    #[must_use]
    pub fn points(&self) -> Option<&[Point]> {
        match &self.kind {
            ElementKind::Arrow { points }
            | ElementKind::Line { points }
            | ElementKind::Freehand { points } => Some(points),
            _ => None,
        }
    }

    /// Whether this element is still live (not soft-deleted).
    #[must_use]
    pub const fn is_live(&self) -> bool {
        !self.is_deleted
    }

    /// Axis-aligned bounds in document space.
    ///
    /// Point-sequence variants report the envelope of `origin + point`,
    /// floored at 1 unit per axis; freehand paths are padded by
    /// [`FREEHAND_BOUNDS_PADDING`]. All other variants report
    /// `(x, y, width, height)` verbatim - rotation is never baked in, and
    /// rotation-aware callers must rotate the query point instead.
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        match &self.kind {
            ElementKind::Arrow { points } | ElementKind::Line { points } => {
                point_envelope(self.x, self.y, points)
                    .unwrap_or_else(|| Bounds::new(self.x, self.y, self.width, self.height))
            }
            ElementKind::Freehand { points } => point_envelope(self.x, self.y, points)
                .map(|b| b.expand(FREEHAND_BOUNDS_PADDING))
                .unwrap_or_else(|| Bounds::new(self.x, self.y, self.width, self.height)),
            _ => Bounds::new(self.x, self.y, self.width, self.height),
        }
    }
}

/// Envelope of `origin + point` over all points, floored at 1 unit per
/// axis. `None` for an empty sequence.
fn point_envelope(origin_x: f32, origin_y: f32, points: &[Point]) -> Option<Bounds> {
    let first = points.first()?;
    let mut min_x = first.x;
    let mut min_y = first.y;
    let mut max_x = first.x;
    let mut max_y = first.y;
    for p in &points[1..] {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    Some(Bounds::new(
        origin_x + min_x,
        origin_y + min_y,
        (max_x - min_x).max(1.0),
        (max_y - min_y).max(1.0),
    ))
}

/// Union of the bounds of a set of elements. `None` for an empty set.
#[must_use]
pub fn elements_bounds(elements: &[&Element]) -> Option<Bounds> {
    let mut iter = elements.iter();
    let first = iter.next()?.bounds();
    Some(iter.fold(first, |acc, e| acc.union(&e.bounds())))
}

/// A partial attribute update produced by the transform engine and merged
/// by the document store. Unset fields leave the element untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementPatch {
    /// New origin, horizontal.
    pub x: Option<f32>,
    /// New origin, vertical.
    pub y: Option<f32>,
    /// New nominal width.
    pub width: Option<f32>,
    /// New nominal height.
    pub height: Option<f32>,
    /// New rotation angle in radians.
    pub angle: Option<f32>,
    /// New stroke color.
    pub stroke_color: Option<String>,
    /// New fill color.
    pub fill_color: Option<String>,
    /// New stroke width.
    pub stroke_width: Option<f32>,
    /// New opacity, 0-100.
    pub opacity: Option<f32>,
    /// Replacement point sequence (arrow, line, freehand variants only).
    pub points: Option<Vec<Point>>,
    /// New text body (text variant only).
    pub text: Option<String>,
    /// New font size; `Some(None)` clears the stored size back to
    /// auto-fit (text variant only).
    pub font_size: Option<Option<f32>>,
    /// New user-pinned-font-size flag (text variant only).
    pub user_set_font_size: Option<bool>,
    /// New text alignment (text variant only).
    pub text_align: Option<TextAlign>,
    /// New frame label (frame variant only).
    pub name: Option<String>,
}

impl Element {
    /// Merge a partial update into this element. Variant-specific fields
    /// are ignored when the variant does not carry them.
    pub fn apply_patch(&mut self, patch: ElementPatch) {
        if let Some(x) = patch.x {
            self.x = x;
        }
        if let Some(y) = patch.y {
            self.y = y;
        }
        if let Some(width) = patch.width {
            self.width = width;
        }
        if let Some(height) = patch.height {
            self.height = height;
        }
        if let Some(angle) = patch.angle {
            self.angle = angle;
        }
        if let Some(stroke_color) = patch.stroke_color {
            self.stroke_color = stroke_color;
        }
        if let Some(fill_color) = patch.fill_color {
            self.fill_color = fill_color;
        }
        if let Some(stroke_width) = patch.stroke_width {
            self.stroke_width = stroke_width;
        }
        if let Some(opacity) = patch.opacity {
            self.opacity = opacity;
        }
        if let Some(new_points) = patch.points {
            if let ElementKind::Arrow { points }
            | ElementKind::Line { points }
            | ElementKind::Freehand { points } = &mut self.kind
            {
                *points = new_points;
            }
        }
        if let ElementKind::Text {
            text,
            font_size,
            text_align,
            user_set_font_size,
            ..
        } = &mut self.kind
        {
            if let Some(new_text) = patch.text {
                *text = new_text;
            }
            if let Some(new_size) = patch.font_size {
                *font_size = new_size;
            }
            if let Some(pinned) = patch.user_set_font_size {
                *user_set_font_size = pinned;
            }
            if let Some(align) = patch.text_align {
                *text_align = align;
            }
        }
        if let ElementKind::Frame { name } = &mut self.kind {
            if let Some(new_name) = patch.name {
                *name = new_name;
            }
        }
    }
}
