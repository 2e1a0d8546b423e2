//! Pure geometry kernel - distances, rotation, containment, and
//! coordinate-space conversion.
//!
//! Every function here is total and stateless. Degenerate inputs
//! (zero-length segments, empty bounds) produce defined results rather
//! than NaN or division by zero.

use serde::{Deserialize, Serialize};

/// A 2D coordinate, in document space unless stated otherwise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f32,
    /// Vertical coordinate.
    pub y: f32,
}

impl Point {
    /// Create a point from coordinates.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned box in document space.
///
/// `width` and `height` are non-negative in any value returned by the
/// kernel; callers may hold negative deltas mid-gesture, but every
/// bounds-producing function normalizes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Horizontal extent.
    pub width: f32,
    /// Vertical extent.
    pub height: f32,
}

impl Bounds {
    /// Create bounds from origin and size.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Center of the box.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Inclusive containment test on both axes.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    /// Grow the box by `pad` units on all four sides.
    #[must_use]
    pub fn expand(&self, pad: f32) -> Self {
        Self {
            x: self.x - pad,
            y: self.y - pad,
            width: self.width + pad * 2.0,
            height: self.height + pad * 2.0,
        }
    }

    /// Smallest box covering both inputs.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let min_x = self.x.min(other.x);
        let min_y = self.y.min(other.y);
        let max_x = (self.x + self.width).max(other.x + other.width);
        let max_y = (self.y + self.height).max(other.y + other.height);
        Self::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }
}

/// Euclidean distance between two points.
#[must_use]
pub fn distance(p1: Point, p2: Point) -> f32 {
    let dx = p2.x - p1.x;
    let dy = p2.y - p1.y;
    dx.hypot(dy)
}

/// Inclusive containment test of `point` against `bounds`.
#[must_use]
pub fn point_in_bounds(point: Point, bounds: &Bounds) -> bool {
    bounds.contains(point)
}

/// Rotate `point` about `center` by `angle` radians.
#[must_use]
pub fn rotate_point(point: Point, center: Point, angle: f32) -> Point {
    let cos = angle.cos();
    let sin = angle.sin();
    let dx = point.x - center.x;
    let dy = point.y - center.y;
    Point::new(
        center.x + dx * cos - dy * sin,
        center.y + dx * sin + dy * cos,
    )
}

/// Distance from `point` to the finite segment `a`-`b`.
///
/// The projection parameter is clamped to `[0, 1]`; when `a == b` this
/// degenerates to the distance to `a`.
#[must_use]
pub fn distance_to_segment(point: Point, a: Point, b: Point) -> f32 {
    let ab_x = b.x - a.x;
    let ab_y = b.y - a.y;
    let len_sq = ab_x * ab_x + ab_y * ab_y;
    if len_sq <= f32::EPSILON {
        return distance(point, a);
    }
    let t = ((point.x - a.x) * ab_x + (point.y - a.y) * ab_y) / len_sq;
    let t = t.clamp(0.0, 1.0);
    let closest = Point::new(a.x + t * ab_x, a.y + t * ab_y);
    distance(point, closest)
}

/// Convert a screen-space point to document space.
///
/// `doc = (screen - scroll) / zoom`; zoom is always positive.
#[must_use]
pub fn screen_to_document(point: Point, scroll_x: f32, scroll_y: f32, zoom: f32) -> Point {
    Point::new((point.x - scroll_x) / zoom, (point.y - scroll_y) / zoom)
}

/// Convert a document-space point to screen space. Exact inverse of
/// [`screen_to_document`].
#[must_use]
pub fn document_to_screen(point: Point, scroll_x: f32, scroll_y: f32, zoom: f32) -> Point {
    Point::new(point.x * zoom + scroll_x, point.y * zoom + scroll_y)
}

/// Normalize an angle to `[0, 2π)`.
#[must_use]
pub fn normalize_angle(angle: f32) -> f32 {
    use std::f32::consts::TAU;
    ((angle % TAU) + TAU) % TAU
}
