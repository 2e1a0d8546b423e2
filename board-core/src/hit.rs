//! Hit-testing and manipulation handles.
//!
//! Pure queries over single elements: point containment, the canonical
//! ordered handle list per variant, zoom-aware handle proximity, and the
//! cursor lookup. The store decides *which* elements to ask (z-order,
//! soft-delete filtering); nothing here depends on interaction code.

use crate::element::{Element, ElementKind};
use crate::geometry::{self, Bounds, Point};

/// Minimum hit tolerance for line and arrow segments, in document units.
pub const LINE_HIT_TOLERANCE: f32 = 5.0;

/// Minimum hit tolerance for freehand strokes, in document units.
pub const FREEHAND_HIT_TOLERANCE: f32 = 8.0;

/// Handle size in screen units before zoom compensation.
pub const HANDLE_SIZE: f32 = 8.0;

/// Floor for the zoom-compensated handle size so handles stay clickable
/// at low zoom.
pub const HANDLE_MIN_SIZE: f32 = 4.0;

/// Floor applied to each bound dimension for handle *placement* only;
/// never fed back into the element's stored size.
pub const HANDLE_PLACEMENT_MIN: f32 = 8.0;

/// Identifies a manipulation handle on an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleDirection {
    /// Top-left corner.
    Nw,
    /// Top-right corner.
    Ne,
    /// Bottom-right corner.
    Se,
    /// Bottom-left corner.
    Sw,
    /// First point of a line or arrow.
    Start,
    /// Last point of a line or arrow.
    End,
}

/// A manipulation handle in document space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    /// Handle center.
    pub position: Point,
    /// Which handle this is.
    pub direction: HandleDirection,
}

/// Cursor shape to show while hovering a handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorKind {
    /// Diagonal resize along the nw-se axis.
    ResizeNwSe,
    /// Diagonal resize along the ne-sw axis.
    ResizeNeSw,
    /// Endpoint move.
    Move,
    /// No special cursor.
    Default,
}

/// Whether `point` (document space) hits `element`.
///
/// Soft-deleted elements never hit. Line/arrow and freehand variants with
/// fewer points than their contract requires fall back to the box test.
#[must_use]
pub fn hit_test(element: &Element, point: Point) -> bool {
    if element.is_deleted {
        return false;
    }
    match &element.kind {
        ElementKind::Arrow { points } | ElementKind::Line { points } if points.len() >= 2 => {
            let tolerance = element.stroke_width.max(LINE_HIT_TOLERANCE);
            hit_segments(element, points, point, tolerance)
        }
        ElementKind::Freehand { points } if !points.is_empty() => {
            hit_freehand(element, points, point)
        }
        _ => hit_box(element, point),
    }
}

/// Box test in the element's unrotated frame: the query point is rotated
/// by `-angle` about the bounds center first.
fn hit_box(element: &Element, point: Point) -> bool {
    let bounds = element.bounds();
    if element.angle.abs() <= f32::EPSILON {
        return bounds.contains(point);
    }
    let rotated = geometry::rotate_point(point, bounds.center(), -element.angle);
    bounds.contains(rotated)
}

fn hit_segments(element: &Element, points: &[Point], point: Point, tolerance: f32) -> bool {
    points.windows(2).any(|pair| {
        let a = Point::new(element.x + pair[0].x, element.y + pair[0].y);
        let b = Point::new(element.x + pair[1].x, element.y + pair[1].y);
        geometry::distance_to_segment(point, a, b) <= tolerance
    })
}

/// Freehand test: the segment pass, then the padded-bounds sample
/// fallback. Both passes are contractual; the fallback is what makes a
/// single-sample dot selectable at all.
fn hit_freehand(element: &Element, points: &[Point], point: Point) -> bool {
    let tolerance = element.stroke_width.max(FREEHAND_HIT_TOLERANCE);
    if points.len() >= 2 && hit_segments(element, points, point, tolerance) {
        return true;
    }
    if !element.bounds().contains(point) {
        return false;
    }
    points.iter().any(|p| {
        let sample = Point::new(element.x + p.x, element.y + p.y);
        geometry::distance(point, sample) <= tolerance
    })
}

/// The canonical ordered handle list for an element.
///
/// Lines and arrows get exactly two handles at their first and last point;
/// every other variant (and any point sequence too short to qualify) gets
/// the four corner handles of its bounds, each dimension floored at
/// [`HANDLE_PLACEMENT_MIN`] for placement.
#[must_use]
pub fn handles(element: &Element) -> Vec<Handle> {
    if let ElementKind::Arrow { points } | ElementKind::Line { points } = &element.kind {
        if points.len() >= 2 {
            let first = points[0];
            let last = points[points.len() - 1];
            return vec![
                Handle {
                    position: Point::new(element.x + first.x, element.y + first.y),
                    direction: HandleDirection::Start,
                },
                Handle {
                    position: Point::new(element.x + last.x, element.y + last.y),
                    direction: HandleDirection::End,
                },
            ];
        }
    }

    let bounds = element.bounds();
    let width = bounds.width.max(HANDLE_PLACEMENT_MIN);
    let height = bounds.height.max(HANDLE_PLACEMENT_MIN);
    vec![
        Handle {
            position: Point::new(bounds.x, bounds.y),
            direction: HandleDirection::Nw,
        },
        Handle {
            position: Point::new(bounds.x + width, bounds.y),
            direction: HandleDirection::Ne,
        },
        Handle {
            position: Point::new(bounds.x + width, bounds.y + height),
            direction: HandleDirection::Se,
        },
        Handle {
            position: Point::new(bounds.x, bounds.y + height),
            direction: HandleDirection::Sw,
        },
    ]
}

/// Which handle of `element` the point hits, if any.
///
/// The handle hit box is `max(8 / zoom, 4)` document units so handles
/// remain clickable at low zoom. `start`/`end` handles are circular;
/// corner handles are square, centered on the handle position.
#[must_use]
pub fn hit_test_handle(element: &Element, point: Point, zoom: f32) -> Option<HandleDirection> {
    let size = (HANDLE_SIZE / zoom).max(HANDLE_MIN_SIZE);
    for handle in handles(element) {
        let hit = match handle.direction {
            HandleDirection::Start | HandleDirection::End => {
                geometry::distance(point, handle.position) <= size / 2.0
            }
            _ => Bounds::new(
                handle.position.x - size / 2.0,
                handle.position.y - size / 2.0,
                size,
                size,
            )
            .contains(point),
        };
        if hit {
            return Some(handle.direction);
        }
    }
    None
}

/// Cursor to show for a handle direction. Pure lookup.
#[must_use]
pub const fn cursor_for(direction: HandleDirection) -> CursorKind {
    match direction {
        HandleDirection::Nw | HandleDirection::Se => CursorKind::ResizeNwSe,
        HandleDirection::Ne | HandleDirection::Sw => CursorKind::ResizeNeSw,
        HandleDirection::Start | HandleDirection::End => CursorKind::Move,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_4;

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Element {
        Element::new(ElementKind::Rectangle)
            .with_position(x, y)
            .with_size(w, h)
    }

    fn line(points: Vec<Point>) -> Element {
        Element::new(ElementKind::Line { points }).with_position(0.0, 0.0)
    }

    #[test]
    fn test_box_hit_inside_and_outside() {
        let element = rect(10.0, 10.0, 40.0, 20.0);
        assert!(hit_test(&element, Point::new(30.0, 20.0)));
        assert!(hit_test(&element, Point::new(10.0, 10.0)));
        assert!(!hit_test(&element, Point::new(51.0, 20.0)));
    }

    #[test]
    fn test_deleted_element_never_hits() {
        let mut element = rect(0.0, 0.0, 100.0, 100.0);
        element.is_deleted = true;
        assert!(!hit_test(&element, Point::new(50.0, 50.0)));
    }

    #[test]
    fn test_rotated_box_hit_uses_unrotated_frame() {
        // A 40x10 box rotated 45 degrees: the original corner region no
        // longer hits, while a point along the rotated long axis does.
        let mut element = rect(0.0, 0.0, 40.0, 10.0);
        element.angle = FRAC_PI_4;
        let center = element.bounds().center();
        let corner = geometry::rotate_point(Point::new(39.0, 1.0), center, element.angle);
        assert!(hit_test(&element, corner));
        assert!(!hit_test(&element, Point::new(39.0, 1.0)));
    }

    #[test]
    fn test_line_hit_within_tolerance() {
        let element = line(vec![Point::new(0.0, 0.0), Point::new(100.0, 0.0)]);
        // Default stroke width 2 floors the tolerance at 5.
        assert!(hit_test(&element, Point::new(50.0, 4.9)));
        assert!(!hit_test(&element, Point::new(50.0, 5.1)));
    }

    #[test]
    fn test_thick_line_widens_tolerance() {
        let mut element = line(vec![Point::new(0.0, 0.0), Point::new(100.0, 0.0)]);
        element.stroke_width = 12.0;
        assert!(hit_test(&element, Point::new(50.0, 11.0)));
    }

    #[test]
    fn test_short_line_falls_back_to_box() {
        let element = Element::new(ElementKind::Line {
            points: vec![Point::new(0.0, 0.0)],
        })
        .with_position(10.0, 10.0)
        .with_size(30.0, 30.0);
        assert!(hit_test(&element, Point::new(20.0, 20.0)));
    }

    #[test]
    fn test_freehand_segment_hit() {
        let element = Element::new(ElementKind::Freehand {
            points: vec![
                Point::new(0.0, 0.0),
                Point::new(50.0, 0.0),
                Point::new(50.0, 50.0),
            ],
        })
        .with_position(100.0, 100.0);
        assert!(hit_test(&element, Point::new(125.0, 107.0)));
        assert!(!hit_test(&element, Point::new(125.0, 140.0)));
    }

    #[test]
    fn test_freehand_single_sample_selectable_via_fallback() {
        let element = Element::new(ElementKind::Freehand {
            points: vec![Point::new(4.0, 4.0)],
        })
        .with_position(100.0, 100.0);
        // Inside the padded bounds and within sample tolerance.
        assert!(hit_test(&element, Point::new(105.0, 105.0)));
        // Within sample tolerance but outside the padded bounds: the
        // fallback's bounds gate rejects it.
        assert!(!hit_test(&element, Point::new(110.5, 104.0)));
    }

    #[test]
    fn test_line_handles_at_endpoints() {
        let element = Element::new(ElementKind::Arrow {
            points: vec![Point::new(5.0, 5.0), Point::new(25.0, 15.0)],
        })
        .with_position(10.0, 10.0);
        let handles = handles(&element);
        assert_eq!(handles.len(), 2);
        assert_eq!(handles[0].direction, HandleDirection::Start);
        assert_eq!(handles[0].position, Point::new(15.0, 15.0));
        assert_eq!(handles[1].direction, HandleDirection::End);
        assert_eq!(handles[1].position, Point::new(35.0, 25.0));
    }

    #[test]
    fn test_box_handles_order_and_placement() {
        let element = rect(10.0, 20.0, 30.0, 40.0);
        let handles = handles(&element);
        let directions: Vec<_> = handles.iter().map(|h| h.direction).collect();
        assert_eq!(
            directions,
            vec![
                HandleDirection::Nw,
                HandleDirection::Ne,
                HandleDirection::Se,
                HandleDirection::Sw,
            ]
        );
        assert_eq!(handles[2].position, Point::new(40.0, 60.0));
    }

    #[test]
    fn test_tiny_element_handle_placement_floored() {
        let element = rect(0.0, 0.0, 2.0, 2.0);
        let handles = handles(&element);
        assert_eq!(handles[1].position, Point::new(8.0, 0.0));
        assert_eq!(handles[2].position, Point::new(8.0, 8.0));
        // Placement floor must not leak into the stored size.
        assert!((element.width - 2.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_every_handle_hits_its_own_direction() {
        let elements = vec![
            rect(10.0, 10.0, 60.0, 40.0),
            Element::new(ElementKind::Ellipse)
                .with_position(0.0, 0.0)
                .with_size(50.0, 50.0),
            Element::new(ElementKind::Diamond)
                .with_position(-20.0, -20.0)
                .with_size(40.0, 30.0),
            Element::new(ElementKind::Frame {
                name: "Frame".to_string(),
            })
            .with_position(5.0, 5.0)
            .with_size(200.0, 100.0),
            Element::new(ElementKind::Arrow {
                points: vec![Point::new(0.0, 0.0), Point::new(40.0, 30.0)],
            })
            .with_position(70.0, 70.0),
            Element::new(ElementKind::Freehand {
                points: vec![Point::new(0.0, 0.0), Point::new(20.0, 10.0)],
            })
            .with_position(30.0, 80.0),
        ];
        for element in &elements {
            for handle in handles(element) {
                assert_eq!(
                    hit_test_handle(element, handle.position, 1.0),
                    Some(handle.direction),
                    "handle {:?} did not hit itself",
                    handle.direction
                );
            }
        }
    }

    #[test]
    fn test_handle_size_grows_at_low_zoom() {
        let element = rect(0.0, 0.0, 100.0, 100.0);
        // zoom 0.25 -> hit box of 32 document units; 12 units off still hits.
        assert_eq!(
            hit_test_handle(&element, Point::new(12.0, 12.0), 0.25),
            Some(HandleDirection::Nw)
        );
        // At zoom 1 the same point is outside the 8-unit box.
        assert_eq!(hit_test_handle(&element, Point::new(12.0, 12.0), 1.0), None);
    }

    #[test]
    fn test_endpoint_handles_use_circular_hit() {
        let element = line(vec![Point::new(0.0, 0.0), Point::new(50.0, 0.0)]);
        // 4/sqrt(2) ~ 2.83 on each axis is inside radius 4; 3.5 on both
        // axes is outside the circle but inside the would-be square.
        assert_eq!(
            hit_test_handle(&element, Point::new(2.5, 2.5), 1.0),
            Some(HandleDirection::Start)
        );
        assert_eq!(hit_test_handle(&element, Point::new(3.5, 3.5), 1.0), None);
    }

    #[test]
    fn test_cursor_lookup() {
        assert_eq!(cursor_for(HandleDirection::Nw), CursorKind::ResizeNwSe);
        assert_eq!(cursor_for(HandleDirection::Se), CursorKind::ResizeNwSe);
        assert_eq!(cursor_for(HandleDirection::Ne), CursorKind::ResizeNeSw);
        assert_eq!(cursor_for(HandleDirection::Sw), CursorKind::ResizeNeSw);
        assert_eq!(cursor_for(HandleDirection::Start), CursorKind::Move);
        assert_eq!(cursor_for(HandleDirection::End), CursorKind::Move);
    }
}
