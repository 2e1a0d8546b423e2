//! Gesture transforms - translation, per-variant resize, and creation
//! helpers.
//!
//! Every operation produces an [`ElementPatch`] for the store to merge;
//! nothing here mutates an element in place.

use crate::element::{Element, ElementKind, ElementPatch};
use crate::geometry::{self, Bounds, Point};
use crate::hit::HandleDirection;

/// Minimum size per axis a corner resize may produce.
pub const MIN_RESIZE_SIZE: f32 = 20.0;

/// Canonical size for elements created by a click with no drag.
pub const DEFAULT_CLICK_SIZE: f32 = 50.0;

/// Minimum spacing between consecutive freehand samples.
pub const FREEHAND_MIN_SPACING: f32 = 2.0;

/// Resize ratio beyond which a text element's stored font size is cleared
/// (the shrink threshold is the reciprocal).
pub const FONT_CLEAR_RATIO: f32 = 2.0;

/// The dot polygon a zero-movement freehand click produces: a 9-point
/// loop approximating a circle of radius 4.
pub const FREEHAND_DOT: [Point; 9] = [
    Point::new(0.0, 4.0),
    Point::new(1.0, 2.0),
    Point::new(3.0, 0.0),
    Point::new(5.0, 1.0),
    Point::new(8.0, 4.0),
    Point::new(5.0, 7.0),
    Point::new(3.0, 8.0),
    Point::new(1.0, 6.0),
    Point::new(0.0, 4.0),
];

const TEXT_CHAR_WIDTH_FACTOR: f32 = 0.6;
const TEXT_LINE_HEIGHT_FACTOR: f32 = 1.2;
const TEXT_BOX_PADDING: f32 = 16.0;
const TEXT_MIN_WIDTH: f32 = 100.0;
const TEXT_MIN_HEIGHT: f32 = 40.0;

/// Offset an element by a per-axis delta.
///
/// Point sequences stay relative to the origin, so translation is a pure
/// origin shift regardless of point count.
#[must_use]
pub fn translate(element: &Element, dx: f32, dy: f32) -> ElementPatch {
    ElementPatch {
        x: Some(element.x + dx),
        y: Some(element.y + dy),
        ..ElementPatch::default()
    }
}

/// Compute the resize patch for a handle drag.
///
/// `start` and `current` are the gesture's anchor and current cursor in
/// document space; `original` is the element's bounds captured at gesture
/// start. Endpoint handles on box variants (and vice versa) are contract
/// violations and yield an empty patch.
#[must_use]
pub fn resize(
    element: &Element,
    direction: HandleDirection,
    start: Point,
    current: Point,
    original: &Bounds,
) -> ElementPatch {
    match (&element.kind, direction) {
        (
            ElementKind::Arrow { points } | ElementKind::Line { points },
            HandleDirection::Start | HandleDirection::End,
        ) if points.len() >= 2 => resize_endpoint(element, points, direction, current),
        (_, HandleDirection::Start | HandleDirection::End) => ElementPatch::default(),
        _ => resize_box(element, direction, start, current, original),
    }
}

/// Move a line/arrow endpoint to the cursor, then re-normalize the point
/// sequence: the new origin becomes the min corner of the updated
/// envelope and every point is re-expressed against it. Repeated endpoint
/// resizes make the origin drift; bounds and handle queries rely on this
/// re-anchored form.
fn resize_endpoint(
    element: &Element,
    points: &[Point],
    direction: HandleDirection,
    current: Point,
) -> ElementPatch {
    let mut new_points = points.to_vec();
    let local = Point::new(current.x - element.x, current.y - element.y);
    let index = match direction {
        HandleDirection::Start => 0,
        _ => new_points.len() - 1,
    };
    new_points[index] = local;

    let mut min_x = f32::INFINITY;
    let mut min_y = f32::INFINITY;
    let mut max_x = f32::NEG_INFINITY;
    let mut max_y = f32::NEG_INFINITY;
    for p in &new_points {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }

    let normalized = new_points
        .iter()
        .map(|p| Point::new(p.x - min_x, p.y - min_y))
        .collect();

    ElementPatch {
        x: Some(element.x + min_x),
        y: Some(element.y + min_y),
        width: Some((max_x - min_x).max(1.0)),
        height: Some((max_y - min_y).max(1.0)),
        points: Some(normalized),
        ..ElementPatch::default()
    }
}

/// Corner resize: the dragged corner moves two edges, the opposite edges
/// stay fixed, and a minimum size of [`MIN_RESIZE_SIZE`] per axis is
/// enforced by pinning the moving edge.
fn resize_box(
    element: &Element,
    direction: HandleDirection,
    start: Point,
    current: Point,
    original: &Bounds,
) -> ElementPatch {
    let dx = current.x - start.x;
    let dy = current.y - start.y;

    let mut new_x = original.x;
    let mut new_y = original.y;
    let mut new_width = original.width;
    let mut new_height = original.height;

    match direction {
        HandleDirection::Nw => {
            new_x = original.x + dx;
            new_y = original.y + dy;
            new_width = original.width - dx;
            new_height = original.height - dy;
        }
        HandleDirection::Ne => {
            new_y = original.y + dy;
            new_width = original.width + dx;
            new_height = original.height - dy;
        }
        HandleDirection::Se => {
            new_width = original.width + dx;
            new_height = original.height + dy;
        }
        HandleDirection::Sw => {
            new_x = original.x + dx;
            new_width = original.width - dx;
            new_height = original.height + dy;
        }
        HandleDirection::Start | HandleDirection::End => return ElementPatch::default(),
    }

    if new_width < MIN_RESIZE_SIZE {
        if matches!(direction, HandleDirection::Nw | HandleDirection::Sw) {
            new_x = original.x + original.width - MIN_RESIZE_SIZE;
        }
        new_width = MIN_RESIZE_SIZE;
    }
    if new_height < MIN_RESIZE_SIZE {
        if matches!(direction, HandleDirection::Nw | HandleDirection::Ne) {
            new_y = original.y + original.height - MIN_RESIZE_SIZE;
        }
        new_height = MIN_RESIZE_SIZE;
    }

    let mut patch = ElementPatch {
        x: Some(new_x),
        y: Some(new_y),
        width: Some(new_width),
        height: Some(new_height),
        ..ElementPatch::default()
    };

    match &element.kind {
        ElementKind::Text {
            user_set_font_size, ..
        } => {
            if original.width > f32::EPSILON && original.height > f32::EPSILON {
                let scale_x = new_width / original.width;
                let scale_y = new_height / original.height;
                let extreme = |s: f32| !(1.0 / FONT_CLEAR_RATIO..=FONT_CLEAR_RATIO).contains(&s);
                if extreme(scale_x) || extreme(scale_y) {
                    // Past 2x or below 0.5x the stored size is stale
                    // enough that the renderer must re-fit from scratch.
                    patch.font_size = Some(None);
                    if *user_set_font_size {
                        patch.user_set_font_size = Some(false);
                    }
                }
            }
        }
        ElementKind::Freehand { points } => {
            if original.width > f32::EPSILON && original.height > f32::EPSILON {
                let ratio_x = new_width / original.width;
                let ratio_y = new_height / original.height;
                patch.points = Some(
                    points
                        .iter()
                        .map(|p| Point::new(p.x * ratio_x, p.y * ratio_y))
                        .collect(),
                );
            }
        }
        _ => {}
    }

    patch
}

/// The patch a drag-create gesture applies while the pointer moves.
///
/// `anchor` is the document point the gesture started at (the element's
/// creation origin). Freehand strokes grow through
/// [`append_freehand_sample`] instead.
#[must_use]
pub fn drag_create(element: &Element, anchor: Point, current: Point) -> ElementPatch {
    match &element.kind {
        ElementKind::Arrow { .. } | ElementKind::Line { .. } => {
            let dx = current.x - anchor.x;
            let dy = current.y - anchor.y;
            ElementPatch {
                width: Some(dx.abs()),
                height: Some(dy.abs()),
                points: Some(vec![Point::new(0.0, 0.0), Point::new(dx, dy)]),
                ..ElementPatch::default()
            }
        }
        ElementKind::Freehand { .. } => ElementPatch::default(),
        _ => ElementPatch {
            x: Some(current.x.min(anchor.x)),
            y: Some(current.y.min(anchor.y)),
            width: Some((current.x - anchor.x).abs()),
            height: Some((current.y - anchor.y).abs()),
            ..ElementPatch::default()
        },
    }
}

/// Append a freehand sample in document space, thinning consecutive
/// points to [`FREEHAND_MIN_SPACING`]. Returns `None` when the sample is
/// too close to the previous one (or the element is not a freehand path).
#[must_use]
pub fn append_freehand_sample(element: &Element, sample: Point) -> Option<ElementPatch> {
    let ElementKind::Freehand { points } = &element.kind else {
        return None;
    };
    let local = Point::new(sample.x - element.x, sample.y - element.y);
    if let Some(last) = points.last() {
        if geometry::distance(local, *last) < FREEHAND_MIN_SPACING {
            return None;
        }
    }
    let mut new_points = points.clone();
    new_points.push(local);

    let mut min_x = f32::INFINITY;
    let mut min_y = f32::INFINITY;
    let mut max_x = f32::NEG_INFINITY;
    let mut max_y = f32::NEG_INFINITY;
    for p in &new_points {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }

    Some(ElementPatch {
        width: Some((max_x - min_x).max(1.0)),
        height: Some((max_y - min_y).max(1.0)),
        points: Some(new_points),
        ..ElementPatch::default()
    })
}

/// The canonical default applied when a drawing gesture ends with no
/// pointer movement, so a single click always yields a visible,
/// selectable element.
#[must_use]
pub fn click_default(element: &Element) -> ElementPatch {
    match &element.kind {
        ElementKind::Arrow { .. } | ElementKind::Line { .. } => ElementPatch {
            width: Some(DEFAULT_CLICK_SIZE),
            height: Some(0.0),
            points: Some(vec![
                Point::new(0.0, 0.0),
                Point::new(DEFAULT_CLICK_SIZE, 0.0),
            ]),
            ..ElementPatch::default()
        },
        ElementKind::Freehand { .. } => ElementPatch {
            width: Some(8.0),
            height: Some(8.0),
            points: Some(FREEHAND_DOT.to_vec()),
            ..ElementPatch::default()
        },
        _ => ElementPatch {
            width: Some(DEFAULT_CLICK_SIZE),
            height: Some(DEFAULT_CLICK_SIZE),
            ..ElementPatch::default()
        },
    }
}

/// Estimate the box a text body needs at the given font size.
///
/// Approximation used for auto-fit: `0.6 x font_size` per character,
/// `1.2 x font_size` line height, 16 units of padding, floored at 100x40.
#[must_use]
pub fn text_autosize(text: &str, font_size: f32) -> (f32, f32) {
    let lines: Vec<&str> = text.split('\n').collect();
    let max_line_len = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    #[allow(clippy::cast_precision_loss)]
    let width =
        (max_line_len.max(1) as f32 * font_size * TEXT_CHAR_WIDTH_FACTOR + TEXT_BOX_PADDING)
            .max(TEXT_MIN_WIDTH);
    #[allow(clippy::cast_precision_loss)]
    let height = (lines.len() as f32 * font_size * TEXT_LINE_HEIGHT_FACTOR + TEXT_BOX_PADDING)
        .max(TEXT_MIN_HEIGHT);
    (width, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::TextAlign;
    use proptest::prelude::*;

    fn arrow_at(x: f32, y: f32, points: Vec<Point>) -> Element {
        Element::new(ElementKind::Arrow { points }).with_position(x, y)
    }

    fn apply(element: &Element, patch: ElementPatch) -> Element {
        let mut out = element.clone();
        out.apply_patch(patch);
        out
    }

    #[test]
    fn test_translate_shifts_origin_only() {
        let element = arrow_at(10.0, 10.0, vec![Point::new(0.0, 0.0), Point::new(30.0, 40.0)]);
        let patch = translate(&element, 5.0, -5.0);
        assert!(patch.points.is_none());
        let moved = apply(&element, patch);
        assert!((moved.x - 15.0).abs() < f32::EPSILON);
        assert!((moved.y - 5.0).abs() < f32::EPSILON);
        assert_eq!(moved.points().expect("points")[1], Point::new(30.0, 40.0));
    }

    #[test]
    fn test_se_resize_grows() {
        let element = Element::new(ElementKind::Rectangle)
            .with_position(10.0, 10.0)
            .with_size(30.0, 30.0);
        let original = element.bounds();
        let patch = resize(
            &element,
            HandleDirection::Se,
            Point::new(40.0, 40.0),
            Point::new(55.0, 50.0),
            &original,
        );
        let resized = apply(&element, patch);
        assert!((resized.width - 45.0).abs() < f32::EPSILON);
        assert!((resized.height - 40.0).abs() < f32::EPSILON);
        assert!((resized.x - 10.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_nw_resize_moves_origin() {
        let element = Element::new(ElementKind::Rectangle)
            .with_position(10.0, 10.0)
            .with_size(30.0, 30.0);
        let original = element.bounds();
        let patch = resize(
            &element,
            HandleDirection::Nw,
            Point::new(10.0, 10.0),
            Point::new(5.0, 0.0),
            &original,
        );
        let resized = apply(&element, patch);
        assert!((resized.x - 5.0).abs() < f32::EPSILON);
        assert!((resized.y - 0.0).abs() < f32::EPSILON);
        assert!((resized.width - 35.0).abs() < f32::EPSILON);
        assert!((resized.height - 40.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_min_size_clamp_pins_fixed_edge() {
        let element = Element::new(ElementKind::Rectangle)
            .with_position(10.0, 10.0)
            .with_size(30.0, 30.0);
        let original = element.bounds();
        // Drag the nw corner far past the se corner.
        let patch = resize(
            &element,
            HandleDirection::Nw,
            Point::new(10.0, 10.0),
            Point::new(60.0, 60.0),
            &original,
        );
        let resized = apply(&element, patch);
        assert!((resized.width - MIN_RESIZE_SIZE).abs() < f32::EPSILON);
        assert!((resized.height - MIN_RESIZE_SIZE).abs() < f32::EPSILON);
        // The fixed (se) edge must not shift: x + width == 40.
        assert!((resized.x + resized.width - 40.0).abs() < f32::EPSILON);
        assert!((resized.y + resized.height - 40.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_endpoint_resize_reanchors() {
        let element = arrow_at(10.0, 10.0, vec![Point::new(0.0, 0.0), Point::new(30.0, 40.0)]);
        let original = element.bounds();
        // Pull the end to a point strictly inside the envelope.
        let patch = resize(
            &element,
            HandleDirection::End,
            Point::new(40.0, 50.0),
            Point::new(20.0, 20.0),
            &original,
        );
        let resized = apply(&element, patch);
        let points = resized.points().expect("points").to_vec();
        // Start stays where it was in document space.
        assert!((resized.x + points[0].x - 10.0).abs() < 1e-4);
        assert!((resized.y + points[0].y - 10.0).abs() < 1e-4);
        // End lands on the cursor.
        assert!((resized.x + points[1].x - 20.0).abs() < 1e-4);
        assert!((resized.y + points[1].y - 20.0).abs() < 1e-4);
        // Origin re-anchored to the envelope min corner.
        assert!((resized.width - 10.0).abs() < 1e-4);
        assert!((resized.height - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_start_resize_drifts_origin() {
        let element = arrow_at(10.0, 10.0, vec![Point::new(0.0, 0.0), Point::new(30.0, 40.0)]);
        let original = element.bounds();
        let patch = resize(
            &element,
            HandleDirection::Start,
            Point::new(10.0, 10.0),
            Point::new(25.0, 60.0),
            &original,
        );
        let resized = apply(&element, patch);
        let points = resized.points().expect("points").to_vec();
        // First point need not be (0, 0) after re-anchoring.
        assert!((resized.x - 25.0).abs() < 1e-4);
        assert!((points[0].y - 10.0).abs() < 1e-4);
        assert!((resized.x + points[1].x - 40.0).abs() < 1e-4);
        assert!((resized.y + points[1].y - 50.0).abs() < 1e-4);
    }

    #[test]
    fn test_text_resize_extreme_clears_font_size() {
        let element = Element::new(ElementKind::Text {
            text: "hello".to_string(),
            font_size: Some(20.0),
            font_family: "Arial".to_string(),
            text_align: TextAlign::Left,
            user_set_font_size: true,
        })
        .with_position(0.0, 0.0)
        .with_size(100.0, 40.0);
        let original = element.bounds();
        let patch = resize(
            &element,
            HandleDirection::Se,
            Point::new(100.0, 40.0),
            Point::new(150.0, 40.0),
            &original,
        );
        // 2.5x on the x axis: stored size cleared, pin released.
        assert_eq!(patch.font_size, Some(None));
        assert_eq!(patch.user_set_font_size, Some(false));
    }

    #[test]
    fn test_text_resize_moderate_keeps_font_size() {
        let element = Element::new(ElementKind::Text {
            text: "hello".to_string(),
            font_size: Some(20.0),
            font_family: "Arial".to_string(),
            text_align: TextAlign::Left,
            user_set_font_size: false,
        })
        .with_position(0.0, 0.0)
        .with_size(100.0, 40.0);
        let original = element.bounds();
        let patch = resize(
            &element,
            HandleDirection::Se,
            Point::new(100.0, 40.0),
            Point::new(150.0, 20.0),
            &original,
        );
        assert_eq!(patch.font_size, None);
    }

    #[test]
    fn test_freehand_resize_scales_points() {
        let element = Element::new(ElementKind::Freehand {
            points: vec![Point::new(0.0, 0.0), Point::new(10.0, 20.0)],
        })
        .with_position(0.0, 0.0)
        .with_size(10.0, 20.0);
        let original = Bounds::new(0.0, 0.0, 10.0, 20.0);
        let patch = resize(
            &element,
            HandleDirection::Se,
            Point::new(10.0, 20.0),
            Point::new(30.0, 30.0),
            &original,
        );
        let points = patch.points.expect("scaled points");
        assert!((points[1].x - 30.0).abs() < 1e-4);
        assert!((points[1].y - 30.0).abs() < 1e-4);
    }

    #[test]
    fn test_click_default_shape() {
        let element = Element::new(ElementKind::Rectangle).with_position(100.0, 100.0);
        let sized = apply(&element, click_default(&element));
        assert!((sized.x - 100.0).abs() < f32::EPSILON);
        assert!((sized.y - 100.0).abs() < f32::EPSILON);
        assert!((sized.width - 50.0).abs() < f32::EPSILON);
        assert!((sized.height - 50.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_click_default_line_is_horizontal() {
        let element = Element::new(ElementKind::Line { points: vec![] }).with_position(0.0, 0.0);
        let patch = click_default(&element);
        assert_eq!(
            patch.points,
            Some(vec![Point::new(0.0, 0.0), Point::new(50.0, 0.0)])
        );
    }

    #[test]
    fn test_click_default_freehand_dot() {
        let element =
            Element::new(ElementKind::Freehand { points: vec![] }).with_position(0.0, 0.0);
        let patch = click_default(&element);
        let points = patch.points.expect("dot");
        assert_eq!(points.len(), 9);
        assert_eq!(points.first(), points.last());
        assert_eq!(patch.width, Some(8.0));
    }

    #[test]
    fn test_freehand_append_thins_close_samples() {
        let element = Element::new(ElementKind::Freehand {
            points: vec![Point::new(0.0, 0.0)],
        })
        .with_position(100.0, 100.0);
        assert!(append_freehand_sample(&element, Point::new(101.0, 100.0)).is_none());
        let patch =
            append_freehand_sample(&element, Point::new(105.0, 103.0)).expect("spaced sample");
        assert_eq!(
            patch.points,
            Some(vec![Point::new(0.0, 0.0), Point::new(5.0, 3.0)])
        );
        assert_eq!(patch.width, Some(5.0));
        assert_eq!(patch.height, Some(3.0));
    }

    #[test]
    fn test_text_autosize_floors() {
        let (w, h) = text_autosize("", 20.0);
        assert!((w - 100.0).abs() < f32::EPSILON);
        assert!((h - 40.0).abs() < f32::EPSILON);
        let (w, h) = text_autosize("hello world\nsecond line of text", 20.0);
        assert!((w - (19.0 * 12.0 + 16.0)).abs() < 1e-3);
        assert!((h - (2.0 * 24.0 + 16.0)).abs() < 1e-3);
    }

    proptest! {
        // Re-anchoring is idempotent: however often an endpoint is moved,
        // reading back origin + point reproduces both ends.
        #[test]
        fn prop_endpoint_resize_round_trips(
            targets in proptest::collection::vec((-200.0f32..200.0, -200.0f32..200.0), 1..8)
        ) {
            let mut element = arrow_at(
                10.0,
                10.0,
                vec![Point::new(0.0, 0.0), Point::new(30.0, 40.0)],
            );
            let start_doc = Point::new(10.0, 10.0);
            for (tx, ty) in targets {
                let original = element.bounds();
                let patch = resize(
                    &element,
                    HandleDirection::End,
                    Point::new(0.0, 0.0),
                    Point::new(tx, ty),
                    &original,
                );
                element.apply_patch(patch);
                let points = element.points().expect("points").to_vec();
                prop_assert!((element.x + points[0].x - start_doc.x).abs() < 1e-3);
                prop_assert!((element.y + points[0].y - start_doc.y).abs() < 1e-3);
                prop_assert!((element.x + points[1].x - tx).abs() < 1e-3);
                prop_assert!((element.y + points[1].y - ty).abs() < 1e-3);
            }
        }

        // Segment distance never exceeds the distance to either endpoint.
        #[test]
        fn prop_segment_distance_bounded(
            px in -100.0f32..100.0, py in -100.0f32..100.0,
            ax in -100.0f32..100.0, ay in -100.0f32..100.0,
            bx in -100.0f32..100.0, by in -100.0f32..100.0,
        ) {
            let p = Point::new(px, py);
            let a = Point::new(ax, ay);
            let b = Point::new(bx, by);
            let d = geometry::distance_to_segment(p, a, b);
            prop_assert!(d <= geometry::distance(p, a) + 1e-3);
            prop_assert!(d <= geometry::distance(p, b) + 1e-3);
        }
    }
}
