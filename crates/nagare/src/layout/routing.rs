//! Orthogonal connector routing.
//!
//! Two anchor points that share an X or a Y coordinate are joined by a
//! straight segment. Otherwise the connector is a four-point elbow: it leaves
//! the start point along the dominant axis for `padding` units, crosses over
//! to the end point's coordinate on the other axis, and enters the end point.

use nagare_core::{
    anchor::{Anchor, Axis},
    geometry::Point,
};

/// Tolerance for treating two coordinates as equal.
pub const AXIS_EPSILON: f32 = 1e-4;

/// Picks the axis the connector leaves its source along.
///
/// The source anchor's horizontal component wins, then its vertical
/// component. When the source has no direction both remaining choices,
/// the target's horizontal component and the default, are horizontal.
pub fn dominant_axis(from: &Anchor) -> Axis {
    if from.horizontal() == 0 && from.vertical() != 0 {
        Axis::Vertical
    } else {
        Axis::Horizontal
    }
}

/// Direction of travel along `axis`: the source's sign, else the target's,
/// else positive.
fn direction(axis: Axis, from: &Anchor, to: &Anchor) -> f32 {
    [from.component(axis), to.component(axis)]
        .into_iter()
        .find(|component| *component != 0)
        .map_or(1.0, f32::from)
}

/// Routes a connector from `start` to `end`.
///
/// # Examples
///
/// ```
/// # use nagare::layout::routing::route;
/// # use nagare_core::{anchor::Anchor, geometry::Point};
/// let points = route(
///     Point::new(400.0, 400.0),
///     &Anchor::parse("n"),
///     Point::new(800.0, 250.0),
///     &Anchor::parse("e"),
///     24.0,
/// );
/// assert_eq!(
///     points,
///     vec![
///         Point::new(400.0, 400.0),
///         Point::new(400.0, 376.0),
///         Point::new(800.0, 376.0),
///         Point::new(800.0, 250.0),
///     ]
/// );
/// ```
pub fn route(start: Point, from: &Anchor, end: Point, to: &Anchor, padding: f32) -> Vec<Point> {
    if start.is_axis_aligned_with(end, AXIS_EPSILON) {
        return vec![start, end];
    }

    let axis = dominant_axis(from);
    let offset = direction(axis, from, to) * padding;
    match axis {
        Axis::Vertical => {
            let bend_y = start.y() + offset;
            vec![
                start,
                Point::new(start.x(), bend_y),
                Point::new(end.x(), bend_y),
                end,
            ]
        }
        Axis::Horizontal => {
            let bend_x = start.x() + offset;
            vec![
                start,
                Point::new(bend_x, start.y()),
                Point::new(bend_x, end.y()),
                end,
            ]
        }
    }
}
