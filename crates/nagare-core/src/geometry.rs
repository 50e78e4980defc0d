//! Geometric primitives for diagram layout and connector routing.
//!
//! This module provides the value types the layout engine positions
//! components with and routes connections between.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in canvas space
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - An axis-aligned rectangle defined by minimum and maximum coordinates
//!
//! # Coordinate System
//!
//! Nagare uses a coordinate system consistent with SVG:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! - **Origin**: Top-left corner of the canvas at `(0, 0)`
//! - **X-axis**: Increases rightward
//! - **Y-axis**: Increases downward
//!
//! Every position produced by layout is absolute in this frame.

use serde::Serialize;

/// A 2D point representing a position in canvas coordinate space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the given coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate
    pub fn y(self) -> f32 {
        self.y
    }

    /// Returns `true` when both points share an x or a y coordinate within `epsilon`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use nagare_core::geometry::Point;
    /// let a = Point::new(300.0, 160.0);
    /// let b = Point::new(500.0, 160.0);
    /// assert!(a.is_axis_aligned_with(b, 1e-4));
    /// assert!(!a.is_axis_aligned_with(Point::new(500.0, 200.0), 1e-4));
    /// ```
    pub fn is_axis_aligned_with(self, other: Point, epsilon: f32) -> bool {
        (self.x - other.x).abs() < epsilon || (self.y - other.y).abs() < epsilon
    }
}

/// Width and height of a component.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn width(self) -> f32 {
        self.width
    }

    pub fn height(self) -> f32 {
        self.height
    }
}

/// An axis-aligned rectangle with minimum and maximum coordinates.
///
/// Layout stores every component's absolute footprint as `Bounds`. Moving a
/// rectangle along one axis keeps its size, so alignment passes can reposition
/// a component without recomputing its extent.
///
/// Serializes as `{x, y, width, height}` of the top-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(into = "Rect")]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Creates new bounds from a top-left point and a size
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self {
            min_x: top_left.x,
            min_y: top_left.y,
            max_x: top_left.x + size.width,
            max_y: top_left.y + size.height,
        }
    }

    /// Returns the minimum x-coordinate (left edge)
    pub fn min_x(self) -> f32 {
        self.min_x
    }

    /// Returns the minimum y-coordinate (top edge)
    pub fn min_y(self) -> f32 {
        self.min_y
    }

    /// Returns the maximum x-coordinate (right edge)
    pub fn max_x(self) -> f32 {
        self.max_x
    }

    /// Returns the maximum y-coordinate (bottom edge)
    pub fn max_y(self) -> f32 {
        self.max_y
    }

    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// Returns the center point of the bounds
    pub fn center(self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Moves the left edge to `x`, keeping the width.
    ///
    /// # Examples
    ///
    /// ```
    /// # use nagare_core::geometry::{Bounds, Point, Size};
    /// let bounds = Bounds::new_from_top_left(Point::new(10.0, 20.0), Size::new(50.0, 30.0));
    /// let moved = bounds.with_min_x(100.0);
    /// assert_eq!(moved.min_x(), 100.0);
    /// assert_eq!(moved.width(), 50.0);
    /// ```
    pub fn with_min_x(self, x: f32) -> Self {
        let width = self.width();
        Self {
            min_x: x,
            max_x: x + width,
            ..self
        }
    }

    /// Moves the top edge to `y`, keeping the height.
    pub fn with_min_y(self, y: f32) -> Self {
        let height = self.height();
        Self {
            min_y: y,
            max_y: y + height,
            ..self
        }
    }

    /// Resizes horizontally, keeping the left edge.
    pub fn with_width(self, width: f32) -> Self {
        Self {
            max_x: self.min_x + width,
            ..self
        }
    }

    /// Resizes vertically, keeping the top edge.
    pub fn with_height(self, height: f32) -> Self {
        Self {
            max_y: self.min_y + height,
            ..self
        }
    }

    /// Moves the bounds by the specified offset.
    pub fn translate(&self, offset: Point) -> Self {
        Self {
            min_x: self.min_x + offset.x,
            min_y: self.min_y + offset.y,
            max_x: self.max_x + offset.x,
            max_y: self.max_y + offset.y,
        }
    }
}

/// Serialized form of [`Bounds`].
#[derive(Serialize)]
struct Rect {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}

impl From<Bounds> for Rect {
    fn from(bounds: Bounds) -> Self {
        Self {
            x: bounds.min_x,
            y: bounds.min_y,
            width: bounds.width(),
            height: bounds.height(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_new() {
        let point = Point::new(3.5, 4.2);
        assert_eq!(point.x(), 3.5);
        assert_eq!(point.y(), 4.2);
    }

    #[test]
    fn test_point_axis_alignment() {
        let origin = Point::new(0.0, 0.0);
        assert!(origin.is_axis_aligned_with(Point::new(0.0, 50.0), 1e-4));
        assert!(origin.is_axis_aligned_with(Point::new(50.0, 0.00001), 1e-4));
        assert!(!origin.is_axis_aligned_with(Point::new(1.0, 1.0), 1e-4));
    }

    #[test]
    fn test_bounds_accessors() {
        let bounds = Bounds::new_from_top_left(Point::new(100.0, 100.0), Size::new(200.0, 120.0));
        assert_eq!(bounds.min_x(), 100.0);
        assert_eq!(bounds.min_y(), 100.0);
        assert_eq!(bounds.max_x(), 300.0);
        assert_eq!(bounds.max_y(), 220.0);
        assert_eq!(bounds.center(), Point::new(200.0, 160.0));
        assert_eq!((bounds.width(), bounds.height()), (200.0, 120.0));
    }

    #[test]
    fn test_bounds_move_keeps_size() {
        let bounds = Bounds::new_from_top_left(Point::new(10.0, 20.0), Size::new(50.0, 30.0));
        let moved = bounds.with_min_x(-5.0).with_min_y(70.0);
        assert_eq!((moved.min_x(), moved.min_y()), (-5.0, 70.0));
        assert_eq!((moved.width(), moved.height()), (50.0, 30.0));
    }

    #[test]
    fn test_bounds_resize_keeps_origin() {
        let bounds = Bounds::new_from_top_left(Point::new(10.0, 20.0), Size::new(50.0, 30.0));
        let resized = bounds.with_width(200.0).with_height(10.0);
        assert_eq!((resized.min_x(), resized.min_y()), (10.0, 20.0));
        assert_eq!((resized.width(), resized.height()), (200.0, 10.0));
    }

    #[test]
    fn test_bounds_translate() {
        let bounds = Bounds::new_from_top_left(Point::new(10.0, 20.0), Size::new(50.0, 30.0));
        let moved = bounds.translate(Point::new(100.0, 50.0));
        assert_eq!(moved.min_x(), 110.0);
        assert_eq!(moved.min_y(), 70.0);
        assert_eq!(moved.width(), 50.0);
        assert_eq!(moved.height(), 30.0);
    }
}
