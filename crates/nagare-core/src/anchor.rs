//! Directional attachment points on component boundaries.
//!
//! An [`Anchor`] is written after a dot in a connection statement
//! (`browser.e --> nginx.w`). Each compass letter sets one axis:
//!
//! | Letter | Axis       | Value |
//! |--------|------------|-------|
//! | `n`    | vertical   | -1    |
//! | `s`    | vertical   | 1     |
//! | `w`    | horizontal | -1    |
//! | `e`    | horizontal | 1     |
//!
//! Compounds such as `wn` set both axes; the first letter picks the edge and
//! the second picks the quarter along it. Empty or unrecognized text is the
//! center of the shape.

use std::fmt;

use serde::Serialize;

use crate::geometry::{Bounds, Point};

/// Fraction of the perpendicular edge length used by compound anchors.
const NEAR_QUARTER: f32 = 0.25;
const FAR_QUARTER: f32 = 0.75;

/// One of the two canvas axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Horizontal => write!(f, "x"),
            Axis::Vertical => write!(f, "y"),
        }
    }
}

/// A parsed anchor descriptor.
///
/// # Examples
///
/// ```
/// # use nagare_core::anchor::Anchor;
/// let anchor = Anchor::parse("wn");
/// assert_eq!(anchor.horizontal(), -1);
/// assert_eq!(anchor.vertical(), -1);
///
/// let center = Anchor::parse("middle");
/// assert!(center.is_center());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Anchor {
    raw: String,
    horizontal: i8,
    vertical: i8,
    #[serde(skip)]
    primary: Option<Axis>,
}

impl Anchor {
    /// Parses anchor text. This never fails; unknown text yields the center.
    pub fn parse(raw: &str) -> Self {
        let mut anchor = Self {
            raw: raw.to_string(),
            ..Self::default()
        };

        let lowered = raw.trim().to_ascii_lowercase();
        match lowered.as_str() {
            "" | "c" | "center" => return anchor,
            "north" | "top" => return anchor.with_axes(0, -1, Axis::Vertical),
            "south" | "bottom" => return anchor.with_axes(0, 1, Axis::Vertical),
            "east" | "right" => return anchor.with_axes(1, 0, Axis::Horizontal),
            "west" | "left" => return anchor.with_axes(-1, 0, Axis::Horizontal),
            _ => {}
        }

        for letter in lowered.chars() {
            let axis = match letter {
                'n' => {
                    anchor.vertical = -1;
                    Axis::Vertical
                }
                's' => {
                    anchor.vertical = 1;
                    Axis::Vertical
                }
                'e' => {
                    anchor.horizontal = 1;
                    Axis::Horizontal
                }
                'w' => {
                    anchor.horizontal = -1;
                    Axis::Horizontal
                }
                _ => {
                    return Self {
                        raw: raw.to_string(),
                        ..Self::default()
                    };
                }
            };
            anchor.primary.get_or_insert(axis);
        }
        anchor
    }

    fn with_axes(mut self, horizontal: i8, vertical: i8, primary: Axis) -> Self {
        self.horizontal = horizontal;
        self.vertical = vertical;
        self.primary = Some(primary);
        self
    }

    /// The text as written in the source.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// `-1` for the left edge, `1` for the right edge, `0` for the center.
    pub fn horizontal(&self) -> i8 {
        self.horizontal
    }

    /// `-1` for the top edge, `1` for the bottom edge, `0` for the center.
    pub fn vertical(&self) -> i8 {
        self.vertical
    }

    /// Returns the component on `axis`.
    pub fn component(&self, axis: Axis) -> i8 {
        match axis {
            Axis::Horizontal => self.horizontal,
            Axis::Vertical => self.vertical,
        }
    }

    pub fn is_center(&self) -> bool {
        self.horizontal == 0 && self.vertical == 0
    }

    pub fn is_compound(&self) -> bool {
        self.horizontal != 0 && self.vertical != 0
    }

    /// Resolves this anchor to a point on the boundary of `bounds`.
    ///
    /// Single-axis anchors sit at the middle of their edge. Compound anchors sit
    /// a quarter of the way along the edge chosen by their first letter, on the
    /// side named by the second letter.
    ///
    /// # Examples
    ///
    /// ```
    /// # use nagare_core::anchor::Anchor;
    /// # use nagare_core::geometry::{Bounds, Point, Size};
    /// let bounds = Bounds::new_from_top_left(Point::new(100.0, 100.0), Size::new(200.0, 120.0));
    ///
    /// assert_eq!(Anchor::parse("e").point_on(bounds), Point::new(300.0, 160.0));
    /// assert_eq!(Anchor::parse("wn").point_on(bounds), Point::new(100.0, 130.0));
    /// assert_eq!(Anchor::parse("ne").point_on(bounds), Point::new(250.0, 100.0));
    /// ```
    pub fn point_on(&self, bounds: Bounds) -> Point {
        let edge_x = match self.horizontal {
            h if h < 0 => bounds.min_x(),
            h if h > 0 => bounds.max_x(),
            _ => bounds.center().x(),
        };
        let edge_y = match self.vertical {
            v if v < 0 => bounds.min_y(),
            v if v > 0 => bounds.max_y(),
            _ => bounds.center().y(),
        };

        if !self.is_compound() {
            return Point::new(edge_x, edge_y);
        }

        match self.primary.unwrap_or(Axis::Horizontal) {
            Axis::Horizontal => {
                let ratio = quarter(self.vertical);
                Point::new(edge_x, bounds.min_y() + bounds.height() * ratio)
            }
            Axis::Vertical => {
                let ratio = quarter(self.horizontal);
                Point::new(bounds.min_x() + bounds.width() * ratio, edge_y)
            }
        }
    }
}

fn quarter(direction: i8) -> f32 {
    if direction < 0 { NEAR_QUARTER } else { FAR_QUARTER }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.raw.is_empty() {
            write!(f, "center")
        } else {
            write!(f, "{}", self.raw)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Size;

    fn shape() -> Bounds {
        Bounds::new_from_top_left(Point::new(100.0, 100.0), Size::new(200.0, 120.0))
    }

    #[test]
    fn test_single_letters() {
        assert_eq!(
            (Anchor::parse("n").horizontal(), Anchor::parse("n").vertical()),
            (0, -1)
        );
        assert_eq!(
            (Anchor::parse("s").horizontal(), Anchor::parse("s").vertical()),
            (0, 1)
        );
        assert_eq!(
            (Anchor::parse("e").horizontal(), Anchor::parse("e").vertical()),
            (1, 0)
        );
        assert_eq!(
            (Anchor::parse("w").horizontal(), Anchor::parse("w").vertical()),
            (-1, 0)
        );
    }

    #[test]
    fn test_compound_letters() {
        let wn = Anchor::parse("wn");
        assert_eq!((wn.horizontal(), wn.vertical()), (-1, -1));
        assert!(wn.is_compound());

        let se = Anchor::parse("SE");
        assert_eq!((se.horizontal(), se.vertical()), (1, 1));
        assert_eq!(se.raw(), "SE");
    }

    #[test]
    fn test_unknown_and_empty_are_center() {
        for raw in ["", "x", "nx", "  ", "middle"] {
            let anchor = Anchor::parse(raw);
            assert!(anchor.is_center(), "`{raw}` should be center");
            assert_eq!(anchor.raw(), raw);
        }
    }

    #[test]
    fn test_word_aliases() {
        assert_eq!(Anchor::parse("top").vertical(), -1);
        assert_eq!(Anchor::parse("east").horizontal(), 1);
        assert!(Anchor::parse("center").is_center());
    }

    #[test]
    fn test_point_on_edges() {
        let bounds = shape();
        assert_eq!(Anchor::parse("n").point_on(bounds), Point::new(200.0, 100.0));
        assert_eq!(Anchor::parse("s").point_on(bounds), Point::new(200.0, 220.0));
        assert_eq!(Anchor::parse("e").point_on(bounds), Point::new(300.0, 160.0));
        assert_eq!(Anchor::parse("w").point_on(bounds), Point::new(100.0, 160.0));
        assert_eq!(Anchor::parse("").point_on(bounds), Point::new(200.0, 160.0));
    }

    #[test]
    fn test_point_on_compound_quarters() {
        let bounds = shape();
        assert_eq!(Anchor::parse("wn").point_on(bounds), Point::new(100.0, 130.0));
        assert_eq!(Anchor::parse("ws").point_on(bounds), Point::new(100.0, 190.0));
        assert_eq!(Anchor::parse("en").point_on(bounds), Point::new(300.0, 130.0));
        assert_eq!(Anchor::parse("nw").point_on(bounds), Point::new(150.0, 100.0));
        assert_eq!(Anchor::parse("se").point_on(bounds), Point::new(250.0, 220.0));
    }

    #[test]
    fn test_component_by_axis() {
        let anchor = Anchor::parse("sw");
        assert_eq!(anchor.component(Axis::Horizontal), -1);
        assert_eq!(anchor.component(Axis::Vertical), 1);
    }
}
