//! Geometry overrides read from property blocks.
//!
//! Every component block may carry `x`, `y`, `w` and `h`. The position keys
//! take either an integer or an alignment reference (`&id.keyword`), which is
//! kept as text until the alignment pass runs.

use nagare_core::properties::{self, Field, PropertyError, PropertySchema};

/// One position value.
#[derive(Debug, Clone, PartialEq)]
pub enum Coordinate {
    /// A canvas coordinate, relative to the content area for container children.
    Absolute(f32),
    /// The text after `&`, for example `browser.c`.
    Reference(String),
}

/// Largest magnitude an `f32` holds without rounding.
const MAX_EXACT: i64 = 1 << 24;

fn canvas_integer(key: &str, value: &str) -> Result<f32, PropertyError> {
    let parsed = properties::parse_integer(key, value)?;
    if !(-MAX_EXACT..=MAX_EXACT).contains(&parsed) {
        return Err(PropertyError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            reason: format!("must be within ±{MAX_EXACT}"),
        });
    }
    Ok(parsed as f32)
}

fn coordinate(key: &str, value: &str) -> Result<Coordinate, PropertyError> {
    match value.strip_prefix('&') {
        Some(reference) => Ok(Coordinate::Reference(reference.trim().to_string())),
        None => canvas_integer(key, value).map(Coordinate::Absolute),
    }
}

fn dimension(key: &str, value: &str) -> Result<f32, PropertyError> {
    let parsed = canvas_integer(key, value)?;
    if parsed < 0.0 {
        return Err(PropertyError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            reason: "size cannot be negative".to_string(),
        });
    }
    Ok(parsed)
}

/// Geometry keys of a component block. `None` means the key was not written.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Placement {
    pub x: Option<Coordinate>,
    pub y: Option<Coordinate>,
    pub width: Option<f32>,
    pub height: Option<f32>,
}

impl PropertySchema for Placement {
    const FIELDS: &'static [Field<Self>] = &[
        Field {
            key: "x",
            apply: |placement: &mut Self, value: &str| {
                placement.x = Some(coordinate("x", value)?);
                Ok(())
            },
        },
        Field {
            key: "y",
            apply: |placement: &mut Self, value: &str| {
                placement.y = Some(coordinate("y", value)?);
                Ok(())
            },
        },
        Field {
            key: "w",
            apply: |placement: &mut Self, value: &str| {
                placement.width = Some(dimension("w", value)?);
                Ok(())
            },
        },
        Field {
            key: "h",
            apply: |placement: &mut Self, value: &str| {
                placement.height = Some(dimension("h", value)?);
                Ok(())
            },
        },
    ];
}

/// The `w`/`h` keys of the root `@layout(...)` block.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CanvasSize {
    pub width: Option<f32>,
    pub height: Option<f32>,
}

impl PropertySchema for CanvasSize {
    const FIELDS: &'static [Field<Self>] = &[
        Field {
            key: "w",
            apply: |canvas: &mut Self, value: &str| {
                canvas.width = Some(dimension("w", value)?);
                Ok(())
            },
        },
        Field {
            key: "h",
            apply: |canvas: &mut Self, value: &str| {
                canvas.height = Some(dimension("h", value)?);
                Ok(())
            },
        },
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placement_literals_and_references() {
        let placement: Placement = properties::parse("x: 50, y: &browser.c, w: 300").unwrap();
        assert_eq!(placement.x, Some(Coordinate::Absolute(50.0)));
        assert_eq!(
            placement.y,
            Some(Coordinate::Reference("browser.c".to_string()))
        );
        assert_eq!(placement.width, Some(300.0));
        assert_eq!(placement.height, None);
    }

    #[test]
    fn test_placement_negative_position_allowed() {
        let placement: Placement = properties::parse("x: -20").unwrap();
        assert_eq!(placement.x, Some(Coordinate::Absolute(-20.0)));
    }

    #[test]
    fn test_placement_rejects_bad_numbers() {
        assert!(properties::parse::<Placement>("x: left").is_err());
        assert!(properties::parse::<Placement>("w: -5").is_err());
        assert!(properties::parse::<Placement>("h: 1.5").is_err());
    }

    #[test]
    fn test_placement_rejects_values_beyond_exact_range() {
        let edge: Placement = properties::parse("x: 16777216, y: -16777216").unwrap();
        assert_eq!(edge.x, Some(Coordinate::Absolute(16_777_216.0)));
        assert_eq!(edge.y, Some(Coordinate::Absolute(-16_777_216.0)));

        assert!(properties::parse::<Placement>("x: 16777217").is_err());
        assert!(properties::parse::<Placement>("y: -9223372036854775808").is_err());
        assert!(properties::parse::<CanvasSize>("w: 20000000").is_err());
    }

    #[test]
    fn test_canvas_size() {
        let canvas: CanvasSize = properties::parse("w:950,h:400").unwrap();
        assert_eq!(canvas.width, Some(950.0));
        assert_eq!(canvas.height, Some(400.0));
    }
}
