//! Connection styling.
//!
//! A connection statement may end in a property block:
//!
//! ```text
//! browser.e --> nginx.w(style: dashed, color: "#2563eb", width: 3, markerStart: true)
//! ```

use std::fmt;

use serde::Serialize;

use nagare_core::{
    color::Color,
    properties::{self, Field, PropertyError, PropertySchema},
};

const DEFAULT_STROKE: &str = "#1f2937";
const DEFAULT_STROKE_WIDTH: f32 = 2.0;

/// Line pattern of a connector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

impl LineStyle {
    /// SVG `stroke-dasharray` value, `None` for solid lines.
    pub fn dash_array(self) -> Option<&'static str> {
        match self {
            Self::Solid => None,
            Self::Dashed => Some("6 4"),
            Self::Dotted => Some("2 4"),
        }
    }
}

impl fmt::Display for LineStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Solid => write!(f, "solid"),
            Self::Dashed => write!(f, "dashed"),
            Self::Dotted => write!(f, "dotted"),
        }
    }
}

fn line_style(value: &str) -> Result<LineStyle, PropertyError> {
    match value.to_ascii_lowercase().as_str() {
        "solid" => Ok(LineStyle::Solid),
        "dashed" => Ok(LineStyle::Dashed),
        "dotted" => Ok(LineStyle::Dotted),
        _ => Err(PropertyError::InvalidValue {
            key: "style".to_string(),
            value: value.to_string(),
            reason: "expected `solid`, `dashed` or `dotted`".to_string(),
        }),
    }
}

/// Resolved stroke and marker settings of a connection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectionStyle {
    dash: LineStyle,
    stroke: Color,
    stroke_width: f32,
    marker_start: bool,
    marker_end: bool,
}

impl ConnectionStyle {
    /// Parses the raw text of a connection's property block.
    ///
    /// # Errors
    ///
    /// Returns the first [`PropertyError`] raised by a field.
    pub fn parse(text: &str) -> Result<Self, PropertyError> {
        properties::parse(text)
    }

    pub fn dash(&self) -> LineStyle {
        self.dash
    }

    pub fn stroke(&self) -> &Color {
        &self.stroke
    }

    pub fn stroke_width(&self) -> f32 {
        self.stroke_width
    }

    pub fn marker_start(&self) -> bool {
        self.marker_start
    }

    pub fn marker_end(&self) -> bool {
        self.marker_end
    }
}

impl Default for ConnectionStyle {
    fn default() -> Self {
        Self {
            dash: LineStyle::default(),
            stroke: Color::new(DEFAULT_STROKE).expect("default stroke is a valid CSS color"),
            stroke_width: DEFAULT_STROKE_WIDTH,
            marker_start: false,
            marker_end: true,
        }
    }
}

impl PropertySchema for ConnectionStyle {
    const FIELDS: &'static [Field<Self>] = &[
        Field {
            key: "style",
            apply: |style: &mut Self, value: &str| {
                style.dash = line_style(value)?;
                Ok(())
            },
        },
        Field {
            key: "color",
            apply: |style: &mut Self, value: &str| {
                style.stroke = properties::parse_color("color", value)?;
                Ok(())
            },
        },
        Field {
            key: "width",
            apply: |style: &mut Self, value: &str| {
                let width = properties::parse_integer("width", value)?;
                if width <= 0 {
                    return Err(PropertyError::InvalidValue {
                        key: "width".to_string(),
                        value: value.to_string(),
                        reason: "stroke width must be positive".to_string(),
                    });
                }
                style.stroke_width = width as f32;
                Ok(())
            },
        },
        Field {
            key: "markerStart",
            apply: |style: &mut Self, value: &str| {
                style.marker_start = properties::parse_bool("markerStart", value)?;
                Ok(())
            },
        },
        Field {
            key: "markerEnd",
            apply: |style: &mut Self, value: &str| {
                style.marker_end = properties::parse_bool("markerEnd", value)?;
                Ok(())
            },
        },
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let style = ConnectionStyle::parse("").unwrap();
        assert_eq!(style, ConnectionStyle::default());
        assert_eq!(style.stroke().as_str(), "#1f2937");
        assert_eq!(style.stroke_width(), 2.0);
        assert!(style.marker_end());
        assert!(!style.marker_start());
        assert_eq!(style.dash().dash_array(), None);
    }

    #[test]
    fn test_overrides() {
        let style = ConnectionStyle::parse(
            r##"style: Dashed, color: "#2563eb", width: 3, markerStart: yes, markerEnd: false"##,
        )
        .unwrap();
        assert_eq!(style.dash(), LineStyle::Dashed);
        assert_eq!(style.dash().dash_array(), Some("6 4"));
        assert_eq!(style.stroke().as_str(), "#2563eb");
        assert_eq!(style.stroke_width(), 3.0);
        assert!(style.marker_start());
        assert!(!style.marker_end());
    }

    #[test]
    fn test_invalid_values() {
        assert!(ConnectionStyle::parse("style: wavy").is_err());
        assert!(ConnectionStyle::parse("width: 0").is_err());
        assert!(ConnectionStyle::parse("color: nope").is_err());
    }
}
