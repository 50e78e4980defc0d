//! Color handling for Nagare diagrams
//!
//! This module provides the [`Color`] type which wraps the `DynamicColor` type
//! from the color crate. Colors are validated when a property block is applied
//! and keep their authored spelling for the rendering collaborator.

use std::{fmt, str::FromStr};

use color::DynamicColor;
use serde::{Serialize, Serializer};

/// A validated CSS color that remembers how it was written.
#[derive(Clone, PartialEq, Debug)]
pub struct Color {
    source: String,
    color: DynamicColor,
}

impl Color {
    /// Create a new `Color` from a string
    /// This will parse CSS color strings such as "#ff0000", "rgb(255, 0, 0)", "red", etc.
    ///
    /// # Examples
    ///
    /// ```
    /// use nagare_core::color::Color;
    ///
    /// let blue = Color::new("#e6f3ff").unwrap();
    /// assert_eq!(blue.as_str(), "#e6f3ff");
    /// assert!(Color::new("not-a-color").is_err());
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Self {
                source: color_str.to_string(),
                color,
            }),
            Err(err) => Err(format!("invalid color `{color_str}`: {err}")),
        }
    }

    /// The color as written in the source text.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Returns the alpha component, between 0.0 and 1.0.
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_new() {
        assert!(Color::new("#ff0000").is_ok());
        assert!(Color::new("#333").is_ok());
        assert!(Color::new("rgb(255, 0, 0)").is_ok());
        assert!(Color::new("not-a-color").is_err());
    }

    #[test]
    fn test_color_keeps_source_text() {
        let color = Color::new("#e6f3ff").unwrap();
        assert_eq!(color.as_str(), "#e6f3ff");
        assert_eq!(color.to_string(), "#e6f3ff");
    }

    #[test]
    fn test_color_alpha() {
        let opaque = Color::new("red").unwrap();
        assert!((opaque.alpha() - 1.0).abs() < 0.001);
    }
}
