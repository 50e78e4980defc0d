//! Configuration types for Nagare layout.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from a
//! TOML file by the command line front end. Missing sections and keys fall
//! back to their defaults.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining the sections below.
//! - [`LayoutConfig`] - Default canvas size, used unless the source declares `@layout(w, h)`.
//! - [`RoutingConfig`] - Connector routing constants.
//!
//! # Example
//!
//! ```
//! # use nagare::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.layout().canvas_width(), 800.0);
//! assert_eq!(config.routing().elbow_padding(), 24.0);
//! ```

use serde::Deserialize;

const DEFAULT_CANVAS_WIDTH: f32 = 800.0;
const DEFAULT_CANVAS_HEIGHT: f32 = 400.0;
const DEFAULT_ELBOW_PADDING: f32 = 24.0;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Routing configuration section.
    #[serde(default)]
    routing: RoutingConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(layout: LayoutConfig, routing: RoutingConfig) -> Self {
        Self { layout, routing }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the routing configuration.
    pub fn routing(&self) -> &RoutingConfig {
        &self.routing
    }

    /// Overrides the default canvas width.
    pub fn with_canvas_width(mut self, width: f32) -> Self {
        self.layout.canvas_width = width;
        self
    }

    /// Overrides the default canvas height.
    pub fn with_canvas_height(mut self, height: f32) -> Self {
        self.layout.canvas_height = height;
        self
    }
}

/// Canvas defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    canvas_width: f32,
    canvas_height: f32,
}

impl LayoutConfig {
    /// Creates a new [`LayoutConfig`] with the given canvas size.
    pub fn new(canvas_width: f32, canvas_height: f32) -> Self {
        Self {
            canvas_width,
            canvas_height,
        }
    }

    pub fn canvas_width(&self) -> f32 {
        self.canvas_width
    }

    pub fn canvas_height(&self) -> f32 {
        self.canvas_height
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CANVAS_WIDTH, DEFAULT_CANVAS_HEIGHT)
    }
}

/// Connector routing settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Distance an elbow connector travels out of its source anchor before
    /// the first bend.
    elbow_padding: f32,
}

impl RoutingConfig {
    pub fn new(elbow_padding: f32) -> Self {
        Self { elbow_padding }
    }

    pub fn elbow_padding(&self) -> f32 {
        self.elbow_padding
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ELBOW_PADDING)
    }
}
