//! Nagare - A text language for boxes-and-arrows infrastructure diagrams
//!
//! This library parses Nagare source, positions every declared component on
//! a fixed canvas and routes the connections between them. The result is a
//! [`layout::Layout`] that a renderer can draw without further computation.
//!
//! ```
//! let layout = nagare::compile(
//!     "browser: Browser\n\
//!      api: Server\n\
//!      @api(x: 400, y: 0)\n\
//!      browser.e --> api.w",
//! )
//! .expect("valid source");
//!
//! assert_eq!(layout.components().len(), 2);
//! assert_eq!(layout.connections().len(), 1);
//! assert!(layout.diagnostics().is_empty());
//! ```

pub mod config;
pub mod layout;

mod error;

pub use nagare_core::{anchor, color, geometry, properties};

pub use error::NagareError;

use log::{debug, info, trace};

use nagare_parser::Node;

use config::AppConfig;
use layout::{ComponentFactory, EngineBuilder, Layout, LayoutEngine};

/// Builder for parsing and laying out Nagare diagrams.
///
/// # Examples
///
/// ```rust
/// use nagare::{DiagramBuilder, config::AppConfig};
///
/// let config = AppConfig::default().with_canvas_width(1200.0);
/// let builder = DiagramBuilder::new(config);
///
/// let tree = builder.parse("db: Database").expect("Failed to parse");
/// let layout = builder.layout(&tree);
/// assert_eq!(layout.bounds().width(), 1200.0);
/// ```
#[derive(Debug)]
pub struct DiagramBuilder {
    engine: LayoutEngine,
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self {
            engine: EngineBuilder::from_config(&config).build(),
        }
    }

    /// Registers an additional component type.
    pub fn with_factory(mut self, factory: impl ComponentFactory + 'static) -> Self {
        if let Some(replaced) = self.engine.register(factory) {
            debug!(type_tag = replaced.type_tag(); "Replaced component type");
        }
        self
    }

    /// Parse source code into a node tree.
    ///
    /// # Errors
    ///
    /// Returns [`NagareError::Parse`] for lexical and structural errors. The
    /// error carries the source so it can be rendered with labels.
    pub fn parse(&self, source: &str) -> Result<Node, NagareError> {
        info!("Parsing source");
        let tree = nagare_parser::parse_source(source)
            .map_err(|err| NagareError::new_parse_error(err, source))?;
        debug!(components = tree.component_count(); "Source parsed successfully");
        trace!(tree:?; "Parse tree");
        Ok(tree)
    }

    /// Compute the layout of a parsed tree.
    ///
    /// Layout problems never fail; they are reported on
    /// [`Layout::diagnostics`].
    pub fn layout(&self, tree: &Node) -> Layout {
        info!("Calculating layout");
        self.engine.layout(tree)
    }

    /// Parse and lay out `source` in one step.
    ///
    /// # Errors
    ///
    /// See [`DiagramBuilder::parse`].
    pub fn compile(&self, source: &str) -> Result<Layout, NagareError> {
        let tree = self.parse(source)?;
        Ok(self.layout(&tree))
    }
}

impl Default for DiagramBuilder {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

/// Parse and lay out `source` with the default configuration.
///
/// # Errors
///
/// Returns [`NagareError::Parse`] when the source does not parse.
pub fn compile(source: &str) -> Result<Layout, NagareError> {
    DiagramBuilder::default().compile(source)
}
