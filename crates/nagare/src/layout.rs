//! Layout engine for positioning diagram components.
//!
//! This module turns a parse tree into absolutely positioned components and
//! orthogonally routed connections.
//!
//! # Pipeline Position
//!
//! ```text
//! Source text
//!     ↓ nagare_parser
//! Node tree
//!     ↓ layout (this module)
//! Layout
//!     ↓ renderer
//! Output
//! ```
//!
//! Within the module the work happens in four steps:
//!
//! 1. Every declaration is sized from its factory defaults and its property
//!    blocks. Children of a container are offset into its content area.
//! 2. Alignment references (`x: &id.c`) are resolved per axis, dependencies
//!    first.
//! 3. Connection endpoints are resolved to anchor points and routed.
//! 4. Display properties are collected per component.
//!
//! # Submodules
//!
//! - [`builtin`] - The built-in component types and their property schemas
//! - [`component`] - Layout output types
//! - [`placement`] - Geometry keys of property blocks
//! - [`registry`] - Type tag to factory lookup
//! - [`routing`] - Orthogonal connector routing
//! - [`style`] - Connection stroke and marker styling
//!
//! # Re-exports
//!
//! - [`EngineBuilder`] and [`LayoutEngine`] - Configure and run the layout
//! - [`layout()`] - Lay out a tree with the built-in types

mod alignment;
pub mod builtin;
pub mod component;
mod engine;
pub mod placement;
pub mod registry;
pub mod routing;
mod shape;
pub mod style;

pub use alignment::Alignment;
pub use component::{Component, Layout, NodeIndex, RoutedConnection};
pub use engine::{CANVAS_BLOCK, EngineBuilder, LayoutEngine, layout};
pub use registry::{ComponentFactory, ComponentProps, ComponentRegistry, PropertyValue};
