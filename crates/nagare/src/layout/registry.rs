//! Component registry: type tag to shape factory.
//!
//! A [`ComponentFactory`] describes one component type: its default size,
//! whether it may hold children, and the typed display properties it reads
//! from property blocks. The layout engine looks factories up by the type tag
//! written after `:` in a declaration. Tags match case-insensitively.
//!
//! [`ComponentRegistry::with_builtins`] provides the built-in types; callers
//! can [`register`](ComponentRegistry::register) their own or replace them.

use std::fmt;

use indexmap::IndexMap;
use log::debug;
use serde::Serialize;

use nagare_core::{
    color::Color,
    geometry::Size,
    properties::{self, PropertyError, PropertySchema},
};

use super::builtin;

/// Tag of the factory used for containers whose declared type cannot hold children.
pub const CONTAINER_TAG: &str = "VM";

/// A typed display property value, as exposed to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Text(String),
    Integer(i64),
    Color(Color),
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<Color> for PropertyValue {
    fn from(value: Color) -> Self {
        Self::Color(value)
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => write!(f, "{text}"),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Color(color) => write!(f, "{color}"),
        }
    }
}

/// A property schema whose fields are display properties of a component.
pub trait DisplaySchema: PropertySchema + Clone {
    /// The set values in schema order, plus defaults for unset fields that
    /// have one.
    fn values(&self) -> Vec<(&'static str, PropertyValue)>;
}

/// Type-erased display properties held by a component during layout.
pub trait ComponentProps {
    /// Applies a block on top of the current values.
    ///
    /// # Errors
    ///
    /// Returns the first [`PropertyError`]; the current values are left
    /// untouched in that case.
    fn merge_block(&mut self, text: &str) -> Result<(), PropertyError>;

    /// See [`DisplaySchema::values`].
    fn to_values(&self) -> Vec<(&'static str, PropertyValue)>;
}

impl<T: DisplaySchema> ComponentProps for T {
    fn merge_block(&mut self, text: &str) -> Result<(), PropertyError> {
        let mut scratch = self.clone();
        properties::apply(text, &mut scratch)?;
        *self = scratch;
        Ok(())
    }

    fn to_values(&self) -> Vec<(&'static str, PropertyValue)> {
        self.values()
    }
}

/// Creates the shape of one component type.
pub trait ComponentFactory: Send + Sync {
    /// The canonical type tag, for example `Server`.
    fn type_tag(&self) -> &str;

    /// Size used when a block sets no `w`/`h`.
    fn default_size(&self) -> Size;

    /// Whether declarations of this type may have a `{ ... }` body.
    fn can_contain(&self) -> bool {
        false
    }

    /// Fresh display properties with every field unset.
    fn create(&self) -> Box<dyn ComponentProps>;
}

/// Factories keyed by lowercase type tag.
pub struct ComponentRegistry {
    factories: IndexMap<String, Box<dyn ComponentFactory>>,
    fallback: Box<dyn ComponentFactory>,
}

impl ComponentRegistry {
    /// A registry without registered types. Every declaration uses the
    /// generic rectangle.
    pub fn new() -> Self {
        Self {
            factories: IndexMap::new(),
            fallback: builtin::rectangle(),
        }
    }

    /// A registry holding the built-in component types.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for factory in builtin::factories() {
            registry.insert(factory);
        }
        registry
    }

    /// Registers `factory`, returning the factory it replaces, if any.
    pub fn register(
        &mut self,
        factory: impl ComponentFactory + 'static,
    ) -> Option<Box<dyn ComponentFactory>> {
        self.insert(Box::new(factory))
    }

    fn insert(&mut self, factory: Box<dyn ComponentFactory>) -> Option<Box<dyn ComponentFactory>> {
        let key = factory.type_tag().to_lowercase();
        self.factories.insert(key, factory)
    }

    /// Looks up a factory by tag, ignoring case.
    pub fn get(&self, type_tag: &str) -> Option<&dyn ComponentFactory> {
        self.factories
            .get(&type_tag.to_lowercase())
            .map(|factory| factory.as_ref())
    }

    /// Registered type tags, in registration order.
    pub fn type_tags(&self) -> impl Iterator<Item = &str> {
        self.factories.values().map(|factory| factory.type_tag())
    }

    /// Picks the factory for a declaration.
    ///
    /// Unknown or missing tags use the generic rectangle. A container whose
    /// type cannot hold children uses the [`CONTAINER_TAG`] factory when one
    /// is registered.
    pub fn resolve(&self, type_tag: Option<&str>, container: bool) -> &dyn ComponentFactory {
        match type_tag.map(|tag| (tag, self.get(tag))) {
            Some((_, Some(factory))) if !container || factory.can_contain() => return factory,
            Some((tag, Some(_))) => {
                debug!(type_tag = tag; "Type cannot hold children, using container type");
            }
            Some((tag, None)) => debug!(type_tag = tag; "Unknown component type"),
            None => {}
        }

        if container {
            if let Some(factory) = self.get(CONTAINER_TAG) {
                return factory;
            }
        }
        self.fallback.as_ref()
    }
}

impl Default for ComponentRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentRegistry")
            .field("types", &self.type_tags().collect::<Vec<_>>())
            .finish()
    }
}
