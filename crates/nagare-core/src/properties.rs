//! Property block mini-parser.
//!
//! A property block is the text between the parentheses of a state
//! declaration, for example `(x: 50, title: "home@ubuntu", port: 8080)`.
//! This module splits it into `key: value` pairs and feeds each pair through
//! a typed schema.
//!
//! # Schemas
//!
//! A schema is an ordered list of [`Field`]s, each pairing a key with a setter
//! that parses the value into the target record. Records implement
//! [`PropertySchema`] by exposing that list as an associated constant:
//!
//! ```
//! use nagare_core::properties::{self, Field, PropertySchema};
//!
//! #[derive(Debug, Default)]
//! struct Port {
//!     label: Option<String>,
//!     number: Option<i64>,
//! }
//!
//! impl PropertySchema for Port {
//!     const FIELDS: &'static [Field<Self>] = &[
//!         Field {
//!             key: "label",
//!             apply: |port: &mut Self, value: &str| {
//!                 port.label = Some(value.to_string());
//!                 Ok(())
//!             },
//!         },
//!         Field {
//!             key: "number",
//!             apply: |port: &mut Self, value: &str| {
//!                 port.number = Some(properties::parse_integer("number", value)?);
//!                 Ok(())
//!             },
//!         },
//!     ];
//! }
//!
//! let port: Port = properties::parse("(label: \"http, tls\", number: 443)").unwrap();
//! assert_eq!(port.label.as_deref(), Some("http, tls"));
//! assert_eq!(port.number, Some(443));
//! ```
//!
//! Unknown keys are logged and ignored. Items without a colon are skipped.
//! A value that a setter rejects fails the whole block.

use log::debug;
use thiserror::Error;

use crate::color::Color;

/// Errors raised while applying a property block to a schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PropertyError {
    #[error("failed to parse `{value}` as integer for `{key}`")]
    InvalidInteger { key: String, value: String },

    #[error("invalid value `{value}` for `{key}`: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}

/// Sets one field of `T` from its textual value.
pub type Setter<T> = fn(&mut T, &str) -> Result<(), PropertyError>;

/// A single `{key, setter}` entry of a schema.
pub struct Field<T> {
    pub key: &'static str,
    pub apply: Setter<T>,
}

/// A record that can be filled from a property block.
pub trait PropertySchema: Default + 'static {
    /// The keys this record understands, in declaration order.
    const FIELDS: &'static [Field<Self>];
}

/// A `key: value` item split out of a property block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property<'a> {
    pub key: &'a str,
    pub value: &'a str,
}

/// Parses `text` into a fresh `T`.
///
/// # Errors
///
/// Returns the first [`PropertyError`] raised by a setter.
pub fn parse<T: PropertySchema>(text: &str) -> Result<T, PropertyError> {
    let mut target = T::default();
    apply(text, &mut target)?;
    Ok(target)
}

/// Applies every recognised key in `text` to `target`, in source order.
///
/// # Errors
///
/// Returns the first [`PropertyError`] raised by a setter. Fields set before
/// the failing one keep their new values; callers wanting all-or-nothing
/// behavior should parse into a scratch record with [`parse`].
pub fn apply<T: PropertySchema>(text: &str, target: &mut T) -> Result<(), PropertyError> {
    for property in split(text) {
        match T::FIELDS.iter().find(|field| field.key == property.key) {
            Some(field) => (field.apply)(target, property.value)?,
            None => debug!(key = property.key; "No field for property key, ignoring"),
        }
    }
    Ok(())
}

/// Splits a block into its `key: value` items.
///
/// The surrounding parentheses are optional. Commas and colons inside quoted
/// spans are not separators. Keys and values are trimmed and one pair of
/// matching outer quotes is removed from each value.
pub fn split(text: &str) -> Vec<Property<'_>> {
    let inner = strip_parens(text.trim());

    split_outside_quotes(inner, ',')
        .into_iter()
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .filter_map(|item| {
            let Some(colon) = find_outside_quotes(item, ':') else {
                debug!(item = item; "Property item has no `:` separator, skipping");
                return None;
            };
            Some(Property {
                key: item[..colon].trim(),
                value: unquote(item[colon + 1..].trim()),
            })
        })
        .collect()
}

/// Parses a decimal integer field value.
///
/// # Errors
///
/// Returns [`PropertyError::InvalidInteger`] when `value` is not an integer.
pub fn parse_integer(key: &str, value: &str) -> Result<i64, PropertyError> {
    value
        .parse::<i64>()
        .map_err(|_| PropertyError::InvalidInteger {
            key: key.to_string(),
            value: value.to_string(),
        })
}

/// Parses a CSS color field value.
///
/// # Errors
///
/// Returns [`PropertyError::InvalidValue`] when `value` is not a color.
pub fn parse_color(key: &str, value: &str) -> Result<Color, PropertyError> {
    Color::new(value).map_err(|reason| PropertyError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        reason,
    })
}

/// Parses a boolean field value: `true`/`false`, `yes`/`no` or `on`/`off`.
///
/// # Errors
///
/// Returns [`PropertyError::InvalidValue`] for any other text.
pub fn parse_bool(key: &str, value: &str) -> Result<bool, PropertyError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" => Ok(true),
        "false" | "no" | "off" => Ok(false),
        _ => Err(PropertyError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            reason: "expected `true` or `false`".to_string(),
        }),
    }
}

fn strip_parens(text: &str) -> &str {
    let text = text.strip_prefix('(').unwrap_or(text);
    text.strip_suffix(')').unwrap_or(text)
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

fn split_outside_quotes(text: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut rest = text;
    while let Some(index) = find_outside_quotes(rest, separator) {
        parts.push(&rest[..index]);
        rest = &rest[index + separator.len_utf8()..];
    }
    parts.push(rest);
    parts
}

fn find_outside_quotes(text: &str, separator: char) -> Option<usize> {
    let mut open_quote: Option<char> = None;
    for (index, c) in text.char_indices() {
        match (open_quote, c) {
            (None, '"' | '\'') => open_quote = Some(c),
            (Some(quote), c) if c == quote => open_quote = None,
            (None, c) if c == separator => return Some(index),
            _ => {}
        }
    }
    None
}
