//! Labeled source spans for diagnostic messages.

use crate::span::Span;

/// A message attached to a span of the source text.
///
/// A diagnostic has one primary label at the offending construct and may add
/// secondary labels for related places, such as the container a misplaced
/// declaration sits in:
///
/// ```text
/// error[E102]: nesting depth exceeded maximum of 1
///   |
/// 1 | vps:VM {
///   | --- inside this container
/// 2 |   app:Server {
///   |              ^ container opened here
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    span: Span,
    message: String,
    is_primary: bool,
}

impl Label {
    /// Create a new primary label.
    pub fn primary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            is_primary: true,
        }
    }

    /// Create a new secondary label.
    pub fn secondary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            is_primary: false,
        }
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_primary(&self) -> bool {
        self.is_primary
    }

    pub fn is_secondary(&self) -> bool {
        !self.is_primary
    }
}
