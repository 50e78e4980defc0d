//! The core diagnostic type for the Nagare error system.
//!
//! A [`Diagnostic`] represents a single error or warning with optional
//! error code, labeled source spans, and help text.

use thiserror::Error;

use crate::{
    error::{ErrorCode, Label, Severity},
    span::Span,
};

/// A diagnostic message with source location information.
///
/// Parse errors and layout warnings share this type:
///
/// ```text
/// warning[E204]: connection endpoint `db` not found
///   |
/// 7 | app.e --> db.w
///   | ^^^^^^^^^^^^^^ connection dropped
///   |
///   = help: declare `db` or fix the name in the connection
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{severity}{}: {message}", code_tag(.code))]
pub struct Diagnostic {
    severity: Severity,
    code: Option<ErrorCode>,
    message: String,
    labels: Vec<Label>,
    help: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    ///
    /// # Example
    ///
    /// ```
    /// # use nagare_parser::error::{Diagnostic, ErrorCode};
    /// # use nagare_parser::Span;
    ///
    /// let diag = Diagnostic::error("expected closing brace")
    ///     .with_code(ErrorCode::E104)
    ///     .with_label(Span::new(0..6), "container opened here");
    /// assert_eq!(diag.to_string(), "error[E104]: expected closing brace");
    /// ```
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Create a warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    /// Get the severity of this diagnostic.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Get the error code, if any.
    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    /// Get the primary message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get all labels attached to this diagnostic.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Get the help text, if any.
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Set the error code.
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Add a primary label to this diagnostic.
    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::primary(span, message));
        self
    }

    /// Add a secondary label to this diagnostic.
    pub fn with_secondary_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::secondary(span, message));
        self
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: None,
            message: message.into(),
            labels: Vec::new(),
            help: None,
        }
    }
}

/// `[E100]` for coded diagnostics, empty otherwise.
fn code_tag(code: &Option<ErrorCode>) -> String {
    code.map(|code| format!("[{code}]")).unwrap_or_default()
}
