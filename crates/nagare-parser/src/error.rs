//! Error and diagnostic system for the Nagare compiler.
//!
//! This module provides an error handling system with:
//! - Error codes for documentation and searchability
//! - Labeled spans pointing into the source text
//! - Severity levels
//!
//! # Overview
//!
//! The error system is built around the [`Diagnostic`] type, which represents
//! a single error or warning message with optional error code, source
//! locations, and help text. Parsing stops at the first fatal diagnostic and
//! wraps it in a [`ParseError`]. Layout reuses the same type with
//! [`Severity::Warning`] for the problems it works around.
//!
//! # Example
//!
//! ```
//! # use nagare_parser::error::{Diagnostic, ErrorCode};
//! # use nagare_parser::Span;
//!
//! let diag = Diagnostic::error("nesting depth exceeded maximum of 1")
//!     .with_code(ErrorCode::E102)
//!     .with_label(Span::new(40..41), "container opened here")
//!     .with_secondary_label(Span::new(0..3), "inside this container")
//!     .with_help("move the nested container to the top level");
//! ```

mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
pub use severity::Severity;
