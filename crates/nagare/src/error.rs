//! Error types for Nagare operations.
//!
//! Only parsing can fail a compile. Layout problems are degraded results and
//! are reported on [`Layout::diagnostics`](crate::layout::Layout::diagnostics)
//! instead.

use std::io;

use thiserror::Error;

use nagare_parser::ParseError;

/// The main error type for Nagare operations.
///
/// The `Parse` variant keeps the source text next to the error so callers
/// can render labelled snippets.
#[derive(Debug, Error)]
pub enum NagareError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl NagareError {
    /// Create a new `Parse` error with the associated source code.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
