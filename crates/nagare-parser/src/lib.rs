//! # Nagare Parser
//!
//! Front end for the Nagare diagram language: source text is split into
//! tokens by the [`lexer`], then assembled into a [`Node`] tree by the
//! grammar [`parse`]r.
//!
//! ## Usage
//!
//! ```
//! # use nagare_parser::{parse_source, ParseError};
//!
//! fn main() -> Result<(), ParseError> {
//!     let source = r#"
//!         browser:Browser
//!         vps:VM {
//!             nginx:Server
//!         }
//!         @nginx(x: 40, y: 60, port: 443)
//!         browser.e --> nginx.w
//!     "#;
//!
//!     let root = parse_source(source)?;
//!     assert_eq!(root.children.len(), 2);
//!     assert_eq!(root.connections.len(), 1);
//!     Ok(())
//! }
//! ```

pub mod ast;
pub mod error;
pub mod lexer;
mod parser;
pub mod span;
pub mod tokens;

pub use ast::{Connection, Node, NodeKind, PropertyBlock};
pub use error::{Diagnostic, ErrorCode, ParseError, Severity};
pub use lexer::tokenize;
pub use span::Span;

use log::debug;

use tokens::PositionedToken;

/// Parse a token stream into a parse tree.
///
/// # Errors
///
/// Returns a [`ParseError`] holding the first syntax error. No partial tree
/// is returned.
pub fn parse<'src>(tokens: &'src [PositionedToken<'src>]) -> Result<Node, ParseError> {
    let root = parser::build_tree(tokens)?;
    debug!(
        components = root.component_count(),
        connections = root.connections.len(),
        states = root.globals.len();
        "Parsed source",
    );
    Ok(root)
}

/// Tokenize and parse source text in one step.
///
/// # Errors
///
/// See [`parse`].
pub fn parse_source(source: &str) -> Result<Node, ParseError> {
    let tokens = tokenize(source);
    parse(&tokens)
}
