//! Error codes for the Nagare diagnostic system.
//!
//! Error codes are organized by phase:
//! - `E1xx` - Parser errors (fatal)
//! - `E2xx` - Layout warnings (degraded)

use std::fmt;

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Parser Errors (E1xx)
    // =========================================================================
    /// Unexpected token.
    ///
    /// The parser encountered a token that cannot start or continue a
    /// statement at this position.
    E100,

    /// Incomplete input.
    ///
    /// The input ended before a complete construct was parsed.
    E101,

    /// Nesting depth exceeded.
    ///
    /// A container was declared inside another container. Containers may
    /// hold components but not other containers.
    E102,

    /// Unmatched closing brace.
    ///
    /// A `}` appeared with no open container to close.
    E103,

    /// Unterminated container.
    ///
    /// The input ended before the `}` closing a container body.
    E104,

    /// Unterminated property block.
    ///
    /// The input ended before the `)` closing a property block.
    E105,

    /// State declaration below the top level.
    ///
    /// `@name(...)` declarations are only legal outside container bodies.
    E106,

    /// Missing component type.
    ///
    /// A `:` after a component name was not followed by a type.
    E107,

    /// Missing state name.
    ///
    /// An `@` was not followed by a state name.
    E108,

    /// Malformed connection.
    ///
    /// A connection statement was committed by its `-->` but an endpoint or
    /// anchor is missing.
    E109,

    // =========================================================================
    // Layout Warnings (E2xx)
    // =========================================================================
    /// Invalid property block.
    ///
    /// A property value could not be parsed; the block's overrides were skipped.
    E200,

    /// Unknown alignment target.
    ///
    /// An alignment reference names a component that does not exist.
    E201,

    /// Unsupported alignment.
    ///
    /// An alignment reference is malformed or uses a keyword that does not
    /// apply to its axis.
    E202,

    /// Cyclic alignment.
    ///
    /// Alignment references form a cycle and cannot be resolved.
    E203,

    /// Unknown connection endpoint.
    ///
    /// A connection names a component that does not exist; the connection was
    /// dropped.
    E204,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            // Parser errors
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E103 => "E103",
            ErrorCode::E104 => "E104",
            ErrorCode::E105 => "E105",
            ErrorCode::E106 => "E106",
            ErrorCode::E107 => "E107",
            ErrorCode::E108 => "E108",
            ErrorCode::E109 => "E109",
            // Layout warnings
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
            ErrorCode::E203 => "E203",
            ErrorCode::E204 => "E204",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            // Parser errors
            ErrorCode::E100 => "unexpected token",
            ErrorCode::E101 => "incomplete input",
            ErrorCode::E102 => "nesting depth exceeded",
            ErrorCode::E103 => "unmatched closing brace",
            ErrorCode::E104 => "unterminated container",
            ErrorCode::E105 => "unterminated property block",
            ErrorCode::E106 => "state declaration below top level",
            ErrorCode::E107 => "missing component type",
            ErrorCode::E108 => "missing state name",
            ErrorCode::E109 => "malformed connection",
            // Layout warnings
            ErrorCode::E200 => "invalid property block",
            ErrorCode::E201 => "unknown alignment target",
            ErrorCode::E202 => "unsupported alignment",
            ErrorCode::E203 => "cyclic alignment",
            ErrorCode::E204 => "unknown connection endpoint",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
