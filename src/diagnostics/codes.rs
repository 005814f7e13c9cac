//! Error code definitions for configuration diagnostics
//!
//! Error codes follow a naming convention: E{category}{number}
//! - E01xx: Lexical errors (invalid tokens)
//! - E04xx: Delegation errors (nested grammar lookup)
//! - E09xx: Generic syntax errors

use std::fmt;

/// Error codes for configuration diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // E01xx: Lexical errors
    // =========================================================================
    /// Input the scanner could not turn into a token
    E0101,

    // =========================================================================
    // E04xx: Delegation errors
    // =========================================================================
    /// No parser registered for a nested context
    E0401,

    // =========================================================================
    // E09xx: Generic errors
    // =========================================================================
    /// Unexpected token in the current context
    E0901,
}

impl ErrorCode {
    /// All codes, in catalogue order
    pub const ALL: [ErrorCode; 3] = [Self::E0101, Self::E0401, Self::E0901];

    /// Get the string representation of the error code (e.g., "E0901")
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::E0101 => "E0101",
            Self::E0401 => "E0401",
            Self::E0901 => "E0901",
        }
    }

    /// Get a short description of the error category
    pub fn category_description(&self) -> &'static str {
        match self {
            Self::E0101 => "lexical error",
            Self::E0401 => "delegation error",
            Self::E0901 => "syntax error",
        }
    }

    /// Get the default message for this error code
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::E0101 => "invalid character",
            Self::E0401 => "no parser for nested block",
            Self::E0901 => "syntax error, unexpected token",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
