//! Syntax error reporting
//!
//! This module provides the error pipeline shared by every grammar fragment:
//! - Categorized error codes for filtering and documentation
//! - Errors attributed to the innermost active grammar context
//! - Source excerpts with the offending columns marked
//! - Pluggable reporters (tracing, collecting)

mod codes;
mod error;
mod reporter;

pub use codes::ErrorCode;
pub use error::{Severity, SyntaxError, SyntaxErrorBuilder};
pub use reporter::{CollectingReporter, ErrorReporter, TracingReporter, report_syntax_error};
