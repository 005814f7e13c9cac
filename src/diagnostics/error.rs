//! Syntax error types
//!
//! Provides rich error information including:
//! - Error codes for categorization
//! - Severity levels
//! - The grammar context the error was raised in
//! - Hints/suggestions for fixes

use std::fmt;

use smol_str::SmolStr;

use super::codes::ErrorCode;
use crate::base::{LineIndex, Location};

/// Lines of leading context shown before the offending line
const EXCERPT_CONTEXT_LINES: u32 = 2;

/// Severity level for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Severity {
    /// A hard error that prevents valid parsing
    #[default]
    Error,
    /// A warning that doesn't prevent parsing
    Warning,
}

impl Severity {
    /// Check if this is an error
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }

    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }
}

/// A syntax error attributed to the grammar context it occurred in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    /// Human-readable error message
    pub message: String,
    /// Source location
    pub location: Location,
    /// Description of the innermost active context
    pub context: SmolStr,
    /// Categorized error code
    pub code: ErrorCode,
    /// Error severity
    pub severity: Severity,
    /// Optional suggestion for fixing the error
    pub hint: Option<String>,
}

impl SyntaxError {
    /// Create a new syntax error with minimal information
    pub fn new(
        message: impl Into<String>,
        location: Location,
        context: impl Into<SmolStr>,
        code: ErrorCode,
    ) -> Self {
        Self {
            message: message.into(),
            location,
            context: context.into(),
            code,
            severity: Severity::Error,
            hint: None,
        }
    }

    /// Create a builder for more complex error construction
    pub fn builder(code: ErrorCode) -> SyntaxErrorBuilder {
        SyntaxErrorBuilder::new(code)
    }

    /// Add a hint to this error
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Set the severity
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn has_hint(&self) -> bool {
        self.hint.is_some()
    }

    /// Format the error with its code and hint
    pub fn format(&self) -> String {
        let mut result = format!("{}: {}", self.code, self);
        if let Some(hint) = &self.hint {
            result.push_str(&format!("\n  hint: {}", hint));
        }
        result
    }

    /// Reproduce the offending lines of `source` with the error columns marked.
    ///
    /// Returns an empty string when the location does not fall inside `source`.
    pub fn render_excerpt(&self, source: &str) -> String {
        let Ok(lines) = LineIndex::new(source) else {
            return String::new();
        };
        let start = self.location.start;
        let end = self.location.end;
        if start.line == 0 || start.line as usize > lines.line_count() {
            return String::new();
        }
        let first = start.line.saturating_sub(EXCERPT_CONTEXT_LINES).max(1);
        let last = end.line.min(lines.line_count() as u32);

        let mut out = String::new();
        for line in first..=last {
            let Some(range) = lines.line_range(line, source) else {
                break;
            };
            let marker = if line >= start.line { "---->" } else { "     " };
            out.push_str(&format!("{:<4}{} {}\n", line, marker, &source[range]));
        }

        let indent = start.column.saturating_sub(1) as usize;
        let width = if start.line == end.line {
            end.column.saturating_sub(start.column) as usize + 1
        } else {
            1
        };
        out.push_str(&format!(
            "{:<4}----> {}{}\n",
            last,
            " ".repeat(indent),
            "^".repeat(width)
        ));
        out
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match self.severity {
            Severity::Error => "Error parsing",
            Severity::Warning => "Warning while parsing",
        };
        write!(
            f,
            "{} {}, {} in {}",
            what, self.context, self.message, self.location
        )
    }
}

impl std::error::Error for SyntaxError {}

/// Builder for creating complex syntax errors
pub struct SyntaxErrorBuilder {
    code: ErrorCode,
    message: Option<String>,
    location: Option<Location>,
    context: Option<SmolStr>,
    severity: Severity,
    hint: Option<String>,
}

impl SyntaxErrorBuilder {
    /// Create a new builder with an error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            code,
            message: None,
            location: None,
            context: None,
            severity: Severity::Error,
            hint: None,
        }
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    pub fn context(mut self, context: impl Into<SmolStr>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Build the syntax error, defaulting the message from the error code
    pub fn build(self) -> SyntaxError {
        SyntaxError {
            message: self
                .message
                .unwrap_or_else(|| self.code.default_message().to_string()),
            location: self.location.unwrap_or_default(),
            context: self
                .context
                .unwrap_or_else(|| SmolStr::new_static("configuration")),
            code: self.code,
            severity: self.severity,
            hint: self.hint,
        }
    }
}
