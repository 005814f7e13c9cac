//! The single funnel for syntax errors raised by grammar entry points.

use std::sync::Arc;

use parking_lot::Mutex;

use super::codes::ErrorCode;
use super::error::{Severity, SyntaxError};
use crate::base::Location;
use crate::lexer::Lexer;

/// Receives every syntax error raised while parsing
///
/// Implementations must not fail and must not touch parser state.
pub trait ErrorReporter: Send + Sync {
    fn report(&self, error: &SyntaxError);
}

/// Emits errors through `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl ErrorReporter for TracingReporter {
    fn report(&self, error: &SyntaxError) {
        match error.severity {
            Severity::Error => tracing::error!(code = %error.code, "{}", error),
            Severity::Warning => tracing::warn!(code = %error.code, "{}", error),
        }
    }
}

/// Keeps every reported error, for tests and for callers that render
/// diagnostics themselves
#[derive(Debug, Clone, Default)]
pub struct CollectingReporter {
    errors: Arc<Mutex<Vec<SyntaxError>>>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn errors(&self) -> Vec<SyntaxError> {
        self.errors.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.errors.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.lock().is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.errors.lock().iter().any(|e| e.severity.is_error())
    }

    /// Drain collected errors
    pub fn take(&self) -> Vec<SyntaxError> {
        std::mem::take(&mut *self.errors.lock())
    }
}

impl ErrorReporter for CollectingReporter {
    fn report(&self, error: &SyntaxError) {
        self.errors.lock().push(error.clone());
    }
}

impl<R: ErrorReporter + ?Sized> ErrorReporter for &R {
    fn report(&self, error: &SyntaxError) {
        (**self).report(error)
    }
}

impl<R: ErrorReporter + ?Sized> ErrorReporter for Arc<R> {
    fn report(&self, error: &SyntaxError) {
        (**self).report(error)
    }
}

/// Report a syntax error attributed to the lexer's innermost context.
///
/// Must be called while the failing grammar's context is still pushed.
pub fn report_syntax_error(
    reporter: &dyn ErrorReporter,
    lexer: &Lexer<'_>,
    location: Location,
    message: impl Into<String>,
) -> SyntaxError {
    let error = SyntaxError::new(
        message,
        location,
        lexer.current_context_description(),
        ErrorCode::E0901,
    );
    reporter.report(&error);
    error
}
