//! Error types for the dispatch core.

use smol_str::SmolStr;
use thiserror::Error;

use crate::base::SourceTooLarge;
use crate::lexer::ContextId;

/// Errors raised by the lexer's context stack.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContextError {
    /// `pop_context` was called with no active frame.
    #[error("attempted to pop a lexer context from an empty stack")]
    EmptyStackPop,
}

/// Errors raised while building a keyword table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeywordError {
    /// Two keywords normalize to the same spelling.
    #[error("duplicate keyword spelling: {0}")]
    Duplicate(SmolStr),

    /// The spelling is not identifier-shaped.
    #[error("invalid keyword spelling: {0:?}")]
    InvalidSpelling(SmolStr),
}

/// Errors raised by the parser registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A descriptor for this context is already registered.
    #[error("a parser is already registered for context {0}")]
    DuplicateContext(ContextId),

    /// No descriptor is registered for this context.
    #[error("no parser registered for context {0}")]
    NotFound(ContextId),

    /// No descriptor was registered as the main parser.
    #[error("no main parser registered")]
    NoMainParser,
}

/// Errors surfaced by [`Dispatcher`](crate::parser::Dispatcher) calls.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// The grammar's entry point reported failure.
    #[error("parser {parser} failed")]
    Rejected { parser: SmolStr },

    /// Delegation target could not be resolved.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// The source could not be handed to a lexer.
    #[error(transparent)]
    Source(#[from] SourceTooLarge),

    /// The grammar produced a result of a different type than requested.
    #[error("parser {parser} produced an unexpected result type, expected {expected}")]
    UnexpectedInstance {
        parser: SmolStr,
        expected: &'static str,
    },
}

impl DispatchError {
    /// Create a rejection error for a parser name.
    pub fn rejected(parser: impl Into<SmolStr>) -> Self {
        Self::Rejected {
            parser: parser.into(),
        }
    }

    /// Check if this error came from a grammar rejecting its input
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}
