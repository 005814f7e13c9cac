//! # cfg-dispatch
//!
//! Composable configuration-grammar dispatch: independent grammar fragments,
//! each tied to a named lexical context, driven by one lexer and one
//! error-reporting pipeline.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! parser      → Registry, Dispatcher, Grammar trait, parallel parsing
//!   ↓
//! diagnostics → SyntaxError, ErrorCode, ErrorReporter
//!   ↓
//! lexer       → Logos scanner, keyword tables, context stack
//!   ↓
//! base        → Primitives (Position, Location, LineIndex)
//! ```

// ============================================================================
// MODULES (dependency order: base → lexer → diagnostics → parser)
// ============================================================================

/// Foundation types: Position, Location, LineIndex
pub mod base;

/// Lexer: logos scanner, keyword tables, context stack
pub mod lexer;

/// Diagnostics: syntax errors and the reporter funnel
pub mod diagnostics;

/// Parser: descriptors, registry, dispatcher
pub mod parser;

/// Dispatcher configuration
pub mod config;

/// Error types
pub mod error;

pub use base::SourceTooLarge;
pub use config::DispatchConfig;
pub use diagnostics::{CollectingReporter, ErrorReporter, SyntaxError, TracingReporter};
pub use error::{ContextError, DispatchError, KeywordError, RegistryError};
pub use lexer::{ContextId, KeywordTable, Lexer, Token, TokenId, TokenKind};
pub use parser::{Dispatcher, FnGrammar, Grammar, Instance, Parsed, ParserDescriptor, Registry};
