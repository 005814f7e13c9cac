//! Configuration lexer with a stack of lexical contexts
//!
//! ```text
//! Source Text
//!     ↓
//! RawToken (logos) → words, strings, numbers, punctuation
//!     ↓
//! Lexer → classify words against the context stack
//!     ↓
//! Token { kind, text, location } → grammar entry points
//! ```
//!
//! Grammar fragments never push or pop frames themselves; the
//! [`Dispatcher`](crate::parser::Dispatcher) does that around each activation.

mod context;
mod keywords;
#[allow(clippy::module_inception)]
mod lexer;
mod token;

pub use context::{ContextFrame, ContextId, ContextStack};
pub use keywords::{Keyword, KeywordScope, KeywordStatus, KeywordTable, KeywordTableBuilder, TokenId};
pub use lexer::Lexer;
pub use token::{RawToken, Token, TokenKind};
