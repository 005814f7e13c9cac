//! Lexer context stack
//!
//! Each active grammar fragment owns one frame. The frame decides which
//! keyword table is consulted first and how the fragment is named in
//! diagnostics.

use std::fmt;
use std::sync::Arc;

use smol_str::SmolStr;

use super::keywords::{Keyword, KeywordScope, KeywordTable};
use crate::error::ContextError;

/// Opaque identifier of a lexical context
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContextId(SmolStr);

impl ContextId {
    pub fn new(id: impl Into<SmolStr>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContextId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// One activation of a grammar fragment on the lexer
#[derive(Debug, Clone)]
pub struct ContextFrame {
    pub context: ContextId,
    pub name: SmolStr,
    pub keywords: Arc<KeywordTable>,
}

impl ContextFrame {
    pub fn new(context: ContextId, keywords: Arc<KeywordTable>, name: impl Into<SmolStr>) -> Self {
        Self {
            context,
            name: name.into(),
            keywords,
        }
    }
}

/// Stack of active frames, innermost last
#[derive(Debug, Clone, Default)]
pub struct ContextStack {
    frames: Vec<ContextFrame>,
}

impl ContextStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, frame: ContextFrame) {
        tracing::trace!(
            context = %frame.context,
            name = %frame.name,
            depth = self.frames.len() + 1,
            "push lexer context"
        );
        self.frames.push(frame);
    }

    pub fn pop(&mut self) -> Result<ContextFrame, ContextError> {
        let frame = self.frames.pop().ok_or(ContextError::EmptyStackPop)?;
        tracing::trace!(
            context = %frame.context,
            depth = self.frames.len(),
            "pop lexer context"
        );
        Ok(frame)
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn current(&self) -> Option<&ContextFrame> {
        self.frames.last()
    }

    /// Name of the innermost frame, or a placeholder outside any grammar
    pub fn current_description(&self) -> &str {
        self.current()
            .map(|frame| frame.name.as_str())
            .unwrap_or("configuration")
    }

    /// Frames from innermost to outermost
    pub fn iter(&self) -> impl Iterator<Item = &ContextFrame> {
        self.frames.iter().rev()
    }

    /// Resolve a word against the keyword tables, innermost first.
    ///
    /// Lookup falls through to the next outer frame only while the frames
    /// searched so far have [`KeywordScope::Inherit`].
    pub fn lookup_keyword(&self, word: &str) -> Option<&Keyword> {
        for frame in self.iter() {
            if let Some(keyword) = frame.keywords.get(word) {
                return Some(keyword);
            }
            if frame.keywords.scope() == KeywordScope::Isolated {
                break;
            }
        }
        None
    }
}
