//! Context-stacked lexer wrapping the logos-generated scanner

use std::sync::Arc;

use logos::Logos;
use smol_str::SmolStr;
use text_size::{TextRange, TextSize};

use super::context::{ContextFrame, ContextId, ContextStack};
use super::keywords::{KeywordStatus, KeywordTable};
use super::token::{RawToken, Token, TokenKind};
use crate::base::{LineIndex, Location, SourceTooLarge, text_size};
use crate::error::ContextError;

/// A scanned token not yet classified against the keyword tables
#[derive(Debug, Clone, Copy)]
struct Pending {
    kind: TokenKind,
    range: TextRange,
}

/// Lexer over one configuration source
///
/// Keyword classification happens when a token is handed out, so a token
/// peeked under one context and consumed under another is classified by the
/// context active at consumption time.
pub struct Lexer<'src> {
    inner: logos::Lexer<'src, RawToken>,
    source: &'src str,
    source_name: Option<SmolStr>,
    lines: LineIndex,
    contexts: ContextStack,
    peeked: Option<Pending>,
    last: Option<TextRange>,
}

impl<'src> Lexer<'src> {
    /// Fails when `source` is longer than `u32::MAX` bytes.
    pub fn new(source: &'src str) -> Result<Self, SourceTooLarge> {
        Ok(Self {
            inner: RawToken::lexer(source),
            source,
            source_name: None,
            lines: LineIndex::new(source)?,
            contexts: ContextStack::new(),
            peeked: None,
            last: None,
        })
    }

    /// Name the source in locations (typically the file name)
    pub fn with_source_name(mut self, name: impl Into<SmolStr>) -> Self {
        self.source_name = Some(name.into());
        self
    }

    pub fn source(&self) -> &'src str {
        self.source
    }

    pub fn source_name(&self) -> Option<&str> {
        self.source_name.as_deref()
    }

    // =========================================================================
    // Token retrieval
    // =========================================================================

    /// Next token; returns [`TokenKind::Eof`] forever once input is exhausted
    pub fn next_token(&mut self) -> Token<'src> {
        let pending = match self.peeked.take() {
            Some(pending) => pending,
            None => self.scan(),
        };
        if pending.kind != TokenKind::Eof {
            self.last = Some(pending.range);
        }
        self.classify(pending, true)
    }

    /// Look at the next token without consuming it
    pub fn peek_token(&mut self) -> Token<'src> {
        let pending = match self.peeked {
            Some(pending) => pending,
            None => {
                let pending = self.scan();
                self.peeked = Some(pending);
                pending
            }
        };
        self.classify(pending, false)
    }

    /// Location of the most recently consumed token, or the start of input
    pub fn last_location(&self) -> Location {
        match self.last {
            Some(range) => self.location(range),
            None => self.location(TextRange::empty(TextSize::new(0))),
        }
    }

    /// Location for an arbitrary byte range of this source
    pub fn location(&self, range: TextRange) -> Location {
        let location = self.lines.location(range);
        match &self.source_name {
            Some(name) => location.with_source(name.clone()),
            None => location,
        }
    }

    fn scan(&mut self) -> Pending {
        let kind = match self.inner.next() {
            None => {
                return Pending {
                    kind: TokenKind::Eof,
                    range: TextRange::empty(self.lines.len()),
                };
            }
            Some(Ok(raw)) => TokenKind::from(raw),
            Some(Err(())) => TokenKind::Error,
        };
        let span = self.inner.span();
        Pending {
            kind,
            range: TextRange::new(self.offset(span.start), self.offset(span.end)),
        }
    }

    // `new` only accepts sources whose length fits a `TextSize`
    fn offset(&self, at: usize) -> TextSize {
        text_size(at).unwrap_or(self.lines.len())
    }

    fn classify(&self, pending: Pending, consumed: bool) -> Token<'src> {
        let text = &self.source[pending.range];
        let mut kind = pending.kind;
        if kind == TokenKind::Identifier {
            if let Some(keyword) = self.contexts.lookup_keyword(text) {
                if consumed {
                    if let KeywordStatus::Obsolete { explanation } = &keyword.status {
                        tracing::warn!(
                            keyword = %keyword.spelling,
                            context = %self.contexts.current_description(),
                            "Your configuration file uses an obsoleted keyword, please update your configuration: {}",
                            explanation
                        );
                    }
                }
                kind = TokenKind::Keyword(keyword.token);
            }
        }
        Token {
            kind,
            text,
            location: self.location(pending.range),
        }
    }

    // =========================================================================
    // Context stack
    // =========================================================================

    /// Install a new innermost context
    pub fn push_context(
        &mut self,
        context: ContextId,
        keywords: Arc<KeywordTable>,
        name: impl Into<SmolStr>,
    ) {
        self.contexts.push(ContextFrame::new(context, keywords, name));
    }

    /// Remove the innermost context
    pub fn pop_context(&mut self) -> Result<ContextFrame, ContextError> {
        self.contexts.pop()
    }

    pub fn context_depth(&self) -> usize {
        self.contexts.depth()
    }

    pub fn current_context(&self) -> Option<&ContextFrame> {
        self.contexts.current()
    }

    /// Name of the innermost active grammar, for diagnostics
    pub fn current_context_description(&self) -> &str {
        self.contexts.current_description()
    }

    pub fn contexts(&self) -> &ContextStack {
        &self.contexts
    }
}

impl std::fmt::Debug for Lexer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lexer")
            .field("source_name", &self.source_name)
            .field("contexts", &self.contexts)
            .field("offset", &self.inner.span().end)
            .finish()
    }
}
