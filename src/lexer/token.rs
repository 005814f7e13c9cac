//! Logos-based scanner for configuration text
//!
//! Raw tokens carry no keyword information: identifier-shaped words are
//! classified against the lexer's context stack when they are handed out.

use std::borrow::Cow;
use std::fmt;

use logos::Logos;

use super::keywords::TokenId;
use crate::base::Location;

/// Logos token enum - classified into [`TokenKind`] by the lexer
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"([ \t\r\n\f]+|#[^\n]*)")]
pub enum RawToken {
    // =========================================================================
    // LITERALS
    // =========================================================================
    #[regex(r"[A-Za-z_][A-Za-z0-9_\-\.]*")]
    Word,

    #[regex(r#""([^"\\]|\\.)*""#)]
    #[regex(r"'[^']*'")]
    String,

    #[regex(r"[+-]?[0-9]+")]
    #[regex(r"0x[0-9a-fA-F]+")]
    Integer,

    #[regex(r"[+-]?[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?")]
    Float,

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(";")]
    Semicolon,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token("=>")]
    FatArrow,
}

/// Classified token kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// A word found in the active keyword tables
    Keyword(TokenId),
    Identifier,
    String,
    Integer,
    Float,
    LBrace,
    RBrace,
    LParen,
    RParen,
    Semicolon,
    Comma,
    Colon,
    FatArrow,
    /// Unrecognized input
    Error,
    /// End of input
    Eof,
}

impl TokenKind {
    pub fn is_keyword(&self) -> bool {
        matches!(self, Self::Keyword(_))
    }

    /// Get a human-readable name for error messages
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Keyword(_) => "keyword",
            Self::Identifier => "identifier",
            Self::String => "string",
            Self::Integer => "integer",
            Self::Float => "number",
            Self::LBrace => "'{'",
            Self::RBrace => "'}'",
            Self::LParen => "'('",
            Self::RParen => "')'",
            Self::Semicolon => "';'",
            Self::Comma => "','",
            Self::Colon => "':'",
            Self::FatArrow => "'=>'",
            Self::Error => "invalid character",
            Self::Eof => "end of input",
        }
    }
}

impl From<RawToken> for TokenKind {
    fn from(token: RawToken) -> Self {
        match token {
            RawToken::Word => Self::Identifier,
            RawToken::String => Self::String,
            RawToken::Integer => Self::Integer,
            RawToken::Float => Self::Float,
            RawToken::LBrace => Self::LBrace,
            RawToken::RBrace => Self::RBrace,
            RawToken::LParen => Self::LParen,
            RawToken::RParen => Self::RParen,
            RawToken::Semicolon => Self::Semicolon,
            RawToken::Comma => Self::Comma,
            RawToken::Colon => Self::Colon,
            RawToken::FatArrow => Self::FatArrow,
        }
    }
}

/// A token with its kind, text, and position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub location: Location,
}

impl<'a> Token<'a> {
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }

    /// Semantic value of the token: quotes removed and escapes resolved for
    /// strings, the raw text for everything else.
    pub fn value(&self) -> Cow<'a, str> {
        if self.kind != TokenKind::String {
            return Cow::Borrowed(self.text);
        }
        let inner = &self.text[1..self.text.len() - 1];
        if self.text.starts_with('\'') || !inner.contains('\\') {
            return Cow::Borrowed(inner);
        }
        Cow::Owned(unescape(inner))
    }

    /// Integer value, for decimal and `0x` hexadecimal literals
    pub fn integer_value(&self) -> Option<i64> {
        if self.kind != TokenKind::Integer {
            return None;
        }
        match self.text.strip_prefix("0x") {
            Some(hex) => i64::from_str_radix(hex, 16).ok(),
            None => self.text.parse().ok(),
        }
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Eof => f.write_str("end of input"),
            _ => write!(f, "'{}'", self.text),
        }
    }
}

fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('a') => out.push('\u{7}'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}
