/// Position tracking for tokens and diagnostics
///
/// Stores the source location (line/column) of tokens so syntax errors can
/// point at the offending input.
use std::fmt;

use smol_str::SmolStr;
use text_size::TextRange;

/// A position in source code (1-based, the way configuration errors are printed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self { line: 1, column: 1 }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A span of source text: byte range plus the line/column pair of each end
///
/// `end` points at the last character of the span (inclusive), matching how
/// the error report underlines the offending token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Location {
    pub range: TextRange,
    pub start: Position,
    pub end: Position,
    /// Name of the configuration source (file name, "<string>", ...)
    pub source: Option<SmolStr>,
}

impl Location {
    pub fn new(range: TextRange, start: Position, end: Position) -> Self {
        Self {
            range,
            start,
            end,
            source: None,
        }
    }

    pub fn with_source(mut self, source: impl Into<SmolStr>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Check if a position falls within this span
    pub fn contains(&self, position: Position) -> bool {
        self.start <= position && position <= self.end
    }

    /// Number of source lines this location covers
    pub fn line_count(&self) -> u32 {
        self.end.line.saturating_sub(self.start.line) + 1
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source = self.source.as_deref().unwrap_or("<string>");
        write!(
            f,
            "{}:{}:{}-{}:{}",
            source, self.start.line, self.start.column, self.end.line, self.end.column
        )
    }
}
