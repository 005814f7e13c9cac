//! Byte offset to line/column conversion.

use text_size::{TextRange, TextSize};
use thiserror::Error;

use super::position::{Location, Position};

/// The source text is too long for 32-bit byte offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("configuration source of {len} bytes exceeds the {limit} byte limit", limit = u32::MAX)]
pub struct SourceTooLarge {
    pub len: usize,
}

/// Convert a byte offset, failing instead of truncating past `u32::MAX`
pub fn text_size(offset: usize) -> Result<TextSize, SourceTooLarge> {
    TextSize::try_from(offset).map_err(|_| SourceTooLarge { len: offset })
}

/// Precomputed line starts of a source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    line_starts: Vec<TextSize>,
    len: TextSize,
}

impl LineIndex {
    pub fn new(text: &str) -> Result<Self, SourceTooLarge> {
        let len = text_size(text.len())?;
        let mut line_starts = vec![TextSize::new(0)];
        for (offset, byte) in text.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(text_size(offset + 1)?);
            }
        }
        Ok(Self { line_starts, len })
    }

    /// Length of the indexed text
    pub fn len(&self) -> TextSize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == TextSize::new(0)
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Convert a byte offset to a 1-based line/column position.
    ///
    /// Offsets past the end clamp to the end of the text.
    pub fn position(&self, offset: TextSize) -> Position {
        let offset = offset.min(self.len);
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        let column = u32::from(offset - self.line_starts[line]);
        Position::new((line as u32).saturating_add(1), column + 1)
    }

    /// Location for a byte range, with `end` on the last covered character.
    pub fn location(&self, range: TextRange) -> Location {
        let start = self.position(range.start());
        let end = if range.is_empty() {
            start
        } else {
            self.position(range.end() - TextSize::new(1))
        };
        Location::new(range, start, end)
    }

    /// Byte range of a 1-based line, excluding the line terminator.
    pub fn line_range(&self, line: u32, text: &str) -> Option<TextRange> {
        let idx = (line as usize).checked_sub(1)?;
        let start = *self.line_starts.get(idx)?;
        let end = self
            .line_starts
            .get(idx + 1)
            .map(|next| *next - TextSize::new(1))
            .unwrap_or(self.len);
        let mut range = TextRange::new(start, end);
        if text[range].ends_with('\r') {
            range = TextRange::new(start, end - TextSize::new(1));
        }
        Some(range)
    }
}
