//! Foundation types for the dispatch toolchain.
//!
//! This module provides the source-location types used throughout the crate:
//! - [`TextRange`], [`TextSize`] - Source positions (byte offsets)
//! - [`LineIndex`] - Line/column conversion
//! - [`text_size`] - Checked `usize` to [`TextSize`] conversion
//! - [`Position`], [`Location`] - Line/column positions for tokens and diagnostics
//!
//! This module has NO dependencies on other crate modules.

mod line_index;
mod position;

pub use line_index::{LineIndex, SourceTooLarge, text_size};
pub use position::{Location, Position};

pub use text_size::{TextRange, TextSize};
