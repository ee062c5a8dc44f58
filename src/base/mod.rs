//! Foundation types for the syster-core toolchain.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`Interner`], [`IStr`] - string interning
//! - [`Position`], [`Span`] - line/column positions
//! - [`LineIndex`] - byte offset to line/column conversion
//!
//! This module has no dependencies on other syster-core modules.

mod intern;
mod line_index;
mod position;

pub use intern::{IStr, Interner};
pub use line_index::{LineCol, LineIndex};
pub use position::{Location, Position, Span};

pub use text_size::{TextRange, TextSize};
