//! Sortle's pattern language.
//!
//! The match operator uses its own small pattern language, not a standard
//! regex dialect:
//!
//! - A literal run matches itself; `.` inside a run matches any single
//!   scalar value.
//! - `[...]` brackets a run as one element; `(...)` does the same and also
//!   captures the text that element consumed. Groups do not nest, and at
//!   most one `(...)` may appear per pattern.
//! - A trailing `!` (one or more) or `@` (zero or one) quantifies the
//!   preceding element lazily. On a bare literal run it binds to the final
//!   character only, so `abc!` means: match `ab`, then one or more `c`.
//!
//! Matching is anchored at both ends: a pattern accepts a string only by
//! consuming it exactly. See [`Pattern::compile`] and [`Pattern::find`].

use thiserror::Error;

mod matcher;
mod pattern;

pub use pattern::{Element, Pattern, Repeat};

/// Errors raised while compiling a pattern.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegexError {
    /// A `[` or `(` group was never closed
    #[error("unterminated '{opener}' group")]
    UnterminatedGroup { opener: char },

    /// A group was opened inside another group
    #[error("cannot nest groups")]
    NestedGroup,

    /// More than one `(...)` group in a single pattern
    #[error("cannot use multiple () groups")]
    MultipleCaptures,

    /// A `]` or `)` with no matching opener
    #[error("unmatched '{closer}'")]
    UnmatchedClose { closer: char },
}
