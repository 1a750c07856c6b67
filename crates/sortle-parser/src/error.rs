//! Error types for the Sortle parser

use thiserror::Error;

/// Result type for parser operations
pub type Result<T> = std::result::Result<T, ParseError>;

/// Errors that can occur while parsing Sortle source
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    /// Something other than what the grammar expects at this point
    #[error("line {line}, column {column}: expected {expected}, found {found}")]
    Unexpected { line: u32, column: u32, expected: String, found: String },

    /// String literal with no closing quote on its line
    #[error("line {line}, column {column}: unterminated string literal")]
    UnterminatedString { line: u32, column: u32 },

    /// Unknown backslash escape inside a string literal
    #[error("line {line}, column {column}: invalid escape sequence '\\{escape}'")]
    InvalidEscape { escape: char, line: u32, column: u32 },

    /// Two expressions share a name
    #[error("line {line}: duplicate expression name '{name}'")]
    DuplicateName { name: String, line: u32, column: u32 },
}

impl ParseError {
    /// Line (1-based) where the error occurred
    pub fn line(&self) -> u32 {
        match self {
            ParseError::Unexpected { line, .. }
            | ParseError::UnterminatedString { line, .. }
            | ParseError::InvalidEscape { line, .. }
            | ParseError::DuplicateName { line, .. } => *line,
        }
    }

    /// Column (1-based) where the error occurred
    pub fn column(&self) -> u32 {
        match self {
            ParseError::Unexpected { column, .. }
            | ParseError::UnterminatedString { column, .. }
            | ParseError::InvalidEscape { column, .. }
            | ParseError::DuplicateName { column, .. } => *column,
        }
    }

    /// Render a carat-underline snippet of the offending source line.
    ///
    /// Returns `None` when the recorded line is not present in `source`.
    pub fn snippet(&self, source: &str) -> Option<String> {
        let text = source.lines().nth(self.line() as usize - 1)?;
        let number = self.line().to_string();
        let gutter = " ".repeat(number.len());
        let offset = " ".repeat(self.column().saturating_sub(1) as usize);
        Some(format!("{number} | {text}\n{gutter} | {offset}^"))
    }
}
