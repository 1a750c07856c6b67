//! Parser from Sortle source text to named expressions.
//!
//! A Sortle program is line-oriented: every non-blank line defines one
//! expression of the form
//!
//! ```text
//! name := term term term
//! ```
//!
//! Names are runs of ASCII letters. Terms are decimal integer literals,
//! double-quoted string literals (with `\"`, `\\`, `\n`, and `\t` escapes),
//! and the eight operator symbols `+ * / % ^ ~ ? $`. A `#` starts a comment
//! running to the end of the line; blank lines are skipped.
//!
//! The parser enforces the engine's input contract: names are unique, and
//! the returned expressions are sorted by name ascending. Errors carry line
//! and column and can render a carat-underline snippet via
//! [`ParseError::snippet`].

use std::iter::Peekable;
use std::str::Chars;

use sortle_ast::{Expression, Operator, Term, decimal_prefix};

pub mod error;
pub mod position;

pub use error::{ParseError, Result};
pub use position::Position;

/// Parse a whole Sortle program.
///
/// Returns the expressions sorted by name, ready for the rewrite engine.
pub fn parse(source: &str) -> Result<Vec<Expression>> {
    Parser::new(source).run()
}

struct Parser<'src> {
    chars: Peekable<Chars<'src>>,
    position: Position,
}

impl<'src> Parser<'src> {
    fn new(source: &'src str) -> Self {
        Parser { chars: source.chars().peekable(), position: Position::start() }
    }

    fn run(mut self) -> Result<Vec<Expression>> {
        let mut expressions: Vec<Expression> = Vec::new();
        while let Some((expression, at)) = self.next_expression()? {
            if expressions.iter().any(|e| e.name == expression.name) {
                return Err(ParseError::DuplicateName {
                    name: expression.name,
                    line: at.line,
                    column: at.column,
                });
            }
            expressions.push(expression);
        }
        expressions.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(expressions)
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.chars.next()?;
        self.position.advance(ch);
        Some(ch)
    }

    /// Skip spaces and tabs, but not newlines.
    fn skip_inline_space(&mut self) {
        while matches!(self.peek(), Some(' ') | Some('\t') | Some('\r')) {
            self.bump();
        }
    }

    /// Skip a `#` comment up to (not including) the end of its line.
    fn skip_comment(&mut self) {
        while !matches!(self.peek(), None | Some('\n')) {
            self.bump();
        }
    }

    /// Parse the next `name := terms` line, skipping blanks and comments.
    ///
    /// Returns the expression together with the position of its name.
    fn next_expression(&mut self) -> Result<Option<(Expression, Position)>> {
        loop {
            self.skip_inline_space();
            match self.peek() {
                None => return Ok(None),
                Some('\n') => {
                    self.bump();
                }
                Some('#') => self.skip_comment(),
                Some(_) => break,
            }
        }
        let at = self.position;
        let name = self.scan_name()?;
        self.skip_inline_space();
        self.expect_assign()?;
        let terms = self.scan_terms()?;
        Ok(Some((Expression::new(name, terms), at)))
    }

    fn scan_name(&mut self) -> Result<String> {
        if !matches!(self.peek(), Some(c) if c.is_ascii_alphabetic()) {
            return Err(self.unexpected("expression name"));
        }
        let mut name = String::new();
        while let Some(c) = self.peek() {
            if !c.is_ascii_alphabetic() {
                break;
            }
            name.push(c);
            self.bump();
        }
        Ok(name)
    }

    fn expect_assign(&mut self) -> Result<()> {
        if self.peek() != Some(':') {
            return Err(self.unexpected("':='"));
        }
        self.bump();
        if self.peek() != Some('=') {
            return Err(self.unexpected("':='"));
        }
        self.bump();
        Ok(())
    }

    /// Scan the body terms up to the end of the line.
    fn scan_terms(&mut self) -> Result<Vec<Term>> {
        let mut terms = Vec::new();
        loop {
            self.skip_inline_space();
            match self.peek() {
                None => break,
                Some('\n') => {
                    self.bump();
                    break;
                }
                Some('#') => self.skip_comment(),
                Some(c) if c.is_ascii_digit() => terms.push(self.scan_int()),
                Some('"') => terms.push(self.scan_string()?),
                Some(c) => match Operator::from_symbol(c) {
                    Some(op) => {
                        self.bump();
                        terms.push(Term::Op(op));
                    }
                    None => return Err(self.unexpected("term")),
                },
            }
        }
        Ok(terms)
    }

    fn scan_int(&mut self) -> Term {
        let mut digits = String::new();
        while let Some(c) = self.peek() {
            if !c.is_ascii_digit() {
                break;
            }
            digits.push(c);
            self.bump();
        }
        Term::Int(decimal_prefix(&digits))
    }

    fn scan_string(&mut self) -> Result<Term> {
        let at = self.position;
        self.bump(); // opening quote
        let mut text = String::new();
        loop {
            match self.peek() {
                None | Some('\n') => {
                    return Err(ParseError::UnterminatedString { line: at.line, column: at.column });
                }
                Some('"') => {
                    self.bump();
                    return Ok(Term::Str(text));
                }
                Some('\\') => {
                    let escape_at = self.position;
                    self.bump();
                    match self.peek() {
                        None | Some('\n') => {
                            return Err(ParseError::UnterminatedString {
                                line: at.line,
                                column: at.column,
                            });
                        }
                        Some('"') => text.push('"'),
                        Some('\\') => text.push('\\'),
                        Some('n') => text.push('\n'),
                        Some('t') => text.push('\t'),
                        Some(other) => {
                            return Err(ParseError::InvalidEscape {
                                escape: other,
                                line: escape_at.line,
                                column: escape_at.column,
                            });
                        }
                    }
                    self.bump();
                }
                Some(c) => {
                    text.push(c);
                    self.bump();
                }
            }
        }
    }

    fn unexpected(&mut self, expected: &str) -> ParseError {
        let found = match self.peek() {
            None => "end of input".to_string(),
            Some('\n') => "end of line".to_string(),
            Some(c) => format!("'{c}'"),
        };
        ParseError::Unexpected {
            line: self.position.line,
            column: self.position.column,
            expected: expected.to_string(),
            found,
        }
    }
}
