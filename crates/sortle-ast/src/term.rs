//! Expression bodies: terms and the closed operator set.

use serde::{Deserialize, Serialize};

/// The eight Sortle operators, named after their source symbols.
///
/// All operators take exactly two operands. `^` and `$` are the same
/// operation under two spellings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    /// Integer addition: `+`
    Plus,
    /// Integer multiplication: `*`
    Star,
    /// Floor division: `/`
    Slash,
    /// Remainder: `%`
    Percent,
    /// Lexicographic maximum of two strings: `^`
    Caret,
    /// Lexicographic maximum of two strings: `$`
    Dollar,
    /// String concatenation: `~`
    Tilde,
    /// Regex match over the other expressions' names: `?`
    Question,
}

impl Operator {
    /// Look up an operator by its source symbol.
    pub fn from_symbol(ch: char) -> Option<Operator> {
        match ch {
            '+' => Some(Operator::Plus),
            '*' => Some(Operator::Star),
            '/' => Some(Operator::Slash),
            '%' => Some(Operator::Percent),
            '^' => Some(Operator::Caret),
            '$' => Some(Operator::Dollar),
            '~' => Some(Operator::Tilde),
            '?' => Some(Operator::Question),
            _ => None,
        }
    }

    /// The source symbol for this operator.
    pub fn symbol(self) -> char {
        match self {
            Operator::Plus => '+',
            Operator::Star => '*',
            Operator::Slash => '/',
            Operator::Percent => '%',
            Operator::Caret => '^',
            Operator::Dollar => '$',
            Operator::Tilde => '~',
            Operator::Question => '?',
        }
    }
}

/// One element of an expression body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Term {
    /// Integer literal
    Int(i64),
    /// String literal, after escape processing
    Str(String),
    /// Operator application
    Op(Operator),
}

/// A named expression: the unit of evaluation.
///
/// The name is the expression's sort key and identity. The body is fixed at
/// parse time; a rewrite carries the same body forward under the new name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expression {
    /// Sort key and identity; never empty while the expression is live
    pub name: String,
    /// Terms evaluated left to right to produce the next name
    pub terms: Vec<Term>,
}

impl Expression {
    /// Create an expression from a name and a term sequence.
    pub fn new(name: impl Into<String>, terms: Vec<Term>) -> Self {
        Expression { name: name.into(), terms }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_operator_round_trips_through_its_symbol() {
        for symbol in ['+', '*', '/', '%', '^', '$', '~', '?'] {
            let op = Operator::from_symbol(symbol);
            assert_eq!(op.map(Operator::symbol), Some(symbol));
        }
    }

    #[test]
    fn non_operators_are_rejected() {
        assert_eq!(Operator::from_symbol('a'), None);
        assert_eq!(Operator::from_symbol('!'), None);
        assert_eq!(Operator::from_symbol('-'), None);
    }
}
