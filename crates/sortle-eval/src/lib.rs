//! Stack-machine evaluation of one expression body.
//!
//! Terms are processed left to right against a fresh stack: literals push,
//! operators pop two operands and push one result. A body that finishes
//! with anything other than exactly one value is an error, as is an
//! operator that finds fewer than two operands. The surviving value becomes
//! the expression's next name.
//!
//! The match operator `?` is the only term that looks outside the body. It
//! goes through the [`MatchContext`] seam, so the evaluator itself never
//! holds the program list; the rewrite engine hands it a read-only view.

use sortle_regex::RegexError;
use thiserror::Error;

mod machine;

pub use machine::evaluate;

/// Result type for evaluation
pub type Result<T> = std::result::Result<T, EvalError>;

/// Errors raised while evaluating an expression body.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    /// An operator found fewer than two operands on the stack
    #[error("stack underflow at operator '{operator}'")]
    StackUnderflow { operator: char },

    /// The body finished with other than exactly one value on the stack
    #[error("expression left {depth} values on the stack")]
    StackResidue { depth: usize },

    /// `/` or `%` with a zero divisor
    #[error("division by zero")]
    DivideByZero,

    /// `?` with a non-empty right operand
    #[error("substring regex form not implemented")]
    UnsupportedOperation,

    /// The pattern handed to `?` failed to compile
    #[error("{source}")]
    Regex {
        pattern: String,
        #[source]
        source: RegexError,
    },
}

/// Read-only window onto the rest of the program for the `?` operator.
///
/// Implemented by the rewrite engine: compile `pattern`, walk the other
/// expressions' names in match order, and return the first capture (or
/// whole matching name), or the empty string when nothing matches.
pub trait MatchContext {
    fn search(&self, pattern: &str) -> std::result::Result<String, RegexError>;
}

/// A context with nothing to match against.
///
/// Every search misses and returns the empty string. Useful for evaluating
/// bodies in isolation.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyContext;

impl MatchContext for EmptyContext {
    fn search(&self, pattern: &str) -> std::result::Result<String, RegexError> {
        sortle_regex::Pattern::compile(pattern)?;
        Ok(String::new())
    }
}
