//! Core syntax definitions for the Sortle interpreter.
//!
//! This crate provides the shared value, term, and expression types used by
//! the parser, the evaluator, and the rewrite engine.
//!
//! - [`Value`]: the two-variant runtime value domain and its coercions.
//! - [`Term`] / [`Operator`]: the elements of an expression body.
//! - [`Expression`]: a named term sequence, the unit of evaluation.

mod term;
mod value;

pub use term::{Expression, Operator, Term};
pub use value::{Value, decimal_prefix};
