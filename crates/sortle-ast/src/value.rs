//! Runtime values and the two name coercions.

use serde::{Deserialize, Serialize};

/// A value on the evaluation stack.
///
/// Sortle has exactly two runtime types: signed integers and strings of
/// Unicode scalar values. Nothing else ever appears on the stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Value {
    /// 64-bit signed integer
    Int(i64),
    /// Sequence of Unicode scalar values
    Str(String),
}

impl Value {
    /// Coerce this value to a string.
    ///
    /// Integer `0` becomes the empty string; an expression that evaluates to
    /// the empty name is deleted, so this is how programs drop expressions.
    /// Any other integer renders as decimal with a leading `-` for
    /// negatives. Strings pass through unchanged.
    pub fn to_name(&self) -> String {
        match self {
            Value::Int(0) => String::new(),
            Value::Int(n) => n.to_string(),
            Value::Str(s) => s.clone(),
        }
    }

    /// Coerce this value to an integer.
    ///
    /// Integers pass through. For strings, the longest `[0-9]*` prefix is
    /// read as a non-negative decimal number (an empty prefix is 0) and the
    /// suffix is discarded. There is no sign handling. Digit runs past
    /// `i64::MAX` saturate.
    pub fn to_int(&self) -> i64 {
        match self {
            Value::Int(n) => *n,
            Value::Str(s) => decimal_prefix(s),
        }
    }
}

/// Value of the leading `[0-9]*` run of `s`, saturating at `i64::MAX`.
pub fn decimal_prefix(s: &str) -> i64 {
    let mut total: i64 = 0;
    for ch in s.chars() {
        let Some(digit) = ch.to_digit(10) else { break };
        total = total.saturating_mul(10).saturating_add(i64::from(digit));
    }
    total
}
