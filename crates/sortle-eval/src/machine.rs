//! The term-by-term stack machine.

use sortle_ast::{Operator, Term, Value};

use crate::{EvalError, MatchContext, Result};

/// Evaluate `terms` to a single value.
///
/// The first pop at an operator is the right-hand operand, the second the
/// left-hand one, which matters for the non-commutative operators `/`, `%`,
/// `~`, and `?`.
pub fn evaluate(terms: &[Term], context: &dyn MatchContext) -> Result<Value> {
    let mut stack: Vec<Value> = Vec::new();
    for term in terms {
        match term {
            Term::Int(n) => stack.push(Value::Int(*n)),
            Term::Str(s) => stack.push(Value::Str(s.clone())),
            Term::Op(op) => {
                let Some(rhs) = stack.pop() else {
                    return Err(EvalError::StackUnderflow { operator: op.symbol() });
                };
                let Some(lhs) = stack.pop() else {
                    return Err(EvalError::StackUnderflow { operator: op.symbol() });
                };
                stack.push(apply(*op, lhs, rhs, context)?);
            }
        }
    }
    if stack.len() == 1 {
        Ok(stack.remove(0))
    } else {
        Err(EvalError::StackResidue { depth: stack.len() })
    }
}

/// Apply one operator to its two operands.
fn apply(op: Operator, lhs: Value, rhs: Value, context: &dyn MatchContext) -> Result<Value> {
    let value = match op {
        Operator::Plus => Value::Int(lhs.to_int().saturating_add(rhs.to_int())),
        Operator::Star => Value::Int(lhs.to_int().saturating_mul(rhs.to_int())),
        Operator::Slash => Value::Int(floor_div(lhs.to_int(), rhs.to_int())?),
        Operator::Percent => {
            let divisor = rhs.to_int();
            if divisor == 0 {
                return Err(EvalError::DivideByZero);
            }
            Value::Int(lhs.to_int().wrapping_rem(divisor))
        }
        Operator::Caret | Operator::Dollar => {
            let (left, right) = (lhs.to_name(), rhs.to_name());
            Value::Str(if left >= right { left } else { right })
        }
        Operator::Tilde => {
            let mut joined = lhs.to_name();
            joined.push_str(&rhs.to_name());
            Value::Str(joined)
        }
        Operator::Question => {
            // The form where the right operand selects a substring of the
            // current name is not supported; only `"" ?` is legal.
            if !rhs.to_name().is_empty() {
                return Err(EvalError::UnsupportedOperation);
            }
            let pattern = lhs.to_name();
            let found = context
                .search(&pattern)
                .map_err(|source| EvalError::Regex { pattern: pattern.clone(), source })?;
            Value::Str(found)
        }
    };
    Ok(value)
}

/// Floor division, total over non-zero divisors.
///
/// `i64::MIN / -1` has no representable quotient and saturates.
fn floor_div(a: i64, b: i64) -> Result<i64> {
    if b == 0 {
        return Err(EvalError::DivideByZero);
    }
    if a == i64::MIN && b == -1 {
        return Ok(i64::MAX);
    }
    let quotient = a / b;
    if a % b != 0 && (a < 0) != (b < 0) {
        Ok(quotient - 1)
    } else {
        Ok(quotient)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use sortle_ast::{Operator, Term, Value};
    use sortle_regex::RegexError;

    use crate::{EmptyContext, EvalError, MatchContext, evaluate};

    fn int(n: i64) -> Term {
        Term::Int(n)
    }

    fn s(text: &str) -> Term {
        Term::Str(text.to_string())
    }

    fn op(symbol: char) -> Term {
        match Operator::from_symbol(symbol) {
            Some(found) => Term::Op(found),
            None => panic!("not an operator: {symbol}"),
        }
    }

    fn eval(terms: &[Term]) -> Result<Value, EvalError> {
        evaluate(terms, &EmptyContext)
    }

    #[test]
    fn literals_evaluate_to_themselves() {
        assert_eq!(eval(&[int(5)]), Ok(Value::Int(5)));
        assert_eq!(eval(&[s("abc")]), Ok(Value::Str("abc".into())));
    }

    #[test]
    fn addition_and_multiplication() {
        assert_eq!(eval(&[int(1), int(2), op('+')]), Ok(Value::Int(3)));
        assert_eq!(eval(&[int(6), int(7), op('*')]), Ok(Value::Int(42)));
    }

    #[test]
    fn arithmetic_coerces_strings_through_digit_prefixes() {
        assert_eq!(eval(&[s("12ab"), int(1), op('+')]), Ok(Value::Int(13)));
        assert_eq!(eval(&[s("xyz"), int(5), op('+')]), Ok(Value::Int(5)));
    }

    #[test]
    fn division_floors_and_remainder_truncates() {
        assert_eq!(eval(&[int(7), int(2), op('/')]), Ok(Value::Int(3)));
        assert_eq!(eval(&[int(-7), int(2), op('/')]), Ok(Value::Int(-4)));
        assert_eq!(eval(&[int(7), int(2), op('%')]), Ok(Value::Int(1)));
        assert_eq!(eval(&[int(-7), int(2), op('%')]), Ok(Value::Int(-1)));
    }

    #[test]
    fn zero_divisors_are_errors() {
        assert_eq!(eval(&[int(1), int(0), op('/')]), Err(EvalError::DivideByZero));
        assert_eq!(eval(&[int(1), int(0), op('%')]), Err(EvalError::DivideByZero));
    }

    #[test]
    fn operand_order_is_left_under_right() {
        // first pop is the right operand
        assert_eq!(eval(&[int(10), int(3), op('/')]), Ok(Value::Int(3)));
        assert_eq!(
            eval(&[s("ab"), s("cd"), op('~')]),
            Ok(Value::Str("abcd".into()))
        );
    }

    #[test]
    fn caret_and_dollar_take_the_lexicographic_max() {
        assert_eq!(eval(&[s("apple"), s("pear"), op('^')]), Ok(Value::Str("pear".into())));
        assert_eq!(eval(&[s("pear"), s("apple"), op('$')]), Ok(Value::Str("pear".into())));
        assert_eq!(eval(&[s("same"), s("same"), op('^')]), Ok(Value::Str("same".into())));
    }

    #[test]
    fn max_compares_through_the_name_coercion() {
        // 0 coerces to the empty string, which every name outranks
        assert_eq!(eval(&[int(0), s("a"), op('^')]), Ok(Value::Str("a".into())));
        assert_eq!(eval(&[int(12), s("3"), op('^')]), Ok(Value::Str("3".into())));
    }

    #[test]
    fn concat_coerces_both_sides() {
        assert_eq!(eval(&[s("n"), int(7), op('~')]), Ok(Value::Str("n7".into())));
        assert_eq!(eval(&[int(0), s("x"), op('~')]), Ok(Value::Str("x".into())));
    }

    #[test]
    fn operator_without_two_operands_underflows() {
        assert_eq!(
            eval(&[op('+')]),
            Err(EvalError::StackUnderflow { operator: '+' })
        );
        assert_eq!(
            eval(&[int(1), op('~')]),
            Err(EvalError::StackUnderflow { operator: '~' })
        );
    }

    #[test]
    fn leftover_values_are_residue_errors() {
        assert_eq!(eval(&[]), Err(EvalError::StackResidue { depth: 0 }));
        assert_eq!(
            eval(&[int(1), int(2)]),
            Err(EvalError::StackResidue { depth: 2 })
        );
    }

    #[test]
    fn match_with_nonempty_right_operand_is_unsupported() {
        assert_eq!(
            eval(&[s("a"), s("sub"), op('?')]),
            Err(EvalError::UnsupportedOperation)
        );
        assert_eq!(
            eval(&[s("a"), int(3), op('?')]),
            Err(EvalError::UnsupportedOperation)
        );
    }

    #[test]
    fn match_against_nothing_yields_the_empty_string() {
        // Int(0) coerces to "", the required right operand
        assert_eq!(eval(&[s("a!"), int(0), op('?')]), Ok(Value::Str(String::new())));
    }

    #[test]
    fn match_reports_bad_patterns_with_their_source() {
        let result = eval(&[s("(a)(b)"), int(0), op('?')]);
        assert_eq!(
            result,
            Err(EvalError::Regex {
                pattern: "(a)(b)".into(),
                source: RegexError::MultipleCaptures,
            })
        );
    }

    #[test]
    fn match_consults_the_context() {
        struct OneName;
        impl MatchContext for OneName {
            fn search(&self, pattern: &str) -> Result<String, RegexError> {
                Ok(sortle_regex::Pattern::compile(pattern)?.find_first(["bb"]))
            }
        }
        assert_eq!(
            evaluate(&[s("b!"), int(0), op('?')], &OneName),
            Ok(Value::Str("bb".into()))
        );
    }
}
