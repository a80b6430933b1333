//! Built-in arithmetic operations.
//!
//! Integer inputs stay integer until a step overflows, at which point the
//! fold continues in `f64`. Division always yields a float and follows
//! IEEE-754 for a zero divisor.

use std::sync::Arc;

use crate::calculator::{OperationMap, OperationRef};
use crate::types::Number;

/// Names of the built-in operations, in registration order.
pub const BUILTIN_NAMES: [&str; 4] = ["add", "subtract", "multiply", "divide"];

fn combine(
    lhs: Number,
    rhs: Number,
    int_op: fn(i64, i64) -> Option<i64>,
    float_op: fn(f64, f64) -> f64,
) -> Number {
    match (lhs, rhs) {
        (Number::Int(a), Number::Int(b)) => int_op(a, b)
            .map(Number::Int)
            .unwrap_or_else(|| Number::Float(float_op(a as f64, b as f64))),
        _ => Number::Float(float_op(lhs.as_f64(), rhs.as_f64())),
    }
}

/// Sum of all params; `0` when empty.
pub fn add(params: &[Number]) -> Number {
    params
        .iter()
        .fold(Number::Int(0), |acc, &n| combine(acc, n, i64::checked_add, |a, b| a + b))
}

/// First param minus every following one; `0` when empty.
pub fn subtract(params: &[Number]) -> Number {
    match params.split_first() {
        Some((&first, rest)) => rest
            .iter()
            .fold(first, |acc, &n| combine(acc, n, i64::checked_sub, |a, b| a - b)),
        None => Number::Int(0),
    }
}

/// Product of all params; `1` when empty.
pub fn multiply(params: &[Number]) -> Number {
    params
        .iter()
        .fold(Number::Int(1), |acc, &n| combine(acc, n, i64::checked_mul, |a, b| a * b))
}

/// First param divided by every following one; `0` when empty.
pub fn divide(params: &[Number]) -> Number {
    match params.split_first() {
        Some((first, rest)) => {
            Number::Float(rest.iter().fold(first.as_f64(), |acc, n| acc / n.as_f64()))
        }
        None => Number::Int(0),
    }
}

/// Look up a built-in operation by name.
pub fn builtin(name: &str) -> Option<OperationRef> {
    let op: OperationRef = match name {
        "add" => Arc::new(add),
        "subtract" => Arc::new(subtract),
        "multiply" => Arc::new(multiply),
        "divide" => Arc::new(divide),
        _ => return None,
    };
    Some(op)
}

/// All built-in operations.
pub fn builtins() -> OperationMap {
    BUILTIN_NAMES
        .iter()
        .filter_map(|&name| builtin(name).map(|op| (name.to_string(), op)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ints(values: &[i32]) -> Vec<Number> {
        values.iter().copied().map(Number::from).collect()
    }

    #[test]
    fn test_add() {
        assert_eq!(add(&ints(&[1, 2, 3])), Number::Int(6));
        assert_eq!(add(&[]), Number::Int(0));
        assert_eq!(
            add(&[1.into(), 4.5.into(), (-2).into()]),
            Number::Float(3.5)
        );
    }

    #[test]
    fn test_add_overflow_promotes() {
        let result = add(&[Number::Int(i64::MAX), Number::Int(1)]);
        assert!(!result.is_int());
        assert_eq!(result.as_f64(), i64::MAX as f64 + 1.0);
    }

    #[test]
    fn test_subtract() {
        assert_eq!(subtract(&ints(&[10, 3, 2])), Number::Int(5));
        assert_eq!(subtract(&ints(&[7])), Number::Int(7));
        assert_eq!(subtract(&[]), Number::Int(0));
    }

    #[test]
    fn test_multiply() {
        assert_eq!(multiply(&ints(&[2, 3, 4])), Number::Int(24));
        assert_eq!(multiply(&[]), Number::Int(1));
        assert_eq!(
            multiply(&[Number::from(2), Number::from(0.5)]),
            Number::Float(1.0)
        );
    }

    #[test]
    fn test_divide() {
        assert_eq!(divide(&ints(&[9, 2])), Number::Float(4.5));
        assert_eq!(divide(&ints(&[8])), Number::Float(8.0));
        assert_eq!(divide(&[]), Number::Int(0));
    }

    #[test]
    fn test_divide_by_zero() {
        assert_eq!(divide(&ints(&[1, 0])).as_f64(), f64::INFINITY);
        assert!(divide(&ints(&[0, 0])).as_f64().is_nan());
    }

    #[test]
    fn test_builtins_registry() {
        let ops = builtins();
        let names: Vec<&str> = ops.keys().map(String::as_str).collect();
        assert_eq!(names, BUILTIN_NAMES);
        assert!(builtin("pow").is_none());
        assert_eq!(ops["multiply"].apply(&ints(&[3, 3])), Number::Int(9));
    }
}
