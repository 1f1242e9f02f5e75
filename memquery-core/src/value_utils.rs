//! Value utility functions shared across modules
//!
//! Equality and ordering over JSON values. Numbers form a single 64-bit
//! floating domain here: `25` and `25.0` are the same value, which is what
//! the update operators produce when they rewrite integer fields.

use serde_json::Value;
use std::cmp::Ordering;

/// Deep structural equality with numeric folding.
///
/// - Numbers compare through `as_f64`
/// - Arrays compare element-wise, order-sensitive
/// - Objects compare key-wise, order-insensitive
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use memquery_core::value_utils::values_equal;
///
/// assert!(values_equal(&json!(25), &json!(25.0)));
/// assert!(values_equal(&json!({"a": 1, "b": 2}), &json!({"b": 2, "a": 1})));
/// assert!(!values_equal(&json!([1, 2]), &json!([2, 1])));
/// ```
pub fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_f64(), y.as_f64()) {
            (Some(fx), Some(fy)) => fx == fy,
            _ => x == y,
        },
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| values_equal(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(key, x)| ys.get(key).is_some_and(|y| values_equal(x, y)))
        }
        _ => a == b,
    }
}

/// Array-aware equality used by the matcher.
///
/// A candidate matches the expected value when they are deeply equal, or
/// when the candidate is an array containing a deeply equal element. The
/// element rule applies even when the expected value is itself an array,
/// so `[["A","B"],"C"]` matches an expected `["A","B"]`.
pub fn equality_matches(candidate: &Value, expected: &Value) -> bool {
    if values_equal(candidate, expected) {
        return true;
    }
    if let Value::Array(items) = candidate {
        return items.iter().any(|item| values_equal(item, expected));
    }
    false
}

/// Compare two JSON values.
///
/// Returns `Some(Ordering)` for comparable kinds (numbers, strings,
/// booleans), `None` for everything else. Comparison operators treat
/// incomparable operands as a non-match.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use std::cmp::Ordering;
/// use memquery_core::value_utils::compare_values;
///
/// assert_eq!(compare_values(&json!(10), &json!(5)), Some(Ordering::Greater));
/// assert_eq!(compare_values(&json!("a"), &json!("b")), Some(Ordering::Less));
/// assert_eq!(compare_values(&json!("a"), &json!(1)), None); // incomparable
/// ```
pub fn compare_values(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(n1), Value::Number(n2)) => {
            let f1 = n1.as_f64()?;
            let f2 = n2.as_f64()?;
            f1.partial_cmp(&f2)
        }
        (Value::String(s1), Value::String(s2)) => Some(s1.cmp(s2)),
        (Value::Bool(b1), Value::Bool(b2)) => Some(b1.cmp(b2)),
        _ => None,
    }
}

/// Human-readable name of a JSON value's kind, for error messages.
pub fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
