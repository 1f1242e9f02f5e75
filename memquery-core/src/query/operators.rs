// src/query/operators.rs
//! Field-operator implementations for the matcher.
//!
//! Each operator is a separate type behind the `FieldOperator` trait and is
//! dispatched through a registry keyed by name. An operator receives every
//! witness the queried path resolved to; it is satisfied when it holds for
//! at least one of them. With zero witnesses (the path is absent) nothing
//! is satisfied except `$exists: false`.

use lazy_static::lazy_static;
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::HashMap;

use crate::error::{MemQueryError, Result};
use crate::value_utils::{compare_values, equality_matches, kind_name};

/// A `$`-operator applied to one queried field path.
pub trait FieldOperator: Send + Sync {
    /// Operator name, e.g. `"$eq"`
    fn name(&self) -> &'static str;

    /// Evaluate the operator against the witnesses of the queried path.
    ///
    /// `witnesses` is empty when the path resolved to nothing. A wrong-typed
    /// `argument` is an error even then.
    fn matches(&self, witnesses: &[&Value], argument: &Value) -> Result<bool>;
}

/// `$eq`: array-aware equality; an array field also matches when it
/// contains an equal element.
pub struct EqOperator;

impl FieldOperator for EqOperator {
    fn name(&self) -> &'static str {
        "$eq"
    }

    fn matches(&self, witnesses: &[&Value], argument: &Value) -> Result<bool> {
        Ok(witnesses.iter().any(|w| equality_matches(w, argument)))
    }
}

/// `$ne`: negated array-aware equality.
pub struct NeOperator;

impl FieldOperator for NeOperator {
    fn name(&self) -> &'static str {
        "$ne"
    }

    fn matches(&self, witnesses: &[&Value], argument: &Value) -> Result<bool> {
        Ok(witnesses.iter().any(|w| !equality_matches(w, argument)))
    }
}

/// `$gt`: ordered comparison; incomparable operands never match.
pub struct GtOperator;

impl FieldOperator for GtOperator {
    fn name(&self) -> &'static str {
        "$gt"
    }

    fn matches(&self, witnesses: &[&Value], argument: &Value) -> Result<bool> {
        compare_any(witnesses, argument, |ord| ord == Ordering::Greater)
    }
}

/// `$gte`
pub struct GteOperator;

impl FieldOperator for GteOperator {
    fn name(&self) -> &'static str {
        "$gte"
    }

    fn matches(&self, witnesses: &[&Value], argument: &Value) -> Result<bool> {
        compare_any(witnesses, argument, |ord| {
            matches!(ord, Ordering::Greater | Ordering::Equal)
        })
    }
}

/// `$lt`
pub struct LtOperator;

impl FieldOperator for LtOperator {
    fn name(&self) -> &'static str {
        "$lt"
    }

    fn matches(&self, witnesses: &[&Value], argument: &Value) -> Result<bool> {
        compare_any(witnesses, argument, |ord| ord == Ordering::Less)
    }
}

/// `$lte`
pub struct LteOperator;

impl FieldOperator for LteOperator {
    fn name(&self) -> &'static str {
        "$lte"
    }

    fn matches(&self, witnesses: &[&Value], argument: &Value) -> Result<bool> {
        compare_any(witnesses, argument, |ord| {
            matches!(ord, Ordering::Less | Ordering::Equal)
        })
    }
}

/// `$in`: membership in the argument array, with array-aware equality per
/// member.
pub struct InOperator;

impl FieldOperator for InOperator {
    fn name(&self) -> &'static str {
        "$in"
    }

    fn matches(&self, witnesses: &[&Value], argument: &Value) -> Result<bool> {
        let allowed = expect_array(self.name(), argument)?;
        Ok(witnesses
            .iter()
            .any(|w| allowed.iter().any(|member| equality_matches(w, member))))
    }
}

/// `$nin`: no member of the argument array matches.
pub struct NinOperator;

impl FieldOperator for NinOperator {
    fn name(&self) -> &'static str {
        "$nin"
    }

    fn matches(&self, witnesses: &[&Value], argument: &Value) -> Result<bool> {
        let denied = expect_array(self.name(), argument)?;
        Ok(witnesses
            .iter()
            .any(|w| !denied.iter().any(|member| equality_matches(w, member))))
    }
}

/// `$exists`: whether resolution produced at least one witness.
pub struct ExistsOperator;

impl FieldOperator for ExistsOperator {
    fn name(&self) -> &'static str {
        "$exists"
    }

    fn matches(&self, witnesses: &[&Value], argument: &Value) -> Result<bool> {
        match argument {
            Value::Bool(should_exist) => Ok(!witnesses.is_empty() == *should_exist),
            other => Err(MemQueryError::InvalidQuery(format!(
                "$exists requires a boolean argument, got {}",
                kind_name(other)
            ))),
        }
    }
}

lazy_static! {
    /// Registry of all field operators, keyed by operator name.
    ///
    /// Initialized once at startup and immutable thereafter; every
    /// implementation is `Send + Sync`.
    pub static ref FIELD_OPERATORS: HashMap<&'static str, Box<dyn FieldOperator>> = {
        let mut registry: HashMap<&'static str, Box<dyn FieldOperator>> = HashMap::new();

        registry.insert("$eq", Box::new(EqOperator));
        registry.insert("$ne", Box::new(NeOperator));
        registry.insert("$gt", Box::new(GtOperator));
        registry.insert("$gte", Box::new(GteOperator));
        registry.insert("$lt", Box::new(LtOperator));
        registry.insert("$lte", Box::new(LteOperator));
        registry.insert("$in", Box::new(InOperator));
        registry.insert("$nin", Box::new(NinOperator));
        registry.insert("$exists", Box::new(ExistsOperator));

        registry
    };
}

/// Shared driver for `$gt` / `$gte` / `$lt` / `$lte`.
fn compare_any<F>(witnesses: &[&Value], argument: &Value, predicate: F) -> Result<bool>
where
    F: Fn(Ordering) -> bool,
{
    Ok(witnesses.iter().any(|w| {
        compare_values(w, argument)
            .map(&predicate)
            .unwrap_or(false)
    }))
}

fn expect_array<'a>(operator: &str, argument: &'a Value) -> Result<&'a Vec<Value>> {
    match argument {
        Value::Array(items) => Ok(items),
        other => Err(MemQueryError::InvalidQuery(format!(
            "{} requires an array argument, got {}",
            operator,
            kind_name(other)
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn witnesses(values: &[Value]) -> Vec<&Value> {
        values.iter().collect()
    }

    #[test]
    fn test_eq_scalar_and_array_element() {
        let op = EqOperator;
        let tags = [json!(["A", "B", "C"])];
        assert!(op.matches(&witnesses(&tags), &json!("B")).unwrap());
        assert!(!op.matches(&witnesses(&tags), &json!("D")).unwrap());

        let nested = [json!([["A", "B"], "C"])];
        assert!(op.matches(&witnesses(&nested), &json!(["A", "B"])).unwrap());
        assert!(!op.matches(&witnesses(&nested), &json!(["C", "D"])).unwrap());
    }

    #[test]
    fn test_eq_absent_path() {
        let op = EqOperator;
        assert!(!op.matches(&[], &json!(5)).unwrap());
    }

    #[test]
    fn test_ne_is_negated_eq() {
        let op = NeOperator;
        let value = [json!(20)];
        assert!(op.matches(&witnesses(&value), &json!(21)).unwrap());
        assert!(!op.matches(&witnesses(&value), &json!(20)).unwrap());
        // Absent path satisfies nothing.
        assert!(!op.matches(&[], &json!(20)).unwrap());
    }

    #[test]
    fn test_comparison_operators() {
        let value = [json!(25)];
        assert!(GtOperator.matches(&witnesses(&value), &json!(20)).unwrap());
        assert!(!GtOperator.matches(&witnesses(&value), &json!(25)).unwrap());
        assert!(GteOperator.matches(&witnesses(&value), &json!(25)).unwrap());
        assert!(LtOperator.matches(&witnesses(&value), &json!(30)).unwrap());
        assert!(LteOperator.matches(&witnesses(&value), &json!(25)).unwrap());
        assert!(!LteOperator.matches(&witnesses(&value), &json!(20)).unwrap());
    }

    #[test]
    fn test_comparison_strings_and_bools() {
        let value = [json!("b")];
        assert!(GtOperator.matches(&witnesses(&value), &json!("a")).unwrap());
        assert!(!GtOperator.matches(&witnesses(&value), &json!("c")).unwrap());

        let flag = [json!(true)];
        assert!(GtOperator.matches(&witnesses(&flag), &json!(false)).unwrap());
    }

    #[test]
    fn test_comparison_incompatible_types_never_match() {
        let value = [json!("10")];
        assert!(!GtOperator.matches(&witnesses(&value), &json!(5)).unwrap());
        assert!(!LtOperator.matches(&witnesses(&value), &json!(5)).unwrap());
    }

    #[test]
    fn test_in_and_nin() {
        let city = [json!("NYC")];
        let allowed = json!(["NYC", "LA", "SF"]);
        assert!(InOperator.matches(&witnesses(&city), &allowed).unwrap());
        assert!(!NinOperator.matches(&witnesses(&city), &allowed).unwrap());

        let other = [json!("Chicago")];
        assert!(!InOperator.matches(&witnesses(&other), &allowed).unwrap());
        assert!(NinOperator.matches(&witnesses(&other), &allowed).unwrap());

        // Array fields match through their elements.
        let tags = [json!(["B", "X"])];
        assert!(InOperator.matches(&witnesses(&tags), &json!(["B"])).unwrap());
    }

    #[test]
    fn test_in_requires_array_argument() {
        let city = [json!("NYC")];
        let err = InOperator
            .matches(&witnesses(&city), &json!("NYC"))
            .unwrap_err();
        assert!(matches!(err, MemQueryError::InvalidQuery(_)));
        // The shape is checked even when the path is absent.
        assert!(NinOperator.matches(&[], &json!("NYC")).is_err());
    }

    #[test]
    fn test_exists() {
        let op = ExistsOperator;
        let value = [json!("anything")];
        assert!(op.matches(&witnesses(&value), &json!(true)).unwrap());
        assert!(!op.matches(&witnesses(&value), &json!(false)).unwrap());
        assert!(!op.matches(&[], &json!(true)).unwrap());
        assert!(op.matches(&[], &json!(false)).unwrap());
        assert!(op.matches(&[], &json!(1)).is_err());
    }

    #[test]
    fn test_registry_contains_all_operators() {
        for name in ["$eq", "$ne", "$gt", "$gte", "$lt", "$lte", "$in", "$nin", "$exists"] {
            let op = FIELD_OPERATORS.get(name).expect("registered operator");
            assert_eq!(op.name(), name);
        }
        assert!(FIELD_OPERATORS.get("$regex").is_none());
    }
}
