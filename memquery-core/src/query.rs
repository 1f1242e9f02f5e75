// src/query.rs
//! The matcher: evaluates a query document against a stored document.
//!
//! A query is a JSON object whose entries are AND-combined. An entry key is
//! either a logical operator (`$and`, `$or`, `$not`, `$nor`) or a dotted
//! field path; a path's condition is either an object made entirely of
//! field operators or a literal value tested with array-aware equality.
//!
//! Malformed queries are errors, never a plain non-match; an absent field
//! is a plain non-match, never an error.

pub mod operators;

use serde_json::Value;

use crate::document::Document;
use crate::error::{MemQueryError, Result};
use crate::path;
use crate::value_utils::{equality_matches, kind_name};

pub use operators::FieldOperator;

/// Evaluate `filter` against `document`. An empty filter matches every
/// document.
pub fn matches_filter(document: &Document, filter: &Value) -> Result<bool> {
    let entries = filter.as_object().ok_or_else(|| {
        MemQueryError::InvalidQuery(format!("query must be an object, got {}", kind_name(filter)))
    })?;

    for (key, condition) in entries {
        let holds = if key.starts_with('$') {
            match key.as_str() {
                "$and" => all_match(document, key, condition)?,
                "$or" => any_match(document, key, condition)?,
                "$nor" => !any_match(document, key, condition)?,
                "$not" => !matches_filter(document, sub_query(key, condition)?)?,
                unknown => {
                    return Err(MemQueryError::InvalidQuery(format!(
                        "unknown logical operator '{}'",
                        unknown
                    )))
                }
            }
        } else {
            field_condition_matches(document, key, condition)?
        };

        if !holds {
            return Ok(false);
        }
    }
    Ok(true)
}

fn all_match(document: &Document, operator: &str, condition: &Value) -> Result<bool> {
    for sub in sub_queries(operator, condition)? {
        if !matches_filter(document, sub)? {
            return Ok(false);
        }
    }
    Ok(true)
}

fn any_match(document: &Document, operator: &str, condition: &Value) -> Result<bool> {
    for sub in sub_queries(operator, condition)? {
        if matches_filter(document, sub)? {
            return Ok(true);
        }
    }
    Ok(false)
}

fn sub_queries<'a>(operator: &str, condition: &'a Value) -> Result<&'a Vec<Value>> {
    match condition {
        Value::Array(items) => Ok(items),
        other => Err(MemQueryError::InvalidQuery(format!(
            "{} requires an array of sub-queries, got {}",
            operator,
            kind_name(other)
        ))),
    }
}

fn sub_query<'a>(operator: &str, condition: &'a Value) -> Result<&'a Value> {
    if condition.is_object() {
        Ok(condition)
    } else {
        Err(MemQueryError::InvalidQuery(format!(
            "{} requires an object sub-query, got {}",
            operator,
            kind_name(condition)
        )))
    }
}

/// One `path: condition` entry. The condition is an operator object when
/// every key starts with `$`; a mix of operators and plain keys is
/// rejected; anything else is a literal equality test.
fn field_condition_matches(document: &Document, field_path: &str, condition: &Value) -> Result<bool> {
    let witnesses = path::resolve(document.fields(), field_path);

    if let Value::Object(entries) = condition {
        let operator_keys = entries.keys().filter(|key| key.starts_with('$')).count();
        if operator_keys > 0 {
            if operator_keys != entries.len() {
                return Err(MemQueryError::InvalidQuery(format!(
                    "condition for '{}' mixes operators with plain fields",
                    field_path
                )));
            }
            for (name, argument) in entries {
                let operator = operators::FIELD_OPERATORS.get(name.as_str()).ok_or_else(|| {
                    MemQueryError::InvalidQuery(format!("unknown field operator '{}'", name))
                })?;
                if !operator.matches(&witnesses, argument)? {
                    return Ok(false);
                }
            }
            return Ok(true);
        }
    }

    Ok(witnesses.iter().any(|w| equality_matches(w, condition)))
}
