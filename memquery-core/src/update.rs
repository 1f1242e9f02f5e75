// src/update.rs
//! The mutator: rewrites a stored document per an update document.
//!
//! Two dialects exist. A replacement-style update (no top-level `$` key)
//! merges its pairs into the document's top level. An operator-style update
//! applies `$set` / `$unset` / `$inc` / `$mul` in iteration order. Shape
//! problems (mixed dialects, unknown operators, malformed paths, wrong
//! operand types) are rejected up front with the document untouched; a
//! numeric type conflict during `$inc`/`$mul` surfaces mid-application and
//! leaves earlier operators applied.

use serde_json::{Map, Value};

use crate::document::Document;
use crate::error::{MemQueryError, Result};
use crate::path;
use crate::value_utils::kind_name;

/// The two update dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateStyle {
    /// Top-level merge: each pair overwrites the named field.
    Replace,
    /// `$set` / `$unset` / `$inc` / `$mul` application.
    Operators,
}

const UPDATE_OPERATORS: [&str; 4] = ["$set", "$unset", "$inc", "$mul"];

#[derive(Clone, Copy)]
enum ArithOp {
    Inc,
    Mul,
}

impl ArithOp {
    fn name(self) -> &'static str {
        match self {
            ArithOp::Inc => "$inc",
            ArithOp::Mul => "$mul",
        }
    }
}

/// Pre-flight validation: dialect, operator names, argument shapes and
/// field paths. Performs no mutation.
pub fn validate_update(update: &Value) -> Result<UpdateStyle> {
    let entries = update.as_object().ok_or_else(|| {
        MemQueryError::InvalidUpdate(format!(
            "update must be an object, got {}",
            kind_name(update)
        ))
    })?;

    let operator_keys = entries.keys().filter(|key| key.starts_with('$')).count();
    if operator_keys == 0 {
        return Ok(UpdateStyle::Replace);
    }
    if operator_keys != entries.len() {
        return Err(MemQueryError::InvalidUpdate(
            "update mixes operators with replacement fields".to_string(),
        ));
    }

    for (operator, argument) in entries {
        if !UPDATE_OPERATORS.contains(&operator.as_str()) {
            return Err(MemQueryError::InvalidUpdate(format!(
                "unknown update operator '{}'",
                operator
            )));
        }
        let fields = argument.as_object().ok_or_else(|| {
            MemQueryError::InvalidUpdate(format!(
                "{} requires an object argument, got {}",
                operator,
                kind_name(argument)
            ))
        })?;
        for (field_path, operand) in fields {
            path::validate_update_path(field_path)?;
            if matches!(operator.as_str(), "$inc" | "$mul") && !operand.is_number() {
                return Err(MemQueryError::InvalidUpdate(format!(
                    "{} requires a numeric operand for '{}', got {}",
                    operator,
                    field_path,
                    kind_name(operand)
                )));
            }
        }
    }
    Ok(UpdateStyle::Operators)
}

/// Apply `update` to `document`. Validation runs first, so a malformed
/// update leaves the document untouched.
pub fn apply_update(document: &mut Document, update: &Value) -> Result<()> {
    let style = validate_update(update)?;
    let entries = match update {
        Value::Object(entries) => entries,
        _ => unreachable!("validate_update accepts objects only"),
    };

    match style {
        UpdateStyle::Replace => {
            for (field, value) in entries {
                document.set(field.clone(), value.clone());
            }
        }
        UpdateStyle::Operators => {
            for (operator, argument) in entries {
                let fields = match argument {
                    Value::Object(fields) => fields,
                    _ => unreachable!("validate_update checks operator arguments"),
                };
                match operator.as_str() {
                    "$set" => apply_set(document, fields)?,
                    "$unset" => apply_unset(document, fields)?,
                    "$inc" => apply_arith(document, fields, ArithOp::Inc)?,
                    "$mul" => apply_arith(document, fields, ArithOp::Mul)?,
                    _ => unreachable!("validate_update checks operator names"),
                }
            }
        }
    }
    Ok(())
}

fn apply_set(document: &mut Document, fields: &Map<String, Value>) -> Result<()> {
    for (field_path, value) in fields {
        let (slot, _) = path::slot_mut(document.fields_mut(), field_path)?;
        *slot = value.clone();
    }
    Ok(())
}

fn apply_unset(document: &mut Document, fields: &Map<String, Value>) -> Result<()> {
    // Operand values are ignored; only the paths matter.
    for field_path in fields.keys() {
        path::remove_slot(document.fields_mut(), field_path)?;
    }
    Ok(())
}

fn apply_arith(document: &mut Document, fields: &Map<String, Value>, op: ArithOp) -> Result<()> {
    for (field_path, operand) in fields {
        let delta = operand.as_f64().ok_or_else(|| {
            MemQueryError::InvalidUpdate(format!(
                "{} requires a numeric operand for '{}'",
                op.name(),
                field_path
            ))
        })?;

        let (slot, existed) = path::slot_mut(document.fields_mut(), field_path)?;
        if !existed {
            *slot = match op {
                ArithOp::Inc => operand.clone(),
                ArithOp::Mul => Value::from(0),
            };
            continue;
        }

        let current = slot.as_f64().ok_or_else(|| {
            MemQueryError::UpdateTypeMismatch(format!(
                "cannot apply {} to non-numeric field '{}' ({})",
                op.name(),
                field_path,
                kind_name(slot)
            ))
        })?;
        let next = match op {
            ArithOp::Inc => current + delta,
            ArithOp::Mul => current * delta,
        };
        *slot = Value::from(next);
    }
    Ok(())
}
