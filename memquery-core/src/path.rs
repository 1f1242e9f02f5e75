// src/path.rs
//! Dotted-path resolution.
//!
//! A path is a `.`-separated sequence of field names. Read resolution walks
//! objects and fans out across arrays, yielding zero or more witnesses; a
//! numeric segment is a field name, never an array index. Write resolution
//! addresses exactly one slot and refuses to descend into arrays.

use serde_json::{Map, Value};

use crate::error::{MemQueryError, Result};
use crate::value_utils::kind_name;

/// Resolve `path` against a document's fields, collecting every witness.
///
/// Missing segments contribute no witnesses. When a segment lands on an
/// array while segments remain, every element is resolved against the
/// remaining path, so `"item.name"` reaches into each element of an
/// `item` array.
pub fn resolve<'a>(fields: &'a Map<String, Value>, path: &str) -> Vec<&'a Value> {
    let mut witnesses = Vec::new();
    let segments: Vec<&str> = path.split('.').collect();
    if let Some((first, rest)) = segments.split_first() {
        if let Some(value) = fields.get(*first) {
            collect(value, rest, &mut witnesses);
        }
    }
    witnesses
}

fn collect<'a>(value: &'a Value, rest: &[&str], out: &mut Vec<&'a Value>) {
    if rest.is_empty() {
        out.push(value);
        return;
    }
    match value {
        Value::Object(map) => {
            if let Some(next) = map.get(rest[0]) {
                collect(next, &rest[1..], out);
            }
        }
        Value::Array(items) => {
            // The array sits where an object was expected: fan out and
            // resolve the remaining path against each element.
            for item in items {
                collect(item, rest, out);
            }
        }
        _ => {}
    }
}

/// Validate a path used on the write side: segments must be non-empty and
/// free of `$`.
pub fn validate_update_path(path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(MemQueryError::InvalidUpdate(
            "empty field path".to_string(),
        ));
    }
    for segment in path.split('.') {
        if segment.is_empty() {
            return Err(MemQueryError::InvalidUpdate(format!(
                "field path '{}' has an empty segment",
                path
            )));
        }
        if segment.contains('$') {
            return Err(MemQueryError::InvalidUpdate(format!(
                "field path '{}' must not contain '$'",
                path
            )));
        }
    }
    Ok(())
}

/// Walk to the slot named by `path`, creating missing intermediate objects
/// along the way. Returns the slot together with a flag telling whether it
/// held a value before the walk (a fresh slot is initialized to null).
///
/// Arrays are not addressable: a path that traverses an array, or any
/// other non-object intermediate, is rejected.
pub fn slot_mut<'a>(
    fields: &'a mut Map<String, Value>,
    path: &str,
) -> Result<(&'a mut Value, bool)> {
    let segments: Vec<&str> = path.split('.').collect();
    let (leaf, parents) = match segments.split_last() {
        Some(split) => split,
        None => {
            return Err(MemQueryError::InvalidUpdate(
                "empty field path".to_string(),
            ))
        }
    };

    let mut current = fields;
    for segment in parents {
        current = match current
            .entry((*segment).to_string())
            .or_insert_with(|| Value::Object(Map::new()))
        {
            Value::Object(map) => map,
            other => {
                return Err(MemQueryError::InvalidUpdate(format!(
                    "field path '{}' traverses a {} at '{}'",
                    path,
                    kind_name(other),
                    segment
                )))
            }
        };
    }

    let existed = current.contains_key(*leaf);
    let slot = current.entry((*leaf).to_string()).or_insert(Value::Null);
    Ok((slot, existed))
}

/// Remove the value at `path`. An unreachable path is a no-op; traversing
/// an array is still an error, because array elements are not addressable.
pub fn remove_slot(fields: &mut Map<String, Value>, path: &str) -> Result<Option<Value>> {
    let segments: Vec<&str> = path.split('.').collect();
    let (leaf, parents) = match segments.split_last() {
        Some(split) => split,
        None => {
            return Err(MemQueryError::InvalidUpdate(
                "empty field path".to_string(),
            ))
        }
    };

    let mut current = fields;
    for segment in parents {
        current = match current.get_mut(*segment) {
            Some(Value::Object(map)) => map,
            Some(Value::Array(_)) => {
                return Err(MemQueryError::InvalidUpdate(format!(
                    "field path '{}' traverses an array at '{}'",
                    path, segment
                )))
            }
            Some(_) | None => return Ok(None),
        };
    }
    Ok(current.remove(*leaf))
}
