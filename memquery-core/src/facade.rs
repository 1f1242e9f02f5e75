// src/facade.rs
//! Request dispatch for host-language embeddings.
//!
//! A request is a method name plus a JSON argument object; every response
//! is the envelope `{"value": V, "error": E}` with exactly one of the two
//! non-null (methods without a result answer with `true`). The envelope is
//! the stable contract consumed on the other side of a wire or FFI
//! boundary; errors cross it as their `Display` rendering, which names the
//! error kind.

use serde_json::{json, Value};

use crate::database::Database;
use crate::error::{MemQueryError, Result};
use crate::value_utils::kind_name;

/// Dispatch one request and wrap the outcome in the response envelope.
pub fn handle_request(database: &Database, method: &str, args: &Value) -> Value {
    match dispatch(database, method, args) {
        Ok(value) => json!({ "value": value, "error": null }),
        Err(error) => json!({ "value": null, "error": error.to_string() }),
    }
}

/// String-in/string-out variant for wire embeddings. Argument JSON that
/// fails to parse is reported through the envelope like any other error.
pub fn handle_request_json(database: &Database, method: &str, args: &str) -> String {
    let response = match serde_json::from_str::<Value>(args) {
        Ok(parsed) => handle_request(database, method, &parsed),
        Err(error) => {
            let error = MemQueryError::InvalidDocument(format!(
                "request arguments are not valid JSON: {}",
                error
            ));
            json!({ "value": null, "error": error.to_string() })
        }
    };
    response.to_string()
}

fn dispatch(database: &Database, method: &str, args: &Value) -> Result<Value> {
    match method {
        "create_collection" => {
            database.create_collection(string_arg(args, "name")?)?;
            Ok(Value::Bool(true))
        }
        "collection" => {
            // Existence probe; the handle itself does not cross the boundary.
            database.collection(string_arg(args, "name")?)?;
            Ok(Value::Bool(true))
        }
        "insert" => {
            database.insert(string_arg(args, "name")?, value_arg(args, "document")?)?;
            Ok(Value::Bool(true))
        }
        "find" => {
            let documents = database.find(string_arg(args, "name")?, value_arg(args, "query")?)?;
            Ok(Value::Array(documents))
        }
        "find_and_update" => {
            let updated = database.find_and_update(
                string_arg(args, "name")?,
                value_arg(args, "query")?,
                value_arg(args, "update")?,
            )?;
            Ok(json!(updated))
        }
        "find_and_delete" => {
            let documents =
                database.find_and_delete(string_arg(args, "name")?, value_arg(args, "query")?)?;
            Ok(Value::Array(documents))
        }
        other => Err(MemQueryError::InvalidDocument(format!(
            "unknown method '{}'",
            other
        ))),
    }
}

fn value_arg<'a>(args: &'a Value, field: &str) -> Result<&'a Value> {
    let object = args.as_object().ok_or_else(|| {
        MemQueryError::InvalidDocument(format!(
            "request arguments must be an object, got {}",
            kind_name(args)
        ))
    })?;
    object.get(field).ok_or_else(|| {
        MemQueryError::InvalidDocument(format!("missing argument '{}'", field))
    })
}

fn string_arg<'a>(args: &'a Value, field: &str) -> Result<&'a str> {
    value_arg(args, field)?.as_str().ok_or_else(|| {
        MemQueryError::InvalidDocument(format!("argument '{}' must be a string", field))
    })
}
