// src/document.rs
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{MemQueryError, Result};
use crate::value_utils::kind_name;

/// A stored document: a top-level JSON object.
///
/// Documents carry no engine-assigned identifier and duplicates are
/// permitted; identity is positional (insertion order within a collection).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    fields: Map<String, Value>,
}

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Document { fields: Map::new() }
    }

    /// Build a document from a JSON value. Anything but an object is
    /// rejected: top-level arrays and scalars cannot be stored.
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Document {
                fields: map.clone(),
            }),
            other => Err(MemQueryError::InvalidDocument(format!(
                "document must be a JSON object, got {}",
                kind_name(other)
            ))),
        }
    }

    /// Build a document from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json).map_err(|e| {
            MemQueryError::InvalidDocument(format!("document is not valid JSON: {}", e))
        })?;
        Self::from_value(&value)
    }

    /// Owned JSON snapshot of the document
    pub fn to_value(&self) -> Value {
        Value::Object(self.fields.clone())
    }

    /// Serialize to a JSON string
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.fields)?)
    }

    /// Borrow the underlying field map (read path)
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Borrow the underlying field map mutably (write path)
    pub fn fields_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.fields
    }

    /// Top-level field lookup
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Set a top-level field, overwriting any existing value
    pub fn set(&mut self, field: String, value: Value) {
        self.fields.insert(field, value);
    }

    /// Remove a top-level field
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.fields.remove(field)
    }

    /// Whether the top-level field is present
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Number of top-level fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Document> for Value {
    fn from(doc: Document) -> Self {
        Value::Object(doc.fields)
    }
}
