// src/collection.rs
//! A named, insertion-ordered collection of documents.
//!
//! The collection owns its documents; `find` hands out deep-copied
//! snapshots, so callers can never mutate stored state through a result.

use serde_json::Value;

use crate::document::Document;
use crate::error::Result;
use crate::log_trace;
use crate::query;
use crate::update;

#[derive(Debug)]
pub struct Collection {
    name: String,
    documents: Vec<Document>,
}

impl Collection {
    /// Create an empty collection. Name rules are a registry concern;
    /// standalone collections accept any name.
    pub fn new(name: impl Into<String>) -> Self {
        Collection {
            name: name.into(),
            documents: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of stored documents
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Append a document; it becomes the last in iteration order.
    /// Non-object values are rejected.
    pub fn insert(&mut self, document: &Value) -> Result<()> {
        let document = Document::from_value(document)?;
        log_trace!("insert into '{}': {:?}", self.name, document);
        self.documents.push(document);
        Ok(())
    }

    /// Matching documents as owned snapshots, in insertion order.
    pub fn find(&self, query: &Value) -> Result<Vec<Value>> {
        let mut results = Vec::new();
        for document in &self.documents {
            if query::matches_filter(document, query)? {
                results.push(document.to_value());
            }
        }
        log_trace!(
            "find in '{}' matched {}/{} documents",
            self.name,
            results.len(),
            self.documents.len()
        );
        Ok(results)
    }

    /// Apply `update_doc` to every matching document in insertion order and
    /// return how many matched. A document counts as updated whenever it
    /// matched, whether or not the mutation changed any bytes.
    ///
    /// The update is validated and the matches are collected before any
    /// document is rewritten, so a malformed query or update mutates
    /// nothing. A numeric type conflict aborts the remaining documents and
    /// leaves the earlier ones updated.
    pub fn find_and_update(&mut self, query: &Value, update_doc: &Value) -> Result<u64> {
        update::validate_update(update_doc)?;
        let matched = self.matching_indices(query)?;
        for index in &matched {
            update::apply_update(&mut self.documents[*index], update_doc)?;
        }
        Ok(matched.len() as u64)
    }

    /// Remove every matching document and return exactly the removed ones,
    /// in original insertion order.
    pub fn find_and_delete(&mut self, query: &Value) -> Result<Vec<Value>> {
        let matched = self.matching_indices(query)?;
        let mut removed = Vec::with_capacity(matched.len());
        for index in matched.into_iter().rev() {
            removed.push(self.documents.remove(index));
        }
        removed.reverse();
        Ok(removed.into_iter().map(|doc| doc.to_value()).collect())
    }

    fn matching_indices(&self, query: &Value) -> Result<Vec<usize>> {
        let mut matched = Vec::new();
        for (index, document) in self.documents.iter().enumerate() {
            if query::matches_filter(document, query)? {
                matched.push(index);
            }
        }
        Ok(matched)
    }
}
