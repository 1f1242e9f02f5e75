// src/database.rs
//! The registry: named collections behind one coarse lock.
//!
//! Every entry point takes the registry lock exactly once, so operations
//! are serialized against each other and each runs to completion; `find`
//! shares a read lock. Collections are created explicitly and never
//! destroyed by the engine.

use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;

use crate::collection::Collection;
use crate::error::{MemQueryError, Result};
use crate::log_debug;

/// An in-memory store of named collections.
///
/// Construct one handle per embedding (or per test); all state lives in
/// the handle and is dropped with it.
#[derive(Debug)]
pub struct Database {
    collections: RwLock<HashMap<String, Collection>>,
}

impl Database {
    /// Create an empty registry
    pub fn new() -> Self {
        Database {
            collections: RwLock::new(HashMap::new()),
        }
    }

    /// Create a collection if absent. Re-creating an existing name keeps
    /// the collection and its contents.
    pub fn create_collection(&self, name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(MemQueryError::InvalidName(
                "collection name must not be empty".to_string(),
            ));
        }
        let mut collections = self.collections.write();
        collections
            .entry(name.to_string())
            .or_insert_with(|| Collection::new(name.to_string()));
        log_debug!("collection '{}' ready", name);
        Ok(())
    }

    /// Handle to a registered collection
    pub fn collection(&self, name: &str) -> Result<CollectionHandle<'_>> {
        let collections = self.collections.read();
        if !collections.contains_key(name) {
            return Err(MemQueryError::CollectionNotFound(name.to_string()));
        }
        Ok(CollectionHandle {
            database: self,
            name: name.to_string(),
        })
    }

    /// Names of all registered collections, in no particular order
    pub fn collection_names(&self) -> Vec<String> {
        self.collections.read().keys().cloned().collect()
    }

    /// Append a document to the named collection
    pub fn insert(&self, name: &str, document: &Value) -> Result<()> {
        let mut collections = self.collections.write();
        named(&mut collections, name)?.insert(document)
    }

    /// Matching documents in insertion order, as owned snapshots
    pub fn find(&self, name: &str, query: &Value) -> Result<Vec<Value>> {
        let collections = self.collections.read();
        collections
            .get(name)
            .ok_or_else(|| MemQueryError::CollectionNotFound(name.to_string()))?
            .find(query)
    }

    /// Update every matching document; returns the matched count
    pub fn find_and_update(&self, name: &str, query: &Value, update: &Value) -> Result<u64> {
        let mut collections = self.collections.write();
        named(&mut collections, name)?.find_and_update(query, update)
    }

    /// Remove and return every matching document, in original order
    pub fn find_and_delete(&self, name: &str, query: &Value) -> Result<Vec<Value>> {
        let mut collections = self.collections.write();
        named(&mut collections, name)?.find_and_delete(query)
    }
}

fn named<'a>(
    collections: &'a mut HashMap<String, Collection>,
    name: &str,
) -> Result<&'a mut Collection> {
    collections
        .get_mut(name)
        .ok_or_else(|| MemQueryError::CollectionNotFound(name.to_string()))
}

impl Default for Database {
    fn default() -> Self {
        Self::new()
    }
}

/// Borrowed handle to one named collection.
///
/// The handle only remembers the name, mirroring the collection objects
/// host-language bindings hand out; every call goes back through the
/// registry lock.
#[derive(Debug)]
pub struct CollectionHandle<'a> {
    database: &'a Database,
    name: String,
}

impl CollectionHandle<'_> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn insert(&self, document: &Value) -> Result<()> {
        self.database.insert(&self.name, document)
    }

    pub fn find(&self, query: &Value) -> Result<Vec<Value>> {
        self.database.find(&self.name, query)
    }

    pub fn find_and_update(&self, query: &Value, update: &Value) -> Result<u64> {
        self.database.find_and_update(&self.name, query, update)
    }

    pub fn find_and_delete(&self, query: &Value) -> Result<Vec<Value>> {
        self.database.find_and_delete(&self.name, query)
    }
}
