// memquery-core/src/error.rs
//! Error types shared across the engine.
//!
//! Malformed input (queries, updates, documents, names) is always reported
//! as an error to the caller; the matcher never folds a shape problem into
//! a plain non-match.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, MemQueryError>;

/// All failure kinds surfaced by the engine.
#[derive(Error, Debug)]
pub enum MemQueryError {
    /// Empty or otherwise unusable collection name.
    #[error("invalid collection name: {0}")]
    InvalidName(String),

    /// The named collection is not registered.
    #[error("collection not found: {0}")]
    CollectionNotFound(String),

    /// Input document is not a JSON object, or request JSON failed to parse.
    #[error("invalid document: {0}")]
    InvalidDocument(String),

    /// Query uses an unknown operator, a wrong-typed operator argument, or
    /// mixes operators with plain fields inside one condition.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// Update mixes replacement and operator styles, names an unknown
    /// operator, or addresses a malformed field path.
    #[error("invalid update: {0}")]
    InvalidUpdate(String),

    /// `$inc` / `$mul` applied to an existing non-numeric field.
    #[error("update type mismatch: {0}")]
    UpdateTypeMismatch(String),

    /// JSON encode/decode failure bubbled up from serde.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
