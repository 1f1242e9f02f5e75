// memquery-core/src/lib.rs
// In-memory document store with a MongoDB-inspired query and update language.
//
// Documents are JSON objects; collections are named, insertion-ordered
// sequences of documents; queries and updates are JSON documents
// interpreted by the matcher (`query`) and the mutator (`update`). All
// state is in-memory and dropped with the `Database` handle.

pub mod collection;
pub mod database;
pub mod document;
pub mod error;
pub mod facade;
pub mod logging;
pub mod path;
pub mod query;
pub mod update;
pub mod value_utils;

// Public exports
pub use collection::Collection;
pub use database::{CollectionHandle, Database};
pub use document::Document;
pub use error::{MemQueryError, Result};
pub use facade::{handle_request, handle_request_json};
pub use logging::{get_log_level, set_log_level, LogLevel, ParseLevelError};
pub use query::matches_filter;
pub use update::{apply_update, validate_update, UpdateStyle};
