//! Index store trait and error types
//!
//! This module defines the interface the pipeline uses to record and look up
//! saved pages, independent of the backing database.

use crate::storage::IndexEntry;
use thiserror::Error;

/// Errors that can occur during index operations
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Corrupt index row {id}: unknown type '{kind}'")]
    UnknownKind { id: i64, kind: String },
}

/// Result type for index operations
pub type IndexResult<T> = Result<T, IndexError>;

/// Trait for search index backends
///
/// Lookups are exact matches. A miss is `Ok(None)`, not an error. Names are
/// not unique; when several rows match, the earliest inserted one is returned.
pub trait IndexStore {
    /// Appends an entry
    fn insert(&mut self, entry: &IndexEntry) -> IndexResult<()>;

    /// Removes every entry
    fn clear(&mut self) -> IndexResult<()>;

    /// Finds an entry by symbol name
    fn find_by_name(&self, name: &str) -> IndexResult<Option<IndexEntry>>;

    /// Finds an entry by relative path
    fn find_by_path(&self, path: &str) -> IndexResult<Option<IndexEntry>>;

    /// Lists every entry in sequence order
    fn entries(&self) -> IndexResult<Vec<IndexEntry>>;
}
