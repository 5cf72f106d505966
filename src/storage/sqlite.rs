//! SQLite index implementation
//!
//! This module provides a SQLite-based implementation of the IndexStore trait.

use crate::storage::schema::initialize_schema;
use crate::storage::traits::{IndexError, IndexResult, IndexStore};
use crate::storage::{EntryKind, IndexEntry};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;

/// Columns selected by every lookup, in `IndexEntry` order
const ENTRY_COLUMNS: &str = "id, name, type, path";

/// SQLite index backend
pub struct SqliteIndex {
    conn: Connection,
}

/// A row as stored, before the type label is checked
type RawEntry = (i64, String, String, String);

impl SqliteIndex {
    /// Opens (or creates) the index database at `path`
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the `docSet.dsidx` file
    ///
    /// # Returns
    ///
    /// * `Ok(SqliteIndex)` - Successfully opened/created database
    /// * `Err(IndexError)` - Failed to open database
    pub fn open(path: &Path) -> IndexResult<Self> {
        let conn = Connection::open(path)?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Creates an in-memory database (for testing)
    pub fn new_in_memory() -> IndexResult<Self> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    fn read_raw(row: &Row<'_>) -> rusqlite::Result<RawEntry> {
        Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
    }

    fn into_entry((id, name, kind, path): RawEntry) -> IndexResult<IndexEntry> {
        let kind =
            EntryKind::from_db_string(&kind).ok_or(IndexError::UnknownKind { id, kind })?;
        Ok(IndexEntry {
            sequence_id: id,
            name,
            kind,
            path,
        })
    }

    fn find_one(&self, column: &str, value: &str) -> IndexResult<Option<IndexEntry>> {
        let sql = format!(
            "SELECT {} FROM searchIndex WHERE {} = ?1 ORDER BY id LIMIT 1",
            ENTRY_COLUMNS, column
        );
        let raw = self
            .conn
            .query_row(&sql, params![value], Self::read_raw)
            .optional()?;
        raw.map(Self::into_entry).transpose()
    }
}

impl IndexStore for SqliteIndex {
    fn insert(&mut self, entry: &IndexEntry) -> IndexResult<()> {
        self.conn.execute(
            "INSERT INTO searchIndex (id, name, type, path) VALUES (?1, ?2, ?3, ?4)",
            params![
                entry.sequence_id,
                entry.name,
                entry.kind.dir_name(),
                entry.path
            ],
        )?;
        Ok(())
    }

    fn clear(&mut self) -> IndexResult<()> {
        self.conn.execute("DELETE FROM searchIndex", [])?;
        Ok(())
    }

    fn find_by_name(&self, name: &str) -> IndexResult<Option<IndexEntry>> {
        self.find_one("name", name)
    }

    fn find_by_path(&self, path: &str) -> IndexResult<Option<IndexEntry>> {
        self.find_one("path", path)
    }

    fn entries(&self) -> IndexResult<Vec<IndexEntry>> {
        let sql = format!("SELECT {} FROM searchIndex ORDER BY id", ENTRY_COLUMNS);
        let mut stmt = self.conn.prepare(&sql)?;

        let rows = stmt
            .query_map([], Self::read_raw)?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter().map(Self::into_entry).collect()
    }
}
