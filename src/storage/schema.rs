//! Database schema definitions
//!
//! The table layout is the one docset viewers expect in `docSet.dsidx`.

/// SQL schema for the index database
pub const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS searchIndex (
    id INTEGER PRIMARY KEY,
    name TEXT,
    type TEXT,
    path TEXT
);

CREATE INDEX IF NOT EXISTS idx_search_name ON searchIndex(name);
CREATE INDEX IF NOT EXISTS idx_search_path ON searchIndex(path);
"#;

/// Initializes the database schema
///
/// # Arguments
///
/// * `conn` - The database connection
///
/// # Returns
///
/// * `Ok(())` - Schema initialized successfully
/// * `Err(rusqlite::Error)` - Failed to initialize schema
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}
