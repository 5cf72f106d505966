//! Storage module for the docset search index
//!
//! This module handles the persistent index mapping symbols to saved pages:
//! - The `searchIndex` schema read by docset viewers
//! - The `IndexStore` interface shared by the catalog builder and link rewriter
//! - A SQLite-backed implementation of that interface

mod schema;
mod sqlite;
mod traits;

pub use sqlite::SqliteIndex;
pub use traits::{IndexError, IndexResult, IndexStore};

use std::fmt;

/// Kind of a saved page, which is also the directory it is saved under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Category,
    Constant,
    Enum,
    Struct,
    Function,
}

impl EntryKind {
    /// Every kind, in the order their directories are processed
    pub const ALL: [EntryKind; 5] = [
        Self::Category,
        Self::Constant,
        Self::Enum,
        Self::Struct,
        Self::Function,
    ];

    /// Maps a heading of the symbol listing to the kind of its symbols
    ///
    /// Headings outside the known set share the `Category` directory.
    pub fn from_heading(heading: &str) -> Self {
        match heading {
            "Hints" => Self::Constant,
            "Enumerations" => Self::Enum,
            "Structures" => Self::Struct,
            "Functions" => Self::Function,
            _ => Self::Category,
        }
    }

    /// The directory name, which doubles as the `type` column value
    pub fn dir_name(&self) -> &'static str {
        match self {
            Self::Category => "Category",
            Self::Constant => "Constant",
            Self::Enum => "Enum",
            Self::Struct => "Struct",
            Self::Function => "Function",
        }
    }

    pub fn from_db_string(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.dir_name() == s)
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// One row of the search index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    /// Discovery order, starting at 0
    pub sequence_id: i64,
    pub name: String,
    pub kind: EntryKind,
    /// `<Kind>/<file>.html`, relative to the documents directory
    pub path: String,
}

impl IndexEntry {
    pub fn new(sequence_id: i64, name: impl Into<String>, kind: EntryKind, file_name: &str) -> Self {
        Self {
            sequence_id,
            name: name.into(),
            kind,
            path: format!("{}/{}", kind.dir_name(), file_name),
        }
    }
}
