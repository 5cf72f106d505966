//! sdl-docset: an offline docset builder for the SDL wiki
//!
//! This crate crawls the SDL documentation wiki, saves a sanitized copy of
//! every API page, indexes it in a docset search index and rewrites the wiki
//! cross-references so the bundle can be browsed offline.

pub mod config;
pub mod crawler;
pub mod output;
pub mod storage;
pub mod url;

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for docset builds
///
/// Every variant is fatal: the pipeline stops at the first error and the
/// binary reports it before exiting.
#[derive(Debug, Error)]
pub enum DocsetError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Fetch { url: String, source: reqwest::Error },

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("HTTP status {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("HTML parse error for {url}: {message}")]
    HtmlParse { url: String, message: String },

    #[error("No {selector} in page {url}, surge protection active maybe?")]
    MissingLandmark { url: String, selector: String },

    #[error("Filesystem error at {}: {source}", path.display())]
    Filesystem {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Index error: {0}")]
    Index(#[from] storage::IndexError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),
}

impl DocsetError {
    /// Wraps an I/O error together with the path it happened on
    pub fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Filesystem {
            path: path.into(),
            source,
        }
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid selector in config: {0}")]
    InvalidSelector(String),
}

/// Result type alias for docset operations
pub type Result<T> = std::result::Result<T, DocsetError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{build_docset, BuildReport, CatalogBuilder, CatalogSummary};
pub use output::{DocsetLayout, LinkRewriter, RewriteSummary};
pub use storage::{EntryKind, IndexEntry, IndexStore, SqliteIndex};
