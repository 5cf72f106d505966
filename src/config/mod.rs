//! Configuration module for sdl-docset
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key has a default, so a build runs without any file at all.
//!
//! # Example
//!
//! ```no_run
//! use sdl_docset::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("docset.toml")).unwrap();
//! println!("Building {} from {}", config.docset.title, config.source.base_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, DocsetConfig, SourceConfig};

// Re-export parser functions
pub use parser::{load_config, load_config_or_default, parse_config};
pub use validation::validate;
