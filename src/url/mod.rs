//! URL handling module for sdl-docset
//!
//! This module splits hrefs found in saved pages into path and fragment and
//! derives the local file names pages are saved under.

mod resolve;

// Re-export main functions
pub use resolve::{is_site_relative, page_file_name, parse_href, HrefTarget};
