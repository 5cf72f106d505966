//! Output module for the docset bundle
//!
//! This module handles:
//! - The on-disk layout of the bundle and page files
//! - The bundle metadata (`Info.plist`)
//! - Rewriting wiki links in saved pages to local paths

mod layout;
mod plist;
mod relink;

pub use layout::{document_shell, DocsetLayout, ROOT_PAGE};
pub use plist::{render_info_plist, write_info_plist, BundleInfo};
pub use relink::{LinkRewriter, RewriteRules, RewriteSummary};

use crate::config::DocsetConfig;

/// Escapes text for HTML element content and XML string values
pub(crate) fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

impl From<&DocsetConfig> for BundleInfo {
    fn from(config: &DocsetConfig) -> Self {
        Self {
            identifier: config.bundle_identifier.clone(),
            name: config.title.clone(),
            platform_family: config.platform_family.clone(),
        }
    }
}
