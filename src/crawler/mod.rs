//! Crawler module for building a docset from the wiki
//!
//! This module contains the pipeline itself:
//! - HTTP fetching of wiki pages
//! - Landmark extraction and footer trimming
//! - Catalog building (download + index every listed page)
//! - Overall build coordination, ending with the link rewrite

mod catalog;
mod extract;
mod fetcher;

pub use catalog::{
    discover_category_links, discover_symbol_groups, CatalogBuilder, CatalogConfig,
    CatalogSummary, PageLink, SymbolGroup,
};
pub(crate) use extract::parse_selector;
pub use extract::{extract_fragment, find_landmark};
pub use fetcher::{build_http_client, fetch_document};

use crate::config::{validate, Config};
use crate::output::{
    write_info_plist, BundleInfo, DocsetLayout, LinkRewriter, RewriteRules, RewriteSummary,
};
use crate::storage::{IndexStore, SqliteIndex};
use crate::Result;

/// Outcome of a complete build
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub catalog: CatalogSummary,
    pub relink: RewriteSummary,
}

/// Runs a complete docset build
///
/// This is the main entry point for a build. It will:
/// 1. Reject an invalid configuration before touching the output
/// 2. Clear the page directories of the bundle and write `Info.plist`
/// 3. Empty the search index
/// 4. Download and index every listed page
/// 5. Rewrite wiki links in the saved pages to local paths
///
/// The link rewrite only starts once the index is complete. The first error
/// aborts the build and is returned as is; partial output is left in place.
///
/// # Arguments
///
/// * `config` - The build configuration
pub async fn build_docset(config: &Config) -> Result<BuildReport> {
    validate(config)?;

    let layout = DocsetLayout::new(&config.docset.output_dir);

    tracing::info!("Preparing {}", layout.root().display());
    layout.prepare()?;
    write_info_plist(&layout, &BundleInfo::from(&config.docset))?;

    let mut index = SqliteIndex::open(&layout.index_db_path())?;
    index.clear()?;

    let client = build_http_client(&config.crawler)?;
    let catalog = CatalogBuilder::new(
        client,
        &mut index,
        &layout,
        CatalogConfig::from_config(config)?,
    )
    .build()
    .await?;

    tracing::info!("fixing links");
    let rules = RewriteRules::from_source(&config.source);
    let relink = LinkRewriter::new(&index, &layout, rules)?.rewrite_all()?;

    tracing::info!(
        "Relinked {} of {} files ({} links)",
        relink.files_changed,
        relink.files_scanned,
        relink.links_rewritten
    );

    Ok(BuildReport { catalog, relink })
}
