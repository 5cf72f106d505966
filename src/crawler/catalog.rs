//! Symbol catalog builder
//!
//! Walks the two wiki listing pages and saves every page they link to:
//! 1. The symbol listing, grouped under one heading per kind
//! 2. The category listing, which also becomes the docset root page
//!
//! Every saved page gets one index entry, numbered in discovery order.

use crate::config::Config;
use crate::crawler::extract::{extract_fragment, find_landmark, parse_selector};
use crate::crawler::fetcher::fetch_document;
use crate::output::{DocsetLayout, ROOT_PAGE};
use crate::storage::{EntryKind, IndexEntry, IndexStore};
use crate::url::{is_site_relative, page_file_name};
use crate::{DocsetError, Result};
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use url::Url;

/// Everything the catalog builder needs to know about the wiki
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub base_url: Url,
    pub symbol_listing_path: String,
    pub category_listing_path: String,
    pub landmark_selector: String,
    pub heading_selector: String,
    pub results_selector: String,
    pub category_link_selector: String,
    /// Title of the root page
    pub title: String,
    /// Pause after every page download
    pub delay: Duration,
}

impl CatalogConfig {
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            base_url: Url::parse(&config.source.base_url)?,
            symbol_listing_path: config.source.symbol_listing_path.clone(),
            category_listing_path: config.source.category_listing_path.clone(),
            landmark_selector: config.source.landmark_selector.clone(),
            heading_selector: config.source.heading_selector.clone(),
            results_selector: config.source.results_selector.clone(),
            category_link_selector: config.source.category_link_selector.clone(),
            title: config.docset.title.clone(),
            delay: Duration::from_secs(config.crawler.wait_secs),
        })
    }
}

/// A link found on a listing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLink {
    /// Visible anchor text
    pub name: String,
    pub href: String,
}

/// The links listed under one heading of the symbol listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolGroup {
    pub heading: String,
    pub kind: EntryKind,
    pub links: Vec<PageLink>,
}

/// Counts of saved pages per pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogSummary {
    pub symbols: usize,
    pub categories: usize,
}

/// Downloads and indexes every page listed on the wiki
pub struct CatalogBuilder<'a> {
    client: Client,
    index: &'a mut dyn IndexStore,
    layout: &'a DocsetLayout,
    config: CatalogConfig,
    next_id: i64,
}

impl<'a> CatalogBuilder<'a> {
    /// Creates a builder writing into `layout` and recording into `index`
    ///
    /// The index is expected to be empty; sequence ids start at 0.
    pub fn new(
        client: Client,
        index: &'a mut dyn IndexStore,
        layout: &'a DocsetLayout,
        config: CatalogConfig,
    ) -> Self {
        Self {
            client,
            index,
            layout,
            config,
            next_id: 0,
        }
    }

    /// Runs both discovery passes
    ///
    /// Stops at the first failure; pages saved so far stay on disk.
    pub async fn build(&mut self) -> Result<CatalogSummary> {
        let symbols = self.symbol_pass().await?;
        let categories = self.category_pass().await?;

        tracing::info!(
            "Catalog complete: {} symbol pages, {} category pages",
            symbols,
            categories
        );

        Ok(CatalogSummary {
            symbols,
            categories,
        })
    }

    /// Saves every symbol of the symbol listing
    async fn symbol_pass(&mut self) -> Result<usize> {
        let url = self.config.base_url.join(&self.config.symbol_listing_path)?;
        let document = fetch_document(&self.client, url.as_str()).await?;
        let groups = discover_symbol_groups(&document, &self.config, url.as_str())?;
        drop(document);

        let mut saved = 0;
        for group in groups {
            tracing::info!(
                "getting {} ({} pages -> {})",
                group.heading,
                group.links.len(),
                group.kind
            );

            for (i, link) in group.links.iter().enumerate() {
                self.download_page(group.kind, link).await?;
                saved += 1;
                tracing::debug!("[{}/{}] {}", i + 1, group.links.len(), link.name);
            }
        }

        Ok(saved)
    }

    /// Saves the category listing as the root page, then every category
    async fn category_pass(&mut self) -> Result<usize> {
        tracing::info!("getting categories");

        let url = self.config.base_url.join(&self.config.category_listing_path)?;
        let document = fetch_document(&self.client, url.as_str()).await?;
        let (root_html, links) = discover_category_links(&document, &self.config, url.as_str())?;
        drop(document);

        self.layout
            .write_page(ROOT_PAGE, &self.config.title, &root_html)?;

        for (i, link) in links.iter().enumerate() {
            self.download_page(EntryKind::Category, link).await?;
            tracing::debug!("[{}/{}] {}", i + 1, links.len(), link.name);
        }

        Ok(links.len())
    }

    /// Fetches, sanitizes, saves and indexes one page, then waits
    async fn download_page(&mut self, kind: EntryKind, link: &PageLink) -> Result<IndexEntry> {
        let url = self.config.base_url.join(&link.href)?;
        let file_name = page_file_name(&url).ok_or_else(|| DocsetError::HtmlParse {
            url: url.to_string(),
            message: format!("link '{}' has no page name", link.href),
        })?;

        let fragment = {
            let mut document = fetch_document(&self.client, url.as_str()).await?;
            extract_fragment(&mut document, &self.config.landmark_selector, url.as_str())?
        };

        let entry = IndexEntry::new(self.next_id, link.name.as_str(), kind, &file_name);
        self.layout.write_page(&entry.path, &link.name, &fragment)?;
        self.index.insert(&entry)?;
        self.next_id += 1;

        tokio::time::sleep(self.config.delay).await;

        Ok(entry)
    }
}

/// Finds the symbol groups of the symbol listing
///
/// The n-th heading of the landmark names the kind of the links in the n-th
/// results block.
pub fn discover_symbol_groups(
    document: &Html,
    config: &CatalogConfig,
    url: &str,
) -> Result<Vec<SymbolGroup>> {
    let landmark = parse_selector(&config.landmark_selector, url)?;
    let heading_selector = parse_selector(&config.heading_selector, url)?;
    let results_selector = parse_selector(&config.results_selector, url)?;
    let anchor = parse_selector("a[href]", url)?;

    let page = find_landmark(document, &landmark, &config.landmark_selector, url)?;
    let headings: Vec<_> = page.select(&heading_selector).collect();
    let blocks: Vec<_> = page.select(&results_selector).collect();

    if headings.len() != blocks.len() {
        tracing::warn!(
            "{}: {} headings but {} result blocks",
            url,
            headings.len(),
            blocks.len()
        );
    }

    let groups = headings
        .into_iter()
        .zip(blocks)
        .map(|(heading, block)| {
            let heading = element_text(heading);
            SymbolGroup {
                kind: EntryKind::from_heading(&heading),
                heading,
                links: collect_links(block, &anchor, |_| true),
            }
        })
        .collect();

    Ok(groups)
}

/// Returns the landmark of the category listing and the category links in it
///
/// Only site-relative links are categories; links leaving the wiki are kept
/// in the root page but not downloaded.
pub fn discover_category_links(
    document: &Html,
    config: &CatalogConfig,
    url: &str,
) -> Result<(String, Vec<PageLink>)> {
    let landmark = parse_selector(&config.landmark_selector, url)?;
    let link_selector = parse_selector(&config.category_link_selector, url)?;

    let page = find_landmark(document, &landmark, &config.landmark_selector, url)?;
    let links = collect_links(page, &link_selector, is_site_relative);

    Ok((page.inner_html(), links))
}

/// Collects the anchors under `root` whose href passes `keep`
fn collect_links(
    root: ElementRef<'_>,
    anchor: &Selector,
    keep: impl Fn(&str) -> bool,
) -> Vec<PageLink> {
    root.select(anchor)
        .filter_map(|a| {
            let href = a.value().attr("href")?;
            keep(href).then(|| PageLink {
                name: element_text(a),
                href: href.to_string(),
            })
        })
        .collect()
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
