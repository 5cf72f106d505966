//! Link rewriting
//!
//! Saved pages still link to the wiki (`/SDL_Init`, `/CategoryAudio#x`). Once
//! every page is saved and indexed, this pass points those links at the local
//! copies instead.

use crate::config::SourceConfig;
use crate::crawler::parse_selector;
use crate::output::layout::DocsetLayout;
use crate::storage::{EntryKind, IndexEntry, IndexStore};
use crate::url::{parse_href, HrefTarget};
use crate::{DocsetError, Result};
use scraper::{Html, Node, Selector};
use std::fs;
use std::path::Path;

/// Prefix for links written into pages one directory below the root
const PARENT_DIR: &str = "../";

/// Which links are rewritten and how they are looked up
#[derive(Debug, Clone)]
pub struct RewriteRules {
    /// Paths starting with this are looked up by symbol name
    pub symbol_prefix: String,
    /// Paths starting with this are looked up as category pages
    pub category_prefix: String,
}

impl RewriteRules {
    pub fn from_source(source: &SourceConfig) -> Self {
        Self {
            symbol_prefix: source.symbol_prefix.clone(),
            category_prefix: source.category_prefix.clone(),
        }
    }
}

/// Counters reported at the end of the pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteSummary {
    pub files_scanned: usize,
    pub files_changed: usize,
    pub links_rewritten: usize,
}

/// Rewrites wiki links in saved pages into local relative links
pub struct LinkRewriter<'a> {
    index: &'a dyn IndexStore,
    layout: &'a DocsetLayout,
    rules: RewriteRules,
    anchors: Selector,
}

impl<'a> LinkRewriter<'a> {
    pub fn new(
        index: &'a dyn IndexStore,
        layout: &'a DocsetLayout,
        rules: RewriteRules,
    ) -> Result<Self> {
        let anchors = parse_selector("a[href]", &layout.root().display().to_string())?;
        Ok(Self {
            index,
            layout,
            rules,
            anchors,
        })
    }

    /// Rewrites the root page, then every saved page
    pub fn rewrite_all(&self) -> Result<RewriteSummary> {
        let mut files = vec![(self.layout.root_page_path(), true)];
        files.extend(
            self.layout
                .saved_pages()?
                .into_iter()
                .map(|path| (path, false)),
        );

        let mut summary = RewriteSummary::default();
        for (i, (path, is_root)) in files.iter().enumerate() {
            let rewritten = self.rewrite_file(path, *is_root)?;

            summary.files_scanned += 1;
            if rewritten > 0 {
                summary.files_changed += 1;
                summary.links_rewritten += rewritten;
            }

            if (i + 1) % 100 == 0 {
                tracing::info!("Progress: {}/{} files relinked", i + 1, files.len());
            }
        }

        Ok(summary)
    }

    /// Rewrites the links of one file
    ///
    /// The file is only written back when at least one link changed.
    ///
    /// # Returns
    ///
    /// The number of rewritten links
    pub fn rewrite_file(&self, path: &Path, is_root: bool) -> Result<usize> {
        let content = fs::read_to_string(path).map_err(|e| DocsetError::filesystem(path, e))?;
        let mut document = Html::parse_document(&content);

        let rewritten = self.rewrite_document(&mut document, is_root)?;
        if rewritten > 0 {
            fs::write(path, document.html()).map_err(|e| DocsetError::filesystem(path, e))?;
            tracing::debug!("{}: {} links rewritten", path.display(), rewritten);
        }

        Ok(rewritten)
    }

    /// Rewrites the links of a parsed document in place
    pub fn rewrite_document(&self, document: &mut Html, is_root: bool) -> Result<usize> {
        let mut rewrites = Vec::new();
        for anchor in document.select(&self.anchors) {
            let Some(href) = anchor.value().attr("href") else {
                continue;
            };
            if let Some(local) = self.local_href(href, is_root)? {
                rewrites.push((anchor.id(), local));
            }
        }

        for (id, local) in &rewrites {
            if let Some(mut node) = document.tree.get_mut(*id) {
                if let Node::Element(element) = node.value() {
                    for (name, value) in element.attrs.iter_mut() {
                        if &*name.local == "href" {
                            *value = local.as_str().into();
                        }
                    }
                }
            }
        }

        Ok(rewrites.len())
    }

    /// Computes the local replacement of an href, if it has one
    ///
    /// The href is matched on its own path, never resolved against the wiki.
    /// The replacement always carries `#` and the original fragment, which
    /// may be empty. Returns `Ok(None)` for links that do not point at an
    /// indexed page.
    pub fn local_href(&self, href: &str, is_root: bool) -> Result<Option<String>> {
        let Some(target) = parse_href(href) else {
            return Ok(None);
        };
        let Some(entry) = self.lookup(&target)? else {
            tracing::trace!("no index entry for {}", href);
            return Ok(None);
        };

        let prefix = if is_root { "" } else { PARENT_DIR };

        Ok(Some(format!("{}{}#{}", prefix, entry.path, target.fragment)))
    }

    fn lookup(&self, target: &HrefTarget) -> Result<Option<IndexEntry>> {
        if target.path.starts_with(&self.rules.symbol_prefix) {
            let name = target.path.strip_prefix('/').unwrap_or(&target.path);
            Ok(self.index.find_by_name(name)?)
        } else if target.path.starts_with(&self.rules.category_prefix) {
            let path = format!("{}{}.html", EntryKind::Category.dir_name(), target.path);
            Ok(self.index.find_by_path(&path)?)
        } else {
            Ok(None)
        }
    }
}
