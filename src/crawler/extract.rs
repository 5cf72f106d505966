//! Landmark extraction
//!
//! Every wiki page keeps its content in a single container element. This
//! module finds that container and trims the footer the wiki appends after
//! the last horizontal rule.

use crate::{DocsetError, Result};
use scraper::{ElementRef, Html, Selector};

/// Parses a CSS selector, reporting failures against the page being processed
pub(crate) fn parse_selector(css: &str, url: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| DocsetError::HtmlParse {
        url: url.to_string(),
        message: format!("invalid selector '{}': {}", css, e),
    })
}

/// Finds the landmark container of a page
///
/// A missing landmark usually means the wiki served its anti-scraping
/// challenge instead of the page.
pub fn find_landmark<'a>(
    document: &'a Html,
    landmark: &Selector,
    landmark_css: &str,
    url: &str,
) -> Result<ElementRef<'a>> {
    document
        .select(landmark)
        .next()
        .ok_or_else(|| DocsetError::MissingLandmark {
            url: url.to_string(),
            selector: landmark_css.to_string(),
        })
}

/// Extracts the sanitized fragment of a page
///
/// The last `hr` inside the landmark and every sibling following it are
/// removed from the document. Without any `hr` the content is returned as is.
///
/// # Arguments
///
/// * `document` - The parsed page; trimmed nodes are detached from it
/// * `landmark_css` - Selector of the content container
/// * `url` - The page URL, for error reporting
///
/// # Returns
///
/// The inner HTML of the (possibly trimmed) container
pub fn extract_fragment(document: &mut Html, landmark_css: &str, url: &str) -> Result<String> {
    let landmark = parse_selector(landmark_css, url)?;
    let rule = parse_selector("hr", url)?;

    let (container_id, doomed) = {
        let container = find_landmark(document, &landmark, landmark_css, url)?;
        let doomed: Vec<_> = match container.select(&rule).last() {
            Some(last_rule) => std::iter::once(last_rule.id())
                .chain(last_rule.next_siblings().map(|sibling| sibling.id()))
                .collect(),
            None => Vec::new(),
        };
        (container.id(), doomed)
    };

    if !doomed.is_empty() {
        tracing::trace!("trimming {} trailing nodes from {}", doomed.len(), url);
    }

    for id in doomed {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
        }
    }

    let container = document
        .tree
        .get(container_id)
        .and_then(ElementRef::wrap)
        .ok_or_else(|| DocsetError::MissingLandmark {
            url: url.to_string(),
            selector: landmark_css.to_string(),
        })?;

    Ok(container.inner_html())
}
