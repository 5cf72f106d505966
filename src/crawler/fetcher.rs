//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests of a build:
//! - Building the HTTP client with the configured user agent
//! - GET requests for wiki pages, parsed into a mutable HTML tree
//! - Error classification (transport failure vs. HTTP status)

use crate::config::CrawlerConfig;
use crate::{DocsetError, Result};
use reqwest::Client;
use scraper::Html;
use std::time::Duration;

/// Builds an HTTP client with proper configuration
///
/// No request timeout is set unless the configuration asks for one.
///
/// # Example
///
/// ```no_run
/// use sdl_docset::config::CrawlerConfig;
/// use sdl_docset::crawler::build_http_client;
///
/// let client = build_http_client(&CrawlerConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &CrawlerConfig) -> std::result::Result<Client, reqwest::Error> {
    let mut builder = Client::builder()
        .user_agent(config.user_agent.clone())
        .gzip(true)
        .brotli(true);

    if let Some(secs) = config.request_timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }

    builder.build()
}

/// Fetches a page and parses it into an HTML document
///
/// There is no retry: every failure is reported to the caller, which aborts
/// the build.
///
/// | Condition | Result |
/// |-----------|--------|
/// | Connection / TLS / timeout failure | `DocsetError::Fetch` |
/// | Non-2xx status | `DocsetError::HttpStatus` |
/// | Body cannot be read or decoded | `DocsetError::Fetch` |
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The absolute URL to fetch
pub async fn fetch_document(client: &Client, url: &str) -> Result<Html> {
    tracing::debug!("GET {}", url);

    let response = client.get(url).send().await.map_err(|source| DocsetError::Fetch {
        url: url.to_string(),
        source,
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(DocsetError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.text().await.map_err(|source| DocsetError::Fetch {
        url: url.to_string(),
        source,
    })?;

    tracing::trace!("{} returned {} bytes", url, body.len());

    Ok(Html::parse_document(&body))
}
