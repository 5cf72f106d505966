use serde::Deserialize;

/// Main configuration structure for a docset build
///
/// Every section is optional; a missing file or section falls back to the
/// values used for the SDL 2 wiki.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub source: SourceConfig,
    pub crawler: CrawlerConfig,
    pub docset: DocsetConfig,
}

/// Where the wiki lives and how its pages are laid out
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Origin every site-relative link is resolved against
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Page listing every API symbol grouped by kind
    #[serde(rename = "symbol-listing-path")]
    pub symbol_listing_path: String,

    /// Page listing the API categories, saved as the docset root page
    #[serde(rename = "category-listing-path")]
    pub category_listing_path: String,

    /// Selector of the content container on every wiki page
    #[serde(rename = "landmark-selector")]
    pub landmark_selector: String,

    /// Selector of the kind headings on the symbol listing
    #[serde(rename = "heading-selector")]
    pub heading_selector: String,

    /// Selector of the result blocks paired with the headings
    #[serde(rename = "results-selector")]
    pub results_selector: String,

    /// Selector of the category links on the category listing
    ///
    /// The listing keeps its categories in a table; a wider selector would
    /// also pick up site-relative navigation links inside the landmark.
    #[serde(rename = "category-link-selector")]
    pub category_link_selector: String,

    /// Path prefix identifying links to symbol pages
    #[serde(rename = "symbol-prefix")]
    pub symbol_prefix: String,

    /// Path prefix identifying links to category pages
    #[serde(rename = "category-prefix")]
    pub category_prefix: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://wiki.libsdl.org".to_string(),
            symbol_listing_path: "/CategoryAPI".to_string(),
            category_listing_path: "/APIByCategory".to_string(),
            landmark_selector: "#page".to_string(),
            heading_selector: "h2".to_string(),
            results_selector: ".searchresults".to_string(),
            category_link_selector: "td a".to_string(),
            symbol_prefix: "/SDL_".to_string(),
            category_prefix: "/Category".to_string(),
        }
    }
}

/// Request behaviour
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Seconds to wait after every page download (surge protection is harsh)
    #[serde(rename = "wait-secs")]
    pub wait_secs: u64,

    /// User agent sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Overall request timeout; the client default applies when unset
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: Option<u64>,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            wait_secs: 5,
            user_agent: format!("sdl-docset/{}", env!("CARGO_PKG_VERSION")),
            request_timeout_secs: None,
        }
    }
}

/// Output bundle configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DocsetConfig {
    /// The `<Name>.docset` directory to build
    #[serde(rename = "output-dir")]
    pub output_dir: String,

    /// Product name, used as the root page title and bundle name
    pub title: String,

    #[serde(rename = "bundle-identifier")]
    pub bundle_identifier: String,

    /// Keyword the viewer uses to scope searches to this docset
    #[serde(rename = "platform-family")]
    pub platform_family: String,
}

impl Default for DocsetConfig {
    fn default() -> Self {
        Self {
            output_dir: "SDL2.docset".to_string(),
            title: "SDL 2.0 API".to_string(),
            bundle_identifier: "sdl2".to_string(),
            platform_family: "sdl".to_string(),
        }
    }
}
