use crate::config::types::{Config, CrawlerConfig, DocsetConfig, SourceConfig};
use crate::ConfigError;
use scraper::Selector;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_source_config(&config.source)?;
    validate_crawler_config(&config.crawler)?;
    validate_docset_config(&config.docset)?;
    Ok(())
}

/// Validates the wiki location and page structure
fn validate_source_config(config: &SourceConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base_url: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base_url must use http or https, got '{}'",
            config.base_url
        )));
    }

    for (field, value) in [
        ("symbol_listing_path", &config.symbol_listing_path),
        ("category_listing_path", &config.category_listing_path),
        ("symbol_prefix", &config.symbol_prefix),
        ("category_prefix", &config.category_prefix),
    ] {
        validate_site_path(field, value)?;
    }

    for (field, value) in [
        ("landmark_selector", &config.landmark_selector),
        ("heading_selector", &config.heading_selector),
        ("results_selector", &config.results_selector),
        ("category_link_selector", &config.category_link_selector),
    ] {
        validate_selector(field, value)?;
    }

    Ok(())
}

/// Validates request behaviour
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    // wait_secs >= 0 is always true for u64, and zero is allowed

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    if config.request_timeout_secs == Some(0) {
        return Err(ConfigError::Validation(
            "request_timeout_secs must be >= 1 when set".to_string(),
        ));
    }

    Ok(())
}

/// Validates output bundle configuration
fn validate_docset_config(config: &DocsetConfig) -> Result<(), ConfigError> {
    if config.output_dir.is_empty() {
        return Err(ConfigError::Validation(
            "output_dir cannot be empty".to_string(),
        ));
    }

    if config.title.trim().is_empty() {
        return Err(ConfigError::Validation("title cannot be empty".to_string()));
    }

    if config.bundle_identifier.is_empty() {
        return Err(ConfigError::Validation(
            "bundle_identifier cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// A site path must be site-relative
fn validate_site_path(field: &str, value: &str) -> Result<(), ConfigError> {
    if !value.starts_with('/') || value.len() < 2 {
        return Err(ConfigError::Validation(format!(
            "{} must be a non-empty path starting with '/', got '{}'",
            field, value
        )));
    }
    Ok(())
}

fn validate_selector(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::InvalidSelector(format!(
            "{} cannot be empty",
            field
        )));
    }

    Selector::parse(value).map_err(|e| {
        ConfigError::InvalidSelector(format!("{} '{}': {}", field, value, e))
    })?;

    Ok(())
}
