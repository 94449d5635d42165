use crate::config::types::{Config, CrawlerConfig};
use crate::url::compile_full_match;
use crate::ConfigError;
use url::Url;

/// Schemes a start page may use
const SUPPORTED_SCHEMES: &[&str] = &["http", "https", "file"];

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_start_pages(&config.start_pages)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.popular_word_count < 1 {
        return Err(ConfigError::Validation(format!(
            "popular_word_count must be >= 1, got {}",
            config.popular_word_count
        )));
    }

    if config.parallelism < 1 {
        return Err(ConfigError::Validation(format!(
            "parallelism must be >= 1, got {}",
            config.parallelism
        )));
    }

    for pattern in config.ignored_urls.iter().chain(&config.ignored_words) {
        compile_full_match(pattern)?;
    }

    Ok(())
}

/// Validates that every start page is an absolute URL with a supported scheme
fn validate_start_pages(pages: &[String]) -> Result<(), ConfigError> {
    for page in pages {
        let url = Url::parse(page)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid start page '{}': {}", page, e)))?;

        if !SUPPORTED_SCHEMES.contains(&url.scheme()) {
            return Err(ConfigError::InvalidUrl(format!(
                "Start page '{}' uses unsupported scheme '{}'",
                page,
                url.scheme()
            )));
        }
    }

    Ok(())
}
