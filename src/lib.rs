//! Wordtide: a parallel word-frequency web crawler
//!
//! This crate crawls a graph of web pages from a set of seed URLs, visits each page at most
//! once, and aggregates word counts across every page it fetched. Crawling is bounded by a
//! link depth, a wall-clock deadline and a list of ignored URL patterns. Page fetches can be
//! wrapped by the [`profiler`] so their cost is measured without touching the callers.

pub mod clock;
pub mod config;
pub mod crawler;
pub mod output;
pub mod profiler;
pub mod url;

use thiserror::Error;

/// Main error type for Wordtide operations
#[derive(Debug, Error)]
pub enum CrawlerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    #[error("Interface {interface} declares no profiled operations")]
    NothingToProfile { interface: &'static str },
}

/// Errors raised while fetching or parsing a single page
///
/// These never leave a crawl task: the task logs them and treats the page as empty.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Unexpected status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Failed to read {url}: {source}")]
    Io { url: String, source: std::io::Error },

    #[error("Malformed URL {url}: {source}")]
    UrlParse {
        url: String,
        source: ::url::ParseError,
    },

    #[error("Unsupported URL scheme: {0}")]
    UnsupportedScheme(String),
}

/// Result type alias for Wordtide operations
pub type Result<T> = std::result::Result<T, CrawlerError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for page fetches
pub type FetchResult<T> = std::result::Result<T, FetchError>;

// Re-export commonly used types
pub use clock::{Clock, FakeClock, SystemClock};
pub use config::Config;
pub use crawler::{CrawlResult, HttpPageFetcher, PageContent, PageFetcher, WebCrawler};
pub use profiler::{Profiled, Profiler};
