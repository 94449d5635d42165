//! Crawler module for word-frequency crawling
//!
//! This module contains the core crawling logic, including:
//! - The page fetch capability and its HTTP implementation
//! - HTML parsing into word counts and links
//! - Recursive, concurrent crawl tasks over shared state
//! - Ranking of the accumulated words
//! - The crawl engine tying these together

mod engine;
mod fetcher;
mod parser;
mod ranking;
mod result;
mod task;

pub use engine::WebCrawler;
pub use fetcher::{build_http_client, HttpPageFetcher, PageContent, PageFetcher};
pub use parser::{parse_html, ParsedPage};
pub use ranking::rank_words;
pub use result::CrawlResult;
