//! Crawl engine
//!
//! [`WebCrawler`] owns the crawl settings and drives one crawl per call: it computes the
//! deadline, builds a fresh [`CrawlContext`], runs one root task per start page on the tokio
//! runtime and ranks the merged word counts.

use crate::clock::Clock;
use crate::config::CrawlerConfig;
use crate::crawler::fetcher::PageFetcher;
use crate::crawler::ranking::rank_words;
use crate::crawler::result::CrawlResult;
use crate::crawler::task::{crawl_url, join_all, CrawlContext};
use crate::url::PatternSet;
use crate::ConfigError;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Parallel word-counting crawler
///
/// The number of pages fetched at once is `min(parallelism, available cores)`, fixed when
/// the crawler is built.
pub struct WebCrawler {
    clock: Arc<dyn Clock>,
    fetcher: Arc<dyn PageFetcher>,
    timeout: Duration,
    popular_word_count: usize,
    max_depth: u32,
    ignored_urls: Arc<PatternSet>,
    parallelism: usize,
    fetch_permits: Arc<Semaphore>,
}

impl WebCrawler {
    /// Creates a crawler from its configuration
    ///
    /// # Arguments
    ///
    /// * `config` - Depth, timeout, word count, parallelism and ignored URLs
    /// * `fetcher` - Fetches and parses pages; often a [`Profiled`](crate::profiler::Profiled)
    ///   stand-in
    /// * `clock` - Time source for the deadline
    ///
    /// # Returns
    ///
    /// * `Err(ConfigError)` - An ignored-URL pattern does not compile
    pub fn new(
        config: &CrawlerConfig,
        fetcher: Arc<dyn PageFetcher>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, ConfigError> {
        let ignored_urls = PatternSet::new(&config.ignored_urls)?;
        let parallelism = config.effective_parallelism();

        Ok(Self {
            clock,
            fetcher,
            timeout: config.timeout(),
            popular_word_count: config.popular_word_count,
            max_depth: config.max_depth,
            ignored_urls: Arc::new(ignored_urls),
            parallelism,
            fetch_permits: Arc::new(Semaphore::new(parallelism)),
        })
    }

    /// Number of pages this crawler fetches at once
    pub fn parallelism(&self) -> usize {
        self.parallelism
    }

    /// Crawls from `start_pages` and returns the visited count and the ranked words
    ///
    /// Never fails: pages that cannot be fetched contribute nothing, and a crawl that runs
    /// into its deadline returns whatever it gathered until then.
    pub async fn crawl(&self, start_pages: &[String]) -> CrawlResult {
        let deadline = self.clock.instant().checked_add(self.timeout);
        if deadline.is_none() {
            tracing::warn!(
                "Timeout {:?} is out of range, crawling without a deadline",
                self.timeout
            );
        }
        let context = Arc::new(CrawlContext::new(
            deadline,
            self.clock.clone(),
            self.fetcher.clone(),
            self.ignored_urls.clone(),
            self.fetch_permits.clone(),
        ));

        tracing::info!(
            "Crawling {} start pages (max depth {}, timeout {:?}, parallelism {})",
            start_pages.len(),
            self.max_depth,
            self.timeout,
            self.parallelism
        );

        let mut roots = JoinSet::new();
        for url in start_pages {
            roots.spawn(crawl_url(context.clone(), url.clone(), self.max_depth));
        }
        join_all(&mut roots).await;

        if deadline.map_or(false, |deadline| self.clock.instant() >= deadline) {
            tracing::info!("Crawl deadline reached, results may be partial");
        }

        let urls_visited = context.visited.len();
        let counts = context.word_counts();

        tracing::info!(
            "Visited {} URLs, found {} distinct words",
            urls_visited,
            counts.len()
        );

        if counts.is_empty() {
            return CrawlResult {
                word_counts: Vec::new(),
                urls_visited,
            };
        }

        CrawlResult {
            word_counts: rank_words(&counts, self.popular_word_count),
            urls_visited,
        }
    }
}
