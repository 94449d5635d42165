//! The recursive crawl task
//!
//! A crawl task handles one URL: it checks the depth budget, the deadline and the ignored-URL
//! patterns, waits for a fetch slot and checks the deadline again, claims the URL in the
//! shared visited set, fetches the page, merges its words
//! into the shared accumulator, then spawns one child task per outbound link and waits for
//! all of them. A task is only finished once its whole subtree is.

use crate::clock::Clock;
use crate::crawler::fetcher::{PageContent, PageFetcher};
use crate::url::PatternSet;
use dashmap::{DashMap, DashSet};
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// State shared by every task of a single crawl invocation
///
/// A fresh context is built for each call to
/// [`WebCrawler::crawl`](crate::crawler::WebCrawler::crawl) and never shared between calls.
pub(crate) struct CrawlContext {
    /// No task starts work at or after this instant; `None` when the timeout does not fit
    /// in an `Instant`
    pub deadline: Option<Instant>,

    /// URLs claimed by some task; first insert wins
    pub visited: DashSet<String>,

    /// Word -> total occurrences over every fetched page
    pub counts: DashMap<String, usize>,

    clock: Arc<dyn Clock>,
    fetcher: Arc<dyn PageFetcher>,
    ignored_urls: Arc<PatternSet>,
    fetch_permits: Arc<Semaphore>,
}

impl CrawlContext {
    pub fn new(
        deadline: Option<Instant>,
        clock: Arc<dyn Clock>,
        fetcher: Arc<dyn PageFetcher>,
        ignored_urls: Arc<PatternSet>,
        fetch_permits: Arc<Semaphore>,
    ) -> Self {
        Self {
            deadline,
            visited: DashSet::new(),
            counts: DashMap::new(),
            clock,
            fetcher,
            ignored_urls,
            fetch_permits,
        }
    }

    fn deadline_passed(&self) -> bool {
        self.deadline
            .map_or(false, |deadline| self.clock.instant() >= deadline)
    }

    /// Adds a page's word counts to the accumulator
    fn merge(&self, word_counts: &HashMap<String, usize>) {
        for (word, count) in word_counts {
            *self.counts.entry(word.clone()).or_insert(0) += *count;
        }
    }

    /// Copies the accumulator out once every task has finished
    pub fn word_counts(&self) -> HashMap<String, usize> {
        self.counts
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect()
    }
}

/// Crawls `url` with `depth` link hops left, then everything reachable from it
///
/// The future is boxed so tasks can spawn copies of themselves.
pub(crate) fn crawl_url(
    context: Arc<CrawlContext>,
    url: String,
    depth: u32,
) -> Pin<Box<dyn Future<Output = ()> + Send>> {
    Box::pin(async move {
        if depth == 0 || context.deadline_passed() {
            return;
        }

        if context.ignored_urls.matches(&url) {
            tracing::debug!("Ignoring {}", url);
            return;
        }

        // Held only for the fetch, never while joining children
        let Ok(permit) = context.fetch_permits.acquire().await else {
            tracing::warn!("Fetch permits closed, skipping {}", url);
            return;
        };

        // The wait for a permit may have outlasted the deadline
        if context.deadline_passed() {
            return;
        }

        if !context.visited.insert(url.clone()) {
            return;
        }

        tracing::debug!("Visiting {} (depth budget {})", url, depth);

        let page = match context.fetcher.fetch(&url).await {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!("Skipping {}: {}", url, e);
                PageContent::default()
            }
        };
        drop(permit);

        context.merge(&page.word_counts);

        let mut children = JoinSet::new();
        for link in page.links {
            children.spawn(crawl_url(context.clone(), link, depth - 1));
        }

        join_all(&mut children).await;
    })
}

/// Waits for every task in `tasks`, logging the ones that panicked
pub(crate) async fn join_all(tasks: &mut JoinSet<()>) {
    while let Some(joined) = tasks.join_next().await {
        if let Err(e) = joined {
            tracing::error!("Crawl task failed: {}", e);
        }
    }
}
