//! Page fetching
//!
//! This module defines the [`PageFetcher`] capability consumed by the crawl engine and its
//! production implementation, [`HttpPageFetcher`], which:
//! - Fetches `http`/`https` pages with a shared reqwest client
//! - Reads `file` URLs from the local filesystem
//! - Parses the body into word counts and outbound links

use crate::crawler::parser::parse_html;
use crate::profiler::{Instrumented, Operation, Profiled};
use crate::url::PatternSet;
use crate::FetchError;
use async_trait::async_trait;
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

/// What a single page contributes to a crawl
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageContent {
    /// Occurrences of each word on the page
    pub word_counts: HashMap<String, usize>,

    /// Outbound links, absolute
    pub links: Vec<String>,
}

/// Fetches and parses a single page
///
/// Implementations must be safe to call from many crawl tasks at once.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Downloads `url` and returns its word counts and links
    async fn fetch(&self, url: &str) -> Result<PageContent, FetchError>;

    /// Name of the implementing type, used as the profiling key
    fn implementation(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

impl Instrumented for dyn PageFetcher {
    const INTERFACE: &'static str = "PageFetcher";
    const OPERATIONS: &'static [Operation] = &[
        Operation::measured("fetch"),
        Operation::unmeasured("implementation"),
    ];

    fn type_name(&self) -> &'static str {
        self.implementation()
    }
}

#[async_trait]
impl PageFetcher for Profiled<dyn PageFetcher> {
    async fn fetch(&self, url: &str) -> Result<PageContent, FetchError> {
        self.measure_async("fetch", self.inner().fetch(url)).await
    }

    fn implementation(&self) -> &'static str {
        self.measure("implementation", || self.inner().implementation())
    }
}

/// Builds the HTTP client shared by every fetch
///
/// `timeout` is the whole crawl budget: a single download is allowed the full budget and the
/// deadline is enforced by the crawl tasks, not here.
pub fn build_http_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(concat!("wordtide/", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches pages over HTTP(S) or from local files and parses them with `scraper`
#[derive(Debug, Clone)]
pub struct HttpPageFetcher {
    client: Client,
    ignored_words: PatternSet,
}

impl HttpPageFetcher {
    /// Creates a fetcher that drops words fully matching any of `ignored_words`
    pub fn new(client: Client, ignored_words: PatternSet) -> Self {
        Self {
            client,
            ignored_words,
        }
    }

    async fn download(&self, url: &Url) -> Result<String, FetchError> {
        match url.scheme() {
            "http" | "https" => {
                let response = self
                    .client
                    .get(url.clone())
                    .send()
                    .await
                    .map_err(|source| FetchError::Http {
                        url: url.to_string(),
                        source,
                    })?;

                let status = response.status();
                if !status.is_success() {
                    return Err(FetchError::Status {
                        url: url.to_string(),
                        status: status.as_u16(),
                    });
                }

                response.text().await.map_err(|source| FetchError::Http {
                    url: url.to_string(),
                    source,
                })
            }
            "file" => {
                let path = url
                    .to_file_path()
                    .map_err(|_| FetchError::UnsupportedScheme(url.to_string()))?;
                tokio::fs::read_to_string(&path)
                    .await
                    .map_err(|source| FetchError::Io {
                        url: url.to_string(),
                        source,
                    })
            }
            other => Err(FetchError::UnsupportedScheme(other.to_string())),
        }
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, url: &str) -> Result<PageContent, FetchError> {
        let parsed_url = Url::parse(url).map_err(|source| FetchError::UrlParse {
            url: url.to_string(),
            source,
        })?;

        let body = self.download(&parsed_url).await?;
        let parsed = parse_html(&body, &parsed_url, &self.ignored_words);

        Ok(PageContent {
            word_counts: parsed.word_counts,
            links: parsed.links,
        })
    }
}
