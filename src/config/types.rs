use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for Wordtide
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Seed URLs the crawl starts from
    #[serde(rename = "start-pages", default)]
    pub start_pages: Vec<String>,

    pub crawler: CrawlerConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Maximum number of link hops followed from a seed URL
    #[serde(rename = "max-depth")]
    pub max_depth: u32,

    /// Wall-clock budget for a whole crawl, in seconds
    #[serde(rename = "timeout-seconds")]
    pub timeout_seconds: u64,

    /// Number of most frequent words kept in the result
    #[serde(rename = "popular-word-count")]
    pub popular_word_count: usize,

    /// Target number of pages fetched concurrently
    #[serde(default = "default_parallelism")]
    pub parallelism: usize,

    /// Regular expressions; a URL fully matching any of them is never visited
    #[serde(rename = "ignored-urls", default)]
    pub ignored_urls: Vec<String>,

    /// Regular expressions; a word fully matching any of them is not counted
    #[serde(rename = "ignored-words", default)]
    pub ignored_words: Vec<String>,
}

impl CrawlerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Parallelism actually used: the configured target, capped by available cores
    pub fn effective_parallelism(&self) -> usize {
        self.parallelism.min(Self::available_cores()).max(1)
    }

    /// Hardware concurrency of this machine
    pub fn available_cores() -> usize {
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    }
}

/// Output destinations
///
/// An unset or empty path means "write to standard output".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    /// Path of the JSON crawl result
    #[serde(rename = "result-path")]
    pub result_path: Option<String>,

    /// Path of the profiling report
    #[serde(rename = "profile-path")]
    pub profile_path: Option<String>,
}

impl OutputConfig {
    pub fn result_path(&self) -> Option<&str> {
        non_empty(&self.result_path)
    }

    pub fn profile_path(&self) -> Option<&str> {
        non_empty(&self.profile_path)
    }
}

fn non_empty(path: &Option<String>) -> Option<&str> {
    path.as_deref().filter(|p| !p.is_empty())
}

fn default_parallelism() -> usize {
    CrawlerConfig::available_cores()
}
