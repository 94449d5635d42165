//! Wordtide main entry point
//!
//! This is the command-line interface for the Wordtide word-frequency crawler.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime;
use tracing_subscriber::EnvFilter;
use wordtide::config::{load_config_with_hash, Config};
use wordtide::crawler::{build_http_client, HttpPageFetcher, PageFetcher, WebCrawler};
use wordtide::output::write_outputs;
use wordtide::profiler::Profiler;
use wordtide::url::PatternSet;
use wordtide::{Clock, SystemClock};

/// Wordtide: a parallel word-frequency web crawler
///
/// Wordtide crawls from the configured start pages, counts the words on every page it
/// visits within the depth and time budget, and reports the most popular ones together
/// with how long page fetches took.
#[derive(Parser, Debug)]
#[command(name = "wordtide")]
#[command(version)]
#[command(about = "A parallel word-frequency web crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let config = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            cfg
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e)
                .with_context(|| format!("Failed to load configuration {}", cli.config.display()));
        }
    };

    // Worker pool size is fixed for the whole run
    let workers = config.crawler.effective_parallelism();
    let rt = runtime::Builder::new_multi_thread()
        .worker_threads(workers)
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    match rt.block_on(run(config)) {
        Ok(()) => {
            tracing::info!("Crawl completed successfully");
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {:#}", e);
            Err(e)
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("wordtide=info,warn"),
            1 => EnvFilter::new("wordtide=debug,info"),
            2 => EnvFilter::new("wordtide=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    // Logs go to stderr so stdout stays clean for the result and profile
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Crawls the configured start pages and writes the result and the profile
async fn run(config: Config) -> anyhow::Result<()> {
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let profiler = Profiler::new(clock.clone());

    let client =
        build_http_client(config.crawler.timeout()).context("Failed to build HTTP client")?;
    let ignored_words = PatternSet::new(&config.crawler.ignored_words)?;
    let fetcher: Arc<dyn PageFetcher> = Arc::new(HttpPageFetcher::new(client, ignored_words));
    let fetcher: Arc<dyn PageFetcher> = Arc::new(profiler.wrap(fetcher)?);

    let crawler = WebCrawler::new(&config.crawler, fetcher, clock)?;

    tracing::info!("Total start pages: {}", config.start_pages.len());
    let result = crawler.crawl(&config.start_pages).await;
    tracing::info!(
        "Crawl completed: {} URLs visited, {} popular words",
        result.urls_visited,
        result.word_counts.len()
    );

    write_outputs(&config.output, &result, &profiler).context("Failed to write output")?;

    Ok(())
}
