//! End-to-end behavior of the crawl engine over in-memory page graphs

use crate::support::{counts, frozen_clock, GraphFetcher};
use std::sync::Arc;
use std::time::Duration;
use wordtide::config::CrawlerConfig;
use wordtide::profiler::{format_call, Profiler};
use wordtide::{CrawlResult, PageFetcher, WebCrawler};

fn crawler_config(max_depth: u32, popular_word_count: usize) -> CrawlerConfig {
    CrawlerConfig {
        max_depth,
        timeout_seconds: 60,
        popular_word_count,
        parallelism: 4,
        ignored_urls: vec![],
        ignored_words: vec![],
    }
}

fn seeds(urls: &[&str]) -> Vec<String> {
    urls.iter().map(|u| u.to_string()).collect()
}

async fn crawl(
    config: &CrawlerConfig,
    fetcher: Arc<GraphFetcher>,
    start_pages: &[&str],
) -> CrawlResult {
    let crawler = WebCrawler::new(config, fetcher, frozen_clock()).unwrap();
    crawler.crawl(&seeds(start_pages)).await
}

/// a -> b, a -> c, b -> d, c -> d, d -> a
fn diamond() -> GraphFetcher {
    GraphFetcher::new()
        .page("http://g.test/a", "top", &["http://g.test/b", "http://g.test/c"])
        .page("http://g.test/b", "left side", &["http://g.test/d"])
        .page("http://g.test/c", "right side", &["http://g.test/d"])
        .page("http://g.test/d", "bottom side", &["http://g.test/a"])
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_diamond_fetches_each_page_once() {
    let fetcher = Arc::new(diamond());

    let result = crawl(&crawler_config(10, 10), fetcher.clone(), &["http://g.test/a"]).await;

    assert_eq!(result.urls_visited, 4);
    for page in ["a", "b", "c", "d"] {
        assert_eq!(fetcher.fetch_count(&format!("http://g.test/{}", page)), 1);
    }
    assert_eq!(result.count_of("side"), Some(3));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_duplicate_seeds_are_fetched_once() {
    let fetcher = Arc::new(diamond());

    let result = crawl(
        &crawler_config(10, 10),
        fetcher.clone(),
        &["http://g.test/a", "http://g.test/a", "http://g.test/d"],
    )
    .await;

    assert_eq!(result.urls_visited, 4);
    assert_eq!(fetcher.total_fetches(), 4);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_depth_bound() {
    let fetcher = Arc::new(
        GraphFetcher::new()
            .page("http://chain.test/1", "one", &["http://chain.test/2"])
            .page("http://chain.test/2", "two", &["http://chain.test/3"])
            .page("http://chain.test/3", "three", &["http://chain.test/4"])
            .page("http://chain.test/4", "four", &[]),
    );

    let result = crawl(&crawler_config(2, 10), fetcher.clone(), &["http://chain.test/1"]).await;

    assert_eq!(result.urls_visited, 2);
    assert_eq!(fetcher.fetch_count("http://chain.test/3"), 0);
    assert_eq!(result.word_counts, counts(&[("one", 1), ("two", 1)]));
}

#[tokio::test]
async fn test_expired_deadline_yields_empty_result() {
    let fetcher = Arc::new(diamond());
    let mut config = crawler_config(10, 10);
    config.timeout_seconds = 0;

    let result = crawl(&config, fetcher.clone(), &["http://g.test/a"]).await;

    assert_eq!(result, CrawlResult::default());
    assert_eq!(fetcher.total_fetches(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_deadline_reached_mid_crawl_keeps_partial_result() {
    let clock = frozen_clock();
    // Fetching any page pushes the clock past the 60s budget
    let fetcher = Arc::new(diamond().advancing(clock.clone(), Duration::from_secs(61)));
    let crawler = WebCrawler::new(&crawler_config(10, 10), fetcher.clone(), clock).unwrap();

    let result = crawler.crawl(&seeds(&["http://g.test/a"])).await;

    assert_eq!(result.urls_visited, 1);
    assert_eq!(fetcher.total_fetches(), 1);
    assert_eq!(result.word_counts, counts(&[("top", 1)]));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_queued_fetches_do_not_start_after_deadline() {
    let clock = frozen_clock();
    let leaves = [
        "http://fan.test/1",
        "http://fan.test/2",
        "http://fan.test/3",
        "http://fan.test/4",
        "http://fan.test/5",
    ];
    let mut graph = GraphFetcher::new().page("http://fan.test/", "root", &leaves);
    for leaf in leaves {
        graph = graph.page(leaf, "leaf", &[]);
    }
    // Two fetches fit in the 60s budget; the remaining leaves wait for the single slot
    let fetcher = Arc::new(
        graph
            .with_jitter(7)
            .advancing(clock.clone(), Duration::from_secs(40)),
    );
    let mut config = crawler_config(3, 10);
    config.parallelism = 1;
    let crawler = WebCrawler::new(&config, fetcher.clone(), clock).unwrap();

    let result = crawler.crawl(&seeds(&["http://fan.test/"])).await;

    assert_eq!(fetcher.total_fetches(), 2);
    assert_eq!(fetcher.fetch_count("http://fan.test/"), 1);
    assert_eq!(result.urls_visited, 2);
    assert_eq!(result.word_counts, counts(&[("leaf", 1), ("root", 1)]));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_merge_is_independent_of_scheduling() {
    let graph = || {
        GraphFetcher::new()
            .page(
                "http://w.test/",
                "alpha beta beta gamma",
                &["http://w.test/x", "http://w.test/y", "http://w.test/z"],
            )
            .page(
                "http://w.test/x",
                "beta gamma gamma delta",
                &["http://w.test/y", "http://w.test/z", "http://w.test/"],
            )
            .page(
                "http://w.test/y",
                "alpha alpha epsilon",
                &["http://w.test/z", "http://w.test/x"],
            )
            .page("http://w.test/z", "gamma beta alpha", &["http://w.test/"])
    };
    let expected = counts(&[
        ("alpha", 4),
        ("gamma", 4),
        ("beta", 4),
        ("epsilon", 1),
        ("delta", 1),
    ]);

    for parallelism in [1, 2, 4, 8] {
        for seed in 0..4 {
            let fetcher = Arc::new(graph().with_jitter(seed));
            let mut config = crawler_config(10, 10);
            config.parallelism = parallelism;

            let result = crawl(&config, fetcher, &["http://w.test/"]).await;

            assert_eq!(result.urls_visited, 4, "parallelism {parallelism} seed {seed}");
            assert_eq!(result.word_counts, expected, "parallelism {parallelism} seed {seed}");
        }
    }
}

#[tokio::test]
async fn test_ignored_urls_use_full_match() {
    let fetcher = Arc::new(
        GraphFetcher::new()
            .page(
                "http://site.test/",
                "home",
                &["http://site.test/private", "http://site.test/private/page"],
            )
            .page("http://site.test/private", "secret", &[])
            .page("http://site.test/private/page", "public", &[]),
    );
    let mut config = crawler_config(5, 10);
    config.ignored_urls = vec!["http://site\\.test/private".to_string()];

    let result = crawl(&config, fetcher.clone(), &["http://site.test/"]).await;

    assert_eq!(fetcher.fetch_count("http://site.test/private"), 0);
    assert_eq!(fetcher.fetch_count("http://site.test/private/page"), 1);
    assert_eq!(result.urls_visited, 2);
    assert_eq!(result.count_of("secret"), None);
    assert_eq!(result.count_of("public"), Some(1));
}

#[tokio::test]
async fn test_all_seeds_ignored() {
    let fetcher = Arc::new(diamond());
    let mut config = crawler_config(5, 10);
    config.ignored_urls = vec!["http://g\\.test/.*".to_string()];

    let result = crawl(&config, fetcher.clone(), &["http://g.test/a", "http://g.test/b"]).await;

    assert_eq!(result, CrawlResult::default());
    assert_eq!(fetcher.total_fetches(), 0);
}

#[tokio::test]
async fn test_no_seeds() {
    let result = crawl(&crawler_config(5, 10), Arc::new(diamond()), &[]).await;
    assert_eq!(result, CrawlResult::default());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_fetch_failure_does_not_stop_siblings() {
    let fetcher = Arc::new(
        GraphFetcher::new()
            .page(
                "http://f.test/",
                "root",
                &["http://f.test/missing", "http://f.test/ok"],
            )
            .page("http://f.test/ok", "fine fine", &["http://f.test/deeper"])
            .page("http://f.test/deeper", "deep", &[]),
    );

    let result = crawl(&crawler_config(5, 10), fetcher.clone(), &["http://f.test/"]).await;

    // The missing page was claimed and attempted, so it counts as visited
    assert_eq!(fetcher.fetch_count("http://f.test/missing"), 1);
    assert_eq!(result.urls_visited, 4);
    assert_eq!(
        result.word_counts,
        counts(&[("fine", 2), ("deep", 1), ("root", 1)])
    );
}

#[tokio::test]
async fn test_popular_word_count_truncates() {
    let fetcher = Arc::new(GraphFetcher::new().page(
        "http://k.test/",
        "d d d d d a a a bb bb bb ccc ccc ccc",
        &[],
    ));

    let result = crawl(&crawler_config(1, 3), fetcher, &["http://k.test/"]).await;

    assert_eq!(result.word_counts, counts(&[("d", 5), ("ccc", 3), ("bb", 3)]));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_profiled_fetcher_records_fetch_time() {
    let clock = frozen_clock();
    let profiler = Profiler::new(clock.clone());
    let graph = Arc::new(diamond());
    let inner: Arc<dyn PageFetcher> = graph.clone();
    let fetcher: Arc<dyn PageFetcher> = Arc::new(profiler.wrap(inner).unwrap());

    assert!(fetcher.implementation().ends_with("GraphFetcher"));
    assert!(profiler.state().is_empty());

    let crawler = WebCrawler::new(&crawler_config(10, 10), fetcher, clock).unwrap();
    let result = crawler.crawl(&seeds(&["http://g.test/a"])).await;

    assert_eq!(result.urls_visited, 4);
    let snapshot = profiler.state().snapshot();
    assert_eq!(snapshot.len(), 1);
    let key = format_call(std::any::type_name::<crate::support::GraphFetcher>(), "fetch");
    assert!(snapshot.contains_key(&key), "missing {key} in {snapshot:?}");
}
