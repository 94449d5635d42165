//! Integration tests for the crawler
//!
//! Engine tests run against an in-memory page graph; fetcher tests use wiremock to serve
//! real HTTP responses.

mod crawl_tests;
