// src/fetch/mod.rs
// =============================================================================
// The fetch capability: given a URL, return the page's raw text or fail.
//
// Crawl tasks only see the Fetcher trait. The real implementation (HttpFetcher)
// uses reqwest; tests plug in an in-memory fake so crawl runs are
// deterministic and need no network.
// =============================================================================

mod http;

use std::future::Future;

use crate::error::FetchError;

pub use http::HttpFetcher;

pub trait Fetcher: Send + Sync + 'static {
    /// Downloads `url`. One attempt, no retries.
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, FetchError>> + Send;
}
