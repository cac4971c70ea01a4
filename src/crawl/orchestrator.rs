// src/crawl/orchestrator.rs
// =============================================================================
// Runs one crawl from start to finish.
//
// How it works:
// 1. Build a fresh Frontier that already holds the seed URL
// 2. Start the worker pool and submit the seed task
// 3. Sleep for the configured run duration, whatever the workers are doing
// 4. Shut the pool down (abort or graceful, per the config) and collect
//    the results
//
// Nothing here is global. Every call to run() gets its own Frontier, pool and
// report log, so independent runs can't see each other's URLs.
// =============================================================================

use std::sync::Arc;
use std::time::Instant;

use tracing::info;

use super::report::CrawlSummary;
use super::task::{CrawlHandler, CrawlTask, ReportLog};
use crate::config::CrawlConfig;
use crate::error::ConfigError;
use crate::extract::Extractor;
use crate::fetch::Fetcher;
use crate::frontier::Frontier;
use crate::pool::WorkerPool;

pub struct Crawler<F, E> {
    fetcher: Arc<F>,
    extractor: Arc<E>,
}

impl<F: Fetcher, E: Extractor> Crawler<F, E> {
    pub fn new(fetcher: F, extractor: E) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            extractor: Arc::new(extractor),
        }
    }

    /// Crawls from `config.seed_url` until `config.run_duration` has passed.
    ///
    /// Page failures never make this fail; they show up as
    /// `PageReport::Failed` in the summary. Only an invalid config does.
    pub async fn run(&self, config: &CrawlConfig) -> Result<CrawlSummary, ConfigError> {
        // main.rs validates earlier too, before building the HTTP client;
        // this one covers callers that go straight to run()
        config.validate()?;

        let started = Instant::now();
        let frontier = Arc::new(Frontier::with_seed(config.seed_url.as_str()));
        let reports = Arc::new(ReportLog::default());

        let handler = CrawlHandler {
            fetcher: Arc::clone(&self.fetcher),
            extractor: Arc::clone(&self.extractor),
            frontier: Arc::clone(&frontier),
            reports: Arc::clone(&reports),
        };

        let pool = WorkerPool::start(config.worker_count, handler);
        pool.submitter().submit(CrawlTask::new(config.seed_url.as_str()));

        info!(
            seed = %config.seed_url,
            workers = config.worker_count,
            duration = ?config.run_duration,
            "Crawl started"
        );

        tokio::time::sleep(config.run_duration).await;
        let stats = pool.shutdown(config.shutdown_mode).await;

        let summary = CrawlSummary {
            seed_url: config.seed_url.clone(),
            frontier: frontier.snapshot(),
            pages: reports.take(),
            stats,
            elapsed_ms: started.elapsed().as_millis(),
        };

        info!(
            admitted = summary.frontier.len(),
            crawled = summary.crawled_count(),
            failed = summary.failed_count(),
            abandoned = stats.in_flight,
            discarded = stats.discarded,
            "Crawl finished"
        );

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawl::PageReport;
    use crate::error::FetchError;
    use crate::extract::MarkerExtractor;
    use crate::pool::ShutdownMode;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;

    // An in-memory web: URL -> page body. Unknown URLs answer 404.
    #[derive(Default)]
    struct FakeWeb {
        pages: HashMap<String, String>,
        delay: Duration,
        panic_on: Option<String>,
        fetches: Mutex<HashMap<String, usize>>,
    }

    impl FakeWeb {
        fn page(mut self, url: &str, links: &[&str]) -> Self {
            let anchors: String = links
                .iter()
                .map(|link| format!(r#"<a href="{}">x</a>"#, link))
                .collect();
            let body = format!("<title>{}</title>{}", url, anchors);
            self.pages.insert(url.to_string(), body);
            self
        }

        fn fetch_count(&self, url: &str) -> usize {
            self.fetches.lock().unwrap().get(url).copied().unwrap_or(0)
        }
    }

    impl Fetcher for Arc<FakeWeb> {
        async fn fetch(&self, url: &str) -> Result<String, FetchError> {
            *self.fetches.lock().unwrap().entry(url.to_string()).or_default() += 1;

            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            if self.panic_on.as_deref() == Some(url) {
                panic!("fetcher bug triggered by {}", url);
            }

            self.pages
                .get(url)
                .cloned()
                .ok_or(FetchError::Status(404))
        }
    }

    fn config(seed: &str) -> CrawlConfig {
        CrawlConfig::new(seed)
            .with_worker_count(4)
            .with_run_duration(Duration::from_millis(300))
            .with_shutdown_mode(ShutdownMode::Graceful)
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_seed_with_two_links() {
        let web = Arc::new(
            FakeWeb::default()
                .page("http://s", &["http://l1", "http://l2"])
                .page("http://l1", &[])
                .page("http://l2", &[]),
        );
        let crawler = Crawler::new(Arc::clone(&web), MarkerExtractor);

        let summary = crawler.run(&config("http://s")).await.unwrap();

        assert_eq!(summary.frontier, vec!["http://l1", "http://l2", "http://s"]);
        assert_eq!(summary.stats.submitted, 3);
        assert_eq!(summary.crawled_count(), 3);
        assert_eq!(summary.failed_count(), 0);
        for url in ["http://s", "http://l1", "http://l2"] {
            assert_eq!(web.fetch_count(url), 1, "{} fetched more than once", url);
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_no_url_is_dispatched_twice() {
        // Every page links to every other page, and back to the seed
        let urls: Vec<String> = (0..20).map(|i| format!("http://n{}", i)).collect();
        let links: Vec<&str> = urls.iter().map(String::as_str).collect();
        let web = urls
            .iter()
            .fold(FakeWeb::default(), |web, url| web.page(url, &links));
        let web = Arc::new(web);
        let crawler = Crawler::new(Arc::clone(&web), MarkerExtractor);

        let summary = crawler
            .run(&config("http://n0").with_worker_count(8))
            .await
            .unwrap();

        assert_eq!(summary.frontier.len(), 20);
        assert_eq!(summary.stats.submitted, 20);
        assert_eq!(summary.pages.len(), 20);
        for url in &urls {
            assert_eq!(web.fetch_count(url), 1, "{} fetched more than once", url);
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_failed_page_does_not_affect_others() {
        let web = Arc::new(
            FakeWeb::default()
                .page("http://s", &["http://missing", "http://b"])
                .page("http://b", &["http://c"])
                .page("http://c", &[]),
        );
        let crawler = Crawler::new(Arc::clone(&web), MarkerExtractor);

        let summary = crawler.run(&config("http://s")).await.unwrap();

        assert_eq!(summary.crawled_count(), 3);
        assert_eq!(summary.failed_count(), 1);
        let failed = summary.pages.iter().find(|p| !p.is_ok()).unwrap();
        assert_eq!(
            failed,
            &PageReport::Failed {
                url: "http://missing".to_string(),
                reason: "HTTP 404".to_string(),
            }
        );
        // Failures are not retried
        assert_eq!(web.fetch_count("http://missing"), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_panicking_fetch_is_isolated() {
        let mut web = FakeWeb::default()
            .page("http://s", &["http://boom", "http://fine"])
            .page("http://fine", &[]);
        web.panic_on = Some("http://boom".to_string());
        let crawler = Crawler::new(Arc::new(web), MarkerExtractor);

        let summary = crawler
            .run(&config("http://s").with_worker_count(1))
            .await
            .unwrap();

        // Caught inside the crawl task, so the pool never sees the panic
        assert_eq!(summary.stats.panicked, 0);
        assert_eq!(summary.crawled_count(), 2);
        assert_eq!(summary.failed_count(), 1);
        assert!(summary.pages.iter().any(|p| p.url() == "http://fine"));

        let boom = summary
            .pages
            .iter()
            .find(|p| p.url() == "http://boom")
            .expect("panicking URL must be reported");
        match boom {
            PageReport::Failed { reason, .. } => {
                assert_eq!(reason, "panicked: fetcher bug triggered by http://boom");
            }
            other => panic!("expected a failed report, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_zero_duration_does_not_hang() {
        let web = FakeWeb {
            delay: Duration::from_secs(60),
            ..FakeWeb::default()
        }
        .page("http://s", &[]);
        let crawler = Crawler::new(Arc::new(web), MarkerExtractor);
        let config = CrawlConfig::new("http://s")
            .with_run_duration(Duration::ZERO)
            .with_shutdown_mode(ShutdownMode::Abort);

        let summary = tokio::time::timeout(Duration::from_secs(5), crawler.run(&config))
            .await
            .expect("run must end at the deadline")
            .unwrap();

        assert_eq!(summary.frontier, vec!["http://s"]);
        assert_eq!(summary.stats.completed, 0);
    }

    #[tokio::test]
    async fn test_runs_are_independent() {
        let web = Arc::new(
            FakeWeb::default()
                .page("http://s", &["http://a"])
                .page("http://a", &[]),
        );
        let crawler = Crawler::new(Arc::clone(&web), MarkerExtractor);

        let first = crawler.run(&config("http://s")).await.unwrap();
        let second = crawler.run(&config("http://s")).await.unwrap();

        assert_eq!(first.frontier, second.frontier);
        assert_eq!(second.stats.submitted, 2);
        assert_eq!(web.fetch_count("http://a"), 2);
    }

    #[tokio::test]
    async fn test_invalid_config_is_rejected() {
        let crawler = Crawler::new(Arc::new(FakeWeb::default()), MarkerExtractor);
        let err = crawler
            .run(&CrawlConfig::new("http://s").with_worker_count(0))
            .await
            .unwrap_err();
        assert_eq!(err, ConfigError::NoWorkers);
    }
}
