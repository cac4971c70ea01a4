// src/crawl/task.rs
// =============================================================================
// One crawl task = one URL. Running it:
// 1. Fetch the page (the only step that waits on the network)
// 2. Extract the title and the absolute links
// 3. Log "Crawled: URL -> Title: X"
// 4. For each link, ask the Frontier to admit it; submit a new task for every
//    link that was admitted
//
// A failed fetch is logged and ends the task. It is never retried and never
// re-queued. A panic anywhere in steps 1-4 is caught here and reported as a
// failure for that URL, the same way a failed fetch is.
//
// No lock is held while the fetch is in progress: the Frontier is only
// touched in step 4, one try_admit() call per link.
// =============================================================================

use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex, PoisonError};

use futures::FutureExt;
use tracing::{info, warn};

use super::report::PageReport;
use crate::extract::Extractor;
use crate::fetch::Fetcher;
use crate::frontier::Frontier;
use crate::pool::{panic_message, Submitter, TaskHandler};

/// A URL waiting to be crawled. Consumed by exactly one worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlTask {
    pub url: String,
}

impl CrawlTask {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// Collects one PageReport per finished task.
#[derive(Debug, Default)]
pub(super) struct ReportLog {
    reports: Mutex<Vec<PageReport>>,
}

impl ReportLog {
    fn record(&self, report: PageReport) {
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(report);
    }

    pub fn take(&self) -> Vec<PageReport> {
        std::mem::take(&mut *self.reports.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

/// Everything a worker needs to run crawl tasks for one run.
pub(super) struct CrawlHandler<F, E> {
    pub fetcher: Arc<F>,
    pub extractor: Arc<E>,
    pub frontier: Arc<Frontier>,
    pub reports: Arc<ReportLog>,
}

impl<F: Fetcher, E: Extractor> TaskHandler<CrawlTask> for CrawlHandler<F, E> {
    async fn handle(&self, task: CrawlTask, submitter: &Submitter<CrawlTask>) {
        let url = task.url.clone();
        let report = match AssertUnwindSafe(self.crawl(task, submitter))
            .catch_unwind()
            .await
        {
            Ok(report) => report,
            Err(panic) => {
                let reason = format!("panicked: {}", panic_message(&*panic));
                warn!("Error crawling {}: {}", url, reason);
                PageReport::Failed { url, reason }
            }
        };
        self.reports.record(report);
    }
}

impl<F: Fetcher, E: Extractor> CrawlHandler<F, E> {
    async fn crawl(&self, task: CrawlTask, submitter: &Submitter<CrawlTask>) -> PageReport {
        let CrawlTask { url } = task;

        let content = match self.fetcher.fetch(&url).await {
            Ok(content) => content,
            Err(e) => {
                warn!("Error crawling {}: {}", url, e);
                return PageReport::Failed {
                    url,
                    reason: e.to_string(),
                };
            }
        };

        let page = self.extractor.extract(&content);
        info!("Crawled: {} -> Title: {}", url, page.title);

        let mut links_admitted = 0;
        for link in &page.links {
            if self.frontier.try_admit(link) {
                links_admitted += 1;
                // Rejected only when the deadline has already passed
                submitter.submit(CrawlTask::new(link.as_str()));
            }
        }

        PageReport::Crawled {
            url,
            title: page.title,
            links_found: page.links.len(),
            links_admitted,
        }
    }
}
