// src/crawl/report.rs
// Outcome of every finished task, and the summary a crawl run returns.

use serde::Serialize;

use crate::pool::PoolStats;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PageReport {
    Crawled {
        url: String,
        title: String,
        /// Absolute links on the page, after deduplication
        links_found: usize,
        /// Links this page was the first to discover
        links_admitted: usize,
    },
    Failed {
        url: String,
        reason: String,
    },
}

impl PageReport {
    pub fn url(&self) -> &str {
        match self {
            PageReport::Crawled { url, .. } | PageReport::Failed { url, .. } => url,
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, PageReport::Crawled { .. })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CrawlSummary {
    pub seed_url: String,
    /// Every URL admitted during the run, sorted
    pub frontier: Vec<String>,
    /// One entry per task that finished before shutdown, in completion order
    pub pages: Vec<PageReport>,
    pub stats: PoolStats,
    pub elapsed_ms: u128,
}

impl CrawlSummary {
    pub fn crawled_count(&self) -> usize {
        self.pages.iter().filter(|p| p.is_ok()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.pages.len() - self.crawled_count()
    }
}
