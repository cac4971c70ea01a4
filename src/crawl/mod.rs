// src/crawl/mod.rs
// =============================================================================
// This module ties the Frontier, the worker pool, the fetcher and the
// extractor together into a crawl run.
//
// Submodules:
// - task: what one worker does with one URL (fetch, extract, report, re-admit)
// - orchestrator: Crawler::run(), which seeds the run and enforces the deadline
// - report: per-page outcomes and the summary a run returns
// =============================================================================

mod orchestrator;
mod report;
mod task;

pub use orchestrator::Crawler;
pub use report::{CrawlSummary, PageReport};
