// src/extract/mod.rs
// =============================================================================
// Pulls a page title and its outbound links out of raw page text.
//
// Submodules:
// - markers: scans for the literal "<title>" and href="..." patterns (default)
// - html: parses the page into a DOM with the `scraper` crate
//
// Both follow the same rules:
// - a missing title becomes the sentinel "No Title"
// - only links that start with "http" are kept; relative, mailto:, anchor
//   and javascript: links are dropped
// - links are deduplicated and kept in the order they appear on the page
// =============================================================================

mod html;
mod markers;

use indexmap::IndexSet;

pub use html::HtmlExtractor;
pub use markers::MarkerExtractor;

pub const NO_TITLE: &str = "No Title";

/// What a crawl task learns from one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContent {
    pub title: String,
    pub links: IndexSet<String>,
}

pub trait Extractor: Send + Sync + 'static {
    fn extract(&self, content: &str) -> PageContent;
}

/// The link filter shared by every extractor.
fn is_absolute_link(link: &str) -> bool {
    link.starts_with("http")
}
