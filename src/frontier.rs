// src/frontier.rs
// =============================================================================
// The Frontier is the set of every URL ever admitted to a crawl run.
//
// Rules:
// - A URL is a member at most once, for the whole run
// - Membership only grows; nothing is ever removed
// - URLs are compared as exact strings (no normalization at all)
//
// The only way to add a URL while workers are running is try_admit(). It is
// a single DashSet::insert, which checks and inserts under the shard's write
// lock and reports whether the URL was new. There is no
// contains() + insert() pair: two workers calling those back to back could
// both see "not present" and both crawl the same page.
// =============================================================================

use dashmap::DashSet;

#[derive(Debug, Default)]
pub struct Frontier {
    urls: DashSet<String>,
}

impl Frontier {
    /// Creates a Frontier that already contains the seed URL.
    ///
    /// The seed is recorded before any worker exists, so it never races with
    /// try_admit().
    pub fn with_seed(seed: impl Into<String>) -> Self {
        let urls = DashSet::new();
        urls.insert(seed.into());
        Self { urls }
    }

    /// Admits `url` if it has never been seen before.
    ///
    /// Returns true exactly once per distinct URL, no matter how many workers
    /// call this at the same time.
    pub fn try_admit(&self, url: &str) -> bool {
        self.urls.insert(url.to_string())
    }

    /// A sorted copy of every admitted URL, for reporting.
    pub fn snapshot(&self) -> Vec<String> {
        let mut urls: Vec<String> = self.urls.iter().map(|url| url.key().clone()).collect();
        urls.sort();
        urls
    }
}
