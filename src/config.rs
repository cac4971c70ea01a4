// src/config.rs
// =============================================================================
// Run configuration for one crawl.
//
// Defaults:
// - 5 workers
// - 5 second run duration
// - 10 second timeout per HTTP request
// - hard-stop shutdown when the run duration is over
//
// The CLI builds one of these (see cli.rs); tests build them directly with
// the with_* setters.
// =============================================================================

use std::time::Duration;

use url::Url;

use crate::error::ConfigError;
use crate::pool::ShutdownMode;

pub const DEFAULT_WORKER_COUNT: usize = 5;
pub const DEFAULT_RUN_DURATION: Duration = Duration::from_secs(5);
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_USER_AGENT: &str = concat!("title-crawler/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct CrawlConfig {
    pub seed_url: String,
    pub worker_count: usize,
    /// Wall-clock budget for the whole run; zero is allowed
    pub run_duration: Duration,
    pub fetch_timeout: Duration,
    pub user_agent: String,
    pub shutdown_mode: ShutdownMode,
}

impl CrawlConfig {
    pub fn new(seed_url: impl Into<String>) -> Self {
        Self {
            seed_url: seed_url.into(),
            worker_count: DEFAULT_WORKER_COUNT,
            run_duration: DEFAULT_RUN_DURATION,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            shutdown_mode: ShutdownMode::default(),
        }
    }

    pub fn with_worker_count(mut self, workers: usize) -> Self {
        self.worker_count = workers;
        self
    }

    pub fn with_run_duration(mut self, duration: Duration) -> Self {
        self.run_duration = duration;
        self
    }

    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_shutdown_mode(mut self, mode: ShutdownMode) -> Self {
        self.shutdown_mode = mode;
        self
    }

    /// Checks the values a run can't start without.
    ///
    /// The seed must be an absolute http(s) URL. Discovered links are not
    /// held to this; they only need to start with "http".
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.worker_count == 0 {
            return Err(ConfigError::NoWorkers);
        }

        let parsed = Url::parse(&self.seed_url).map_err(|e| ConfigError::InvalidSeed {
            url: self.seed_url.clone(),
            reason: e.to_string(),
        })?;

        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(ConfigError::InvalidSeed {
                url: self.seed_url.clone(),
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }

        Ok(())
    }
}
