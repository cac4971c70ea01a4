// src/cli.rs
// =============================================================================
// Command-line interface, parsed with clap's derive API.
//
// Usage:
//   title-crawler https://example.com
//   title-crawler https://example.com --workers 10 --duration 30 --json
//
// The parsed Cli is turned into a CrawlConfig by to_config(); everything
// after that point only deals with CrawlConfig.
// =============================================================================

use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::{CrawlConfig, DEFAULT_WORKER_COUNT};
use crate::pool::ShutdownMode;

#[derive(Parser, Debug)]
#[command(
    name = "title-crawler",
    version,
    about = "Crawl outward from a seed URL for a fixed time, reporting each page's title",
    long_about = "title-crawler fetches the seed page, reports its title, and follows every \
                  absolute link it finds. Each URL is crawled at most once. When the run \
                  duration is over the crawl stops, even if pages are still loading."
)]
pub struct Cli {
    /// Absolute http(s) URL to start from (e.g., https://example.com)
    pub seed_url: String,

    /// Number of pages fetched concurrently
    #[arg(short, long, default_value_t = DEFAULT_WORKER_COUNT)]
    pub workers: usize,

    /// How long the crawl runs, in seconds (0 stops right after starting)
    #[arg(short, long, default_value_t = 5)]
    pub duration: u64,

    /// Timeout for a single HTTP request, in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout: u64,

    /// How titles and links are pulled out of each page
    #[arg(long, value_enum, default_value_t = ExtractorKind::Markers)]
    pub extractor: ExtractorKind,

    /// When time is up, let pages that are already loading finish
    ///
    /// Without this flag in-flight requests are abandoned.
    #[arg(long)]
    pub graceful: bool,

    /// Override the User-Agent header sent with every request
    #[arg(long)]
    pub user_agent: Option<String>,

    /// Print the crawl summary as JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// Debug-level logging for the crawler (RUST_LOG still wins)
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractorKind {
    /// Literal <title> and href="..." matching
    Markers,
    /// Full HTML parsing
    Html,
}

impl Cli {
    pub fn to_config(&self) -> CrawlConfig {
        let shutdown_mode = if self.graceful {
            ShutdownMode::Graceful
        } else {
            ShutdownMode::Abort
        };

        let mut config = CrawlConfig::new(self.seed_url.as_str())
            .with_worker_count(self.workers)
            .with_run_duration(Duration::from_secs(self.duration))
            .with_fetch_timeout(Duration::from_secs(self.timeout))
            .with_shutdown_mode(shutdown_mode);

        if let Some(user_agent) = &self.user_agent {
            config = config.with_user_agent(user_agent.as_str());
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["title-crawler", "https://example.com"]).unwrap();
        let config = cli.to_config();

        assert_eq!(cli.extractor, ExtractorKind::Markers);
        assert!(!cli.json);
        assert_eq!(config.seed_url, "https://example.com");
        assert_eq!(config.worker_count, 5);
        assert_eq!(config.run_duration, Duration::from_secs(5));
        assert_eq!(config.fetch_timeout, Duration::from_secs(10));
        assert_eq!(config.shutdown_mode, ShutdownMode::Abort);
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::try_parse_from([
            "title-crawler",
            "https://example.com",
            "--workers",
            "12",
            "-d",
            "0",
            "--extractor",
            "html",
            "--graceful",
            "--user-agent",
            "my-bot",
        ])
        .unwrap();
        let config = cli.to_config();

        assert_eq!(cli.extractor, ExtractorKind::Html);
        assert_eq!(config.worker_count, 12);
        assert_eq!(config.run_duration, Duration::ZERO);
        assert_eq!(config.shutdown_mode, ShutdownMode::Graceful);
        assert_eq!(config.user_agent, "my-bot");
    }

    #[test]
    fn test_seed_is_required() {
        assert!(Cli::try_parse_from(["title-crawler"]).is_err());
    }
}
