// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (tracing, to stderr)
// 3. Build the HTTP fetcher and the chosen extractor, then run one crawl
// 4. Print the summary as a table or JSON
// 5. Exit with proper code (0 = crawl ran, 2 = could not start)
//
// Individual pages failing to load never changes the exit code: that is a
// normal part of crawling and shows up in the summary instead.
// =============================================================================

mod cli;
mod config;
mod crawl;
mod error;
mod extract;
mod fetch;
mod frontier;
mod pool;
mod telemetry;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, ExtractorKind};
use crawl::{CrawlSummary, Crawler, PageReport};
use extract::{HtmlExtractor, MarkerExtractor};
use fetch::HttpFetcher;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    telemetry::init_logging(cli.verbose);

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run(cli: Cli) -> Result<i32> {
    let config = cli.to_config();
    // Fail before building the HTTP client if the seed is unusable
    config.validate()?;

    let fetcher = HttpFetcher::new(config.fetch_timeout, &config.user_agent)?;

    // The crawler is generic over its extractor, so each choice gets its own
    // concrete Crawler type
    let summary = match cli.extractor {
        ExtractorKind::Markers => Crawler::new(fetcher, MarkerExtractor).run(&config).await?,
        ExtractorKind::Html => {
            Crawler::new(fetcher, HtmlExtractor::new()?)
                .run(&config)
                .await?
        }
    };

    print_summary(&summary, cli.json)?;
    Ok(0)
}

fn print_summary(summary: &CrawlSummary, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(summary)?);
    } else {
        print_table(summary);
    }
    Ok(())
}

fn print_table(summary: &CrawlSummary) {
    println!("{:<60} {:<10} {:<40}", "URL", "STATUS", "TITLE / REASON");
    println!("{}", "=".repeat(110));

    for page in &summary.pages {
        let (status, detail) = match page {
            PageReport::Crawled { title, .. } => ("✅ OK", title.as_str()),
            PageReport::Failed { reason, .. } => ("❌ FAILED", reason.as_str()),
        };
        println!(
            "{:<60} {:<10} {:<40}",
            truncate(page.url(), 57),
            status,
            truncate(detail, 40)
        );
    }

    println!();
    println!("📊 Summary:");
    println!("   ✅ Crawled: {}", summary.crawled_count());
    println!("   ❌ Failed: {}", summary.failed_count());
    println!("   🌐 URLs admitted: {}", summary.frontier.len());
    println!("   ⏹️  Abandoned at deadline: {}", summary.stats.in_flight);
    println!("   📭 Still queued at deadline: {}", summary.stats.discarded);
    if summary.stats.panicked > 0 {
        println!("   ⚠️  Tasks that panicked: {}", summary.stats.panicked);
    }
    println!("   ⏱️  Elapsed: {} ms", summary.elapsed_ms);
}

// Cuts on a char boundary so multi-byte titles don't panic
fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let cut: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", cut)
    } else {
        text.to_string()
    }
}
