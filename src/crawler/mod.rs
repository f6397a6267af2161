//! Crawler module for concurrent, depth-bounded traversal
//!
//! This module contains the core crawling logic, including:
//! - The recursive traversal engine and its per-session state
//! - The admission gate bounding concurrent fetches
//! - The fetcher abstraction with its HTTP implementation
//! - HTML parsing and link extraction

mod engine;
mod fetcher;
mod gate;
mod parser;
mod report;

pub use engine::Crawler;
pub use fetcher::{build_http_client, FetchedPage, Fetcher, WebFetcher};
pub use gate::{AdmissionGate, FetchPermit};
pub use parser::{parse_html, ParsedPage};
pub use report::CrawlReport;

use crate::config::Config;
use crate::output::Processor;
use crate::CrawlError;

/// Runs a complete crawl operation from a configuration
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Validate the configuration
/// 2. Build the web fetcher from the fetcher configuration
/// 3. Build the crawler with the effective concurrency limit
/// 4. Crawl from the seed with the effective depth
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `processor` - What to do with every fetched page
///
/// # Returns
///
/// * `Ok(CrawlReport)` - Crawl completed; individual pages may still have failed
/// * `Err(CrawlError)` - The crawl could not be started
pub async fn crawl<P>(config: &Config, processor: P) -> Result<CrawlReport, CrawlError>
where
    P: Processor + 'static,
{
    crate::config::validate(config)?;

    let seed = crate::url::parse_seed(&config.crawler.start)?;
    let fetcher = WebFetcher::new(&config.fetcher)?;
    let crawler = Crawler::new(fetcher, processor, config.effective_concurrency());

    Ok(crawler.crawl(seed.as_str(), config.effective_depth()).await)
}
