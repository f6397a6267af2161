//! linkcrawl: a depth-bounded concurrent web crawler
//!
//! This crate walks a linked resource graph from a seed address, fetching
//! each address at most once while bounding how many fetches run at the same
//! time. Fetching and processing are pluggable through the
//! [`crawler::Fetcher`] and [`output::Processor`] traits.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Errors that keep a crawl from starting
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(#[from] ::url::ParseError),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL: {0}")]
    MissingHost(String),
}

/// Errors raised while fetching a single address
///
/// A fetch error only ever terminates the branch of the crawl rooted at the
/// failing address.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Unexpected status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Empty response body for {url}")]
    EmptyBody { url: String },

    #[error("Invalid address: {0}")]
    Url(#[from] UrlError),

    #[error("Fetch task for {url} panicked")]
    Panicked { url: String },

    #[error("Admission gate closed before fetching {url}")]
    GateClosed { url: String },
}

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CrawlReport, Crawler, FetchedPage, Fetcher, WebFetcher};
pub use output::{PrintProcessor, Processor, SaveProcessor};
pub use state::{Outcome, VisitedEntry};
