//! Processor trait and associated error types
//!
//! A processor receives every successfully fetched page. Implementations
//! must be thread-safe: the crawler calls them from many tasks at once.

use crate::crawler::FetchedPage;
use thiserror::Error;

/// Errors that can occur while processing a page
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot derive an output path: {0}")]
    Path(String),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Trait for page processors
///
/// `process` is called exactly once per successfully fetched address,
/// synchronously, from the task that fetched it. It must not start crawls
/// of its own. A returned error is logged by the crawler and never stops the
/// crawl.
pub trait Processor: Send + Sync {
    /// Processes a fetched page
    ///
    /// # Arguments
    ///
    /// * `address` - The address the page was fetched from
    /// * `page` - Content, title and child addresses of the page
    fn process(&self, address: &str, page: &FetchedPage) -> OutputResult<()>;
}

/// Replaces every run of whitespace with a single space and trims the ends
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
