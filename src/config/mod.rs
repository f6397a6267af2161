//! Configuration module for linkcrawl
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files. Every value has a default, so the crawler also runs without a file
//! and command-line flags are layered on top of whatever was loaded.
//!
//! # Example
//!
//! ```no_run
//! use linkcrawl::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("crawl.toml")).unwrap();
//! println!("Crawler will use max depth: {}", config.effective_depth());
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, FetcherConfig, OutputConfig, OutputMode};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::{validate, MAX_CONCURRENT_FETCHERS};
