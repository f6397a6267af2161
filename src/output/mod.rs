//! Output module for handling fetched pages and crawl summaries
//!
//! This module handles:
//! - The `Processor` trait every fetched page is handed to
//! - Printing and saving processors
//! - Rendering the final crawl report

mod print;
mod saver;
pub mod summary;
mod traits;

pub use print::PrintProcessor;
pub use saver::{clean_content, SaveProcessor};
pub use summary::{format_report, print_report};
pub use traits::{collapse_whitespace, OutputError, OutputResult, Processor};

use crate::config::{OutputConfig, OutputMode};

/// Builds the processor selected by the output configuration
pub fn build_processor(config: &OutputConfig) -> Box<dyn Processor> {
    match config.mode {
        OutputMode::Save => Box::new(SaveProcessor::new(&config.save_path)),
        OutputMode::Print => Box::new(PrintProcessor),
    }
}

impl<P: Processor + ?Sized> Processor for Box<P> {
    fn process(&self, address: &str, page: &crate::crawler::FetchedPage) -> OutputResult<()> {
        (**self).process(address, page)
    }
}
