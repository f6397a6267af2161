use crate::crawler::FetchedPage;
use crate::output::traits::{OutputResult, Processor};

/// A processor that only reports each page's address and title on stdout
#[derive(Debug, Clone, Copy, Default)]
pub struct PrintProcessor;

impl PrintProcessor {
    /// Formats the line printed for a page
    pub fn format_line(address: &str, title: &str) -> String {
        format!("On URL: {} ; title: {:?}", address, title)
    }
}

impl Processor for PrintProcessor {
    fn process(&self, address: &str, page: &FetchedPage) -> OutputResult<()> {
        println!("{}", Self::format_line(address, &page.title));
        Ok(())
    }
}
