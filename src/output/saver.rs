//! Saving processor
//!
//! Writes the visible text of every fetched page to its own file, after
//! getting rid of HTML tags, the doctype, entities and whitespace runs.

use crate::crawler::FetchedPage;
use crate::output::traits::{collapse_whitespace, OutputError, OutputResult, Processor};
use scraper::Html;
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

/// A processor saving the cleaned content of web pages to disk
#[derive(Debug, Clone)]
pub struct SaveProcessor {
    base_path: PathBuf,
}

impl SaveProcessor {
    /// Creates a saver writing into `base_path`; the directory is created
    /// on first use
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Determines where the content of a fetched resource is saved
    ///
    /// The scheme is dropped and every `/` becomes `-`:
    /// `https://example.com/a/b?x=1` is saved as `example.com-a-b?x=1.txt`.
    pub fn construct_path(&self, address: &str) -> OutputResult<PathBuf> {
        let url = Url::parse(address)
            .map_err(|e| OutputError::Path(format!("{}: {}", address, e)))?;

        // Everything after "scheme:"
        let without_scheme = &url.as_str()[url.scheme().len() + 1..];
        let flattened = without_scheme.replace('/', "-");
        let name = flattened.trim_start_matches("--");

        if name.is_empty() {
            return Err(OutputError::Path(format!("{}: nothing to name", address)));
        }

        Ok(self.base_path.join(format!("{}.txt", name)))
    }
}

/// Extracts the visible text of an HTML page with whitespace runs collapsed
///
/// Entities come out decoded since the text is read from the parsed
/// document, not the raw markup.
pub fn clean_content(content: &str) -> String {
    let document = Html::parse_document(content);
    let text = document.root_element().text().collect::<Vec<_>>().join(" ");
    collapse_whitespace(&text)
}

impl Processor for SaveProcessor {
    fn process(&self, address: &str, page: &FetchedPage) -> OutputResult<()> {
        let path = self.construct_path(address)?;

        tracing::info!(
            "On URL: {} ; title: {:?} saved to {}",
            address,
            collapse_whitespace(&page.title),
            path.display()
        );

        fs::create_dir_all(&self.base_path)?;
        fs::write(&path, clean_content(&page.content))?;

        Ok(())
    }
}
