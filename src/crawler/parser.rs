//! HTML parser for extracting links and metadata
//!
//! This module handles parsing HTML content to extract:
//! - Links to follow (from `<a href>` tags), filtered by a [`LinkPolicy`]
//! - Page title

use crate::url::LinkPolicy;
use scraper::{Html, Selector};

/// Extracted information from an HTML page
#[derive(Debug, Clone, Default)]
pub struct ParsedPage {
    /// The page title (from the first attribute-less `<title>` tag)
    pub title: String,

    /// All approved links found on the page (absolute URLs)
    pub links: Vec<String>,
}

/// Parses HTML content and extracts the title and the links to follow
///
/// # Link Extraction Rules
///
/// - Every `<a href="...">` is offered to [`LinkPolicy::should_crawl`]
/// - Approved hrefs are resolved against `base_url` with [`LinkPolicy::unify`]
/// - Only `http` and `https` results are kept
///
/// # Title Rules
///
/// `<title>` tags carrying attributes are ignored, since client-side
/// frameworks emit those for their own purposes.
///
/// # Example
///
/// ```
/// use linkcrawl::crawler::parse_html;
/// use linkcrawl::url::LinkPolicy;
///
/// let html = r#"<html><head><title>Test</title></head><body><a href="/page">Link</a></body></html>"#;
/// let parsed = parse_html(html, "https://example.com/", &LinkPolicy::default());
/// assert_eq!(parsed.title, "Test");
/// assert_eq!(parsed.links, vec!["https://example.com/page".to_string()]);
/// ```
pub fn parse_html(html: &str, base_url: &str, policy: &LinkPolicy) -> ParsedPage {
    let document = Html::parse_document(html);

    ParsedPage {
        title: extract_title(&document),
        links: extract_links(&document, base_url, policy),
    }
}

/// Extracts the page title from the HTML document
fn extract_title(document: &Html) -> String {
    let Ok(title_selector) = Selector::parse("title") else {
        return String::new();
    };

    document
        .select(&title_selector)
        .find(|element| element.value().attrs().next().is_none())
        .map(|element| element.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

/// Extracts all approved links from the HTML document
fn extract_links(document: &Html, base_url: &str, policy: &LinkPolicy) -> Vec<String> {
    let mut links = Vec::new();

    let Ok(a_selector) = Selector::parse("a[href]") else {
        return links;
    };

    for element in document.select(&a_selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        if !policy.should_crawl(base_url, href) {
            continue;
        }

        match policy.unify(href, base_url) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {
                links.push(url.to_string());
            }
            Ok(url) => tracing::trace!("Skipping non-HTTP link {}", url),
            Err(e) => tracing::debug!("Failed to resolve {} on {}: {}", href, base_url, e),
        }
    }

    links
}
