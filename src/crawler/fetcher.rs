//! Fetcher abstraction and its HTTP implementation
//!
//! This module handles all network access for the crawler, including:
//! - The [`Fetcher`] trait the traversal engine is written against
//! - Building HTTP clients with a user agent and timeouts
//! - GET requests, status and body checks
//! - Handing the body to the HTML parser for title and link extraction

use crate::config::FetcherConfig;
use crate::crawler::parser::parse_html;
use crate::url::LinkPolicy;
use crate::FetchError;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// A successfully fetched resource
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchedPage {
    /// Raw body of the resource
    pub content: String,

    /// Page title, empty when the page has none
    pub title: String,

    /// Addresses of the children resources, already filtered and normalized
    pub links: Vec<String>,
}

/// Retrieves a resource and discovers its children
///
/// Implementations are shared by every crawl task and must be safe to call
/// concurrently with different addresses.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches `address`, returning its content, title and child addresses
    async fn fetch(&self, address: &str) -> Result<FetchedPage, FetchError>;

    /// Determines whether `href`, found on `base`, should be crawled
    ///
    /// Applied by the fetcher itself before child addresses are returned;
    /// the traversal engine never calls it.
    fn should_crawl(&self, base: &str, href: &str) -> bool;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The fetcher configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &FetcherConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// A fetcher that fetches resources from the web
///
/// Only a 2xx response with a non-empty body counts as fetched. Error pages
/// and empty bodies are returned as errors, so the crawl records them as
/// failed and never hands them to the processor or follows their links,
/// where a plain link lister would process them like any other page.
#[derive(Debug, Clone)]
pub struct WebFetcher {
    client: Client,
    policy: LinkPolicy,
}

impl WebFetcher {
    /// Creates a web fetcher with its own HTTP client
    pub fn new(config: &FetcherConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::with_client(
            build_http_client(config)?,
            LinkPolicy::from(config),
        ))
    }

    /// Creates a web fetcher around an existing client
    pub fn with_client(client: Client, policy: LinkPolicy) -> Self {
        Self { client, policy }
    }

    pub fn policy(&self) -> &LinkPolicy {
        &self.policy
    }
}

#[async_trait]
impl Fetcher for WebFetcher {
    /// Fetches a page over HTTP
    ///
    /// # Failure Mapping
    ///
    /// | Condition | Error |
    /// |-----------|-------|
    /// | Transport failure, timeout, unreadable body | `FetchError::Http` |
    /// | Non-2xx status | `FetchError::Status` |
    /// | Empty body | `FetchError::EmptyBody` |
    ///
    /// Links are resolved against the final URL after redirects.
    async fn fetch(&self, address: &str) -> Result<FetchedPage, FetchError> {
        let http_error = |source| FetchError::Http {
            url: address.to_string(),
            source,
        };

        let response = self.client.get(address).send().await.map_err(http_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: address.to_string(),
                status: status.as_u16(),
            });
        }

        let final_url = response.url().to_string();
        let content = response.text().await.map_err(http_error)?;

        if content.is_empty() {
            return Err(FetchError::EmptyBody {
                url: address.to_string(),
            });
        }

        let parsed = parse_html(&content, &final_url, &self.policy);
        tracing::debug!(
            "Fetched {} ({} bytes, {} links)",
            address,
            content.len(),
            parsed.links.len()
        );

        Ok(FetchedPage {
            content,
            title: parsed.title,
            links: parsed.links,
        })
    }

    fn should_crawl(&self, base: &str, href: &str) -> bool {
        self.policy.should_crawl(base, href)
    }
}
