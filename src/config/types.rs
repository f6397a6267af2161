use crate::url::LinkPolicy;
use serde::Deserialize;

/// Main configuration structure for linkcrawl
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub fetcher: FetcherConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Depth handed to the crawler; values below 2 are raised to 2
    pub fn effective_depth(&self) -> u32 {
        self.crawler.max_depth.max(2)
    }

    /// Concurrency limit handed to the crawler; values below 1 are raised to 1
    pub fn effective_concurrency(&self) -> usize {
        self.crawler.max_concurrent_fetchers.max(1)
    }
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CrawlerConfig {
    /// Address to start from
    pub start: String,

    /// Depth of the web crawl
    pub max_depth: u32,

    /// Number of fetchers to run concurrently
    pub max_concurrent_fetchers: usize,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            start: "http://www.lemonde.fr/".to_string(),
            max_depth: 50,
            max_concurrent_fetchers: 30,
        }
    }
}

/// How pages are fetched and which links are followed
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FetcherConfig {
    /// Keep the fragment part of a URL, e.g. `#top`
    pub keep_fragment: bool,

    /// Keep the query part of a URL, e.g. `?foo=bar`
    pub keep_query: bool,

    /// Do not crawl resources stored on another domain
    pub stay_on_domain: bool,

    /// User agent sent with every request
    pub user_agent: String,

    /// Per-request timeout (seconds)
    pub request_timeout_secs: u64,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            keep_fragment: false,
            keep_query: false,
            stay_on_domain: true,
            user_agent: format!("linkcrawl/{}", env!("CARGO_PKG_VERSION")),
            request_timeout_secs: 30,
        }
    }
}

impl From<&FetcherConfig> for LinkPolicy {
    fn from(config: &FetcherConfig) -> Self {
        Self {
            keep_fragment: config.keep_fragment,
            keep_query: config.keep_query,
            stay_on_domain: config.stay_on_domain,
        }
    }
}

/// What happens to fetched pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Save the cleaned text of every page under `save-path`
    Save,
    /// Only report each page's URL and title
    Print,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct OutputConfig {
    pub mode: OutputMode,

    /// Directory where crawled resources are saved
    pub save_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            mode: OutputMode::Save,
            save_path: "/tmp/crawl/".to_string(),
        }
    }
}
