//! Traversal engine - recursive, depth-bounded crawl orchestration
//!
//! Each call to [`Crawler::crawl`] opens a session owning a fresh [`Ledger`]
//! and [`AdmissionGate`]. The seed is expanded recursively: every successful
//! fetch spawns one task per discovered link, and a task only returns once
//! all the tasks it spawned have returned. The top-level call is therefore a
//! barrier on the whole reachable subtree.

use crate::crawler::gate::AdmissionGate;
use crate::crawler::report::CrawlReport;
use crate::crawler::{FetchedPage, Fetcher};
use crate::output::Processor;
use crate::state::{Ledger, Outcome};
use crate::FetchError;
use chrono::Utc;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tokio::task::JoinSet;

type Expansion = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// Depth-bounded concurrent crawler
///
/// Holds the collaborators and the fetch concurrency limit. The crawler
/// itself carries no per-crawl state, so one instance can run any number of
/// independent sessions, sequentially or at the same time.
pub struct Crawler {
    fetcher: Arc<dyn Fetcher>,
    processor: Arc<dyn Processor>,
    max_concurrent_fetchers: usize,
}

/// Shared state of a single crawl session
struct Session {
    fetcher: Arc<dyn Fetcher>,
    processor: Arc<dyn Processor>,
    ledger: Ledger,
    gate: AdmissionGate,
}

impl Crawler {
    /// Creates a new crawler
    ///
    /// # Arguments
    ///
    /// * `fetcher` - Fetches a resource and finds its children resources
    /// * `processor` - Handles every successfully fetched resource
    /// * `max_concurrent_fetchers` - Fetches allowed to run at the same time;
    ///   0 is raised to 1
    pub fn new<F, P>(fetcher: F, processor: P, max_concurrent_fetchers: usize) -> Self
    where
        F: Fetcher + 'static,
        P: Processor + 'static,
    {
        Self::from_shared(Arc::new(fetcher), Arc::new(processor), max_concurrent_fetchers)
    }

    /// Creates a new crawler from collaborators the caller keeps a handle on
    pub fn from_shared(
        fetcher: Arc<dyn Fetcher>,
        processor: Arc<dyn Processor>,
        max_concurrent_fetchers: usize,
    ) -> Self {
        Self {
            fetcher,
            processor,
            max_concurrent_fetchers: max_concurrent_fetchers.max(1),
        }
    }

    pub fn max_concurrent_fetchers(&self) -> usize {
        self.max_concurrent_fetchers
    }

    /// Crawls recursively from `seed`, following links up to `max_depth` hops
    ///
    /// Depth counts fetches along a path: `max_depth = 1` fetches only the
    /// seed, `max_depth = 2` also fetches the seed's children, and
    /// `max_depth = 0` fetches nothing.
    ///
    /// Returns once every task of the session has returned. Fetch failures
    /// are recorded in the report and never abort the crawl.
    ///
    /// There is no timeout here: a fetch that never completes keeps its
    /// gate unit and keeps this call from returning.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use linkcrawl::config::FetcherConfig;
    /// use linkcrawl::{Crawler, PrintProcessor, WebFetcher};
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let fetcher = WebFetcher::new(&FetcherConfig::default())?;
    /// let crawler = Crawler::new(fetcher, PrintProcessor, 30);
    /// let report = crawler.crawl("https://example.com/", 3).await;
    /// println!("{} pages fetched", report.succeeded());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn crawl(&self, seed: &str, max_depth: u32) -> CrawlReport {
        let session = Arc::new(Session {
            fetcher: Arc::clone(&self.fetcher),
            processor: Arc::clone(&self.processor),
            ledger: Ledger::new(),
            gate: AdmissionGate::new(self.max_concurrent_fetchers),
        });

        let started_at = Utc::now();
        tracing::info!(
            "Crawling {} (max depth {}, {} concurrent fetchers)",
            seed,
            max_depth,
            self.max_concurrent_fetchers
        );

        // The root runs in its own task so a panicking collaborator is
        // contained like it is for every other address.
        let root = tokio::spawn(Arc::clone(&session).expand(seed.to_string(), max_depth));
        if let Err(e) = root.await {
            tracing::error!("Crawl task for {} aborted: {}", seed, e);
        }

        let report = CrawlReport {
            seed: seed.to_string(),
            max_depth,
            entries: session.ledger.snapshot(),
            max_concurrent_fetchers: session.gate.capacity(),
            peak_in_flight: session.gate.peak_in_flight(),
            started_at,
            finished_at: Utc::now(),
        };

        tracing::info!(
            "Crawl of {} finished: {} claimed, {} succeeded, {} failed in {}ms",
            seed,
            report.claimed(),
            report.succeeded(),
            report.failed(),
            report.duration().num_milliseconds()
        );

        report
    }
}

impl Session {
    /// Fetches `address` in a task of its own
    ///
    /// A panicking fetcher surfaces as [`FetchError::Panicked`], so the
    /// claimed address still gets a terminal outcome.
    async fn fetch(&self, address: &str) -> Result<FetchedPage, FetchError> {
        let fetcher = Arc::clone(&self.fetcher);
        let owned = address.to_string();

        tokio::spawn(async move { fetcher.fetch(&owned).await })
            .await
            .unwrap_or_else(|e| {
                tracing::error!("Fetch task for {} aborted: {}", address, e);
                Err(FetchError::Panicked {
                    url: address.to_string(),
                })
            })
    }

    /// Expands one address and, transitively, everything reachable from it
    /// within `remaining_depth` hops
    fn expand(self: Arc<Self>, address: String, remaining_depth: u32) -> Expansion {
        Box::pin(async move {
            if remaining_depth == 0 {
                return;
            }

            if !self.ledger.try_claim(&address) {
                tracing::trace!("Already visited {}", address);
                return;
            }

            let fetched = match self.gate.acquire().await {
                Ok(permit) => {
                    let fetched = self.fetch(&address).await;
                    permit.release();
                    fetched
                }
                Err(_) => Err(FetchError::GateClosed {
                    url: address.clone(),
                }),
            };

            let page = match fetched {
                Ok(page) => {
                    self.ledger.resolve(&address, Outcome::Succeeded);
                    page
                }
                Err(e) => {
                    self.ledger.resolve(&address, Outcome::Failed(e.to_string()));
                    tracing::warn!("{}", e);
                    return;
                }
            };

            if let Err(e) = self.processor.process(&address, &page) {
                tracing::warn!("Failed to process {}: {}", address, e);
            }

            let mut children = JoinSet::new();
            for link in page.links {
                children.spawn(Arc::clone(&self).expand(link, remaining_depth - 1));
            }

            while let Some(joined) = children.join_next().await {
                if let Err(e) = joined {
                    tracing::error!("Crawl task below {} aborted: {}", address, e);
                }
            }
        })
    }
}
