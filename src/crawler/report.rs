use crate::state::{Outcome, VisitedEntry};
use chrono::{DateTime, Duration, Utc};

/// Final state of a crawl session
///
/// Built from the session's ledger once every task has returned, so it holds
/// one terminal entry per claimed address.
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// Seed address the crawl started from
    pub seed: String,

    /// Depth the crawl was run with
    pub max_depth: u32,

    /// Every claimed address with its outcome, sorted by address
    pub entries: Vec<VisitedEntry>,

    /// Capacity of the admission gate
    pub max_concurrent_fetchers: usize,

    /// Highest number of fetches observed running at the same time
    pub peak_in_flight: usize,

    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl CrawlReport {
    /// Number of claimed addresses
    pub fn claimed(&self) -> usize {
        self.entries.len()
    }

    /// Number of addresses fetched and processed
    pub fn succeeded(&self) -> usize {
        self.count(Outcome::is_success)
    }

    /// Number of addresses whose fetch failed
    pub fn failed(&self) -> usize {
        self.count(Outcome::is_failure)
    }

    /// Number of addresses still pending; zero after a completed crawl
    pub fn pending(&self) -> usize {
        self.count(|outcome| !outcome.is_terminal())
    }

    /// Looks up the outcome of an address
    pub fn outcome(&self, address: &str) -> Option<&Outcome> {
        self.entries
            .binary_search_by(|entry| entry.address.as_str().cmp(address))
            .ok()
            .map(|index| &self.entries[index].outcome)
    }

    /// Failed addresses with their reasons
    pub fn failures(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().filter_map(|entry| {
            entry
                .outcome
                .reason()
                .map(|reason| (entry.address.as_str(), reason))
        })
    }

    /// Wall-clock duration of the crawl
    pub fn duration(&self) -> Duration {
        self.finished_at - self.started_at
    }

    fn count(&self, predicate: impl Fn(&Outcome) -> bool) -> usize {
        self.entries
            .iter()
            .filter(|entry| predicate(&entry.outcome))
            .count()
    }
}
