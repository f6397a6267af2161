//! Visited ledger shared by every task of a crawl session
//!
//! The ledger is the deduplication guarantee of the crawler: the presence
//! check and the insertion of `Pending` happen under one lock, so at most one
//! caller ever wins the claim for a given address.

use crate::state::{Outcome, VisitedEntry};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Thread-safe mapping from address to outcome
#[derive(Debug, Default)]
pub struct Ledger {
    entries: Mutex<HashMap<String, Outcome>>,
}

impl Ledger {
    /// Creates an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    // A panic while holding the lock cannot leave the map half-updated, so a
    // poisoned lock is still safe to read and write.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, Outcome>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Atomically claims an address for fetching
    ///
    /// # Returns
    ///
    /// * `true` - The address was unseen and is now `Pending`; the caller owns
    ///   the right to fetch it
    /// * `false` - The address already has an entry, whatever its outcome;
    ///   nothing was changed
    pub fn try_claim(&self, address: &str) -> bool {
        let mut entries = self.lock();
        if entries.contains_key(address) {
            return false;
        }
        entries.insert(address.to_owned(), Outcome::Pending);
        true
    }

    /// Records the terminal outcome of a claimed address
    ///
    /// Only a `Pending` entry can be resolved, and only to a terminal outcome.
    /// Anything else is a caller bug; it is logged and the ledger is left
    /// untouched.
    ///
    /// # Returns
    ///
    /// `true` if the outcome was recorded
    pub fn resolve(&self, address: &str, outcome: Outcome) -> bool {
        if !outcome.is_terminal() {
            tracing::warn!("Refusing to resolve {} back to pending", address);
            return false;
        }

        let mut entries = self.lock();
        match entries.get_mut(address) {
            Some(slot) if !slot.is_terminal() => {
                *slot = outcome;
                true
            }
            Some(existing) => {
                tracing::warn!("Address {} already resolved as {}", address, existing);
                false
            }
            None => {
                tracing::warn!("Resolving unclaimed address {}", address);
                false
            }
        }
    }

    /// Returns the current outcome of an address, if it was ever claimed
    pub fn outcome(&self, address: &str) -> Option<Outcome> {
        self.lock().get(address).cloned()
    }

    /// Number of claimed addresses
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Copies every entry out of the ledger, sorted by address
    pub fn snapshot(&self) -> Vec<VisitedEntry> {
        let mut entries: Vec<VisitedEntry> = self
            .lock()
            .iter()
            .map(|(address, outcome)| VisitedEntry {
                address: address.clone(),
                outcome: outcome.clone(),
            })
            .collect();
        entries.sort_by(|a, b| a.address.cmp(&b.address));
        entries
    }
}
