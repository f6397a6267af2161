//! State module for tracking crawl progress
//!
//! This module provides the per-session record of which addresses have been
//! claimed and how their fetches resolved.
//!
//! # Components
//!
//! - `Outcome`: The state of a single claimed address (pending, succeeded, failed)
//! - `VisitedEntry`: An address paired with its outcome
//! - `Ledger`: The thread-safe map of all claimed addresses with atomic check-and-claim

mod ledger;
mod outcome;

// Re-export main types
pub use ledger::Ledger;
pub use outcome::{Outcome, VisitedEntry};
