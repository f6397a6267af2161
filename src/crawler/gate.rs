//! Admission gate bounding how many fetches run at the same time
//!
//! Only the fetch call itself goes through the gate. Discovery, processing
//! and waiting on children happen outside of it, so a page with thousands of
//! links creates thousands of waiting tasks but never more than `capacity`
//! active fetches.

use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::{AcquireError, Semaphore, SemaphorePermit};

/// Counting semaphore pre-loaded with one unit per allowed concurrent fetch
#[derive(Debug)]
pub struct AdmissionGate {
    permits: Semaphore,
    capacity: usize,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

/// One unit of the gate, held for the duration of a single fetch
///
/// Dropping the permit returns the unit, so a fetch that fails or panics
/// still releases its slot.
#[must_use = "the fetch slot is released as soon as the permit is dropped"]
#[derive(Debug)]
pub struct FetchPermit<'a> {
    gate: &'a AdmissionGate,
    _permit: SemaphorePermit<'a>,
}

impl AdmissionGate {
    /// Creates a gate with `capacity` units; a capacity of 0 is raised to 1
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.clamp(1, Semaphore::MAX_PERMITS);
        Self {
            permits: Semaphore::new(capacity),
            capacity,
            in_flight: AtomicUsize::new(0),
            peak_in_flight: AtomicUsize::new(0),
        }
    }

    /// Waits until a unit is available and takes it
    ///
    /// # Returns
    ///
    /// * `Ok(FetchPermit)` - A unit; release it by dropping or calling `release`
    /// * `Err(AcquireError)` - The underlying semaphore was closed; a gate
    ///   never closes it, so a crawl session does not see this
    pub async fn acquire(&self) -> Result<FetchPermit<'_>, AcquireError> {
        let permit = self.permits.acquire().await?;

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);

        Ok(FetchPermit {
            gate: self,
            _permit: permit,
        })
    }

    /// Number of units the gate was loaded with
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Units currently free
    pub fn available(&self) -> usize {
        self.permits.available_permits()
    }

    /// Fetches currently holding a unit
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Highest number of units ever held at the same time
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }
}

impl FetchPermit<'_> {
    /// Returns the unit to the gate, waking at most one waiting `acquire`
    pub fn release(self) {
        drop(self);
    }
}

impl Drop for FetchPermit<'_> {
    fn drop(&mut self) {
        // Runs before the semaphore permit field is dropped, so `in_flight`
        // never exceeds `capacity`.
        self.gate.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}
