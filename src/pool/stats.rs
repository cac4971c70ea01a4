// src/pool/stats.rs
// Counters for one pool, updated by workers and submitters concurrently.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Default)]
pub(super) struct Counters {
    pub submitted: AtomicUsize,
    pub rejected: AtomicUsize,
    pub completed: AtomicUsize,
    pub panicked: AtomicUsize,
    pub discarded: AtomicUsize,
    pub in_flight: AtomicUsize,
}

impl Counters {
    pub fn bump(counter: &AtomicUsize) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> PoolStats {
        PoolStats {
            submitted: self.submitted.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
            completed: self.completed.load(Ordering::Relaxed),
            panicked: self.panicked.load(Ordering::Relaxed),
            discarded: self.discarded.load(Ordering::Relaxed),
            in_flight: self.in_flight.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time view of a pool's counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PoolStats {
    /// Tasks accepted into the queue
    pub submitted: usize,
    /// Tasks refused because the pool was shutting down
    pub rejected: usize,
    /// Tasks whose handler returned normally
    pub completed: usize,
    /// Tasks whose handler panicked
    pub panicked: usize,
    /// Tasks still queued when the pool shut down
    pub discarded: usize,
    /// Tasks running right now; after an abort, the ones that were abandoned
    pub in_flight: usize,
}
