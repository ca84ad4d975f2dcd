//! Per-lane metrics for observability

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

/// Metrics for a single execution lane
#[derive(Debug, Default)]
pub struct LaneMetrics {
    /// Current queue length (approximation)
    queue_len: AtomicUsize,
    /// Total jobs accepted
    submitted: AtomicU64,
    /// Total jobs run to completion
    completed: AtomicU64,
    /// Total jobs rejected (lane closed)
    rejected: AtomicU64,
}

impl LaneMetrics {
    /// Create new metrics instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Get current queue length
    pub fn queue_len(&self) -> usize {
        self.queue_len.load(Ordering::Relaxed)
    }

    /// Set current queue length
    pub fn set_queue_len(&self, len: usize) {
        self.queue_len.store(len, Ordering::Relaxed);
    }

    /// Get submitted count
    pub fn submitted(&self) -> u64 {
        self.submitted.load(Ordering::Relaxed)
    }

    /// Increment submitted count
    pub fn inc_submitted(&self) {
        self.submitted.fetch_add(1, Ordering::Relaxed);
    }

    /// Get completed count
    pub fn completed(&self) -> u64 {
        self.completed.load(Ordering::Relaxed)
    }

    /// Increment completed count
    pub fn inc_completed(&self) {
        self.completed.fetch_add(1, Ordering::Relaxed);
    }

    /// Get rejected count
    pub fn rejected(&self) -> u64 {
        self.rejected.load(Ordering::Relaxed)
    }

    /// Increment rejected count
    pub fn inc_rejected(&self) {
        self.rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Get snapshot of all counters
    pub fn snapshot(&self) -> LaneMetricsSnapshot {
        LaneMetricsSnapshot {
            queue_len: self.queue_len(),
            submitted: self.submitted(),
            completed: self.completed(),
            rejected: self.rejected(),
        }
    }
}

/// Snapshot of lane metrics (for reporting)
#[derive(Debug, Clone, Copy)]
pub struct LaneMetricsSnapshot {
    pub queue_len: usize,
    pub submitted: u64,
    pub completed: u64,
    pub rejected: u64,
}
