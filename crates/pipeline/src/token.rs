//! Cancellation token shared by every task launched in a scope

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Lifecycle-bound cancellation flag.
///
/// Safe for concurrent reads with single-writer cancellation; once set it
/// can never be cleared. Checked at every suspension point, and again on
/// delivery of stage results so late arrivals are discarded.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a fresh (active) token
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the flag. Returns true on the first call, false if already set.
    pub fn cancel(&self) -> bool {
        !self.cancelled.swap(true, Ordering::SeqCst)
    }

    /// Whether the token has been cancelled
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Whether the token is still active
    pub fn is_active(&self) -> bool {
        !self.is_cancelled()
    }
}
