//! I/O lane - async worker pool for network/stream-bound stages

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, error};

use contracts::PipelineError;

use crate::metrics::LaneMetrics;

/// Job type for the I/O lane
pub type IoJob = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

const LANE_NAME: &str = "io";

/// I/O-oriented execution lane.
///
/// A fixed pool of async workers pulls jobs from a shared queue; jobs may
/// await network or stream reads. Concurrency is bounded by the worker count.
pub struct IoLane {
    handle: IoHandle,
    workers: Vec<JoinHandle<()>>,
}

impl IoLane {
    /// Spawn the I/O lane with the given worker count and queue capacity
    pub fn spawn(workers: usize, queue_capacity: usize) -> Self {
        let (tx, rx) = async_channel::bounded::<IoJob>(queue_capacity);
        let metrics = Arc::new(LaneMetrics::new());

        let worker_handles = (0..workers.max(1))
            .map(|worker_id| {
                let rx = rx.clone();
                let metrics = Arc::clone(&metrics);
                tokio::spawn(async move {
                    io_worker(worker_id, rx, metrics).await;
                })
            })
            .collect();

        Self {
            handle: IoHandle { tx, metrics },
            workers: worker_handles,
        }
    }

    /// Get a clonable submission handle
    pub fn handle(&self) -> IoHandle {
        self.handle.clone()
    }

    /// Shutdown the lane gracefully, draining queued jobs first
    pub async fn shutdown(self) {
        let IoLane { handle, workers } = self;
        handle.tx.close();
        for worker in workers {
            if let Err(e) = worker.await {
                error!(lane = LANE_NAME, error = ?e, "I/O worker task panicked");
            }
        }
        debug!(lane = LANE_NAME, "I/O lane shutdown complete");
    }
}

/// Clonable submission handle for the I/O lane
#[derive(Clone)]
pub struct IoHandle {
    tx: async_channel::Sender<IoJob>,
    metrics: Arc<LaneMetrics>,
}

impl IoHandle {
    /// Lane name
    pub fn name(&self) -> &'static str {
        LANE_NAME
    }

    /// Get lane metrics
    pub fn metrics(&self) -> &Arc<LaneMetrics> {
        &self.metrics
    }

    /// Submit a future to the lane and suspend until it completes.
    ///
    /// # Errors
    /// Returns `PipelineError::LaneClosed` if the lane has shut down.
    pub async fn run<T, F>(&self, fut: F) -> Result<T, PipelineError>
    where
        T: Send + 'static,
        F: Future<Output = T> + Send + 'static,
    {
        let (done_tx, done_rx) = oneshot::channel();
        let job: IoJob = Box::pin(async move {
            // Receiver may be gone if the caller was dropped mid-run
            let _ = done_tx.send(fut.await);
        });

        self.tx.send(job).await.map_err(|_| {
            self.metrics.inc_rejected();
            PipelineError::lane_closed(LANE_NAME)
        })?;
        self.metrics.inc_submitted();
        self.metrics.set_queue_len(self.tx.len());

        done_rx
            .await
            .map_err(|_| PipelineError::lane_closed(LANE_NAME))
    }
}

/// Worker task that drives I/O jobs
async fn io_worker(worker_id: usize, rx: async_channel::Receiver<IoJob>, metrics: Arc<LaneMetrics>) {
    debug!(lane = LANE_NAME, worker_id, "I/O worker started");

    while let Ok(job) = rx.recv().await {
        metrics.set_queue_len(rx.len());
        job.await;
        metrics.inc_completed();
    }

    debug!(lane = LANE_NAME, worker_id, "I/O worker stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{sleep, Duration};

    #[tokio::test]
    async fn test_run_returns_value() {
        let lane = IoLane::spawn(2, 16);
        let handle = lane.handle();

        let value = handle.run(async { 41 + 1 }).await.unwrap();
        assert_eq!(value, 42);

        lane.shutdown().await;
    }

    #[tokio::test]
    async fn test_run_after_shutdown_is_lane_closed() {
        let lane = IoLane::spawn(2, 16);
        let handle = lane.handle();
        lane.shutdown().await;

        let result = handle.run(async { 1 }).await;
        assert!(matches!(result, Err(PipelineError::LaneClosed { .. })));
        assert_eq!(handle.metrics().rejected(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_jobs_interleave() {
        let lane = IoLane::spawn(4, 16);
        let handle = lane.handle();

        let slow = handle.run(async {
            sleep(Duration::from_millis(50)).await;
            "slow"
        });
        let fast = handle.run(async { "fast" });

        let (slow, fast) = tokio::join!(slow, fast);
        assert_eq!(slow.unwrap(), "slow");
        assert_eq!(fast.unwrap(), "fast");

        lane.shutdown().await;
    }
}
