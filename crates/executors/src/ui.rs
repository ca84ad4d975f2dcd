//! UI lane - single ordered worker for presentation callbacks

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error};

use contracts::PipelineError;

use crate::metrics::LaneMetrics;

/// Job type for the UI lane
pub type UiJob = Box<dyn FnOnce() + Send + 'static>;

const LANE_NAME: &str = "ui";

/// UI-affine execution lane.
///
/// A single worker task drains the queue, so jobs run strictly in submission
/// order. Used for display and error-UI callbacks and nothing else.
pub struct UiLane {
    handle: UiHandle,
    worker: JoinHandle<()>,
}

impl UiLane {
    /// Spawn the UI lane worker
    pub fn spawn(queue_capacity: usize) -> Self {
        let (tx, rx) = mpsc::channel(queue_capacity);
        let metrics = Arc::new(LaneMetrics::new());

        let worker_metrics = Arc::clone(&metrics);
        let worker = tokio::spawn(async move {
            ui_worker(rx, worker_metrics).await;
        });

        Self {
            handle: UiHandle { tx, metrics },
            worker,
        }
    }

    /// Get a clonable submission handle
    pub fn handle(&self) -> UiHandle {
        self.handle.clone()
    }

    /// Shutdown the lane gracefully.
    ///
    /// Completes once every outstanding handle is dropped and the queue is
    /// drained.
    pub async fn shutdown(self) {
        let UiLane { handle, worker } = self;
        drop(handle);
        if let Err(e) = worker.await {
            error!(lane = LANE_NAME, error = ?e, "UI worker task panicked");
        }
        debug!(lane = LANE_NAME, "UI lane shutdown complete");
    }
}

/// Clonable submission handle for the UI lane
#[derive(Clone)]
pub struct UiHandle {
    tx: mpsc::Sender<UiJob>,
    metrics: Arc<LaneMetrics>,
}

impl UiHandle {
    /// Lane name
    pub fn name(&self) -> &'static str {
        LANE_NAME
    }

    /// Get lane metrics
    pub fn metrics(&self) -> &Arc<LaneMetrics> {
        &self.metrics
    }

    /// Post a job to run on the UI lane, in submission order.
    ///
    /// Fire-and-forget: completion of the job is not awaited.
    ///
    /// # Errors
    /// Returns `PipelineError::LaneClosed` if the lane has shut down.
    pub async fn post(&self, job: UiJob) -> Result<(), PipelineError> {
        self.tx.send(job).await.map_err(|_| {
            self.metrics.inc_rejected();
            PipelineError::lane_closed(LANE_NAME)
        })?;
        self.metrics.inc_submitted();
        Ok(())
    }
}

/// Worker task that runs UI jobs one at a time
async fn ui_worker(mut rx: mpsc::Receiver<UiJob>, metrics: Arc<LaneMetrics>) {
    debug!(lane = LANE_NAME, "UI worker started");

    while let Some(job) = rx.recv().await {
        metrics.set_queue_len(rx.len());
        job();
        metrics.inc_completed();
    }

    debug!(lane = LANE_NAME, "UI worker stopped");
}
