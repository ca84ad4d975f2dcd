//! CPU lane - bounded worker threads for compute-bound stages

use std::sync::Arc;
use std::thread;

use tokio::sync::oneshot;
use tracing::debug;

use contracts::PipelineError;

use crate::metrics::LaneMetrics;

/// Job type for the CPU lane
pub type CpuJob = Box<dyn FnOnce() + Send + 'static>;

const LANE_NAME: &str = "cpu";

/// CPU-oriented execution lane.
///
/// Dedicated OS threads (default: available parallelism) pull blocking jobs
/// from a shared queue. Jobs never touch the async runtime.
pub struct CpuLane {
    handle: CpuHandle,
    workers: Vec<thread::JoinHandle<()>>,
}

impl CpuLane {
    /// Spawn the CPU lane.
    ///
    /// `workers = None` sizes the pool to the host's available parallelism.
    pub fn spawn(workers: Option<usize>, queue_capacity: usize) -> Self {
        let worker_count = workers.unwrap_or_else(default_worker_count).max(1);
        let (tx, rx) = async_channel::bounded::<CpuJob>(queue_capacity);
        let metrics = Arc::new(LaneMetrics::new());

        let worker_handles = (0..worker_count)
            .map(|worker_id| {
                let rx = rx.clone();
                let metrics = Arc::clone(&metrics);
                thread::Builder::new()
                    .name(format!("cpu-lane-{worker_id}"))
                    .spawn(move || cpu_worker(worker_id, rx, metrics))
                    .expect("failed to spawn CPU lane worker thread")
            })
            .collect();

        Self {
            handle: CpuHandle { tx, metrics },
            workers: worker_handles,
        }
    }

    /// Get a clonable submission handle
    pub fn handle(&self) -> CpuHandle {
        self.handle.clone()
    }

    /// Number of worker threads
    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    /// Shutdown the lane gracefully, draining queued jobs first.
    ///
    /// Joins OS threads; call from a context where brief blocking is fine.
    pub fn shutdown(self) {
        let CpuLane { handle, workers } = self;
        handle.tx.close();
        for worker in workers {
            let _ = worker.join();
        }
        debug!(lane = LANE_NAME, "CPU lane shutdown complete");
    }
}

fn default_worker_count() -> usize {
    thread::available_parallelism().map(|n| n.get()).unwrap_or(2)
}

/// Clonable submission handle for the CPU lane
#[derive(Clone)]
pub struct CpuHandle {
    tx: async_channel::Sender<CpuJob>,
    metrics: Arc<LaneMetrics>,
}

impl CpuHandle {
    /// Lane name
    pub fn name(&self) -> &'static str {
        LANE_NAME
    }

    /// Get lane metrics
    pub fn metrics(&self) -> &Arc<LaneMetrics> {
        &self.metrics
    }

    /// Submit a blocking job and suspend until it completes.
    ///
    /// # Errors
    /// Returns `PipelineError::LaneClosed` if the lane has shut down.
    pub async fn run<T, F>(&self, job: F) -> Result<T, PipelineError>
    where
        T: Send + 'static,
        F: FnOnce() -> T + Send + 'static,
    {
        let (done_tx, done_rx) = oneshot::channel();
        let boxed: CpuJob = Box::new(move || {
            // Receiver may be gone if the caller was dropped mid-run
            let _ = done_tx.send(job());
        });

        self.tx.send(boxed).await.map_err(|_| {
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

/// Worker thread that runs CPU jobs
fn cpu_worker(worker_id: usize, rx: async_channel::Receiver<CpuJob>, metrics: Arc<LaneMetrics>) {
    debug!(lane = LANE_NAME, worker_id, "CPU worker started");

    while let Ok(job) = rx.recv_blocking() {
        metrics.set_queue_len(rx.len());
        job();
        metrics.inc_completed();
    }

    debug!(lane = LANE_NAME, worker_id, "CPU worker stopped");
}
