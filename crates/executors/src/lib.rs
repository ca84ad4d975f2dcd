//! # Executors
//!
//! Three named execution lanes with explicit submission:
//!
//! - **UI lane**: single worker, strictly ordered; presentation callbacks only
//! - **I/O lane**: async worker pool; stages that await network/stream reads
//! - **CPU lane**: OS worker threads; compute-bound stages
//!
//! Lanes never switch implicitly; callers submit to a named lane and suspend
//! on the returned result. Each lane carries atomic metrics and a graceful
//! shutdown that drains its queue.

mod cpu;
mod io;
mod metrics;
mod ui;

pub use cpu::{CpuHandle, CpuJob, CpuLane};
pub use io::{IoHandle, IoJob, IoLane};
pub use metrics::{LaneMetrics, LaneMetricsSnapshot};
pub use ui::{UiHandle, UiJob, UiLane};

/// Executor configuration
#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    /// UI lane queue capacity
    pub ui_queue: usize,
    /// I/O lane worker count
    pub io_workers: usize,
    /// I/O lane queue capacity
    pub io_queue: usize,
    /// CPU lane worker count (None = available parallelism)
    pub cpu_workers: Option<usize>,
    /// CPU lane queue capacity
    pub cpu_queue: usize,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            ui_queue: 64,
            io_workers: 4,
            io_queue: 64,
            cpu_workers: None,
            cpu_queue: 64,
        }
    }
}

/// The three lanes, started together and shut down together
pub struct Executors {
    ui: UiLane,
    io: IoLane,
    cpu: CpuLane,
}

impl Executors {
    /// Start all lanes with the given configuration
    pub fn start(config: ExecutorConfig) -> Self {
        Self {
            ui: UiLane::spawn(config.ui_queue),
            io: IoLane::spawn(config.io_workers, config.io_queue),
            cpu: CpuLane::spawn(config.cpu_workers, config.cpu_queue),
        }
    }

    /// Get submission handles for all lanes
    pub fn handles(&self) -> LaneHandles {
        LaneHandles {
            ui: self.ui.handle(),
            io: self.io.handle(),
            cpu: self.cpu.handle(),
        }
    }

    /// Shutdown all lanes gracefully.
    ///
    /// UI shutdown completes once every outstanding `UiHandle` is dropped, so
    /// drop coordinators before calling this.
    pub async fn shutdown(self) {
        let Executors { ui, io, cpu } = self;
        io.shutdown().await;
        cpu.shutdown();
        ui.shutdown().await;
    }
}

/// Clonable bundle of lane submission handles
#[derive(Clone)]
pub struct LaneHandles {
    /// UI-affine lane (ordered)
    pub ui: UiHandle,
    /// I/O lane
    pub io: IoHandle,
    /// CPU lane
    pub cpu: CpuHandle,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_start_and_shutdown_all_lanes() {
        let executors = Executors::start(ExecutorConfig::default());
        let handles = executors.handles();

        let io_value = handles.io.run(async { "io" }).await.unwrap();
        let cpu_value = handles.cpu.run(|| "cpu").await.unwrap();
        assert_eq!(io_value, "io");
        assert_eq!(cpu_value, "cpu");

        drop(handles);
        executors.shutdown().await;
    }
}
