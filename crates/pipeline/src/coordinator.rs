//! Pipeline coordinator - drives the two-stage run per work request

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

use contracts::{
    ImageFilter, ImageSource, PipelineError, Presenter, RunOutcome, RunState, StageKind,
    WorkRequest,
};
use executors::LaneHandles;
use observability::{record_run_outcome, record_run_started, record_stage_latency};

use crate::scope::{FailureHandler, PipelineScope};
use crate::token::CancelToken;

/// Coordinates two-stage pipeline runs bound to a cancellable scope.
///
/// Stage 1 (fetch+decode) runs on the I/O lane, Stage 2 (filter) on the CPU
/// lane; the display callback and any error-UI update run on the ordered UI
/// lane. Stages within one run are strictly sequential; separate runs are
/// independent and may interleave, sharing only the cancel token.
pub struct PipelineCoordinator {
    lanes: LaneHandles,
    source: Arc<dyn ImageSource>,
    filter: Arc<dyn ImageFilter>,
    presenter: Arc<dyn Presenter>,
    scope: PipelineScope,
    next_run_id: AtomicU64,
}

impl PipelineCoordinator {
    /// Create a coordinator with a fresh scope.
    ///
    /// The failure handler is attached to the scope here, at creation time,
    /// not per call site.
    pub fn new(
        lanes: LaneHandles,
        source: Arc<dyn ImageSource>,
        filter: Arc<dyn ImageFilter>,
        presenter: Arc<dyn Presenter>,
    ) -> Self {
        let scope = PipelineScope::new(lanes.ui.clone(), Arc::clone(&presenter));
        Self {
            lanes,
            source,
            filter,
            presenter,
            scope,
            next_run_id: AtomicU64::new(1),
        }
    }

    /// Whether the owning scope still accepts work
    pub fn is_active(&self) -> bool {
        self.scope.is_active()
    }

    /// Cancel the scope.
    ///
    /// In-flight stages run to completion internally but their results are
    /// discarded on delivery; the coordinator cannot be restarted.
    pub fn cancel(&self) {
        self.scope.cancel();
    }

    /// Launch a pipeline run for the given request.
    ///
    /// # Errors
    /// Returns `ScopeInactive` after cancellation, or `InvalidRequest` if the
    /// request fails validation. No stage executes in either case.
    #[instrument(name = "pipeline_start", skip(self, request), fields(url = %request.url, name = %request.name))]
    pub fn start(&self, request: WorkRequest) -> Result<RunHandle, PipelineError> {
        if !self.scope.is_active() {
            return Err(PipelineError::ScopeInactive);
        }
        request.check()?;

        let run_id = self.next_run_id.fetch_add(1, Ordering::Relaxed);
        let (state_tx, state_rx) = watch::channel(RunState::Idle);

        let driver = RunDriver {
            run_id,
            request,
            lanes: self.lanes.clone(),
            source: Arc::clone(&self.source),
            filter: Arc::clone(&self.filter),
            presenter: Arc::clone(&self.presenter),
            token: self.scope.token(),
            handler: self.scope.handler(),
            state_tx,
        };

        info!(run_id, "pipeline run launched");
        tokio::spawn(driver.drive());

        Ok(RunHandle { run_id, state_rx })
    }
}

/// Handle to an in-flight pipeline run
pub struct RunHandle {
    run_id: u64,
    state_rx: watch::Receiver<RunState>,
}

impl RunHandle {
    /// Run identifier (unique per coordinator)
    pub fn run_id(&self) -> u64 {
        self.run_id
    }

    /// Current run state
    pub fn state(&self) -> RunState {
        *self.state_rx.borrow()
    }

    /// Wait until the run reaches a terminal state
    pub async fn finished(&mut self) -> RunState {
        loop {
            let state = *self.state_rx.borrow_and_update();
            if state.is_terminal() {
                return state;
            }
            if self.state_rx.changed().await.is_err() {
                return *self.state_rx.borrow();
            }
        }
    }
}

/// Everything one run needs, moved into its driver task
struct RunDriver {
    run_id: u64,
    request: WorkRequest,
    lanes: LaneHandles,
    source: Arc<dyn ImageSource>,
    filter: Arc<dyn ImageFilter>,
    presenter: Arc<dyn Presenter>,
    token: CancelToken,
    handler: Arc<FailureHandler>,
    state_tx: watch::Sender<RunState>,
}

impl RunDriver {
    fn transition(&self, state: RunState) {
        debug!(run_id = self.run_id, state = ?state, "run state transition");
        // Nobody may be watching; that's fine
        let _ = self.state_tx.send(state);
    }

    fn terminate_cancelled(&self) {
        self.transition(RunState::Cancelled);
        record_run_outcome(RunOutcome::Cancelled);
        debug!(run_id = self.run_id, "run result discarded after cancellation");
    }

    async fn terminate_failed(&self, error: PipelineError) {
        self.handler
            .handle(self.run_id, &self.request.name, error)
            .await;
        self.transition(RunState::Failed);
        record_run_outcome(RunOutcome::Failed);
    }

    /// Drive the run to a terminal state.
    ///
    /// The token is checked before each stage and again when each stage's
    /// result is delivered, so cancellation discards rather than preempts.
    async fn drive(self) {
        record_run_started();

        if self.token.is_cancelled() {
            self.terminate_cancelled();
            return;
        }

        // Stage 1: fetch + decode on the I/O lane
        self.transition(RunState::Fetching);
        let fetch_started = Instant::now();
        let source = Arc::clone(&self.source);
        let url = self.request.url.clone();
        let fetched = self
            .lanes
            .io
            .run(async move { source.fetch_and_decode(&url).await })
            .await;

        if self.token.is_cancelled() {
            self.terminate_cancelled();
            return;
        }
        let artifact = match fetched.and_then(|r| r) {
            Ok(artifact) => artifact,
            Err(e) => {
                self.terminate_failed(e).await;
                return;
            }
        };
        record_stage_latency(StageKind::Fetch, fetch_started.elapsed().as_secs_f64());
        debug!(
            run_id = self.run_id,
            width = artifact.width,
            height = artifact.height,
            "artifact fetched"
        );

        // Stage 2: filter on the CPU lane
        self.transition(RunState::Transforming);
        let transform_started = Instant::now();
        let filter = Arc::clone(&self.filter);
        let transformed = self
            .lanes
            .cpu
            .run(move || filter.apply(&artifact))
            .await;

        if self.token.is_cancelled() {
            self.terminate_cancelled();
            return;
        }
        let filtered = match transformed.and_then(|r| r) {
            Ok(filtered) => filtered,
            Err(e) => {
                self.terminate_failed(e).await;
                return;
            }
        };
        record_stage_latency(
            StageKind::Transform,
            transform_started.elapsed().as_secs_f64(),
        );

        // Terminal success: display on the UI lane, gated on the token at
        // delivery time
        self.transition(RunState::Displaying);
        let presenter = Arc::clone(&self.presenter);
        let token = self.token.clone();
        let run_id = self.run_id;
        let posted = self
            .lanes
            .ui
            .post(Box::new(move || {
                if token.is_cancelled() {
                    return;
                }
                if let Err(e) = presenter.display(&filtered) {
                    warn!(run_id, error = %e, "presenter display failed");
                }
            }))
            .await;
        if posted.is_err() {
            warn!(run_id = self.run_id, "UI lane closed, display skipped");
        }
        record_run_outcome(RunOutcome::Displayed);
        info!(run_id = self.run_id, name = %self.request.name, "pipeline run displayed");
    }
}
