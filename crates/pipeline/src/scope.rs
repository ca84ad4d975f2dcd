//! Cancellable scope with a centralized failure handler
//!
//! The handler is attached once at scope creation; stage-local failures are
//! never handled at the call site.

use std::sync::Arc;

use executors::UiHandle;
use tracing::{error, warn};

use contracts::{PipelineError, Presenter};
use observability::record_failure;

use crate::token::CancelToken;

/// Lifecycle-bound container for in-flight pipeline work.
///
/// Created when the host activates, cancelled when the host is torn down.
/// Never reusable after cancellation; each activation needs a fresh scope.
pub struct PipelineScope {
    token: CancelToken,
    handler: Arc<FailureHandler>,
}

impl PipelineScope {
    /// Create a scope, attaching the failure handler to it
    pub fn new(ui: UiHandle, presenter: Arc<dyn Presenter>) -> Self {
        let token = CancelToken::new();
        let handler = Arc::new(FailureHandler {
            ui,
            presenter,
            token: token.clone(),
        });
        Self { token, handler }
    }

    /// Get the scope's cancellation token
    pub fn token(&self) -> CancelToken {
        self.token.clone()
    }

    /// Get the scope's failure handler
    pub(crate) fn handler(&self) -> Arc<FailureHandler> {
        Arc::clone(&self.handler)
    }

    /// Whether the scope still accepts work
    pub fn is_active(&self) -> bool {
        self.token.is_active()
    }

    /// Cancel the scope.
    ///
    /// Not-yet-started stages will not run; in-flight stage results are
    /// discarded on delivery. The scope rejects new work permanently.
    pub fn cancel(&self) {
        if self.token.cancel() {
            warn!("pipeline scope cancelled");
        }
    }
}

/// Scope-level failure handler, invoked exactly once per failed run.
///
/// Two independent actions: a best-effort error-UI update on the UI lane
/// (skipped once the scope is torn down), and a durable log + failure metric
/// that outlive the scope.
pub(crate) struct FailureHandler {
    ui: UiHandle,
    presenter: Arc<dyn Presenter>,
    token: CancelToken,
}

impl FailureHandler {
    pub(crate) async fn handle(&self, run_id: u64, request_name: &str, error: PipelineError) {
        // Durable log first: emitted synchronously so no failure is ever
        // silently dropped, with the metric recorded on a detached task that
        // does not belong to the scope.
        error!(
            run_id,
            request = %request_name,
            stage = ?error.stage().map(|s| s.as_str()),
            error = %error,
            "pipeline run failed"
        );
        let stage = error.stage();
        tokio::spawn(async move {
            record_failure(stage);
        });

        // Best-effort UI notification, gated on the token both at submission
        // and at delivery on the UI lane.
        if self.token.is_active() {
            let presenter = Arc::clone(&self.presenter);
            let token = self.token.clone();
            let message = error.to_string();
            let posted = self
                .ui
                .post(Box::new(move || {
                    if token.is_active() {
                        presenter.show_error(&message);
                    }
                }))
                .await;
            if posted.is_err() {
                warn!(run_id, "UI lane closed, error message not shown");
            }
        }
    }
}
