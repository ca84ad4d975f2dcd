//! # Integration Tests
//!
//! End-to-end tests for the pipeline:
//! - Mock source → coordinator → capture presenter flows
//! - Exactly-once terminal notification guarantees
//! - Cancellation and scope-inactive behavior

#[cfg(test)]
mod e2e_tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use contracts::{
        ImageArtifact, ImageFilter, PipelineError, Presenter, RunState, WorkRequest,
    };
    use executors::{ExecutorConfig, Executors};
    use pipeline::PipelineCoordinator;
    use stages::{MockImageSource, SnowFilter};

    /// Presenter that records every terminal notification
    struct CapturePresenter {
        displayed: Mutex<Vec<ImageArtifact>>,
        errors: Mutex<Vec<String>>,
    }

    impl CapturePresenter {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                displayed: Mutex::new(Vec::new()),
                errors: Mutex::new(Vec::new()),
            })
        }

        fn display_count(&self) -> usize {
            self.displayed.lock().unwrap().len()
        }

        fn error_count(&self) -> usize {
            self.errors.lock().unwrap().len()
        }
    }

    impl Presenter for CapturePresenter {
        fn name(&self) -> &str {
            "capture"
        }

        fn display(&self, artifact: &ImageArtifact) -> Result<(), PipelineError> {
            self.displayed.lock().unwrap().push(artifact.clone());
            Ok(())
        }

        fn show_error(&self, message: &str) {
            self.errors.lock().unwrap().push(message.to_string());
        }
    }

    /// Filter that fails every artifact
    struct BrokenFilter {
        calls: Arc<AtomicUsize>,
    }

    impl ImageFilter for BrokenFilter {
        fn name(&self) -> &str {
            "broken"
        }

        fn apply(&self, _artifact: &ImageArtifact) -> Result<ImageArtifact, PipelineError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(PipelineError::transform("broken", "synthetic failure"))
        }
    }

    /// Filter that counts invocations and passes artifacts through
    struct CountingFilter {
        calls: Arc<AtomicUsize>,
    }

    impl ImageFilter for CountingFilter {
        fn name(&self) -> &str {
            "counting"
        }

        fn apply(&self, artifact: &ImageArtifact) -> Result<ImageArtifact, PipelineError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(artifact.clone())
        }
    }

    fn request() -> WorkRequest {
        WorkRequest::new("http://x/img.png", "snowy", "a snowy scene")
    }

    /// Happy path: fetch succeeds, snow filter succeeds, display called once.
    #[tokio::test]
    async fn test_successful_run_displays_exactly_once() {
        let executors = Executors::start(ExecutorConfig::default());
        let presenter = CapturePresenter::new();

        let coordinator = PipelineCoordinator::new(
            executors.handles(),
            Arc::new(MockImageSource::ok(32, 32)),
            Arc::new(SnowFilter::new(0.05).with_seed(7)),
            Arc::clone(&presenter) as Arc<dyn Presenter>,
        );

        let mut handle = coordinator.start(request()).unwrap();
        assert_eq!(handle.finished().await, RunState::Displaying);

        drop(coordinator);
        executors.shutdown().await;

        assert_eq!(presenter.display_count(), 1);
        assert_eq!(presenter.error_count(), 0);

        // The displayed artifact is the filtered one, dimensions preserved
        let displayed = presenter.displayed.lock().unwrap();
        assert_eq!((displayed[0].width, displayed[0].height), (32, 32));
        assert!(displayed[0].is_well_formed());
    }

    /// Stage 1 failure: filter never invoked, handler exactly once.
    #[tokio::test]
    async fn test_fetch_failure_skips_transform() {
        let executors = Executors::start(ExecutorConfig::default());
        let presenter = CapturePresenter::new();
        let filter_calls = Arc::new(AtomicUsize::new(0));

        let coordinator = PipelineCoordinator::new(
            executors.handles(),
            Arc::new(MockImageSource::failing("stream reset")),
            Arc::new(CountingFilter {
                calls: Arc::clone(&filter_calls),
            }),
            Arc::clone(&presenter) as Arc<dyn Presenter>,
        );

        let mut handle = coordinator.start(request()).unwrap();
        assert_eq!(handle.finished().await, RunState::Failed);

        drop(coordinator);
        executors.shutdown().await;

        assert_eq!(filter_calls.load(Ordering::SeqCst), 0);
        assert_eq!(presenter.display_count(), 0);
        assert_eq!(presenter.error_count(), 1);
        // The surfaced message is tagged as a fetch failure
        assert!(presenter.errors.lock().unwrap()[0].contains("fetch error"));
    }

    /// Stage 2 failure: display never invoked, handler exactly once.
    #[tokio::test]
    async fn test_transform_failure_never_displays() {
        let executors = Executors::start(ExecutorConfig::default());
        let presenter = CapturePresenter::new();
        let filter_calls = Arc::new(AtomicUsize::new(0));

        let coordinator = PipelineCoordinator::new(
            executors.handles(),
            Arc::new(MockImageSource::ok(8, 8)),
            Arc::new(BrokenFilter {
                calls: Arc::clone(&filter_calls),
            }),
            Arc::clone(&presenter) as Arc<dyn Presenter>,
        );

        let mut handle = coordinator.start(request()).unwrap();
        assert_eq!(handle.finished().await, RunState::Failed);

        drop(coordinator);
        executors.shutdown().await;

        assert_eq!(filter_calls.load(Ordering::SeqCst), 1);
        assert_eq!(presenter.display_count(), 0);
        assert_eq!(presenter.error_count(), 1);
    }

    /// Cancelling while the fetch is provably in flight: no display, no
    /// error UI, run terminates Cancelled with its result discarded.
    #[tokio::test]
    async fn test_cancel_discards_in_flight_run() {
        let executors = Executors::start(ExecutorConfig::default());
        let presenter = CapturePresenter::new();
        let (source, gate) = MockImageSource::ok(8, 8).with_gate();

        let coordinator = PipelineCoordinator::new(
            executors.handles(),
            Arc::new(source),
            Arc::new(SnowFilter::default()),
            Arc::clone(&presenter) as Arc<dyn Presenter>,
        );

        let mut handle = coordinator.start(request()).unwrap();

        // Let the run reach the fetch suspension point, then tear down
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(handle.state(), RunState::Fetching);
        coordinator.cancel();

        // Release the fetch; its result must be discarded on delivery
        gate.notify_one();
        assert_eq!(handle.finished().await, RunState::Cancelled);

        drop(coordinator);
        executors.shutdown().await;

        assert_eq!(presenter.display_count(), 0);
        assert_eq!(presenter.error_count(), 0);
    }

    /// start() on a cancelled scope: ScopeInactive, no stage execution.
    #[tokio::test]
    async fn test_start_after_cancel_is_scope_inactive() {
        let executors = Executors::start(ExecutorConfig::default());
        let presenter = CapturePresenter::new();
        let source = MockImageSource::ok(8, 8);
        let fetch_calls = source.calls();

        let coordinator = PipelineCoordinator::new(
            executors.handles(),
            Arc::new(source),
            Arc::new(SnowFilter::default()),
            Arc::clone(&presenter) as Arc<dyn Presenter>,
        );

        coordinator.cancel();
        let result = coordinator.start(request());
        assert!(matches!(result, Err(PipelineError::ScopeInactive)));

        drop(coordinator);
        executors.shutdown().await;

        assert_eq!(fetch_calls.load(Ordering::SeqCst), 0);
        assert_eq!(presenter.display_count(), 0);
        assert_eq!(presenter.error_count(), 0);
    }

    /// Independent runs on one scope interleave and each display once.
    #[tokio::test]
    async fn test_concurrent_runs_are_independent() {
        let executors = Executors::start(ExecutorConfig::default());
        let presenter = CapturePresenter::new();

        let coordinator = PipelineCoordinator::new(
            executors.handles(),
            Arc::new(MockImageSource::ok(16, 16).with_delay(Duration::from_millis(10))),
            Arc::new(SnowFilter::new(0.02).with_seed(1)),
            Arc::clone(&presenter) as Arc<dyn Presenter>,
        );

        let mut handles = Vec::new();
        for i in 0..5 {
            let request = WorkRequest::new(
                format!("http://x/{i}.png"),
                format!("img-{i}"),
                "",
            );
            handles.push(coordinator.start(request).unwrap());
        }

        for handle in &mut handles {
            assert_eq!(handle.finished().await, RunState::Displaying);
        }

        drop(coordinator);
        executors.shutdown().await;

        assert_eq!(presenter.display_count(), 5);
        assert_eq!(presenter.error_count(), 0);
    }
}
