//! MockImageSource - configurable source for tests and offline runs

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Notify;
use tracing::debug;

use contracts::{ImageArtifact, ImageSource, PipelineError};

/// Mock fetch stage.
///
/// Produces a solid-color artifact, or fails, after an optional delay and/or
/// an explicit gate release. The gate lets tests cancel a scope while the
/// fetch is provably still in flight.
pub struct MockImageSource {
    artifact: ImageArtifact,
    failure: Option<String>,
    delay: Option<Duration>,
    gate: Option<Arc<Notify>>,
    calls: Arc<AtomicU64>,
}

impl MockImageSource {
    /// Source that succeeds with a solid-color artifact of the given size
    pub fn ok(width: u32, height: u32) -> Self {
        let pixels = vec![128u8; width as usize * height as usize * 4];
        Self {
            artifact: ImageArtifact::new(width, height, pixels),
            failure: None,
            delay: None,
            gate: None,
            calls: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Source that fails every fetch with the given message
    pub fn failing(message: impl Into<String>) -> Self {
        let mut source = Self::ok(1, 1);
        source.failure = Some(message.into());
        source
    }

    /// Sleep before completing each fetch
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Block each fetch until the returned gate is notified
    pub fn with_gate(mut self) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        self.gate = Some(Arc::clone(&gate));
        (self, gate)
    }

    /// Shared fetch-call counter
    pub fn calls(&self) -> Arc<AtomicU64> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl ImageSource for MockImageSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch_and_decode(&self, url: &str) -> Result<ImageArtifact, PipelineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        debug!(url, "mock fetch started");

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        match &self.failure {
            Some(message) => Err(PipelineError::fetch(url, message.clone())),
            None => Ok(self.artifact.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ok_source_produces_well_formed_artifact() {
        let source = MockImageSource::ok(4, 3);
        let artifact = source.fetch_and_decode("mock://img").await.unwrap();
        assert_eq!((artifact.width, artifact.height), (4, 3));
        assert!(artifact.is_well_formed());
        assert_eq!(source.calls().load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failing_source_is_fetch_error() {
        let source = MockImageSource::failing("stream reset");
        let result = source.fetch_and_decode("mock://img").await;
        assert!(matches!(result, Err(PipelineError::Fetch { .. })));
    }

    #[tokio::test]
    async fn test_gate_blocks_until_notified() {
        let (source, gate) = MockImageSource::ok(1, 1).with_gate();
        let source = Arc::new(source);

        let fetch = {
            let source = Arc::clone(&source);
            tokio::spawn(async move { source.fetch_and_decode("mock://img").await })
        };

        // Still pending until the gate opens
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!fetch.is_finished());

        gate.notify_one();
        assert!(fetch.await.unwrap().is_ok());
    }
}
