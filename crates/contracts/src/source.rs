//! ImageSource trait - fetch stage abstraction
//!
//! Defines a unified interface for producing decoded artifacts from a URL,
//! decoupling the coordinator from concrete transports. Supports unified
//! handling of real HTTP sources and mock sources.

use async_trait::async_trait;

use crate::{ImageArtifact, PipelineError};

/// Fetch + decode stage.
///
/// Runs on the I/O lane and may block on network/stream reads. Real and mock
/// sources implement the same interface so the coordinator never knows which
/// one it is driving.
#[async_trait]
pub trait ImageSource: Send + Sync {
    /// Source name (used for logging/metrics)
    fn name(&self) -> &str;

    /// Fetch the remote resource and decode it into an artifact.
    ///
    /// # Errors
    /// Returns `PipelineError::Fetch` on network, stream, or decode failure.
    async fn fetch_and_decode(&self, url: &str) -> Result<ImageArtifact, PipelineError>;
}
