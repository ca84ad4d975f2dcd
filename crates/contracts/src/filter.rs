//! ImageFilter trait - transform stage abstraction

use crate::{ImageArtifact, PipelineError};

/// CPU-bound transform stage.
///
/// Pure with respect to the artifact: no I/O, no shared state. Filters are
/// expected not to fail on well-formed input, but the contract is fallible so
/// the coordinator never has to special-case an infallible stage.
pub trait ImageFilter: Send + Sync {
    /// Filter name (used for logging/metrics and error tagging)
    fn name(&self) -> &str;

    /// Apply the filter, producing a new artifact.
    ///
    /// # Errors
    /// Returns `PipelineError::Transform` on malformed input.
    fn apply(&self, artifact: &ImageArtifact) -> Result<ImageArtifact, PipelineError>;
}
