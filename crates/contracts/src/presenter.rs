//! Presenter trait - UI-affine terminal notifications

use crate::{ImageArtifact, PipelineError};

/// Presentation callbacks, invoked on the UI lane only.
///
/// Exactly one of `display` / `show_error` fires per completed run; neither
/// fires for a cancelled run. Implementations must not assume any particular
/// thread beyond the UI lane's ordering guarantee.
pub trait Presenter: Send + Sync {
    /// Presenter name (used for logging)
    fn name(&self) -> &str;

    /// Deliver the final artifact.
    ///
    /// # Errors
    /// Failures are logged by the UI lane job; they never propagate back
    /// into the pipeline.
    fn display(&self, artifact: &ImageArtifact) -> Result<(), PipelineError>;

    /// Surface a failure message to the user
    fn show_error(&self, message: &str);
}
