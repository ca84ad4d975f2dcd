//! LogPresenter - logs artifact summaries via tracing

use tracing::{error, info};

use contracts::{ImageArtifact, PipelineError, Presenter};

/// Presenter that logs a one-line summary per displayed artifact
pub struct LogPresenter {
    name: String,
}

impl LogPresenter {
    /// Create a new LogPresenter with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Presenter for LogPresenter {
    fn name(&self) -> &str {
        &self.name
    }

    fn display(&self, artifact: &ImageArtifact) -> Result<(), PipelineError> {
        info!(
            presenter = %self.name,
            width = artifact.width,
            height = artifact.height,
            bytes = artifact.pixels.len(),
            "artifact displayed"
        );
        Ok(())
    }

    fn show_error(&self, message: &str) {
        error!(presenter = %self.name, message, "pipeline error");
    }
}
