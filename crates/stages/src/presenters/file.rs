//! FilePresenter - writes displayed artifacts to disk as PNG

use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

use image::RgbaImage;
use tracing::{error, info};

use contracts::{ImageArtifact, PipelineError, Presenter};

/// Presenter that encodes each displayed artifact as `NNN.png` in an output
/// directory. Error messages go to the log only.
pub struct FilePresenter {
    name: String,
    output_dir: PathBuf,
    seq: AtomicU64,
}

impl FilePresenter {
    /// Create a presenter, creating the output directory if needed
    pub fn new(name: impl Into<String>, output_dir: impl Into<PathBuf>) -> std::io::Result<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir)?;
        Ok(Self {
            name: name.into(),
            output_dir,
            seq: AtomicU64::new(0),
        })
    }

    /// Path the next displayed artifact will be written to
    fn next_path(&self) -> PathBuf {
        let seq = self.seq.fetch_add(1, Ordering::Relaxed);
        self.output_dir.join(format!("{seq:03}.png"))
    }
}

impl Presenter for FilePresenter {
    fn name(&self) -> &str {
        &self.name
    }

    fn display(&self, artifact: &ImageArtifact) -> Result<(), PipelineError> {
        let image = RgbaImage::from_raw(
            artifact.width,
            artifact.height,
            artifact.pixels.to_vec(),
        )
        .ok_or_else(|| PipelineError::present("artifact pixel buffer does not match dimensions"))?;

        let path = self.next_path();
        image
            .save(&path)
            .map_err(|e| PipelineError::present(format!("failed to write {}: {e}", path.display())))?;

        info!(
            presenter = %self.name,
            path = %path.display(),
            width = artifact.width,
            height = artifact.height,
            "artifact written"
        );
        Ok(())
    }

    fn show_error(&self, message: &str) {
        error!(presenter = %self.name, message, "pipeline error");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_display_writes_png() {
        let dir = tempdir().unwrap();
        let presenter = FilePresenter::new("file", dir.path()).unwrap();
        let artifact = ImageArtifact::new(2, 2, vec![200u8; 16]);

        presenter.display(&artifact).unwrap();
        presenter.display(&artifact).unwrap();

        assert!(dir.path().join("000.png").exists());
        assert!(dir.path().join("001.png").exists());
    }

    #[test]
    fn test_malformed_artifact_is_present_error() {
        let dir = tempdir().unwrap();
        let presenter = FilePresenter::new("file", dir.path()).unwrap();
        let artifact = ImageArtifact::new(4, 4, vec![0u8; 8]);

        let result = presenter.display(&artifact);
        assert!(matches!(result, Err(PipelineError::Present { .. })));
    }
}
