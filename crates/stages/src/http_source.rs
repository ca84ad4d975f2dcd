//! HttpImageSource - fetches a remote image and decodes it to RGBA8

use async_trait::async_trait;
use tracing::{debug, instrument};

use contracts::{ImageArtifact, ImageSource, PipelineError};

/// HTTP fetch + decode stage.
///
/// One network round trip per run; the whole body is read before decoding.
/// Network, status, and decode failures all surface as `Fetch` errors.
pub struct HttpImageSource {
    client: reqwest::Client,
}

impl HttpImageSource {
    /// Create a source with a default client
    pub fn new() -> Self {
        Self::with_client(reqwest::Client::new())
    }

    /// Create a source with a caller-supplied client (timeouts, proxies)
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Default for HttpImageSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageSource for HttpImageSource {
    fn name(&self) -> &str {
        "http"
    }

    #[instrument(name = "http_fetch_and_decode", skip(self), fields(url = %url))]
    async fn fetch_and_decode(&self, url: &str) -> Result<ImageArtifact, PipelineError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| PipelineError::fetch(url, e.to_string()))?
            .error_for_status()
            .map_err(|e| PipelineError::fetch(url, e.to_string()))?;

        let body = response
            .bytes()
            .await
            .map_err(|e| PipelineError::fetch(url, format!("stream read failed: {e}")))?;

        debug!(url, bytes = body.len(), "image body fetched");
        decode_artifact(url, &body)
    }
}

/// Decode raw bytes into an RGBA8 artifact
pub(crate) fn decode_artifact(url: &str, body: &[u8]) -> Result<ImageArtifact, PipelineError> {
    let decoded = image::load_from_memory(body)
        .map_err(|e| PipelineError::fetch(url, format!("decode failed: {e}")))?;
    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(ImageArtifact::new(width, height, rgba.into_raw()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba([10, 20, 30, 255]));
        let mut out = std::io::Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_decode_valid_png() {
        let body = png_bytes(3, 2);
        let artifact = decode_artifact("http://x/img.png", &body).unwrap();
        assert_eq!((artifact.width, artifact.height), (3, 2));
        assert!(artifact.is_well_formed());
    }

    #[test]
    fn test_decode_garbage_is_fetch_error() {
        let result = decode_artifact("http://x/img.png", b"not an image");
        assert!(matches!(result, Err(PipelineError::Fetch { .. })));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_fetch_error() {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(500))
            .build()
            .unwrap();
        let source = HttpImageSource::with_client(client);
        // Reserved TEST-NET-1 address, nothing listens there
        let result = source
            .fetch_and_decode("http://192.0.2.1:9/img.png")
            .await;
        assert!(matches!(result, Err(PipelineError::Fetch { .. })));
    }
}
