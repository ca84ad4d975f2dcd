//! SnowFilter - scatters snow flakes over the artifact

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use contracts::{ImageArtifact, ImageFilter, PipelineError};

const FILTER_NAME: &str = "snow";

/// How far a pixel is pushed toward white at a flake center
const FLAKE_STRENGTH: f32 = 0.85;
/// Halo strength for the 8 neighbors around a flake center
const HALO_STRENGTH: f32 = 0.45;

/// CPU-bound snow effect.
///
/// Scatters flakes at random positions, brightening pixels toward white with
/// a softer halo around each center. Seedable so tests are deterministic.
pub struct SnowFilter {
    /// Flakes per pixel (0.0..=1.0)
    density: f64,
    /// Fixed RNG seed (None = entropy)
    seed: Option<u64>,
}

impl SnowFilter {
    /// Create a filter with the given flake density
    pub fn new(density: f64) -> Self {
        Self {
            density: density.clamp(0.0, 1.0),
            seed: None,
        }
    }

    /// Use a fixed seed for deterministic output
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    fn rng(&self) -> SmallRng {
        match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        }
    }
}

impl Default for SnowFilter {
    fn default() -> Self {
        Self::new(0.02)
    }
}

impl ImageFilter for SnowFilter {
    fn name(&self) -> &str {
        FILTER_NAME
    }

    fn apply(&self, artifact: &ImageArtifact) -> Result<ImageArtifact, PipelineError> {
        if !artifact.is_well_formed() {
            return Err(PipelineError::transform(
                FILTER_NAME,
                format!(
                    "pixel buffer length {} does not match {}x{} RGBA8",
                    artifact.pixels.len(),
                    artifact.width,
                    artifact.height
                ),
            ));
        }

        let width = artifact.width as i64;
        let height = artifact.height as i64;
        if width == 0 || height == 0 {
            return Ok(artifact.clone());
        }
        let mut pixels = artifact.pixels.to_vec();
        let mut rng = self.rng();

        let flakes = ((width * height) as f64 * self.density).ceil() as u64;
        for _ in 0..flakes {
            let cx = rng.gen_range(0..width);
            let cy = rng.gen_range(0..height);
            for dy in -1..=1i64 {
                for dx in -1..=1i64 {
                    let (x, y) = (cx + dx, cy + dy);
                    if x < 0 || y < 0 || x >= width || y >= height {
                        continue;
                    }
                    let strength = if dx == 0 && dy == 0 {
                        FLAKE_STRENGTH
                    } else {
                        HALO_STRENGTH
                    };
                    whiten(&mut pixels, (y * width + x) as usize * 4, strength);
                }
            }
        }

        debug!(
            filter = FILTER_NAME,
            width = artifact.width,
            height = artifact.height,
            flakes,
            "snow effect applied"
        );
        Ok(ImageArtifact::new(artifact.width, artifact.height, pixels))
    }
}

/// Push one RGBA pixel toward white, leaving alpha untouched
fn whiten(pixels: &mut [u8], offset: usize, strength: f32) {
    for channel in &mut pixels[offset..offset + 3] {
        let value = *channel as f32;
        *channel = (value + (255.0 - value) * strength) as u8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dark_artifact(width: u32, height: u32) -> ImageArtifact {
        let mut pixels = vec![0u8; width as usize * height as usize * 4];
        // Opaque alpha
        for px in pixels.chunks_exact_mut(4) {
            px[3] = 255;
        }
        ImageArtifact::new(width, height, pixels)
    }

    #[test]
    fn test_snow_brightens_pixels() {
        let input = dark_artifact(16, 16);
        let output = SnowFilter::new(0.1).with_seed(7).apply(&input).unwrap();

        assert_eq!((output.width, output.height), (16, 16));
        assert!(output.is_well_formed());

        let brightness =
            |a: &ImageArtifact| a.pixels.iter().map(|&b| b as u64).sum::<u64>();
        assert!(brightness(&output) > brightness(&input));
    }

    #[test]
    fn test_seeded_filter_is_deterministic() {
        let input = dark_artifact(8, 8);
        let a = SnowFilter::new(0.1).with_seed(42).apply(&input).unwrap();
        let b = SnowFilter::new(0.1).with_seed(42).apply(&input).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_alpha_preserved() {
        let input = dark_artifact(8, 8);
        let output = SnowFilter::new(1.0).with_seed(1).apply(&input).unwrap();
        for px in output.pixels.chunks_exact(4) {
            assert_eq!(px[3], 255);
        }
    }

    #[test]
    fn test_malformed_artifact_is_transform_error() {
        let broken = ImageArtifact::new(4, 4, vec![0u8; 10]);
        let result = SnowFilter::default().apply(&broken);
        assert!(matches!(result, Err(PipelineError::Transform { .. })));
    }
}
