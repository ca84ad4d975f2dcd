//! Image artifact - opaque decoded image passed between stages

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Decoded image artifact (RGBA8, row-major).
///
/// Opaque to the coordinator; produced by the fetch stage, consumed by the
/// filter stage and the presenter. Cheap to clone (`Bytes` is refcounted).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImageArtifact {
    /// Width in pixels
    pub width: u32,

    /// Height in pixels
    pub height: u32,

    /// RGBA8 pixel data, length must be `width * height * 4`
    pub pixels: Bytes,
}

impl ImageArtifact {
    /// Create an artifact from raw RGBA8 pixel data
    pub fn new(width: u32, height: u32, pixels: impl Into<Bytes>) -> Self {
        Self {
            width,
            height,
            pixels: pixels.into(),
        }
    }

    /// Expected pixel buffer length for the declared dimensions
    pub fn expected_len(&self) -> usize {
        self.width as usize * self.height as usize * 4
    }

    /// Whether the pixel buffer matches the declared dimensions
    pub fn is_well_formed(&self) -> bool {
        self.pixels.len() == self.expected_len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_formed() {
        let artifact = ImageArtifact::new(2, 2, vec![0u8; 16]);
        assert!(artifact.is_well_formed());
        assert_eq!(artifact.expected_len(), 16);
    }

    #[test]
    fn test_truncated_pixels_detected() {
        let artifact = ImageArtifact::new(2, 2, vec![0u8; 12]);
        assert!(!artifact.is_well_formed());
    }
}
