//! Reproducible description of a headless run.
//!
//! A [`Seed`] captures everything needed to re-render a frame: surface size,
//! particle count, PRNG seed, frame count, and an optional fixed pointer.

use crate::error::FlowError;
use crate::surface::MAX_PIXELS;
use serde::{Deserialize, Serialize};

/// Reproducible run description. Two identical `Seed` values rendered by the
/// same binary produce bit-identical surfaces.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Seed {
    pub width: usize,
    pub height: usize,
    pub seed: u64,
    pub particles: usize,
    pub frames: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pointer: Option<[f64; 2]>,
}

impl Seed {
    /// Creates a seed with no frames and no pointer.
    pub fn new(width: usize, height: usize, seed: u64, particles: usize) -> Self {
        Self {
            width,
            height,
            seed,
            particles,
            frames: 0,
            pointer: None,
        }
    }

    /// Validates that the dimensions are non-zero and `width * height` is at
    /// most [`MAX_PIXELS`].
    pub fn validate(&self) -> Result<(), FlowError> {
        if self.width == 0 || self.height == 0 {
            return Err(FlowError::InvalidDimensions);
        }
        match self.width.checked_mul(self.height) {
            Some(pixels) if pixels <= MAX_PIXELS => Ok(()),
            _ => Err(FlowError::InvalidDimensions),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_has_no_frames_and_no_pointer() {
        let s = Seed::new(800, 600, 42, 2000);
        assert_eq!(s.frames, 0);
        assert!(s.pointer.is_none());
        assert_eq!(s.particles, 2000);
    }

    #[test]
    fn json_round_trip_with_pointer() {
        let mut s = Seed::new(320, 240, 7, 500);
        s.frames = 120;
        s.pointer = Some([160.0, 120.0]);
        let json = serde_json::to_string_pretty(&s).unwrap();
        let restored: Seed = serde_json::from_str(&json).unwrap();
        assert_eq!(s, restored);
    }

    #[test]
    fn json_omits_missing_pointer() {
        let s = Seed::new(10, 10, 1, 3);
        let v = serde_json::to_value(&s).unwrap();
        assert!(v.get("pointer").is_none());
        for key in ["width", "height", "seed", "particles", "frames"] {
            assert!(v.get(key).is_some(), "missing key {key}");
        }
        let restored: Seed = serde_json::from_value(v).unwrap();
        assert_eq!(restored.pointer, None);
    }

    #[test]
    fn validate_rejects_zero_and_overflowing_dimensions() {
        assert!(Seed::new(0, 10, 1, 1).validate().is_err());
        assert!(Seed::new(10, 0, 1, 1).validate().is_err());
        assert!(Seed::new(usize::MAX, 2, 1, 1).validate().is_err());
        assert!(Seed::new(100, 100, 1, 1).validate().is_ok());
    }

    #[test]
    fn validate_caps_pixel_count() {
        assert!(Seed::new(1_000_000, 1_000_000, 1, 1).validate().is_err());
        assert!(Seed::new(7680, 4321, 1, 1).validate().is_err());
        assert!(Seed::new(7680, 4320, 1, 1).validate().is_ok());
    }
}
