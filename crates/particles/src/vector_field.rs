//! Deterministic pseudo-noise flow field.

use std::f64::consts::PI;

use glam::DVec2;

use crate::params::FLOW_SCALE;

/// Maps a position to a flow angle:
///
/// ```text
/// angle(x, y) = (cos(x * scale) + sin(y * scale)) * PI
/// ```
///
/// Smooth and continuous, with no lookup tables or randomness, so it can be
/// evaluated for every particle every frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VectorField {
    scale: f64,
}

impl Default for VectorField {
    fn default() -> Self {
        Self { scale: FLOW_SCALE }
    }
}

impl VectorField {
    /// Field at the fixed [`FLOW_SCALE`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Spatial frequency applied to both coordinates.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Flow angle in radians at `(x, y)`. Always within `[-2π, 2π]`.
    pub fn angle_at(&self, x: f64, y: f64) -> f64 {
        ((x * self.scale).cos() + (y * self.scale).sin()) * PI
    }

    /// Unit vector along the flow at `pos`.
    pub fn direction_at(&self, pos: DVec2) -> DVec2 {
        DVec2::from_angle(self.angle_at(pos.x, pos.y))
    }
}
