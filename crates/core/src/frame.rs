//! Per-frame context shared by every particle update.
//!
//! The host owns one [`Frame`]: its input collaborators write pointer moves
//! and resizes into it between ticks, and the render loop passes it by shared
//! reference into each tick. Nothing in the simulation mutates it.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::error::FlowError;

/// Latest known pointer position.
///
/// Starts at the origin, inactive. `active` flips to `true` on the first move
/// and is never reset. Moves are last-write-wins; there is no event queue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PointerState {
    pub x: f64,
    pub y: f64,
    pub active: bool,
}

impl PointerState {
    /// Pointer at the origin, not yet moved.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer that has already moved to `(x, y)`.
    pub fn at(x: f64, y: f64) -> Self {
        Self { x, y, active: true }
    }

    /// Records a pointer move.
    pub fn move_to(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
        self.active = true;
    }

    /// Position as a vector.
    pub fn position(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }
}

/// Surface dimensions used as wrap-around bounds.
///
/// Always positive and finite, including when deserialized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBounds")]
pub struct Bounds {
    width: f64,
    height: f64,
}

#[derive(Deserialize)]
struct RawBounds {
    width: f64,
    height: f64,
}

impl TryFrom<RawBounds> for Bounds {
    type Error = FlowError;

    fn try_from(raw: RawBounds) -> Result<Self, FlowError> {
        Bounds::new(raw.width, raw.height)
    }
}

impl Bounds {
    /// Returns `FlowError::InvalidDimensions` unless both dimensions are
    /// positive and finite.
    pub fn new(width: f64, height: f64) -> Result<Self, FlowError> {
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(FlowError::InvalidDimensions);
        }
        Ok(Self { width, height })
    }

    /// Width in surface units.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Height in surface units.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Applies a resize. Particle positions are not rescaled; anything left
    /// outside the new bounds wraps on its next update.
    pub fn resize(&mut self, width: f64, height: f64) -> Result<(), FlowError> {
        *self = Self::new(width, height)?;
        log::debug!("bounds resized to {width}x{height}");
        Ok(())
    }

    /// Whether `pos` lies in the closed rectangle `[0, width] x [0, height]`.
    pub fn contains(&self, pos: DVec2) -> bool {
        (0.0..=self.width).contains(&pos.x) && (0.0..=self.height).contains(&pos.y)
    }
}

/// Context record read by every particle during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub pointer: PointerState,
    pub bounds: Bounds,
}

impl Frame {
    /// Frame with an unmoved pointer.
    pub fn new(bounds: Bounds) -> Self {
        Self {
            pointer: PointerState::new(),
            bounds,
        }
    }

    /// Replaces the pointer.
    pub fn with_pointer(mut self, pointer: PointerState) -> Self {
        self.pointer = pointer;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_starts_inactive_at_origin() {
        let p = PointerState::new();
        assert_eq!(p.position(), DVec2::ZERO);
        assert!(!p.active);
    }

    #[test]
    fn move_to_sets_position_and_activates() {
        let mut p = PointerState::new();
        p.move_to(12.5, 40.0);
        assert_eq!(p.position(), DVec2::new(12.5, 40.0));
        assert!(p.active);
    }

    #[test]
    fn latest_move_wins() {
        let mut p = PointerState::new();
        p.move_to(1.0, 1.0);
        p.move_to(2.0, 3.0);
        assert_eq!(p, PointerState::at(2.0, 3.0));
    }

    #[test]
    fn bounds_reject_degenerate_dimensions() {
        assert!(Bounds::new(0.0, 10.0).is_err());
        assert!(Bounds::new(10.0, -1.0).is_err());
        assert!(Bounds::new(f64::NAN, 10.0).is_err());
        assert!(Bounds::new(10.0, f64::INFINITY).is_err());
        assert!(Bounds::new(100.0, 50.0).is_ok());
    }

    #[test]
    fn resize_replaces_dimensions() {
        let mut b = Bounds::new(100.0, 100.0).unwrap();
        b.resize(640.0, 480.0).unwrap();
        assert_eq!(b.width(), 640.0);
        assert_eq!(b.height(), 480.0);
    }

    #[test]
    fn failed_resize_keeps_previous_dimensions() {
        let mut b = Bounds::new(100.0, 80.0).unwrap();
        assert!(b.resize(0.0, 0.0).is_err());
        assert_eq!(b, Bounds::new(100.0, 80.0).unwrap());
    }

    #[test]
    fn contains_is_closed_on_both_edges() {
        let b = Bounds::new(100.0, 50.0).unwrap();
        assert!(b.contains(DVec2::new(0.0, 0.0)));
        assert!(b.contains(DVec2::new(100.0, 50.0)));
        assert!(!b.contains(DVec2::new(-0.001, 10.0)));
        assert!(!b.contains(DVec2::new(10.0, 50.001)));
    }

    #[test]
    fn frame_serde_round_trip() {
        let frame = Frame::new(Bounds::new(320.0, 240.0).unwrap())
            .with_pointer(PointerState::at(5.0, 6.0));
        let json = serde_json::to_string(&frame).unwrap();
        let restored: Frame = serde_json::from_str(&json).unwrap();
        assert_eq!(frame, restored);
    }

    #[test]
    fn deserializing_degenerate_bounds_fails() {
        for json in [
            r#"{"width":0.0,"height":-5.0}"#,
            r#"{"width":0,"height":100}"#,
            r#"{"width":640,"height":-1}"#,
        ] {
            let err = serde_json::from_str::<Bounds>(json).unwrap_err();
            assert!(err.to_string().contains("invalid dimensions"), "{json}: {err}");
        }
        let ok: Bounds = serde_json::from_str(r#"{"width":640,"height":480}"#).unwrap();
        assert_eq!(ok, Bounds::new(640.0, 480.0).unwrap());
    }

    #[test]
    fn deserializing_frame_with_degenerate_bounds_fails() {
        let json = r#"{"pointer":{"x":1.0,"y":2.0,"active":true},"bounds":{"width":0,"height":0}}"#;
        assert!(serde_json::from_str::<Frame>(json).is_err());
    }
}
