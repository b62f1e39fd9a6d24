//! Seedable Xorshift64 PRNG.
//!
//! Particle placement and hue assignment draw from this generator so a given
//! seed always lays out the same field on every platform.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::frame::Bounds;

/// Xorshift64 generator with shifts (13, 7, 17).
///
/// A seed of 0 (the all-zeros fixed point) is replaced by a fixed fallback,
/// also when a state is deserialized.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "RawState")]
pub struct Xorshift64 {
    state: u64,
}

#[derive(Deserialize)]
struct RawState {
    state: u64,
}

impl From<RawState> for Xorshift64 {
    fn from(raw: RawState) -> Self {
        Self::new(raw.state)
    }
}

impl Xorshift64 {
    const FALLBACK_SEED: u64 = 0x5EED_DEAD_BEEF_CAFE;

    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { Self::FALLBACK_SEED } else { seed },
        }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    /// Uniform f64 in [0, 1) from the upper 53 bits.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform f64 in [0, max).
    pub fn next_below(&mut self, max: f64) -> f64 {
        self.next_f64() * max
    }

    /// Fair coin: `true` when the next draw exceeds one half.
    pub fn coin(&mut self) -> bool {
        self.next_f64() > 0.5
    }

    /// Uniform point in `[0, width) x [0, height)`. Draws x first, then y.
    pub fn point_in(&mut self, bounds: &Bounds) -> DVec2 {
        let x = self.next_below(bounds.width());
        let y = self.next_below(bounds.height());
        DVec2::new(x, y)
    }
}
