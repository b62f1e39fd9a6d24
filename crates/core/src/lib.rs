#![deny(unsafe_code)]
//! Core types for the flow-field animation.
//!
//! Provides the `Animation` trait, the `Surface` drawing abstraction with a
//! CPU `RasterSurface` and a `RecordingSurface`, paint types (`Srgb`, `Rgba`,
//! `Hsla`, `Color`), the per-frame context (`Frame`, `PointerState`,
//! `Bounds`), the `Xorshift64` PRNG, and the reproducible run `Seed`.

pub mod animation;
pub mod color;
pub mod error;
pub mod frame;
pub mod prng;
pub mod seed;
pub mod surface;

pub use animation::Animation;
pub use color::{Color, Hsla, Rgba, Srgb};
pub use error::FlowError;
pub use frame::{Bounds, Frame, PointerState};
pub use prng::Xorshift64;
pub use seed::Seed;
pub use surface::{DrawCommand, RasterSurface, RecordingSurface, Surface, MAX_PIXELS};
