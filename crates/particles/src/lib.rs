#![deny(unsafe_code)]
//! Pointer-reactive particle flow field.
//!
//! Particles drift along a deterministic pseudo-noise field
//! (`angle = (cos(x * s) + sin(y * s)) * PI`), get pushed away from the
//! pointer within a fixed radius, are capped to a maximum speed, and wrap
//! around the surface edges. A [`RenderLoop`] paints them over a slowly
//! fading surface so they leave trails.

pub mod params;
pub mod particle;
pub mod particle_field;
pub mod render_loop;
pub mod vector_field;

pub use params::FlowParams;
pub use particle::Particle;
pub use particle_field::ParticleField;
pub use render_loop::{LoopState, RenderLoop, StopHandle, Tick};
pub use vector_field::VectorField;
