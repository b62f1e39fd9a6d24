//! The fixed-size particle collection.

use flow_field_core::{Animation, Bounds, FlowError, Frame, Surface, Xorshift64};
use glam::DVec2;
use serde_json::{json, Value};

use crate::params::{
    FlowParams, FADE_ALPHA, FLOW_SCALE, HUES, MAX_HISTORY, PARTICLE_ALPHA, PARTICLE_RADIUS,
};
use crate::particle::Particle;
use crate::vector_field::VectorField;

/// Owns every particle and steps them in creation order.
///
/// Particles never interact, so a step is O(N). The count is fixed for the
/// field's lifetime.
#[derive(Debug, Clone)]
pub struct ParticleField {
    particles: Vec<Particle>,
    field: VectorField,
    params: FlowParams,
}

impl ParticleField {
    /// Scatters `count` particles uniformly over `bounds`, each cyan or
    /// magenta with equal probability.
    ///
    /// Each particle draws its x, then y, then hue from `rng`, so the same
    /// seed always yields the same layout.
    pub fn initialize(count: usize, bounds: &Bounds, rng: &mut Xorshift64) -> Self {
        let particles = (0..count)
            .map(|_| {
                let pos = rng.point_in(bounds);
                let hue = if rng.coin() { HUES[0] } else { HUES[1] };
                Particle::new(pos, hue)
            })
            .collect();
        log::info!(
            "initialized {count} particles over {}x{}",
            bounds.width(),
            bounds.height()
        );
        Self::from_particles(particles)
    }

    /// Places particles at fixed positions. Hues cycle through `HUES`.
    pub fn from_positions(positions: &[DVec2]) -> Self {
        Self::from_particles(
            positions
                .iter()
                .enumerate()
                .map(|(i, &pos)| Particle::new(pos, HUES[i % HUES.len()]))
                .collect(),
        )
    }

    /// Wraps existing particles, stepped with the default field and
    /// constants.
    pub fn from_particles(particles: Vec<Particle>) -> Self {
        Self {
            particles,
            field: VectorField::new(),
            params: FlowParams::default(),
        }
    }

    /// Particles in creation order.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Updates then draws each particle in order.
    pub fn step(&mut self, frame: &Frame, surface: &mut dyn Surface) {
        for particle in &mut self.particles {
            particle.update(&self.field, frame, &self.params);
            particle.draw(surface);
        }
    }
}

impl Animation for ParticleField {
    fn step(&mut self, frame: &Frame, surface: &mut dyn Surface) -> Result<(), FlowError> {
        ParticleField::step(self, frame, surface);
        Ok(())
    }

    fn len(&self) -> usize {
        self.particles.len()
    }

    fn params(&self) -> Value {
        json!({
            "particles": self.particles.len(),
            "flow_scale": FLOW_SCALE,
            "flow_impulse": self.params.flow_impulse,
            "repel_radius": self.params.repel_radius,
            "repel_strength": self.params.repel_strength,
            "max_speed": self.params.max_speed,
            "step": self.params.step,
            "particle_radius": PARTICLE_RADIUS,
            "particle_alpha": PARTICLE_ALPHA,
            "hues": HUES,
            "fade_alpha": FADE_ALPHA,
            "max_history": MAX_HISTORY,
        })
    }
}
