//! A single flow-field agent.

use std::collections::VecDeque;

use flow_field_core::{Bounds, Frame, Hsla, Surface};
use glam::DVec2;

use crate::params::{
    FlowParams, MAX_HISTORY, PARTICLE_ALPHA, PARTICLE_LIGHTNESS, PARTICLE_RADIUS,
    PARTICLE_SATURATION,
};
use crate::vector_field::VectorField;

/// One agent: position, velocity, a fixed hue, and a short trail of past
/// positions.
///
/// After every [`update`](Particle::update) the position lies in
/// `[0, width] x [0, height]` of the frame's bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pos: DVec2,
    vel: DVec2,
    hue: f64,
    history: VecDeque<DVec2>,
}

impl Particle {
    /// Creates a particle at rest.
    pub fn new(pos: DVec2, hue: f64) -> Self {
        Self {
            pos,
            vel: DVec2::ZERO,
            hue,
            history: VecDeque::with_capacity(MAX_HISTORY),
        }
    }

    /// Current position; inside the last frame's bounds after an update.
    pub fn position(&self) -> DVec2 {
        self.pos
    }

    /// Velocity applied by the last update, in units per frame.
    pub fn velocity(&self) -> DVec2 {
        self.vel
    }

    /// Hue in degrees, fixed at creation.
    pub fn hue(&self) -> f64 {
        self.hue
    }

    /// Positions held before the most recent updates, oldest first. At most
    /// [`MAX_HISTORY`] entries.
    pub fn history(&self) -> impl ExactSizeIterator<Item = &DVec2> + '_ {
        self.history.iter()
    }

    /// Advances the particle by one frame.
    ///
    /// Adds a fixed impulse along the flow direction, pushes away from the
    /// pointer within the repel radius, clamps speed, integrates one step and
    /// wraps at the frame bounds.
    ///
    /// The pointer push applies whether or not the pointer has moved yet.
    pub fn update(&mut self, field: &VectorField, frame: &Frame, params: &FlowParams) {
        self.vel += field.direction_at(self.pos) * params.flow_impulse;
        self.vel -= repel_impulse(self.pos, frame.pointer.position(), params);
        self.vel = clamp_speed(self.vel, params.max_speed);

        if self.history.len() == MAX_HISTORY {
            self.history.pop_front();
        }
        self.history.push_back(self.pos);

        self.pos += self.vel * params.step;
        self.pos = wrap(self.pos, &frame.bounds);
    }

    /// Paints a small translucent dot at the current position.
    pub fn draw(&self, surface: &mut dyn Surface) {
        surface.fill_circle(self.pos.x, self.pos.y, PARTICLE_RADIUS, self.color().into());
    }

    /// Paint used by [`draw`](Particle::draw): the particle's hue at full
    /// saturation, 70% lightness and 0.8 opacity.
    pub fn color(&self) -> Hsla {
        Hsla::new(
            self.hue,
            PARTICLE_SATURATION,
            PARTICLE_LIGHTNESS,
            PARTICLE_ALPHA,
        )
    }
}

/// Impulse pointing from `pos` toward `pointer`, to be subtracted from the
/// velocity. Its magnitude falls off linearly from `repel_strength` at the
/// pointer to zero at `repel_radius`.
///
/// Zero when the pointer is out of range or exactly on `pos` (no direction).
fn repel_impulse(pos: DVec2, pointer: DVec2, params: &FlowParams) -> DVec2 {
    let d = pointer - pos;
    let dist = d.length();
    if dist <= 0.0 || dist >= params.repel_radius {
        return DVec2::ZERO;
    }
    let force = (params.repel_radius - dist) / params.repel_radius;
    d / dist * force * params.repel_strength
}

/// Rescales `vel` to `max_speed` if it is faster. Slower (including zero)
/// velocities pass through untouched.
fn clamp_speed(vel: DVec2, max_speed: f64) -> DVec2 {
    let speed = vel.length();
    if speed > max_speed {
        vel / speed * max_speed
    } else {
        vel
    }
}

/// Teleports a coordinate that left `[0, max]` to the opposite edge.
fn wrap_axis(v: f64, max: f64) -> f64 {
    if v < 0.0 {
        max
    } else if v > max {
        0.0
    } else {
        v
    }
}

fn wrap(pos: DVec2, bounds: &Bounds) -> DVec2 {
    DVec2::new(
        wrap_axis(pos.x, bounds.width()),
        wrap_axis(pos.y, bounds.height()),
    )
}
