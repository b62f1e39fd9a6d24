//! Fixed simulation and rendering constants.

/// Number of particles in a full-window field.
pub const PARTICLE_COUNT: usize = 2000;
/// Spatial frequency of the flow field (its zoom level).
pub const FLOW_SCALE: f64 = 0.005;
/// Velocity added along the flow direction each frame.
pub const FLOW_IMPULSE: f64 = 0.1;
/// Distance within which the pointer pushes particles away.
pub const REPEL_RADIUS: f64 = 300.0;
/// Impulse applied at zero distance from the pointer; falls off linearly to 0 at the radius.
pub const REPEL_STRENGTH: f64 = 0.5;
/// Upper bound on particle speed, in units per frame.
pub const MAX_SPEED: f64 = 1.5;
/// Integration step. One frame; there is no delta-time correction.
pub const STEP: f64 = 1.0;
/// Radius of the dot drawn for each particle.
pub const PARTICLE_RADIUS: f64 = 0.8;
/// HSL saturation of particle dots, in percent.
pub const PARTICLE_SATURATION: f64 = 100.0;
/// HSL lightness of particle dots, in percent.
pub const PARTICLE_LIGHTNESS: f64 = 70.0;
/// Opacity of particle dots.
pub const PARTICLE_ALPHA: f64 = 0.8;
/// The two particle hues: cyan and magenta.
pub const HUES: [f64; 2] = [180.0, 300.0];
/// Opacity of the black rectangle painted over the surface each frame.
/// Lower values leave longer trails.
pub const FADE_ALPHA: f64 = 0.05;
/// Number of past positions each particle keeps.
pub const MAX_HISTORY: usize = 5;

/// The constants a particle update reads, bundled for passing around.
///
/// [`Default`] returns the module constants; nothing else constructs a
/// different set outside of tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowParams {
    pub flow_impulse: f64,
    pub repel_radius: f64,
    pub repel_strength: f64,
    pub max_speed: f64,
    pub step: f64,
}

impl Default for FlowParams {
    fn default() -> Self {
        Self {
            flow_impulse: FLOW_IMPULSE,
            repel_radius: REPEL_RADIUS,
            repel_strength: REPEL_STRENGTH,
            max_speed: MAX_SPEED,
            step: STEP,
        }
    }
}
