//! Orbiting particles.
//!
//! A particle does not store a velocity. It stores an *orbit*: an ellipse
//! centered on the middle of the screen whose reference height `orbit_y`
//! sinks towards the bottom over the particle's lifetime. The on-screen
//! position is recomputed every step from the orbit and the angular phase
//! `rotation`.
//!
//! As the orbit sinks:
//! - it narrows with the square of the remaining height (a funnel, not a wedge),
//! - its vertical radius flattens linearly,
//! - angular speed grows with the cube of the progress,
//! - infall speed compounds by `gravity²` every frame.
//!
//! When the orbit reaches the singularity the particle is re-randomized in
//! place and flagged `just_reset` so the teleport is not drawn as a trail.

use std::f32::consts::PI;

use glam::Vec2;
use rand::Rng;

use crate::config::{MotionConfig, Viewport};
use crate::interaction::Interaction;

/// Rotation is a fraction of a half turn; 2.0 is a full turn.
pub const FULL_TURN: f32 = 2.0;

/// Everything a particle reads while stepping.
pub struct StepContext<'a, R: Rng + ?Sized> {
    pub viewport: Viewport,
    pub motion: &'a MotionConfig,
    pub interaction: &'a Interaction,
    pub rng: &'a mut R,
}

/// A single point in the field.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Vertical position of the orbit's reference plane.
    pub orbit_y: f32,
    /// Horizontal orbit center.
    pub orbit_x: f32,
    /// Current horizontal radius.
    pub orbit_width: f32,
    /// Vertical radius at the top of the screen.
    pub orbit_height: f32,
    /// On-screen position.
    pub position: Vec2,
    /// On-screen position at the previous step, the start of the trail.
    pub prev_position: Vec2,
    /// Orbit infall per frame.
    pub v_speed: f32,
    /// Rotation advance per frame.
    pub h_speed: f32,
    /// Phase in half turns, `[0, 2)`.
    pub rotation: f32,
    /// Color wheel angle in degrees.
    pub hue: f32,
    /// Lightness boost in percent, `[0, 50]`.
    pub lightness: f32,
    /// Stroke width before density scaling.
    pub size: f32,
    /// Set on the step the particle respawned; its trail must not be drawn.
    pub just_reset: bool,
}

impl Particle {
    /// Spawn a particle on a random orbit.
    pub fn new<R: Rng + ?Sized>(viewport: Viewport, motion: &MotionConfig, rng: &mut R) -> Self {
        let orbit_y = spawn_height(viewport, motion, rng);
        let mut particle = Self {
            orbit_y,
            orbit_x: viewport.width / 2.0,
            orbit_width: viewport.width / 2.0,
            orbit_height: motion.orbit_height,
            position: Vec2::ZERO,
            prev_position: Vec2::ZERO,
            v_speed: motion.min_v_speed + rng.gen::<f32>() * motion.v_speed_jitter,
            h_speed: 0.25 * orbit_y / viewport.height,
            rotation: rng.gen::<f32>() * FULL_TURN,
            hue: random_hue(rng),
            lightness: 0.0,
            size: (rng.gen::<f32>() * 3.0).ceil().max(1.0),
            just_reset: false,
        };
        particle.position = particle.orbit_position(orbit_y / viewport.height);
        particle.prev_position = particle.position;
        particle
    }

    /// Height at which the orbit is swallowed by the singularity.
    pub fn reset_threshold(viewport: Viewport, motion: &MotionConfig) -> f32 {
        viewport.height - motion.reset_margin * viewport.dpr
    }

    /// Narrowest the orbit can get.
    pub fn min_orbit_width(viewport: Viewport, motion: &MotionConfig) -> f32 {
        motion.base_offset * viewport.dpr
    }

    /// Re-randomize the orbit in place.
    ///
    /// The orbit center and vertical radius are kept; the position is left
    /// alone and catches up on the step that triggered the reset.
    pub fn reset<R: Rng + ?Sized>(&mut self, viewport: Viewport, motion: &MotionConfig, rng: &mut R) {
        self.prev_position = self.position;

        self.orbit_y = spawn_height(viewport, motion, rng);
        self.orbit_width = viewport.width / 2.0;
        self.v_speed = motion.min_v_speed + rng.gen::<f32>() * motion.v_speed_jitter;
        self.h_speed = 0.25 * self.orbit_y / viewport.height;
        self.rotation = rng.gen::<f32>() * FULL_TURN;
        self.size = 1.0 + rng.gen::<f32>() * 2.0;
        self.hue = random_hue(rng);
    }

    /// Advance one frame. `time_scale` is the elapsed time in units of the
    /// target frame interval, capped at 1.
    pub fn step<R: Rng + ?Sized>(&mut self, time_scale: f32, ctx: &mut StepContext<'_, R>) {
        self.just_reset = false;
        self.prev_position = self.position;

        if ctx.interaction.frozen {
            return;
        }

        let viewport = ctx.viewport;
        let motion = ctx.motion;

        if self.orbit_y + self.v_speed * time_scale >= Self::reset_threshold(viewport, motion) {
            self.reset(viewport, motion, ctx.rng);
            self.just_reset = true;
        }

        let proportion = self.orbit_y / viewport.height;
        self.orbit_y += self.v_speed * time_scale;

        self.lightness = 50.0 * proportion;

        self.h_speed = (0.01 + 0.25 * proportion.powi(3)) * ctx.interaction.movement_factor;
        self.rotation = wrap_rotation(self.rotation + self.h_speed * time_scale);

        let remaining = 1.0 - proportion;
        self.orbit_width = Self::min_orbit_width(viewport, motion)
            + (viewport.width / 2.0) * remaining * remaining;
        self.v_speed += self.v_speed * motion.gravity * motion.gravity * time_scale;

        self.position = self.orbit_position(proportion);
    }

    fn orbit_position(&self, proportion: f32) -> Vec2 {
        let angle = PI * self.rotation;
        Vec2::new(
            self.orbit_x + angle.cos() * self.orbit_width,
            self.orbit_y + angle.sin() * self.orbit_height * (1.0 - proportion),
        )
    }
}

/// Random orbit height, low enough that a fresh particle's first step
/// cannot carry it straight back into the singularity.
fn spawn_height<R: Rng + ?Sized>(viewport: Viewport, motion: &MotionConfig, rng: &mut R) -> f32 {
    let limit = (Particle::reset_threshold(viewport, motion) - motion.max_v_speed()).max(0.0);
    rng.gen::<f32>() * limit
}

/// Whole-degree hue in `[0, 360)`.
fn random_hue<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    (rng.gen::<f32>() * 360.0).round() % 360.0
}

/// Overshooting a full turn snaps back to 0 rather than carrying the
/// remainder. Backward spin wraps around from the top.
fn wrap_rotation(rotation: f32) -> f32 {
    let wrapped = if rotation >= FULL_TURN {
        0.0
    } else if rotation < 0.0 {
        rotation.rem_euclid(FULL_TURN)
    } else {
        rotation
    };
    // rem_euclid can round up to exactly FULL_TURN
    if wrapped >= FULL_TURN || !wrapped.is_finite() {
        0.0
    } else {
        wrapped
    }
}
