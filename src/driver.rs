//! The per-frame loop.
//!
//! Each tick fades the surface, steps and draws every particle in turn,
//! then lays the singularity glow over the top. Freezing is just a flag the
//! particles read; the loop itself always runs and always draws.

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::config::{Config, Viewport};
use crate::interaction::Interaction;
use crate::particle::{Particle, StepContext};
use crate::scene::Scene;
use crate::surface::Surface;
use crate::time::{FrameClock, Millis};

/// Owns the particle population and drives it through the scene.
pub struct Driver<S: Surface> {
    particles: Vec<Particle>,
    scene: Scene<S>,
    clock: FrameClock,
    config: Config,
    rng: SmallRng,
}

impl<S: Surface> Driver<S> {
    /// Spawn the full population. `now` is the timestamp the first tick is
    /// measured from.
    pub fn new(config: Config, surface: S, viewport: Viewport, now: Millis) -> Self {
        let mut rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };

        let particles = (0..config.particle_count)
            .map(|_| Particle::new(viewport, &config.motion, &mut rng))
            .collect();

        let scene = Scene::new(surface, viewport, &config.singularity);
        let clock = FrameClock::new(config.target_frame_ms, now);

        Self {
            particles,
            scene,
            clock,
            config,
            rng,
        }
    }

    /// Run one frame at timestamp `now`. Returns the time scale used.
    pub fn tick(&mut self, now: Millis, interaction: &Interaction) -> f32 {
        let time_scale = self.clock.tick(now);
        self.advance(time_scale, interaction);
        time_scale
    }

    /// Run one frame with an explicit time scale, bypassing the clock.
    pub fn advance(&mut self, time_scale: f32, interaction: &Interaction) {
        self.scene.clear(time_scale);

        let mut ctx = StepContext {
            viewport: self.scene.viewport(),
            motion: &self.config.motion,
            interaction,
            rng: &mut self.rng,
        };
        for particle in &mut self.particles {
            particle.step(time_scale, &mut ctx);
            self.scene.draw_particle(particle);
        }

        self.scene.draw_singularity();
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn scene(&self) -> &Scene<S> {
        &self.scene
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.scene.viewport()
    }

    /// Give the surface back.
    pub fn into_surface(self) -> S {
        self.scene.into_surface()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixmap::Pixmap;

    fn driver(count: usize, seed: u64) -> Driver<Pixmap> {
        let config = Config {
            particle_count: count,
            seed: Some(seed),
            ..Default::default()
        };
        Driver::new(config, Pixmap::new(160, 120), Viewport::new(160.0, 120.0, 1.0), 0.0)
    }

    #[test]
    fn test_population_is_fixed() {
        let mut d = driver(64, 1);
        assert_eq!(d.particles().len(), 64);
        for i in 1..=200 {
            d.tick(i as f64 * 16.0, &Interaction::default());
        }
        assert_eq!(d.particles().len(), 64);
    }

    #[test]
    fn test_same_seed_same_field() {
        let mut a = driver(32, 9);
        let mut b = driver(32, 9);
        for i in 1..=50 {
            a.tick(i as f64 * 20.0, &Interaction::default());
            b.tick(i as f64 * 20.0, &Interaction::default());
        }
        assert_eq!(a.particles(), b.particles());
        assert_eq!(a.scene().surface().pixels(), b.scene().surface().pixels());
    }

    #[test]
    fn test_tick_uses_clock_scale() {
        let mut d = driver(4, 2);
        assert_eq!(d.tick(15.0, &Interaction::default()), 0.5);
        assert_eq!(d.tick(10_015.0, &Interaction::default()), 1.0);
        assert_eq!(d.clock().frame(), 2);
    }

    #[test]
    fn test_frozen_field_still_renders() {
        let mut d = driver(16, 3);
        d.tick(30.0, &Interaction::default());
        let before: Vec<_> = d.particles().iter().map(|p| p.orbit_y).collect();

        let mut frozen = Interaction::default();
        frozen.frozen = true;
        d.tick(60.0, &frozen);

        let after: Vec<_> = d.particles().iter().map(|p| p.orbit_y).collect();
        assert_eq!(before, after);
        // The glow is still painted every frame
        assert_eq!(d.scene().surface().pixel(80, 119), Some([255, 255, 255, 255]));
    }
}
