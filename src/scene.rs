//! Scene rendering.
//!
//! The scene never clears to solid black. Each frame paints a translucent
//! black layer over the previous one, so the short line segments drawn per
//! particle smear into fading trails.

use glam::Vec2;

use crate::color::{self, TRANSPARENT, WHITE};
use crate::config::{SingularityConfig, Viewport};
use crate::particle::Particle;
use crate::surface::{RadialGradient, Surface};

/// Owns the drawing surface and the singularity glow.
pub struct Scene<S: Surface> {
    surface: S,
    viewport: Viewport,
    singularity: RadialGradient,
    singularity_radius: f32,
}

impl<S: Surface> Scene<S> {
    /// Wrap `surface`; the glow is built once, centered on the bottom edge.
    pub fn new(surface: S, viewport: Viewport, config: &SingularityConfig) -> Self {
        let radius = config.radius * viewport.dpr;
        let center = Vec2::new(viewport.width / 2.0, viewport.height);
        let singularity = RadialGradient::new(center, 0.0, radius)
            .with_stop(config.glow_start, WHITE)
            .with_stop(1.0, TRANSPARENT);

        Self {
            surface,
            viewport,
            singularity,
            singularity_radius: radius,
        }
    }

    /// Fade the previous frame. `fade_amount` 1 paints opaque black.
    pub fn clear(&mut self, fade_amount: f32) {
        let size = Vec2::new(self.viewport.width, self.viewport.height);
        self.surface
            .fill_rect(Vec2::ZERO, size, color::black(fade_amount));
    }

    /// Stroke the particle's trail segment, unless it just respawned.
    pub fn draw_particle(&mut self, particle: &Particle) {
        if particle.just_reset {
            return;
        }
        let stroke = color::hsla(particle.hue, 1.0, (50.0 + particle.lightness) / 100.0, 1.0);
        self.surface.stroke_line(
            particle.prev_position,
            particle.position,
            particle.size * self.viewport.dpr,
            stroke,
        );
    }

    /// Paint the glow over everything drawn this frame.
    pub fn draw_singularity(&mut self) {
        self.surface.fill_disc(
            self.singularity.center,
            self.singularity_radius,
            &self.singularity,
        );
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn singularity(&self) -> &RadialGradient {
        &self.singularity
    }

    pub fn singularity_radius(&self) -> f32 {
        self.singularity_radius
    }

    /// Give the surface back.
    pub fn into_surface(self) -> S {
        self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MotionConfig;
    use crate::pixmap::Pixmap;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn scene() -> Scene<Pixmap> {
        let viewport = Viewport::new(100.0, 80.0, 1.0);
        Scene::new(Pixmap::new(100, 80), viewport, &SingularityConfig::default())
    }

    fn particle() -> Particle {
        let mut rng = SmallRng::seed_from_u64(11);
        let mut p = Particle::new(Viewport::new(100.0, 80.0, 1.0), &MotionConfig::default(), &mut rng);
        p.prev_position = Vec2::new(10.0, 10.0);
        p.position = Vec2::new(30.0, 10.0);
        p.hue = 120.0;
        p.lightness = 0.0;
        p.size = 2.0;
        p
    }

    #[test]
    fn test_glow_geometry() {
        let viewport = Viewport::new(200.0, 100.0, 2.0);
        let scene = Scene::new(Pixmap::new(200, 100), viewport, &SingularityConfig::default());
        assert_eq!(scene.singularity().center, Vec2::new(100.0, 100.0));
        assert_eq!(scene.singularity_radius(), 100.0);
        assert_eq!(scene.singularity().outer_radius, 100.0);
    }

    #[test]
    fn test_draw_particle_colors_trail() {
        let mut scene = scene();
        scene.draw_particle(&particle());
        // hsl(120, 100%, 50%) is pure green
        assert_eq!(scene.surface().pixel(20, 10), Some([0, 255, 0, 255]));
    }

    #[test]
    fn test_reset_particle_not_drawn() {
        let mut scene = scene();
        let mut p = particle();
        p.just_reset = true;
        scene.draw_particle(&p);
        assert!(scene.surface().pixels().iter().all(|px| *px == [0, 0, 0, 255]));
    }

    #[test]
    fn test_full_clear_erases_trails() {
        let mut scene = scene();
        scene.draw_particle(&particle());
        scene.clear(1.0);
        assert!(scene.surface().pixels().iter().all(|px| *px == [0, 0, 0, 255]));
    }

    #[test]
    fn test_singularity_glows_at_bottom_center() {
        let mut scene = scene();
        scene.draw_singularity();
        assert_eq!(scene.surface().pixel(50, 79), Some([255, 255, 255, 255]));
        assert_eq!(scene.surface().pixel(0, 0), Some([0, 0, 0, 255]));
    }
}
