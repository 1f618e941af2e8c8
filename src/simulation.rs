//! Simulation builder and runner

use winit::event_loop::{ControlFlow, EventLoop};

use crate::config::{Config, Viewport};
use crate::driver::Driver;
use crate::error::{ConfigError, SimulationError};
use crate::interaction::Interaction;
use crate::pixmap::Pixmap;
use crate::time::Millis;
use crate::window::App;

/// A particle field builder.
///
/// Use method chaining to configure, then call `.run()` to open a window,
/// or `.render_headless()` to render frames without one.
#[derive(Debug, Clone, Default)]
pub struct Simulation {
    config: Config,
}

impl Simulation {
    /// Create a new simulation with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a complete configuration.
    pub fn from_config(config: Config) -> Self {
        Self { config }
    }

    /// Set the number of particles.
    pub fn with_particle_count(mut self, count: usize) -> Self {
        self.config.particle_count = count;
        self
    }

    /// Fix the random seed so every run spawns the same field.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Set the infall acceleration.
    pub fn with_gravity(mut self, gravity: f32) -> Self {
        self.config.motion.gravity = gravity;
        self
    }

    /// Set the window title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.config.window.title = title.into();
        self
    }

    /// Set the initial window size in logical pixels.
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.config.window.width = width;
        self.config.window.height = height;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Render `frames` ticks spaced `frame_ms` apart into a pixmap of
    /// `width`x`height` device pixels.
    pub fn render_headless(
        &self,
        width: u32,
        height: u32,
        dpr: f32,
        frames: u32,
        frame_ms: Millis,
    ) -> Result<Pixmap, ConfigError> {
        self.config.validate()?;
        let viewport = Viewport::new(width as f32, height as f32, dpr);
        let mut driver = Driver::new(self.config.clone(), Pixmap::new(width, height), viewport, 0.0);
        let interaction = Interaction::default();
        for frame in 1..=frames {
            driver.tick(frame as Millis * frame_ms, &interaction);
        }
        Ok(driver.into_surface())
    }

    /// Run the simulation. This blocks until the window is closed.
    pub fn run(self) -> Result<(), SimulationError> {
        self.config.validate()?;

        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = App::new(self.config);
        event_loop.run_app(&mut app)?;

        match app.take_error() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_chain() {
        let sim = Simulation::new()
            .with_particle_count(100)
            .with_seed(3)
            .with_gravity(0.2)
            .with_title("Funnel")
            .with_window_size(640, 480);

        let config = sim.config();
        assert_eq!(config.particle_count, 100);
        assert_eq!(config.seed, Some(3));
        assert_eq!(config.motion.gravity, 0.2);
        assert_eq!(config.window.title, "Funnel");
        assert_eq!((config.window.width, config.window.height), (640, 480));
    }

    #[test]
    fn test_headless_render_draws_something() {
        let pixmap = Simulation::new()
            .with_particle_count(200)
            .with_seed(1)
            .render_headless(128, 96, 1.0, 30, 16.0)
            .unwrap();

        assert_eq!((pixmap.width(), pixmap.height()), (128, 96));
        // Trails away from the glow
        let lit = pixmap.pixels()[..128 * 40]
            .iter()
            .filter(|p| p[0] > 0 || p[1] > 0 || p[2] > 0)
            .count();
        assert!(lit > 0);
    }

    #[test]
    fn test_headless_rejects_invalid_config() {
        let result = Simulation::new()
            .with_particle_count(0)
            .render_headless(10, 10, 1.0, 1, 16.0);
        assert!(result.is_err());
    }
}
