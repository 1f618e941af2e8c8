//! # Singularity
//!
//! Hundreds of particles swirl along elliptical orbits that narrow into a
//! funnel and drain into a glowing singularity at the bottom of the window.
//! Holding the mouse (or a finger) freezes the swirl; dragging sideways
//! spins it faster or backwards.
//!
//! ## Quick Start
//!
//! ```ignore
//! use singularity::prelude::*;
//!
//! fn main() -> Result<(), SimulationError> {
//!     Simulation::new()
//!         .with_particle_count(500)
//!         .with_title("Singularity")
//!         .run()
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Particles
//!
//! A [`Particle`] stores an orbit rather than a velocity. Its orbit sinks
//! faster and faster, narrowing with the square of the remaining height,
//! and its angular speed grows with the cube of how far it has fallen.
//! When it reaches the singularity it is re-randomized in place; the
//! population never grows or shrinks.
//!
//! ### Scene
//!
//! The [`Scene`] fades the previous frame with translucent black, strokes
//! one short segment per particle from its previous to its current
//! position, and draws the glow on top. Drawing goes through the
//! [`Surface`] trait; [`Pixmap`] is the CPU implementation.
//!
//! ### Driver
//!
//! The [`Driver`] owns the population and the scene and runs one frame per
//! tick. Motion is scaled by elapsed time relative to a 30 ms target
//! frame (see [`time`]), so the field looks the same at any refresh rate.
//!
//! ## Headless Rendering
//!
//! ```ignore
//! let frame = Simulation::new()
//!     .with_seed(7)
//!     .render_headless(800, 600, 1.0, 300, 16.0)?;
//! frame.save_png("funnel.png")?;
//! ```

pub mod color;
pub mod config;
mod driver;
pub mod error;
mod gpu;
pub mod interaction;
mod particle;
mod pixmap;
mod scene;
mod shader;
mod simulation;
pub mod surface;
pub mod time;
mod window;

pub use config::{Config, MotionConfig, SingularityConfig, Viewport, WindowConfig};
pub use driver::Driver;
pub use error::{ConfigError, ExportError, GpuError, SimulationError};
pub use glam::{Vec2, Vec3, Vec4};
pub use interaction::Interaction;
pub use particle::{Particle, StepContext};
pub use pixmap::Pixmap;
pub use scene::Scene;
pub use simulation::Simulation;
pub use surface::{ColorStop, RadialGradient, Surface};

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use singularity::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{Config, Viewport};
    pub use crate::driver::Driver;
    pub use crate::error::SimulationError;
    pub use crate::interaction::Interaction;
    pub use crate::particle::Particle;
    pub use crate::pixmap::Pixmap;
    pub use crate::scene::Scene;
    pub use crate::simulation::Simulation;
    pub use crate::surface::Surface;
    pub use glam::{Vec2, Vec4};
}
