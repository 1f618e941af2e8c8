//! Configuration types.
//!
//! Every value has a default, so a config file only needs the fields it
//! changes. Lengths marked "device-independent" are multiplied by the
//! display density at runtime.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::ConfigError;

/// Size of the drawable area in device pixels plus the density it was
/// scaled by.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    /// Device pixels per logical pixel.
    pub dpr: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32, dpr: f32) -> Self {
        Self { width, height, dpr }
    }

    /// Build a viewport from a physical pixel size.
    pub fn from_physical(width: u32, height: u32, dpr: f64) -> Self {
        Self::new(width as f32, height as f32, dpr as f32)
    }
}

/// Constants of the particle motion law.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MotionConfig {
    /// Infall acceleration. `vSpeed` grows by `gravity²` of itself per frame.
    pub gravity: f32,
    /// Vertical radius of an orbit at the top of the screen.
    pub orbit_height: f32,
    /// Distance above the bottom edge where particles respawn (device-independent).
    pub reset_margin: f32,
    /// Minimum orbit width near the bottom (device-independent).
    pub base_offset: f32,
    /// Slowest initial infall speed.
    pub min_v_speed: f32,
    /// Random extra initial infall speed, added to `min_v_speed`.
    pub v_speed_jitter: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            gravity: 0.1,
            orbit_height: 20.0,
            reset_margin: 20.0,
            base_offset: 4.0,
            min_v_speed: 0.06,
            v_speed_jitter: 0.03,
        }
    }
}

impl MotionConfig {
    /// Fastest speed a freshly spawned particle can have.
    pub fn max_v_speed(&self) -> f32 {
        self.min_v_speed + self.v_speed_jitter
    }
}

/// Glow at the bottom of the funnel.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SingularityConfig {
    /// Disc radius (device-independent).
    pub radius: f32,
    /// Gradient offset where the solid core starts fading out.
    pub glow_start: f32,
}

impl Default for SingularityConfig {
    fn default() -> Self {
        Self {
            radius: 50.0,
            glow_start: 0.5,
        }
    }
}

/// Initial window settings.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    /// Logical width.
    pub width: u32,
    /// Logical height.
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Singularity".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

/// Complete configuration.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub particle_count: usize,
    /// Seed for particle randomization. `None` seeds from the clock.
    pub seed: Option<u64>,
    /// Frame interval that one unit of motion corresponds to, in milliseconds.
    pub target_frame_ms: f32,
    pub motion: MotionConfig,
    pub singularity: SingularityConfig,
    pub window: WindowConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            particle_count: 500,
            seed: None,
            target_frame_ms: 30.0,
            motion: MotionConfig::default(),
            singularity: SingularityConfig::default(),
            window: WindowConfig::default(),
        }
    }
}

impl Config {
    /// Save configuration to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load and validate configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the motion law cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn check(ok: bool, msg: &str) -> Result<(), ConfigError> {
            if ok {
                Ok(())
            } else {
                Err(ConfigError::Invalid(msg.to_string()))
            }
        }

        let m = &self.motion;
        check(self.particle_count > 0, "particle_count must be at least 1")?;
        check(
            self.target_frame_ms.is_finite() && self.target_frame_ms > 0.0,
            "target_frame_ms must be positive",
        )?;
        check(m.gravity.is_finite() && m.gravity >= 0.0, "motion.gravity must be non-negative")?;
        check(
            m.orbit_height.is_finite() && m.orbit_height >= 0.0,
            "motion.orbit_height must be non-negative",
        )?;
        check(
            m.reset_margin.is_finite() && m.reset_margin >= 0.0,
            "motion.reset_margin must be non-negative",
        )?;
        check(
            m.base_offset.is_finite() && m.base_offset >= 0.0,
            "motion.base_offset must be non-negative",
        )?;
        check(
            m.min_v_speed.is_finite() && m.min_v_speed > 0.0,
            "motion.min_v_speed must be positive",
        )?;
        check(
            m.v_speed_jitter.is_finite() && m.v_speed_jitter >= 0.0,
            "motion.v_speed_jitter must be non-negative",
        )?;
        check(
            self.singularity.radius.is_finite() && self.singularity.radius >= 0.0,
            "singularity.radius must be non-negative",
        )?;
        check(
            (0.0..=1.0).contains(&self.singularity.glow_start),
            "singularity.glow_start must be between 0 and 1",
        )?;
        check(
            self.window.width > 0 && self.window.height > 0,
            "window size must be non-zero",
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.particle_count, 500);
        assert_eq!(config.motion.gravity, 0.1);
        assert!((config.motion.max_v_speed() - 0.09).abs() < 1e-6);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: Config =
            serde_json::from_str(r#"{ "particle_count": 42, "motion": { "gravity": 0.2 } }"#)
                .unwrap();
        assert_eq!(config.particle_count, 42);
        assert_eq!(config.motion.gravity, 0.2);
        assert_eq!(config.motion.orbit_height, 20.0);
        assert_eq!(config.singularity, SingularityConfig::default());
    }

    #[test]
    fn test_rejects_zero_particles() {
        let config = Config {
            particle_count: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_bad_frame_interval() {
        let config = Config {
            target_frame_ms: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_load_file() {
        let path = std::env::temp_dir().join(format!("singularity-config-{}.json", std::process::id()));
        let config = Config {
            seed: Some(7),
            ..Default::default()
        };
        config.save(&path).unwrap();
        let loaded = Config::load(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
