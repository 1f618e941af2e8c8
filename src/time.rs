//! Frame timing.
//!
//! Motion is expressed per *target frame*: a particle moving `v` per frame
//! moves `v * time_scale` on a tick where `time_scale` is the elapsed time
//! divided by the target frame interval. Fast displays get small steps,
//! slow displays get bigger ones, and everything looks the same speed.
//!
//! The scale is capped at 1 so a long stall (minimized window, debugger,
//! sleeping laptop) does not fling every particle into the singularity on
//! the next frame.
//!
//! # Example
//!
//! ```ignore
//! use singularity::time::FrameClock;
//!
//! let mut clock = FrameClock::new(30.0, 0.0);
//! assert_eq!(clock.tick(15.0), 0.5);
//! assert_eq!(clock.tick(1000.0), 1.0);
//! ```

/// Timestamps are milliseconds on a monotonic clock.
pub type Millis = f64;

/// How often the FPS estimate refreshes.
const FPS_UPDATE_INTERVAL_MS: Millis = 500.0;

/// Converts tick timestamps into frame-rate independent time scales.
#[derive(Debug, Clone)]
pub struct FrameClock {
    /// Milliseconds that correspond to a time scale of 1.
    target_frame_ms: f32,
    /// Timestamp of the previous tick.
    last_tick: Millis,
    /// Scale produced by the previous tick.
    time_scale: f32,
    /// Total ticks since creation.
    frame_count: u64,
    /// Calculated FPS (updated periodically).
    fps: f32,
    /// Frame count at last FPS update.
    fps_frame_count: u64,
    /// Time of last FPS calculation.
    fps_update_time: Millis,
}

impl FrameClock {
    /// Create a clock whose first tick is measured from `now`.
    pub fn new(target_frame_ms: f32, now: Millis) -> Self {
        Self {
            target_frame_ms,
            last_tick: now,
            time_scale: 0.0,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: now,
        }
    }

    /// Register a tick at `now` and return its time scale in `[0, 1]`.
    ///
    /// A timestamp earlier than the previous tick yields 0.
    pub fn tick(&mut self, now: Millis) -> f32 {
        let elapsed = (now - self.last_tick) as f32;
        self.time_scale = (elapsed / self.target_frame_ms).clamp(0.0, 1.0);
        self.last_tick = now;
        self.frame_count += 1;

        let fps_elapsed = now - self.fps_update_time;
        if fps_elapsed >= FPS_UPDATE_INTERVAL_MS {
            let frames_since = self.frame_count - self.fps_frame_count;
            self.fps = (frames_since as f64 / (fps_elapsed / 1000.0)) as f32;
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = now;
        }

        self.time_scale
    }

    /// Time scale of the most recent tick.
    #[inline]
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Timestamp of the most recent tick.
    #[inline]
    pub fn last_tick(&self) -> Millis {
        self.last_tick
    }

    /// Total ticks since creation.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Measured ticks per second.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    #[inline]
    pub fn target_frame_ms(&self) -> f32 {
        self.target_frame_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_new() {
        let clock = FrameClock::new(30.0, 100.0);
        assert_eq!(clock.frame(), 0);
        assert_eq!(clock.last_tick(), 100.0);
        assert_eq!(clock.time_scale(), 0.0);
    }

    #[test]
    fn test_scale_is_proportional() {
        let mut clock = FrameClock::new(30.0, 0.0);
        assert_eq!(clock.tick(15.0), 0.5);
        assert_eq!(clock.tick(30.0), 0.5);
        assert_eq!(clock.frame(), 2);
    }

    #[test]
    fn test_scale_caps_at_one() {
        let mut clock = FrameClock::new(30.0, 0.0);
        // Backgrounded for a minute
        assert_eq!(clock.tick(60_000.0), 1.0);
        assert_eq!(clock.last_tick(), 60_000.0);
    }

    #[test]
    fn test_clock_going_backwards() {
        let mut clock = FrameClock::new(30.0, 100.0);
        assert_eq!(clock.tick(90.0), 0.0);
        assert_eq!(clock.tick(105.0), 0.5);
    }

    #[test]
    fn test_fps() {
        let mut clock = FrameClock::new(30.0, 0.0);
        for i in 1..=60 {
            clock.tick(i as f64 * 1000.0 / 60.0);
        }
        assert!((clock.fps() - 60.0).abs() < 1.0);
    }
}
