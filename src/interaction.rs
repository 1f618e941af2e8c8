//! Pointer and touch interaction.
//!
//! Input collapses into two values the particles read every step:
//!
//! - `frozen`: holding a button or finger down without moving freezes all
//!   motion (trails keep fading, nothing moves).
//! - `movement_factor`: dragging sideways scales the angular speed of every
//!   particle. Dragging left spins the funnel backwards.
//!
//! ```ignore
//! let mut interaction = Interaction::default();
//! interaction.hold_start();
//! interaction.hold_move(100.0);
//! interaction.hold_move(160.0);   // 60px right
//! assert_eq!(interaction.movement_factor, 2.0);
//! ```

use winit::event::{ElementState, TouchPhase, WindowEvent};

/// Drag distance in device pixels that maps to a movement factor of 1.
pub const DEFAULT_DRAG_SCALE: f32 = 30.0;

/// Interaction state shared between the input handlers and the particles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interaction {
    /// Suspends particle motion while true.
    pub frozen: bool,
    /// Signed multiplier on angular speed.
    pub movement_factor: f32,
    drag_scale: f32,
    pointer_held: bool,
    last_x: Option<f32>,
}

impl Default for Interaction {
    fn default() -> Self {
        Self::new(DEFAULT_DRAG_SCALE)
    }
}

impl Interaction {
    /// Create an unfrozen interaction state with a movement factor of 1.
    pub fn new(drag_scale: f32) -> Self {
        Self {
            frozen: false,
            movement_factor: 1.0,
            drag_scale,
            pointer_held: false,
            last_x: None,
        }
    }

    /// Whether a mouse button or finger is currently down.
    pub fn is_held(&self) -> bool {
        self.pointer_held
    }

    /// A button or finger went down: freeze and start a new drag.
    pub fn hold_start(&mut self) {
        self.pointer_held = true;
        self.last_x = None;
        self.frozen = true;
    }

    /// The button or finger was lifted.
    pub fn hold_end(&mut self) {
        self.pointer_held = false;
        self.frozen = false;
    }

    /// The held pointer moved to horizontal position `x` (device pixels).
    ///
    /// The first sample of a drag only records the position; later samples
    /// set the movement factor from the distance travelled since the
    /// previous one. A zero-distance sample keeps the current factor.
    pub fn hold_move(&mut self, x: f32) {
        self.frozen = false;
        if let Some(last) = self.last_x {
            let distance = x - last;
            if distance != 0.0 {
                self.movement_factor = distance / self.drag_scale;
            }
        }
        self.last_x = Some(x);
    }

    /// Process a winit window event.
    pub fn handle_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::MouseInput { state, .. } => match state {
                ElementState::Pressed => self.hold_start(),
                ElementState::Released => self.hold_end(),
            },

            // Hovering without a button held does nothing
            WindowEvent::CursorMoved { position, .. } => {
                if self.pointer_held {
                    self.hold_move(position.x as f32);
                }
            }

            WindowEvent::Touch(touch) => match touch.phase {
                TouchPhase::Started => self.hold_start(),
                TouchPhase::Moved => {
                    self.pointer_held = true;
                    self.hold_move(touch.location.x as f32);
                }
                TouchPhase::Ended | TouchPhase::Cancelled => self.hold_end(),
            },

            WindowEvent::CursorLeft { .. } | WindowEvent::Focused(false) => {
                if self.pointer_held {
                    self.hold_end();
                }
            }

            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let input = Interaction::default();
        assert!(!input.frozen);
        assert_eq!(input.movement_factor, 1.0);
        assert!(!input.is_held());
    }

    #[test]
    fn test_hold_freezes_and_release_thaws() {
        let mut input = Interaction::default();
        input.hold_start();
        assert!(input.frozen);
        input.hold_end();
        assert!(!input.frozen);
    }

    #[test]
    fn test_first_move_only_records_position() {
        let mut input = Interaction::default();
        input.hold_start();
        input.hold_move(500.0);
        // Moving thaws, but there is no previous sample to measure from
        assert!(!input.frozen);
        assert_eq!(input.movement_factor, 1.0);
    }

    #[test]
    fn test_drag_sets_signed_factor() {
        let mut input = Interaction::default();
        input.hold_start();
        input.hold_move(100.0);
        input.hold_move(160.0);
        assert_eq!(input.movement_factor, 2.0);

        input.hold_move(145.0);
        assert_eq!(input.movement_factor, -0.5);
    }

    #[test]
    fn test_zero_distance_keeps_factor() {
        let mut input = Interaction::default();
        input.hold_start();
        input.hold_move(10.0);
        input.hold_move(40.0);
        input.hold_move(40.0);
        assert_eq!(input.movement_factor, 1.0);
    }

    #[test]
    fn test_new_hold_forgets_last_position() {
        let mut input = Interaction::default();
        input.hold_start();
        input.hold_move(10.0);
        input.hold_move(70.0);
        input.hold_end();

        // A fresh press must not measure from the old drag
        input.hold_start();
        input.hold_move(1000.0);
        assert_eq!(input.movement_factor, 2.0);
    }

    #[test]
    fn test_factor_survives_release() {
        let mut input = Interaction::default();
        input.hold_start();
        input.hold_move(0.0);
        input.hold_move(-90.0);
        input.hold_end();
        assert_eq!(input.movement_factor, -3.0);
        assert!(!input.frozen);
    }
}
