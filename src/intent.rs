//! Input intent component.
//!
//! The wall-run systems only consume a single input: whether jump is held.
//! Player input or AI writes it; the wall-jump system reads it every tick.

use bevy::prelude::*;

/// Jump input for wall jumping.
///
/// Level-triggered: while `jump_pressed` stays true, every tick in which a
/// wall jump is armed will trigger one.
///
/// # Example
///
/// ```rust
/// use msg_wall_run::prelude::*;
///
/// let mut intent = WallRunIntent::new();
/// intent.press_jump();
/// assert!(intent.is_jump_pressed());
///
/// intent.release_jump();
/// assert!(!intent.is_jump_pressed());
/// ```
#[derive(Component, Reflect, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[reflect(Component)]
pub struct WallRunIntent {
    /// Whether jump is currently held.
    pub jump_pressed: bool,
}

impl WallRunIntent {
    /// Create an intent with nothing pressed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the jump state.
    pub fn set_jump_pressed(&mut self, pressed: bool) {
        self.jump_pressed = pressed;
    }

    /// Hold jump.
    pub fn press_jump(&mut self) {
        self.jump_pressed = true;
    }

    /// Release jump.
    pub fn release_jump(&mut self) {
        self.jump_pressed = false;
    }

    /// Check if jump is held.
    pub fn is_jump_pressed(&self) -> bool {
        self.jump_pressed
    }
}
