//! Configuration for wall jump mechanics.

use bevy::prelude::*;

/// Configuration for wall jump mechanics.
#[derive(Reflect, Debug, Clone, Copy)]
pub struct WallJumpingConfig {
    /// Vertical component of the launch direction (before normalization).
    pub height: f32,

    /// Force of the launch impulse.
    pub off_force: f32,

    /// Multiplier on the wall normal's horizontal components in the launch direction.
    pub outward_scale: f32,

    /// Duration (seconds) after a wall jump during which wall detection is suppressed.
    pub cooldown: f32,
}

impl Default for WallJumpingConfig {
    fn default() -> Self {
        Self {
            height: 1.5,
            off_force: 300.0,
            outward_scale: 1.5,
            cooldown: 0.35,
        }
    }
}
