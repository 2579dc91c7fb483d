//! Configuration for wall-run locomotion.

use bevy::prelude::*;

/// Configuration for wall-run locomotion.
#[derive(Reflect, Debug, Clone, Copy)]
pub struct WallRunningConfig {
    /// Force pushing the character along the wall every tick.
    pub speed: f32,

    /// Gravity used while sliding down a wall (units/second^2, negative is down).
    pub target_gravity: f32,

    /// Force pressing the character into the wall every tick.
    pub stick_force: f32,
}

impl Default for WallRunningConfig {
    fn default() -> Self {
        Self {
            speed: 5.0,
            target_gravity: -4.0,
            stick_force: 1.0,
        }
    }
}
