//! Configuration for camera roll while wall-running.

use bevy::prelude::*;

/// Configuration for camera roll while wall-running.
#[derive(Reflect, Debug, Clone, Copy)]
pub struct CameraTiltConfig {
    /// Roll speed (degrees/second).
    pub speed: f32,

    /// Roll magnitude while running on a wall (degrees).
    /// Right walls roll to `+roll`, left walls to `-roll`.
    pub roll: f32,

    /// Half-width of the band around the target in which the roll snaps (degrees).
    pub dead_band: f32,
}

impl Default for CameraTiltConfig {
    fn default() -> Self {
        Self {
            speed: 50.0,
            roll: 15.0,
            dead_band: 0.5,
        }
    }
}
