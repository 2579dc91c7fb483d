//! Camera roll while wall-running.

use bevy::prelude::*;

use crate::config::CameraTiltConfig;
use crate::wall_run::WallRunSide;

/// Camera roll driven by a wall-running character.
///
/// Put this on the camera entity. `target` is the character whose
/// [`WallRunner`](crate::wall_run::WallRunner) and
/// [`WallRunConfig`](crate::config::WallRunConfig) drive the roll.
#[derive(Component, Reflect, Debug, Clone, Copy, PartialEq)]
#[reflect(Component)]
pub struct CameraTilt {
    /// The character this camera follows.
    pub target: Entity,
    /// Current roll in degrees.
    pub roll: f32,
}

impl CameraTilt {
    /// Create an untilted camera following `target`.
    pub fn new(target: Entity) -> Self {
        Self { target, roll: 0.0 }
    }
}

/// Roll the camera should settle at for `side` (degrees).
pub fn target_roll(side: WallRunSide, config: &CameraTiltConfig) -> f32 {
    match side {
        WallRunSide::Left => -config.roll,
        WallRunSide::Right => config.roll,
        WallRunSide::Inactive => 0.0,
    }
}

/// Move `current` toward `target` at `config.speed` degrees/second.
///
/// Inside the dead-band around the target the roll snaps exactly onto it.
pub fn ease_roll(current: f32, target: f32, dt: f32, config: &CameraTiltConfig) -> f32 {
    if current < target - config.dead_band {
        current + config.speed * dt
    } else if current > target + config.dead_band {
        current - config.speed * dt
    } else {
        target
    }
}

/// Replace the roll of `rotation`, keeping its yaw and pitch.
pub fn with_roll(rotation: Quat, roll_degrees: f32) -> Quat {
    let (yaw, pitch, _) = rotation.to_euler(EulerRot::YXZ);
    Quat::from_euler(EulerRot::YXZ, yaw, pitch, roll_degrees.to_radians())
}
