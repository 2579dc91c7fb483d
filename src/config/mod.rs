//! Wall-run configuration.
//!
//! [`WallRunConfig`] is the per-character configuration component. Adding it
//! to an entity inserts every other component the wall-run systems need.

mod camera_tilt;
mod impulse;
mod sensors;
mod wall_jumping;
mod wall_running;

pub use camera_tilt::CameraTiltConfig;
pub use impulse::ImpulseConfig;
pub use sensors::SensorConfig;
pub use wall_jumping::WallJumpingConfig;
pub use wall_running::WallRunningConfig;

use bevy::prelude::*;

use crate::detection::WallContacts;
use crate::error::ConfigError;
use crate::impulse::ImpulseAccumulator;
use crate::intent::WallRunIntent;
use crate::motor::CharacterMotor;
use crate::wall_run::WallRunner;

/// Configuration parameters for wall-running.
///
/// Constant for the lifetime of the character. Each field group maps onto
/// one part of the system: impulse accumulation, wall-run forces, wall-jump
/// launch, camera roll and probe geometry.
#[derive(Component, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Component)]
#[require(WallRunner, WallContacts, ImpulseAccumulator, WallRunIntent, CharacterMotor)]
pub struct WallRunConfig {
    /// Impulse accumulator settings (mass, decay).
    pub impulse: ImpulseConfig,
    /// Forces and gravity while running on a wall.
    pub wall_running: WallRunningConfig,
    /// Launch direction, force and cooldown of wall jumps.
    pub wall_jumping: WallJumpingConfig,
    /// Camera roll while running.
    pub camera_tilt: CameraTiltConfig,
    /// Probe lengths and wall classification.
    pub sensors: SensorConfig,
}

impl WallRunConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the character mass.
    pub fn with_mass(mut self, mass: f32) -> Self {
        self.impulse.mass = mass;
        self
    }

    /// Set the camera roll speed (degrees/second).
    pub fn with_camera_tilt_speed(mut self, speed: f32) -> Self {
        self.camera_tilt.speed = speed;
        self
    }

    /// Set the along-wall force.
    pub fn with_wall_run_speed(mut self, speed: f32) -> Self {
        self.wall_running.speed = speed;
        self
    }

    /// Set the gravity used while sliding on a wall.
    pub fn with_wall_run_gravity(mut self, gravity: f32) -> Self {
        self.wall_running.target_gravity = gravity;
        self
    }

    /// Set the vertical component of the wall-jump direction.
    pub fn with_wall_jump_height(mut self, height: f32) -> Self {
        self.wall_jumping.height = height;
        self
    }

    /// Set the wall-jump launch force.
    pub fn with_wall_jump_force(mut self, force: f32) -> Self {
        self.wall_jumping.off_force = force;
        self
    }

    /// Set the suppression window after a wall jump (seconds).
    pub fn with_wall_jump_cooldown(mut self, seconds: f32) -> Self {
        self.wall_jumping.cooldown = seconds;
        self
    }

    /// Set the left/right probe length.
    pub fn with_wall_probe_length(mut self, length: f32) -> Self {
        self.sensors.wall_probe_length = length;
        self
    }

    /// Check that every value keeps the wall-run formulas finite and meaningful.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mass = self.impulse.mass;
        if !(mass > 0.0 && mass.is_finite()) {
            return Err(ConfigError::NonPositiveMass(mass));
        }
        if !(self.camera_tilt.speed > 0.0 && self.camera_tilt.speed.is_finite()) {
            return Err(ConfigError::NonPositiveTiltSpeed(self.camera_tilt.speed));
        }
        for (name, value) in [
            ("wall probe length", self.sensors.wall_probe_length),
            ("ground probe length", self.sensors.ground_probe_length),
        ] {
            if !(value > 0.0 && value.is_finite()) {
                return Err(ConfigError::NonPositiveProbeLength { name, value });
            }
        }
        let tolerance = self.sensors.max_wall_normal_y;
        if !(tolerance > 0.0 && tolerance <= 1.0) {
            return Err(ConfigError::WallToleranceOutOfRange(tolerance));
        }
        for (name, value) in [
            ("wall jump cooldown", self.wall_jumping.cooldown),
            ("impulse decay rate", self.impulse.decay_rate),
            ("camera dead band", self.camera_tilt.dead_band),
        ] {
            if value.is_nan() || value < 0.0 {
                return Err(ConfigError::NegativeValue { name, value });
            }
        }
        Ok(())
    }

    /// Validate and return the configuration.
    pub fn validated(self) -> Result<Self, ConfigError> {
        self.validate().map(|()| self)
    }
}
