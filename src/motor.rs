//! Host character controller interface.
//!
//! [`CharacterMotor`] is the narrow surface through which the wall-run
//! systems talk to whatever moves the character. The host (or a backend)
//! keeps `grounded` and `vertical_velocity` current; the wall-run systems
//! queue displacement and request gravity overrides.

use bevy::prelude::*;

/// Gravity of a typical first-person controller (units/second^2).
pub const DEFAULT_GRAVITY: f32 = -15.0;

/// Host-controller state shared with the wall-run systems.
///
/// Gravity ownership is explicit: the host owns `default_gravity`, the
/// wall-run state machine may only place or clear an override on top of it.
#[derive(Component, Reflect, Debug, Clone, PartialEq)]
#[reflect(Component)]
pub struct CharacterMotor {
    /// Whether the character is standing on the ground.
    pub grounded: bool,
    /// Current vertical velocity (positive is up).
    pub vertical_velocity: f32,
    default_gravity: f32,
    gravity_override: Option<f32>,
    pending_displacement: Vec3,
}

impl Default for CharacterMotor {
    fn default() -> Self {
        Self::new(DEFAULT_GRAVITY)
    }
}

impl CharacterMotor {
    /// Create a motor with the host's default gravity.
    pub fn new(default_gravity: f32) -> Self {
        Self {
            grounded: false,
            vertical_velocity: 0.0,
            default_gravity,
            gravity_override: None,
            pending_displacement: Vec3::ZERO,
        }
    }

    /// Gravity the host should integrate this tick.
    pub fn gravity(&self) -> f32 {
        self.gravity_override.unwrap_or(self.default_gravity)
    }

    /// Gravity the host uses when nothing overrides it.
    pub fn default_gravity(&self) -> f32 {
        self.default_gravity
    }

    /// The active override, if any.
    pub fn gravity_override(&self) -> Option<f32> {
        self.gravity_override
    }

    /// Replace the host's gravity until [`Self::clear_gravity_override`].
    pub fn request_gravity_override(&mut self, gravity: f32) {
        self.gravity_override = Some(gravity);
    }

    /// Return gravity to the host default. Returns whether an override was active.
    pub fn clear_gravity_override(&mut self) -> bool {
        self.gravity_override.take().is_some()
    }

    /// Queue a positional displacement for the host to apply.
    pub fn push_displacement(&mut self, displacement: Vec3) {
        self.pending_displacement += displacement;
    }

    /// Displacement queued since the last take.
    pub fn pending_displacement(&self) -> Vec3 {
        self.pending_displacement
    }

    /// Take the queued displacement, leaving zero behind.
    pub fn take_displacement(&mut self) -> Vec3 {
        std::mem::take(&mut self.pending_displacement)
    }
}
