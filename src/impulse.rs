//! Decaying external force ("impact") applied to the character.
//!
//! Wall-run forces and wall-jump launches do not touch the character's
//! velocity directly. They accumulate here and are turned into a positional
//! displacement every tick while the character is airborne.

use bevy::prelude::*;

use crate::config::ImpulseConfig;

/// Residual external force currently applied to the character.
#[derive(Component, Reflect, Debug, Clone, Copy, Default, PartialEq)]
#[reflect(Component)]
pub struct ImpulseAccumulator {
    /// Current impact vector (units/second of displacement).
    pub impact: Vec3,
}

impl ImpulseAccumulator {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a mass-scaled impact in `direction`.
    ///
    /// The direction is normalized (zero length adds nothing) and a downward
    /// component is reflected upward so impacts never push into the ground.
    /// Negative `force` pushes against the reflected direction.
    pub fn add_impact(&mut self, direction: Vec3, force: f32, mass: f32) {
        if mass <= 0.0 {
            return;
        }
        let mut direction = direction.normalize_or_zero();
        if direction.y < 0.0 {
            direction.y = -direction.y;
        }
        self.impact += direction * force / mass;
    }

    /// Advance one tick and return the displacement to apply to the character.
    ///
    /// While airborne and above the threshold the impact is consumed
    /// gradually. Grounding, or dropping to the threshold, clears it.
    pub fn tick(&mut self, dt: f32, grounded: bool, config: &ImpulseConfig) -> Vec3 {
        if self.impact.length() > config.min_magnitude && !grounded {
            let displacement = self.impact * dt;
            let t = (config.decay_rate * dt).clamp(0.0, 1.0);
            self.impact = self.impact.lerp(Vec3::ZERO, t);
            displacement
        } else {
            self.impact = Vec3::ZERO;
            Vec3::ZERO
        }
    }

    /// Magnitude of the current impact.
    pub fn magnitude(&self) -> f32 {
        self.impact.length()
    }

    /// Whether any impact remains.
    pub fn is_active(&self) -> bool {
        self.impact != Vec3::ZERO
    }
}
