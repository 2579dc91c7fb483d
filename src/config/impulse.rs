//! Configuration for the impulse accumulator.

use bevy::prelude::*;

/// Configuration for the decaying impulse ("impact") applied to the character.
#[derive(Reflect, Debug, Clone, Copy)]
pub struct ImpulseConfig {
    /// Character mass. Every impact force is divided by this value.
    pub mass: f32,

    /// Magnitude at or below which residual impact is dropped to zero.
    pub min_magnitude: f32,

    /// Decay rate per second. Each tick the impact is lerped toward zero
    /// by `decay_rate * dt`.
    pub decay_rate: f32,
}

impl Default for ImpulseConfig {
    fn default() -> Self {
        Self {
            mass: 25.0,
            min_magnitude: 0.2,
            decay_rate: 2.0,
        }
    }
}
