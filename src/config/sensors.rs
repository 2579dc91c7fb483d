//! Configuration for wall and ground probes.

use bevy::prelude::*;

/// Configuration for wall and ground probes.
#[derive(Reflect, Debug, Clone, Copy)]
pub struct SensorConfig {
    /// Length of the left/right wall probes, measured from the character origin.
    pub wall_probe_length: f32,

    /// A hit counts as a wall only when `|normal.y|` is strictly below this value.
    /// The default 0.52 accepts surfaces within roughly 31 degrees of vertical.
    pub max_wall_normal_y: f32,

    /// Length of the downward ground probe (backends that detect grounding themselves).
    pub ground_probe_length: f32,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            wall_probe_length: 1.0,
            max_wall_normal_y: 0.52,
            ground_probe_length: 1.1,
        }
    }
}
