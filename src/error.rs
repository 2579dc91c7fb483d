//! Error types.

use thiserror::Error;

/// Reasons a [`WallRunConfig`](crate::config::WallRunConfig) is rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// Mass must be strictly positive; impact forces are divided by it.
    #[error("mass must be positive and finite, got {0}")]
    NonPositiveMass(f32),

    /// Camera tilt speed must be strictly positive or the camera never moves.
    #[error("camera tilt speed must be positive and finite, got {0}")]
    NonPositiveTiltSpeed(f32),

    /// Probe lengths must be strictly positive.
    #[error("{name} must be positive and finite, got {value}")]
    NonPositiveProbeLength {
        /// Which probe.
        name: &'static str,
        /// The rejected length.
        value: f32,
    },

    /// The wall normal tolerance must lie in `(0, 1]`.
    #[error("max wall normal y must be in (0, 1], got {0}")]
    WallToleranceOutOfRange(f32),

    /// Rates, cooldowns and bands must not be negative.
    #[error("{name} must be a non-negative number, got {value}")]
    NegativeValue {
        /// Which value.
        name: &'static str,
        /// The rejected value.
        value: f32,
    },
}
