//! Messages written by the wall-run systems.
//!
//! Animation, sound and UI code can read these with a `MessageReader`.

use bevy::prelude::*;

use crate::wall_run::WallRunSide;

/// A character started running on a wall.
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub struct WallRunStarted {
    /// The running character.
    pub entity: Entity,
    /// Which side the wall is on.
    pub side: WallRunSide,
}

/// A character stopped running on a wall.
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub struct WallRunEnded {
    /// The character.
    pub entity: Entity,
    /// The side it was running on.
    pub side: WallRunSide,
    /// Seconds wall detection is suppressed afterwards.
    pub suppression: f32,
}

/// A character jumped off a wall.
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub struct WallJumped {
    /// The character.
    pub entity: Entity,
    /// Launch direction before normalization.
    pub direction: Vec3,
}
