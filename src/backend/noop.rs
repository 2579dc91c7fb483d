//! Backend for hosts that move characters through `Transform`.

use bevy::prelude::*;

use super::WallRunBackend;

/// Backend for kinematic hosts.
///
/// The host keeps [`CharacterMotor`](crate::motor::CharacterMotor) current
/// (grounded, vertical velocity), integrates its gravity, and writes
/// [`WallContacts`](crate::detection::WallContacts) each tick, e.g. with
/// [`probe_walls`](crate::detection::probe_walls) over its own raycaster.
/// Displacement is applied to `Transform`.
pub struct TransformBackend;

impl WallRunBackend for TransformBackend {
    fn plugin() -> impl Plugin {
        NoOpBackendPlugin
    }

    fn get_velocity(_world: &World, _entity: Entity) -> Option<Vec3> {
        None
    }

    fn translate(world: &mut World, entity: Entity, displacement: Vec3) {
        if let Some(mut transform) = world.get_mut::<Transform>(entity) {
            transform.translation += displacement;
        }
    }
}

/// Empty plugin for backends that don't need additional setup.
pub struct NoOpBackendPlugin;

impl Plugin for NoOpBackendPlugin {
    fn build(&self, _app: &mut App) {}
}
