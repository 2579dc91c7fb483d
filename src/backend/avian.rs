//! Avian3D physics backend implementation.
//!
//! This module provides the physics backend for Avian3D.
//! Enable with the `avian3d` feature.
//!
//! Characters are expected to be dynamic bodies with `GravityScale(0.0)`:
//! the backend integrates [`CharacterMotor::gravity`] into `LinearVelocity`
//! itself so the wall-run gravity override takes effect.

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::backend::WallRunBackend;
use crate::config::WallRunConfig;
use crate::detection::{LineQuery, WallContacts, probe_walls};
use crate::motor::CharacterMotor;
use crate::wall_run::WallRunner;
use crate::WallRunSet;

/// Avian3D physics backend for the wall-run systems.
///
/// Velocity and displacement go through Avian's `LinearVelocity` and
/// `Position`. Wall and ground probes are ray casts through `SpatialQuery`.
pub struct Avian3dBackend;

impl WallRunBackend for Avian3dBackend {
    fn plugin() -> impl Plugin {
        Avian3dBackendPlugin
    }

    fn get_velocity(world: &World, entity: Entity) -> Option<Vec3> {
        world.get::<LinearVelocity>(entity).map(|v| v.0)
    }

    fn translate(world: &mut World, entity: Entity, displacement: Vec3) {
        if let Some(mut position) = world.get_mut::<Position>(entity) {
            position.0 += displacement;
        } else if let Some(mut transform) = world.get_mut::<Transform>(entity) {
            transform.translation += displacement;
        }
    }

    fn apply_gravity(world: &mut World, entity: Entity, gravity: f32, dt: f32) {
        if let Some(mut velocity) = world.get_mut::<LinearVelocity>(entity) {
            velocity.0.y += gravity * dt;
        }
    }
}

/// Plugin that sets up Avian3D-specific sensor systems.
pub struct Avian3dBackendPlugin;

impl Plugin for Avian3dBackendPlugin {
    fn build(&self, app: &mut App) {
        // Grounding gates wall classification, so it is probed first.
        app.add_systems(
            FixedUpdate,
            (avian_ground_detection, avian_wall_detection)
                .chain()
                .in_set(WallRunSet::Sensors),
        );
    }
}

/// [`LineQuery`] over Avian's `SpatialQuery`.
pub struct AvianLineQuery<'a, 'w, 's> {
    spatial_query: &'a SpatialQuery<'w, 's>,
    filter: SpatialQueryFilter,
}

impl<'a, 'w, 's> AvianLineQuery<'a, 'w, 's> {
    /// Build a query that ignores `exclude_entity` and respects its collision layers.
    pub fn new(
        spatial_query: &'a SpatialQuery<'w, 's>,
        exclude_entity: Entity,
        collision_layers: Option<&CollisionLayers>,
    ) -> Self {
        // Use the character's filters as the mask so only what it collides with is hit
        let filter = match collision_layers {
            Some(layers) => SpatialQueryFilter::from_mask(layers.filters),
            None => SpatialQueryFilter::default(),
        }
        .with_excluded_entities([exclude_entity]);

        Self {
            spatial_query,
            filter,
        }
    }
}

impl LineQuery for AvianLineQuery<'_, '_, '_> {
    fn linecast(&self, from: Vec3, to: Vec3) -> Option<Vec3> {
        let delta = to - from;
        let direction = Dir3::new(delta).ok()?;
        let max_distance = delta.length();

        self.spatial_query
            .cast_ray(from, direction, max_distance, true, &self.filter)
            .map(|hit| hit.normal)
    }
}

/// Avian-specific ground detection system.
///
/// A ray straight down of `ground_probe_length`; the character is grounded
/// when it lands on something that is not a wall.
fn avian_ground_detection(
    spatial_query: SpatialQuery,
    mut q_characters: Query<(
        Entity,
        &GlobalTransform,
        &WallRunConfig,
        &mut CharacterMotor,
        Option<&CollisionLayers>,
    )>,
) {
    for (entity, transform, config, mut motor, collision_layers) in &mut q_characters {
        let position = transform.translation();
        let query = AvianLineQuery::new(&spatial_query, entity, collision_layers);
        let end = position + Vec3::NEG_Y * config.sensors.ground_probe_length;

        motor.grounded = query
            .linecast(position, end)
            .is_some_and(|normal| normal.y >= config.sensors.max_wall_normal_y);
    }
}

/// Avian-specific wall detection system.
///
/// Probes left and right of the character's facing. Skipped while the
/// runner is suppressed, leaving no contacts.
fn avian_wall_detection(
    spatial_query: SpatialQuery,
    mut q_characters: Query<(
        Entity,
        &GlobalTransform,
        &WallRunConfig,
        &WallRunner,
        &mut WallContacts,
        Option<&CollisionLayers>,
    )>,
) {
    for (entity, transform, config, runner, mut contacts, collision_layers) in &mut q_characters {
        if runner.is_suppressed() {
            contacts.reset();
            continue;
        }

        let query = AvianLineQuery::new(&spatial_query, entity, collision_layers);
        *contacts = probe_walls(
            &query,
            transform.translation(),
            *transform.right(),
            &config.sensors,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WallRunPlugin;
    use crate::impulse::ImpulseAccumulator;
    use crate::intent::WallRunIntent;

    fn create_test_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(bevy::transform::TransformPlugin);
        // Insert SceneSpawner resource required by Avian's ColliderHierarchyPlugin
        app.insert_resource(bevy::scene::SceneSpawner::default());
        // Collider-from-mesh cleanup reads mesh asset messages
        app.add_plugins(AssetPlugin::default());
        app.init_asset::<Mesh>();
        app.add_plugins(PhysicsPlugins::default());
        app.add_plugins(WallRunPlugin::<Avian3dBackend>::default());
        app.insert_resource(Time::<Fixed>::from_hz(60.0));
        app.finish();
        app.cleanup();
        app
    }

    #[test]
    fn avian_backend_velocity() {
        let mut app = create_test_app();

        let entity = app
            .world_mut()
            .spawn((
                Transform::default(),
                RigidBody::Dynamic,
                LinearVelocity(Vec3::new(1.0, -2.0, 3.0)),
            ))
            .id();

        let vel = Avian3dBackend::get_velocity(app.world(), entity).unwrap();
        assert!((vel - Vec3::new(1.0, -2.0, 3.0)).length() < 0.01);
    }

    #[test]
    fn avian_backend_apply_gravity() {
        let mut app = create_test_app();

        let entity = app
            .world_mut()
            .spawn((Transform::default(), LinearVelocity(Vec3::ZERO)))
            .id();

        Avian3dBackend::apply_gravity(app.world_mut(), entity, -4.0, 0.5);

        let vel = Avian3dBackend::get_velocity(app.world(), entity).unwrap();
        assert!((vel.y + 2.0).abs() < 1e-6);
    }

    #[test]
    fn avian_backend_translate_prefers_position() {
        let mut app = create_test_app();

        let entity = app
            .world_mut()
            .spawn((Transform::default(), Position(Vec3::new(1.0, 2.0, 3.0))))
            .id();

        Avian3dBackend::translate(app.world_mut(), entity, Vec3::new(0.5, 0.0, -1.0));

        let position = app.world().get::<Position>(entity).unwrap();
        assert!((position.0 - Vec3::new(1.5, 2.0, 2.0)).length() < 1e-6);
    }

    #[test]
    fn avian_backend_translate_falls_back_to_transform() {
        let mut app = create_test_app();

        let entity = app.world_mut().spawn(Transform::default()).id();

        Avian3dBackend::translate(app.world_mut(), entity, Vec3::X);

        let transform = app.world().get::<Transform>(entity).unwrap();
        assert_eq!(transform.translation, Vec3::X);
    }

    #[test]
    fn wall_run_config_requires_components() {
        let mut app = create_test_app();

        let entity = app
            .world_mut()
            .spawn((
                Transform::default(),
                RigidBody::Dynamic,
                Collider::capsule(0.3, 1.4),
                GravityScale(0.0),
                WallRunConfig::default(),
            ))
            .id();

        app.update();

        // WallRunConfig #[require] should have inserted these
        assert!(app.world().get::<WallRunner>(entity).is_some());
        assert!(app.world().get::<WallContacts>(entity).is_some());
        assert!(app.world().get::<ImpulseAccumulator>(entity).is_some());
        assert!(app.world().get::<WallRunIntent>(entity).is_some());
        assert!(app.world().get::<CharacterMotor>(entity).is_some());
    }
}
