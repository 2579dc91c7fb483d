//! Physics backend abstraction.
//!
//! This module defines the trait that backends implement so the wall-run
//! systems can read velocity from, and push displacement and gravity into,
//! whatever moves the character (Avian, a kinematic controller, etc.).

use bevy::prelude::*;

/// Trait for physics backend implementations.
///
/// A backend owns two things: the plugin that fills the sensor components
/// ([`WallContacts`](crate::detection::WallContacts) and the grounded flag of
/// [`CharacterMotor`](crate::motor::CharacterMotor)), and the static hooks
/// below that the generic systems call every fixed tick.
///
/// # Example
///
/// ```rust
/// use bevy::prelude::*;
/// use msg_wall_run::prelude::*;
///
/// fn app_with_kinematic_host() -> App {
///     let mut app = App::new();
///     app.add_plugins(MinimalPlugins);
///     app.add_plugins(WallRunPlugin::<TransformBackend>::default());
///     app
/// }
/// # let _ = app_with_kinematic_host;
/// ```
pub trait WallRunBackend: 'static + Send + Sync {
    /// Returns the plugin that sets up this backend.
    fn plugin() -> impl Plugin;

    /// Get the current velocity of an entity.
    ///
    /// `None` leaves [`CharacterMotor::vertical_velocity`](crate::motor::CharacterMotor)
    /// as the host wrote it.
    fn get_velocity(world: &World, entity: Entity) -> Option<Vec3>;

    /// Move an entity by `displacement`.
    fn translate(world: &mut World, entity: Entity, displacement: Vec3);

    /// Integrate `gravity` (vertical acceleration) for one tick.
    ///
    /// Default implementation does nothing: the host integrates
    /// [`CharacterMotor::gravity`](crate::motor::CharacterMotor::gravity) itself.
    fn apply_gravity(_world: &mut World, _entity: Entity, _gravity: f32, _dt: f32) {}

    /// Get the fixed timestep delta time.
    fn get_fixed_timestep(world: &World) -> f32 {
        world
            .get_resource::<Time<Fixed>>()
            .map(|t| t.delta_secs())
            .filter(|&d| d > 0.0)
            .unwrap_or(1.0 / 60.0)
    }
}
