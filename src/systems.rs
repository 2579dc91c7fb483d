//! Backend-independent wall-run systems.
//!
//! These run in `FixedUpdate` inside the [`WallRunSet`](crate::WallRunSet)
//! phases. Backend-specific sensor systems fill [`WallContacts`] in between.

use bevy::prelude::*;

use crate::backend::WallRunBackend;
use crate::camera::{CameraTilt, ease_roll, target_roll, with_roll};
use crate::config::WallRunConfig;
use crate::detection::WallContacts;
use crate::impulse::ImpulseAccumulator;
use crate::intent::WallRunIntent;
use crate::messages::{WallJumped, WallRunEnded, WallRunStarted};
use crate::motor::CharacterMotor;
use crate::wall_run::{WallRunTransition, WallRunner};

/// Count every runner's suppression window down by the fixed timestep.
pub fn tick_suppression(time: Res<Time>, mut q_runners: Query<&mut WallRunner>) {
    let dt = time.delta_secs();
    for mut runner in &mut q_runners {
        runner.tick_suppression(dt);
    }
}

/// Copy the backend's vertical velocity into each motor.
pub fn sync_motor_velocity<B: WallRunBackend>(world: &mut World) {
    let entities: Vec<Entity> = world
        .query_filtered::<Entity, With<CharacterMotor>>()
        .iter(world)
        .collect();

    for entity in entities {
        let Some(velocity) = B::get_velocity(world, entity) else {
            continue;
        };
        if let Some(mut motor) = world.get_mut::<CharacterMotor>(entity) {
            motor.vertical_velocity = velocity.y;
        }
    }
}

/// Run the wall-run state machine on this tick's contacts.
pub fn wall_run_update(
    time: Res<Time>,
    mut started: MessageWriter<WallRunStarted>,
    mut ended: MessageWriter<WallRunEnded>,
    mut q_characters: Query<(
        Entity,
        &WallRunConfig,
        &WallContacts,
        &mut WallRunner,
        &mut CharacterMotor,
        &mut ImpulseAccumulator,
    )>,
) {
    let dt = time.delta_secs();

    for (entity, config, contacts, mut runner, mut motor, mut impulse) in &mut q_characters {
        let walls = contacts.classify(motor.grounded, config.sensors.max_wall_normal_y);

        match runner.update(walls, &mut motor, &mut impulse, config, dt) {
            Some(WallRunTransition::Started { side }) => {
                started.write(WallRunStarted { entity, side });
            }
            Some(WallRunTransition::Ended { side, suppression }) => {
                ended.write(WallRunEnded {
                    entity,
                    side,
                    suppression,
                });
            }
            None => {}
        }
    }
}

/// Ease each tilt camera's roll toward its target's run side.
pub fn camera_tilt(
    time: Res<Time>,
    q_characters: Query<(&WallRunner, &WallRunConfig)>,
    mut q_cameras: Query<(&mut CameraTilt, &mut Transform)>,
) {
    let dt = time.delta_secs();

    for (mut tilt, mut transform) in &mut q_cameras {
        let Ok((runner, config)) = q_characters.get(tilt.target) else {
            continue;
        };

        let target = target_roll(runner.side(), &config.camera_tilt);
        tilt.roll = ease_roll(tilt.roll, target, dt, &config.camera_tilt);
        transform.rotation = with_roll(transform.rotation, tilt.roll);
    }
}

/// Consume accumulated impact into motor displacement.
pub fn apply_impulses(
    time: Res<Time>,
    mut q_characters: Query<(&WallRunConfig, &mut ImpulseAccumulator, &mut CharacterMotor)>,
) {
    let dt = time.delta_secs();

    for (config, mut impulse, mut motor) in &mut q_characters {
        let displacement = impulse.tick(dt, motor.grounded, &config.impulse);
        if displacement != Vec3::ZERO {
            motor.push_displacement(displacement);
        }
    }
}

/// Jump off the wall when jump is held and the gate is armed.
pub fn wall_jump(
    mut jumped: MessageWriter<WallJumped>,
    mut ended: MessageWriter<WallRunEnded>,
    mut q_characters: Query<(
        Entity,
        &GlobalTransform,
        &WallRunConfig,
        &WallRunIntent,
        &mut WallRunner,
        &mut CharacterMotor,
        &mut ImpulseAccumulator,
    )>,
) {
    for (entity, transform, config, intent, mut runner, mut motor, mut impulse) in
        &mut q_characters
    {
        let side = runner.side();
        let Some(direction) = runner.wall_jump(
            intent.is_jump_pressed(),
            *transform.forward(),
            &mut motor,
            &mut impulse,
            config,
        ) else {
            continue;
        };

        ended.write(WallRunEnded {
            entity,
            side,
            suppression: config.wall_jumping.cooldown,
        });
        jumped.write(WallJumped { entity, direction });
    }
}

/// Hand queued displacement and the effective gravity to the backend.
pub fn apply_motor_output<B: WallRunBackend>(world: &mut World) {
    let dt = B::get_fixed_timestep(world);
    let entities: Vec<Entity> = world
        .query_filtered::<Entity, With<CharacterMotor>>()
        .iter(world)
        .collect();

    for entity in entities {
        let (displacement, gravity) = {
            let Some(mut motor) = world.get_mut::<CharacterMotor>(entity) else {
                continue;
            };
            (motor.take_displacement(), motor.gravity())
        };

        if displacement != Vec3::ZERO {
            B::translate(world, entity, displacement);
        }
        B::apply_gravity(world, entity, gravity, dt);
    }
}

/// Warn about wall-run configs that fail validation when they are added.
pub fn report_invalid_configs(q_configs: Query<(Entity, &WallRunConfig), Added<WallRunConfig>>) {
    for (entity, config) in &q_configs {
        if let Err(err) = config.validate() {
            warn!("invalid wall-run config on {entity}: {err}");
        }
    }
}
