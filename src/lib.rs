//! Wall-running for Bevy character controllers.
//!
//! This crate layers parkour-style wall-running on top of an existing
//! character controller:
//!
//! - **Wall detection**: left/right line probes classify nearby surfaces as
//!   run-able walls while the character is airborne.
//! - **Wall-run state machine**: sticks the character to the wall, pushes it
//!   along the wall and lowers gravity to a slow slide.
//! - **Wall jump**: launches the character up and away from the wall, then
//!   suppresses wall detection for a short cooldown.
//! - **Camera tilt**: rolls a follow camera toward the wall side.
//!
//! Movement is produced through a decaying impulse ("impact") that is turned
//! into a positional displacement every fixed tick.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use bevy::prelude::*;
//! use msg_wall_run::prelude::*;
//!
//! fn setup(mut commands: Commands) {
//!     let player = commands
//!         .spawn((Transform::default(), WallRunConfig::default()))
//!         .id();
//!     commands.spawn((Camera3d::default(), CameraTilt::new(player)));
//! }
//!
//! App::new()
//!     .add_plugins(DefaultPlugins)
//!     .add_plugins(WallRunPlugin::<TransformBackend>::default())
//!     .add_systems(Startup, setup)
//!     .run();
//! ```
//!
//! Adding [`WallRunConfig`](config::WallRunConfig) inserts every other
//! per-character component. The host keeps
//! [`CharacterMotor`](motor::CharacterMotor) and
//! [`WallRunIntent`](intent::WallRunIntent) current; with the `avian3d`
//! feature, [`Avian3dBackend`](backend::Avian3dBackend) does the probing and
//! integration itself.

use std::marker::PhantomData;

use bevy::prelude::*;

pub mod backend;
pub mod camera;
pub mod config;
pub mod detection;
pub mod error;
pub mod impulse;
pub mod intent;
pub mod messages;
pub mod motor;
pub mod systems;
pub mod wall_run;

#[cfg(feature = "avian3d")]
pub use backend::avian;

use backend::WallRunBackend;

/// Commonly used types.
pub mod prelude {
    pub use crate::backend::{TransformBackend, WallRunBackend};
    #[cfg(feature = "avian3d")]
    pub use crate::backend::Avian3dBackend;
    pub use crate::camera::CameraTilt;
    pub use crate::config::{
        CameraTiltConfig, ImpulseConfig, SensorConfig, WallJumpingConfig, WallRunConfig,
        WallRunningConfig,
    };
    pub use crate::detection::{LineQuery, WallContacts, WallDetection};
    pub use crate::error::ConfigError;
    pub use crate::impulse::ImpulseAccumulator;
    pub use crate::intent::WallRunIntent;
    pub use crate::messages::{WallJumped, WallRunEnded, WallRunStarted};
    pub use crate::motor::CharacterMotor;
    pub use crate::wall_run::{WallRunSide, WallRunner};
    pub use crate::{WallRunPlugin, WallRunSet};
}

/// System sets for the wall-run pipeline, run in this order in `FixedUpdate`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum WallRunSet {
    /// Count down suppression and read velocity from the backend.
    Preparation,
    /// Backend probes: grounding and wall contacts.
    Sensors,
    /// Enter, maintain or leave wall runs.
    StateMachine,
    /// Ease camera roll toward the run side.
    CameraTilt,
    /// Turn accumulated impact into displacement.
    Impulse,
    /// Jump off walls.
    WallJump,
    /// Backend applies displacement and gravity.
    FinalApplication,
}

/// Wall-run plugin, generic over the physics backend.
pub struct WallRunPlugin<B: WallRunBackend> {
    _marker: PhantomData<B>,
}

impl<B: WallRunBackend> Default for WallRunPlugin<B> {
    fn default() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<B: WallRunBackend> Plugin for WallRunPlugin<B> {
    fn build(&self, app: &mut App) {
        app.register_type::<config::WallRunConfig>()
            .register_type::<wall_run::WallRunner>()
            .register_type::<detection::WallContacts>()
            .register_type::<impulse::ImpulseAccumulator>()
            .register_type::<intent::WallRunIntent>()
            .register_type::<motor::CharacterMotor>()
            .register_type::<camera::CameraTilt>();

        app.add_message::<messages::WallRunStarted>()
            .add_message::<messages::WallRunEnded>()
            .add_message::<messages::WallJumped>();

        app.configure_sets(
            FixedUpdate,
            (
                WallRunSet::Preparation,
                WallRunSet::Sensors,
                WallRunSet::StateMachine,
                WallRunSet::CameraTilt,
                WallRunSet::Impulse,
                WallRunSet::WallJump,
                WallRunSet::FinalApplication,
            )
                .chain(),
        );

        app.add_plugins(B::plugin());

        app.add_systems(
            FixedUpdate,
            (
                (systems::tick_suppression, systems::sync_motor_velocity::<B>)
                    .in_set(WallRunSet::Preparation),
                systems::wall_run_update.in_set(WallRunSet::StateMachine),
                systems::camera_tilt.in_set(WallRunSet::CameraTilt),
                systems::apply_impulses.in_set(WallRunSet::Impulse),
                systems::wall_jump.in_set(WallRunSet::WallJump),
                systems::apply_motor_output::<B>.in_set(WallRunSet::FinalApplication),
            ),
        );

        app.add_systems(Update, systems::report_invalid_configs);
    }
}
