//! Wall-run state machine and wall jump.
//!
//! Each tick the runner consumes the classified probe results and either
//! enters, maintains or leaves a run. While running it keeps feeding the
//! impulse accumulator with a stick-to-wall force and an along-wall force,
//! and requests reduced gravity from the motor.
//!
//! # States
//!
//! ```text
//! Inactive ──► Right ──► Inactive
//! Inactive ──► Left  ──► Inactive
//! ```
//!
//! There is no direct Right/Left swap: leaving a side always passes through
//! [`WallRunner::end_run`] so gravity and the jump gate are reset.
//!
//! # Suppression
//!
//! After a run ends the runner can be suppressed for a while (a wall jump
//! uses this to avoid re-gripping the wall it just left). Suppression is a
//! countdown of simulated seconds; overlapping requests keep the longer
//! remaining window.

use bevy::prelude::*;

use crate::config::WallRunConfig;
use crate::detection::WallDetection;
use crate::impulse::ImpulseAccumulator;
use crate::motor::CharacterMotor;

/// Seconds a run must last before a wall jump is armed.
pub const WALL_JUMP_ARM_TIME: f32 = 0.05;

/// Which wall the character is running on.
#[derive(Reflect, Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum WallRunSide {
    /// Not wall-running.
    #[default]
    Inactive,
    /// Running with a wall on the left.
    Left,
    /// Running with a wall on the right.
    Right,
}

impl WallRunSide {
    /// Whether this is a running side.
    pub fn is_running(self) -> bool {
        self != Self::Inactive
    }

    /// Sign applied to the along-wall force.
    ///
    /// `cross(normal, up)` points backward for a right wall in a
    /// right-handed, `-Z`-forward frame, so right flips it.
    pub fn along_wall_sign(self) -> f32 {
        match self {
            Self::Right => 1.0,
            Self::Left => -1.0,
            Self::Inactive => 0.0,
        }
    }
}

/// What changed during a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WallRunTransition {
    /// A run started on `side`.
    Started {
        /// The new side.
        side: WallRunSide,
    },
    /// The run on `side` ended.
    Ended {
        /// The side that was left.
        side: WallRunSide,
        /// Suppression requested by the exit (seconds).
        suppression: f32,
    },
}

/// Wall-run state of one character.
#[derive(Component, Reflect, Debug, Clone, PartialEq)]
#[reflect(Component)]
pub struct WallRunner {
    side: WallRunSide,
    wall_normal: Vec3,
    suppression: f32,
    time_till_wall_jump: f32,
}

impl Default for WallRunner {
    fn default() -> Self {
        Self {
            side: WallRunSide::Inactive,
            wall_normal: Vec3::ZERO,
            suppression: 0.0,
            time_till_wall_jump: WALL_JUMP_ARM_TIME,
        }
    }
}

impl WallRunner {
    /// Create an inactive runner.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current side.
    pub fn side(&self) -> WallRunSide {
        self.side
    }

    /// Whether the character is running on a wall.
    pub fn is_running(&self) -> bool {
        self.side.is_running()
    }

    /// Normal of the gripped wall. `None` while inactive.
    pub fn wall_normal(&self) -> Option<Vec3> {
        self.is_running().then_some(self.wall_normal)
    }

    /// Whether wall detection is currently suppressed.
    pub fn is_suppressed(&self) -> bool {
        self.suppression > 0.0
    }

    /// Seconds of suppression left (zero when not suppressed).
    pub fn suppression_remaining(&self) -> f32 {
        self.suppression
    }

    /// Seconds of running left before a wall jump is armed.
    pub fn time_till_wall_jump(&self) -> f32 {
        self.time_till_wall_jump
    }

    /// Whether a wall jump would trigger on jump input this tick.
    pub fn wall_jump_armed(&self) -> bool {
        self.is_running() && self.time_till_wall_jump <= 0.0
    }

    /// Count suppression down by `dt`. Called once per tick before anything else.
    pub fn tick_suppression(&mut self, dt: f32) {
        self.suppression = (self.suppression - dt).max(0.0);
    }

    /// Run one tick of the state machine.
    ///
    /// Does nothing while suppressed. Right walls take priority over left.
    pub fn update(
        &mut self,
        walls: WallDetection,
        motor: &mut CharacterMotor,
        impulse: &mut ImpulseAccumulator,
        config: &WallRunConfig,
        dt: f32,
    ) -> Option<WallRunTransition> {
        if self.is_suppressed() {
            return None;
        }

        let (side, normal) = match (walls.right, walls.left) {
            (Some(normal), _) => (WallRunSide::Right, normal),
            (None, Some(normal)) => (WallRunSide::Left, normal),
            (None, None) => return self.end_run(0.0, motor),
        };

        if self.is_running() && self.side != side {
            return self.end_run(0.0, motor);
        }

        let started = !self.is_running();
        self.side = side;
        self.wall_normal = normal;

        let mass = config.impulse.mass;
        impulse.add_impact(-normal, config.wall_running.stick_force, mass);
        impulse.add_impact(
            normal.cross(Vec3::Y),
            config.wall_running.speed * side.along_wall_sign(),
            mass,
        );

        if motor.vertical_velocity <= 0.0 {
            motor.request_gravity_override(config.wall_running.target_gravity);
        }
        if self.time_till_wall_jump > 0.0 {
            self.time_till_wall_jump -= dt;
        }

        started.then(|| {
            debug!("wall run started on {:?} wall, normal {}", side, normal);
            WallRunTransition::Started { side }
        })
    }

    /// Leave the current run and suppress detection for `reset_time` seconds.
    ///
    /// No-op when not running. Overlapping suppressions keep the longer window.
    pub fn end_run(
        &mut self,
        reset_time: f32,
        motor: &mut CharacterMotor,
    ) -> Option<WallRunTransition> {
        if !self.is_running() {
            return None;
        }

        let side = self.side;
        self.side = WallRunSide::Inactive;
        motor.clear_gravity_override();
        self.suppression = self.suppression.max(reset_time);
        self.time_till_wall_jump = WALL_JUMP_ARM_TIME;

        debug!("wall run on {:?} wall ended, suppressed for {}s", side, reset_time);
        Some(WallRunTransition::Ended {
            side,
            suppression: reset_time,
        })
    }

    /// Jump off the wall if jump is pressed and the jump gate is armed.
    ///
    /// Returns the launch direction when a jump happened. Without a run in
    /// progress this is a no-op; the press is not buffered.
    pub fn wall_jump(
        &mut self,
        jump_pressed: bool,
        forward: Vec3,
        motor: &mut CharacterMotor,
        impulse: &mut ImpulseAccumulator,
        config: &WallRunConfig,
    ) -> Option<Vec3> {
        if !jump_pressed || self.time_till_wall_jump > 0.0 || !self.is_running() {
            return None;
        }

        let jumping = &config.wall_jumping;
        self.end_run(jumping.cooldown, motor);

        let normal = self.wall_normal;
        let direction = Vec3::new(
            normal.x * jumping.outward_scale,
            jumping.height,
            normal.z * jumping.outward_scale,
        ) + forward;
        impulse.add_impact(direction, jumping.off_force, config.impulse.mass);

        debug!("wall jump launched along {}", direction);
        Some(direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn right_wall() -> WallDetection {
        WallDetection {
            left: None,
            right: Some(Vec3::NEG_X),
        }
    }

    fn left_wall() -> WallDetection {
        WallDetection {
            left: Some(Vec3::X),
            right: None,
        }
    }

    struct Rig {
        runner: WallRunner,
        motor: CharacterMotor,
        impulse: ImpulseAccumulator,
        config: WallRunConfig,
    }

    impl Rig {
        fn new() -> Self {
            Self {
                runner: WallRunner::new(),
                motor: CharacterMotor::new(-15.0),
                impulse: ImpulseAccumulator::new(),
                config: WallRunConfig::default(),
            }
        }

        fn step(&mut self, walls: WallDetection) -> Option<WallRunTransition> {
            self.runner.tick_suppression(DT);
            self.runner
                .update(walls, &mut self.motor, &mut self.impulse, &self.config, DT)
        }

        fn end(&mut self, reset_time: f32) -> Option<WallRunTransition> {
            self.runner.end_run(reset_time, &mut self.motor)
        }

        fn jump(&mut self, pressed: bool) -> Option<Vec3> {
            self.runner.wall_jump(
                pressed,
                Vec3::NEG_Z,
                &mut self.motor,
                &mut self.impulse,
                &self.config,
            )
        }
    }

    #[test]
    fn runner_default_is_inactive() {
        let runner = WallRunner::new();
        assert_eq!(runner.side(), WallRunSide::Inactive);
        assert_eq!(runner.wall_normal(), None);
        assert!(!runner.is_suppressed());
        assert_eq!(runner.time_till_wall_jump(), WALL_JUMP_ARM_TIME);
    }

    #[test]
    fn enters_right_run() {
        let mut rig = Rig::new();
        let transition = rig.step(right_wall());

        assert_eq!(
            transition,
            Some(WallRunTransition::Started {
                side: WallRunSide::Right
            })
        );
        assert_eq!(rig.runner.side(), WallRunSide::Right);
        assert_eq!(rig.runner.wall_normal(), Some(Vec3::NEG_X));
        assert_eq!(rig.motor.gravity(), -4.0);
    }

    #[test]
    fn maintaining_a_run_reports_no_transition() {
        let mut rig = Rig::new();
        rig.step(right_wall());
        assert_eq!(rig.step(right_wall()), None);
        assert!(rig.runner.is_running());
    }

    #[test]
    fn right_wins_when_both_sides_hit() {
        let mut rig = Rig::new();
        let both = WallDetection {
            left: Some(Vec3::X),
            right: Some(Vec3::NEG_X),
        };
        rig.step(both);
        assert_eq!(rig.runner.side(), WallRunSide::Right);
        assert_eq!(rig.runner.wall_normal(), Some(Vec3::NEG_X));
    }

    #[test]
    fn side_swap_passes_through_inactive() {
        let mut rig = Rig::new();
        rig.step(right_wall());

        let transition = rig.step(left_wall());
        assert!(matches!(
            transition,
            Some(WallRunTransition::Ended {
                side: WallRunSide::Right,
                ..
            })
        ));
        assert_eq!(rig.runner.side(), WallRunSide::Inactive);
        assert_eq!(rig.motor.gravity_override(), None);

        rig.step(left_wall());
        assert_eq!(rig.runner.side(), WallRunSide::Left);
    }

    #[test]
    fn losing_the_wall_ends_without_suppression() {
        let mut rig = Rig::new();
        rig.step(right_wall());

        let transition = rig.step(WallDetection::default());
        assert_eq!(
            transition,
            Some(WallRunTransition::Ended {
                side: WallRunSide::Right,
                suppression: 0.0
            })
        );
        assert!(!rig.runner.is_suppressed());
        assert_eq!(rig.motor.gravity(), -15.0);

        // Re-entry is immediate
        rig.step(right_wall());
        assert!(rig.runner.is_running());
    }

    #[test]
    fn stick_and_along_forces_every_tick() {
        let mut rig = Rig::new();
        rig.step(right_wall());

        // Stick: +X * 1/25; along: cross(-X, Y) = -Z, times +5/25.
        let expected = Vec3::new(1.0 / 25.0, 0.0, -5.0 / 25.0);
        assert!((rig.impulse.impact - expected).length() < 1e-6);

        rig.step(right_wall());
        assert!((rig.impulse.impact - expected * 2.0).length() < 1e-6);
    }

    #[test]
    fn left_run_also_heads_forward() {
        let mut rig = Rig::new();
        rig.step(left_wall());

        // Left wall normal +X: cross(X, Y) = Z, times -5/25 runs toward -Z.
        assert!(rig.impulse.impact.z < 0.0);
        assert!(rig.impulse.impact.x < 0.0, "stick force pushes into the wall");
    }

    #[test]
    fn rising_character_keeps_default_gravity() {
        let mut rig = Rig::new();
        rig.motor.vertical_velocity = 3.0;
        rig.step(right_wall());

        assert!(rig.runner.is_running());
        assert_eq!(rig.motor.gravity_override(), None);

        rig.motor.vertical_velocity = -0.5;
        rig.step(right_wall());
        assert_eq!(rig.motor.gravity(), -4.0);
    }

    #[test]
    fn jump_gate_counts_down_while_running() {
        let mut rig = Rig::new();
        rig.step(right_wall());
        assert!((rig.runner.time_till_wall_jump() - (WALL_JUMP_ARM_TIME - DT)).abs() < 1e-6);

        for _ in 0..3 {
            rig.step(right_wall());
        }
        assert!(rig.runner.time_till_wall_jump() <= 0.0);
        assert!(rig.runner.wall_jump_armed());
    }

    #[test]
    fn end_run_is_idempotent() {
        let mut rig = Rig::new();
        for _ in 0..10 {
            rig.step(right_wall());
        }

        assert!(rig.end(0.35).is_some());
        let after_first = (rig.runner.clone(), rig.motor.clone());

        assert_eq!(rig.end(0.35), None);
        assert_eq!(rig.runner, after_first.0);
        assert_eq!(rig.motor, after_first.1);
        assert_eq!(rig.runner.time_till_wall_jump(), WALL_JUMP_ARM_TIME);
    }

    #[test]
    fn suppression_blocks_detection_until_deadline() {
        let mut rig = Rig::new();
        rig.step(right_wall());
        rig.end(0.1);

        assert!(rig.runner.is_suppressed());
        assert_eq!(rig.step(right_wall()), None);
        assert!(!rig.runner.is_running());

        for _ in 0..10 {
            rig.step(right_wall());
        }
        assert!(!rig.runner.is_suppressed());
        assert!(rig.runner.is_running());
    }

    #[test]
    fn overlapping_suppression_keeps_later_deadline() {
        let mut rig = Rig::new();
        rig.step(right_wall());
        rig.end(0.5);

        // Start a fresh run by hand, then exit it with a shorter window.
        rig.runner.suppression = 0.0;
        rig.step(right_wall());
        rig.runner.suppression = 0.5;
        rig.end(0.1);

        assert!((rig.runner.suppression_remaining() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn suppression_expires_after_long_uptime() {
        const TICK: f32 = 1.0 / 64.0;
        let mut rig = Rig::new();

        // About 80 hours of simulated time.
        for _ in 0..(80 * 3600 / 64) {
            rig.runner.tick_suppression(64.0);
        }
        for _ in 0..64 {
            rig.runner.tick_suppression(TICK);
        }

        rig.step(right_wall());
        rig.end(0.35);
        assert!(rig.runner.is_suppressed());

        for _ in 0..23 {
            rig.runner.tick_suppression(TICK);
        }
        assert!(!rig.runner.is_suppressed());
        assert_eq!(rig.runner.suppression_remaining(), 0.0);
    }

    #[test]
    fn wall_jump_requires_armed_gate() {
        let mut rig = Rig::new();
        rig.step(right_wall());
        assert_eq!(rig.jump(true), None);
        assert!(rig.runner.is_running());
    }

    #[test]
    fn wall_jump_requires_input() {
        let mut rig = Rig::new();
        for _ in 0..10 {
            rig.step(right_wall());
        }
        assert_eq!(rig.jump(false), None);
        assert!(rig.runner.is_running());
    }

    #[test]
    fn wall_jump_without_run_is_noop() {
        let mut rig = Rig::new();
        rig.runner.time_till_wall_jump = 0.0;
        assert_eq!(rig.jump(true), None);
        assert!(!rig.impulse.is_active());
    }

    #[test]
    fn wall_jump_launches_up_and_out() {
        let mut rig = Rig::new();
        for _ in 0..10 {
            rig.step(right_wall());
        }
        let before = rig.impulse.impact;

        let direction = rig.jump(true).expect("armed run should jump");

        assert_eq!(direction, Vec3::new(-1.5, 1.5, -1.0));
        assert_eq!(rig.runner.side(), WallRunSide::Inactive);
        assert!((rig.runner.suppression_remaining() - 0.35).abs() < 1e-5);
        assert_eq!(rig.motor.gravity_override(), None);

        let launch = rig.impulse.impact - before;
        let expected = direction.normalize() * 300.0 / 25.0;
        assert!((launch - expected).length() < 1e-4);
        assert!(launch.y > 0.0);
        assert!(launch.x < 0.0, "launch pushes away from a +X wall");
    }
}
