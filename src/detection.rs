//! Wall detection.
//!
//! Two lateral line probes (left and right of the character's facing) are
//! cast every tick. Raw hits are stored in [`WallContacts`]; a hit only
//! becomes a run-able wall once it passes [`is_valid_wall_vector`] and the
//! character is airborne.

use bevy::prelude::*;

use crate::config::SensorConfig;

/// Physics line-query service.
///
/// Backends implement this over their spatial query API. Any
/// `Fn(Vec3, Vec3) -> Option<Vec3>` closure is a `LineQuery` too.
pub trait LineQuery {
    /// Cast a line from `from` to `to` and return the surface normal of the
    /// first hit, if any.
    fn linecast(&self, from: Vec3, to: Vec3) -> Option<Vec3>;
}

impl<F> LineQuery for F
where
    F: Fn(Vec3, Vec3) -> Option<Vec3>,
{
    fn linecast(&self, from: Vec3, to: Vec3) -> Option<Vec3> {
        self(from, to)
    }
}

/// Whether a surface normal belongs to a roughly vertical wall.
///
/// Strict on both ends: a normal whose `y` equals `±max_normal_y` is not a wall.
#[inline]
pub fn is_valid_wall_vector(normal: Vec3, max_normal_y: f32) -> bool {
    normal.y < max_normal_y && normal.y > -max_normal_y
}

/// Raw results of the left/right wall probes for one tick.
#[derive(Component, Reflect, Debug, Clone, Copy, Default, PartialEq)]
#[reflect(Component)]
pub struct WallContacts {
    /// Hit normal of the left probe, if it hit anything.
    pub left: Option<Vec3>,
    /// Hit normal of the right probe, if it hit anything.
    pub right: Option<Vec3>,
}

impl WallContacts {
    /// Probe results with nothing hit.
    pub fn none() -> Self {
        Self::default()
    }

    /// Clear both probes (called before casting each tick).
    pub fn reset(&mut self) {
        self.left = None;
        self.right = None;
    }

    /// Classify the raw hits into run-able walls.
    pub fn classify(&self, grounded: bool, max_normal_y: f32) -> WallDetection {
        if grounded {
            return WallDetection::default();
        }
        let valid = |normal: Option<Vec3>| {
            normal.filter(|&n| is_valid_wall_vector(n, max_normal_y))
        };
        WallDetection {
            left: valid(self.left),
            right: valid(self.right),
        }
    }
}

/// Run-able walls found this tick (`Some` holds the wall normal).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WallDetection {
    /// Valid wall on the left.
    pub left: Option<Vec3>,
    /// Valid wall on the right.
    pub right: Option<Vec3>,
}

impl WallDetection {
    /// Whether either side found a wall.
    pub fn any(&self) -> bool {
        self.left.is_some() || self.right.is_some()
    }
}

/// Cast both lateral probes from `position`.
///
/// `right` is the character's unit right vector; the probes end at
/// `position ± right * wall_probe_length`.
pub fn probe_walls(
    query: &impl LineQuery,
    position: Vec3,
    right: Vec3,
    config: &SensorConfig,
) -> WallContacts {
    let reach = right * config.wall_probe_length;
    WallContacts {
        right: query.linecast(position, position + reach),
        left: query.linecast(position, position - reach),
    }
}

/// Probe and classify in one step.
pub fn detect_walls(
    query: &impl LineQuery,
    position: Vec3,
    right: Vec3,
    grounded: bool,
    config: &SensorConfig,
) -> WallDetection {
    probe_walls(query, position, right, config).classify(grounded, config.max_wall_normal_y)
}
