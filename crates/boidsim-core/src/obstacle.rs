use crate::config::{FlockConfig, ScanPolicy};
use crate::constants::VEC_EPSILON;
use crate::steering::rotated;
use glam::Vec2;
use std::f32::consts::TAU;

/// Ray-test capability supplied by the host environment.
///
/// The core never constructs its own raycaster; it only asks whether the
/// segment from `origin` along the unit-length `direction` up to
/// `max_distance` hits an obstacle. Every probe the core issues is a unit
/// vector (a committed heading or a rotation of one), so implementations
/// may use `direction` as a projection axis directly. They must be
/// side-effect-free and cheap — the scan may probe many times per boid per
/// tick — and are queried concurrently from worker threads. A host whose
/// underlying spatial index can fail must resolve that before adapting it to
/// this trait; an undetected obstacle is a correctness bug, not a tunable.
pub trait ObstacleQuery: Sync {
    fn blocked(&self, origin: Vec2, direction: Vec2, max_distance: f32) -> bool;
}

impl<F> ObstacleQuery for F
where
    F: Fn(Vec2, Vec2, f32) -> bool + Sync,
{
    fn blocked(&self, origin: Vec2, direction: Vec2, max_distance: f32) -> bool {
        self(origin, direction, max_distance)
    }
}

/// Obstacle-free field; every probe reports a clear path.
pub struct OpenField;

impl ObstacleQuery for OpenField {
    fn blocked(&self, _origin: Vec2, _direction: Vec2, _max_distance: f32) -> bool {
        false
    }
}

/// Outcome of the per-boid obstacle scan.
///
/// `clear_heading` is `Some` when the forward probe hit but a candidate
/// heading was clear, `None` either because nothing was blocked or because
/// every candidate was blocked too — `blocked` disambiguates the two.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Avoidance {
    pub blocked: bool,
    pub clear_heading: Option<Vec2>,
}

impl Avoidance {
    pub const CLEAR: Self = Self {
        blocked: false,
        clear_heading: None,
    };
}

/// Fan-scan deviations in degrees, smallest first. Ordering is the policy:
/// an existing exit is taken with minimal path deviation, and escalation to
/// the ±90° flanks happens only when the narrow candidates are all blocked.
const FAN_ANGLES_DEG: [f32; 8] = [15.0, -15.0, 35.0, -35.0, 60.0, -60.0, 90.0, -90.0];

/// Number of candidates probed by the golden-angle policy.
const GOLDEN_ANGLE_SAMPLES: u32 = 32;

/// Probe the forward path and, if blocked, scan candidate headings for an
/// exit according to the configured policy.
///
/// A zero heading (a boid that has never moved) probes along the `+X`
/// reference direction rather than degenerating into a zero-length ray.
pub fn scan_for_clear_heading(
    position: Vec2,
    heading: Vec2,
    cfg: &FlockConfig,
    query: &impl ObstacleQuery,
) -> Avoidance {
    let forward = if heading.length_squared() <= VEC_EPSILON {
        Vec2::X
    } else {
        heading
    };

    if !query.blocked(position, forward, cfg.obstacle_view_distance) {
        return Avoidance::CLEAR;
    }

    let clear_heading = match cfg.scan_policy {
        ScanPolicy::FanScan => first_clear(
            FAN_ANGLES_DEG.iter().map(|deg| deg.to_radians()),
            position,
            forward,
            cfg,
            query,
        ),
        ScanPolicy::GoldenAngle => {
            // Step around the circle by the golden angle; successive samples
            // land far from each other, covering all sectors early.
            let golden_angle = TAU * (1.0 - 1.0 / 1.618_034);
            first_clear(
                (1..=GOLDEN_ANGLE_SAMPLES).map(|i| (i as f32 * golden_angle) % TAU),
                position,
                forward,
                cfg,
                query,
            )
        }
    };

    Avoidance {
        blocked: true,
        clear_heading,
    }
}

fn first_clear(
    angles: impl Iterator<Item = f32>,
    position: Vec2,
    forward: Vec2,
    cfg: &FlockConfig,
    query: &impl ObstacleQuery,
) -> Option<Vec2> {
    for angle in angles {
        let candidate = rotated(forward, angle);
        if !query.blocked(position, candidate, cfg.obstacle_view_distance) {
            return Some(candidate);
        }
    }
    None
}
