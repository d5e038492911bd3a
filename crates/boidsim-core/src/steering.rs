use crate::config::FlockConfig;
use crate::constants::VEC_EPSILON;
use glam::Vec2;

/// The single steering primitive shared by every behavior.
///
/// Produces the force that would turn `velocity` toward travelling at
/// `max_speed` along `target`, magnitude-clamped to `max_steer_force` so no
/// behavior can change velocity unboundedly in one tick. A zero-length
/// target is an expected steady-state condition (e.g. an isolated boid) and
/// contributes nothing.
pub fn steer_towards(target: Vec2, velocity: Vec2, cfg: &FlockConfig) -> Vec2 {
    if target.length_squared() <= VEC_EPSILON {
        return Vec2::ZERO;
    }
    (target.normalize() * cfg.max_speed - velocity).clamp_length_max(cfg.max_steer_force)
}

/// Rotate `direction` counter-clockwise by `angle` radians.
pub fn rotated(direction: Vec2, angle: f32) -> Vec2 {
    Vec2::from_angle(angle).rotate(direction)
}
