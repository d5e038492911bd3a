use crate::boid::Boid;
use crate::config::FlockConfig;
use crate::constants::REVERSAL_FACTOR;
use crate::obstacle::Avoidance;
use crate::perception::Perception;
use crate::steering::steer_towards;
use glam::Vec2;

/// Blend alignment, cohesion, separation and obstacle avoidance into one
/// steering force.
///
/// With zero neighbors the flocking terms are skipped outright rather than
/// zero-forced, so an isolated boid feels no pull toward the origin.
/// Alignment and cohesion are unit-direction thrusts scaled only by their
/// weights. Separation is the accumulated push applied raw (length-clamped
/// to `max_steer_force`): its magnitude grows with crowding, which is what
/// lets it overpower cohesion at close range instead of cancelling against
/// it. Obstacle avoidance is additive, except when the scan found no clear
/// heading at all: then there is nothing to steer toward and the boid gets
/// a strong reverse thrust instead.
pub fn compute_steering(
    boid: &Boid,
    perception: &Perception,
    avoidance: &Avoidance,
    cfg: &FlockConfig,
) -> Vec2 {
    let mut force = Vec2::ZERO;

    if perception.neighbor_count > 0 {
        let inv_count = 1.0 / perception.neighbor_count as f32;
        let avg_heading = perception.heading_sum * inv_count;
        let to_center = perception.position_sum * inv_count - boid.position;

        force += avg_heading.normalize_or_zero() * cfg.alignment_weight;
        force += to_center.normalize_or_zero() * cfg.cohesion_weight;
        force += perception
            .separation_sum
            .clamp_length_max(cfg.max_steer_force)
            * cfg.separation_weight;
    }

    if avoidance.blocked {
        force += match avoidance.clear_heading {
            Some(direction) => steer_towards(direction, boid.velocity, cfg) * cfg.obstacle_weight,
            None => -boid.velocity * cfg.obstacle_weight * REVERSAL_FACTOR,
        };
    }

    force
}
