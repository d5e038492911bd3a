use crate::boid::Boid;
use crate::config::{FlockConfig, SeparationModel};
use crate::constants::VEC_EPSILON;
use crate::spatial::NeighborIndex;
use glam::Vec2;

/// Per-boid, per-tick accumulator over perceived neighbors.
///
/// Created fresh for every boid every tick and discarded after the force
/// blend; nothing here survives across ticks.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Perception {
    pub neighbor_count: usize,
    pub heading_sum: Vec2,
    pub position_sum: Vec2,
    pub separation_sum: Vec2,
}

/// Scan the population around `boids[self_idx]` and accumulate neighbor
/// headings, positions, and the separation push from boids inside the
/// avoidance radius.
///
/// Squared distances throughout; the square root is only taken for the
/// linear-ramp separation model, which needs the true distance.
pub fn perceive(
    self_idx: usize,
    boids: &[Boid],
    cfg: &FlockConfig,
    index: &NeighborIndex,
) -> Perception {
    let me = &boids[self_idx];
    let perception_sq = cfg.perception_radius * cfg.perception_radius;
    let avoidance_sq = cfg.avoidance_radius * cfg.avoidance_radius;
    let mut acc = Perception::default();

    index.for_each_candidate(me.position, cfg.perception_radius, |other_idx| {
        if other_idx == self_idx {
            return;
        }
        let other = &boids[other_idx];
        let dist_sq = me.position.distance_squared(other.position);
        if dist_sq >= perception_sq {
            return;
        }

        acc.neighbor_count += 1;
        acc.heading_sum += other.heading;
        acc.position_sum += other.position;

        if dist_sq < avoidance_sq {
            let away = me.position - other.position;
            acc.separation_sum += match cfg.separation_model {
                SeparationModel::InverseSquare => away / dist_sq.max(VEC_EPSILON),
                SeparationModel::LinearRamp => {
                    away * ((cfg.avoidance_radius - dist_sq.sqrt()) / cfg.avoidance_radius)
                }
            };
        }
    });

    acc
}
