use crate::boid::Boid;
use crate::config::FlockConfig;
use crate::rng::create_rng;
use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

/// Place `cfg.num_boids` boids uniformly inside the arena, each facing a
/// random direction at the midpoint of the speed band. Deterministic for a
/// given seed.
pub fn spawn_flock(cfg: &FlockConfig) -> Vec<Boid> {
    let mut rng = create_rng(cfg.seed);
    let extent = cfg.bounds_max - cfg.bounds_min;
    let start_speed = (cfg.min_speed + cfg.max_speed) * 0.5;

    (0..cfg.num_boids)
        .map(|i| {
            let position = cfg.bounds_min
                + Vec2::new(
                    rng.random::<f32>() * extent.x,
                    rng.random::<f32>() * extent.y,
                );
            let heading = Vec2::from_angle(rng.random::<f32>() * TAU);
            Boid::with_velocity(i as u32, position, heading * start_speed)
        })
        .collect()
}
