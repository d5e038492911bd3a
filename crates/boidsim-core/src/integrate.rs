use crate::boid::Boid;
use crate::config::FlockConfig;
use crate::constants::HEADING_EPSILON;
use glam::Vec2;

/// Advance one boid by one tick under `force`.
///
/// Deterministic given `(boid, force, dt, cfg)`. Speed is clamped into
/// `[min_speed / 2, max_speed]`; a boid at exactly zero velocity is pushed
/// along the `+X` reference direction rather than dividing by zero. The
/// arena boundary is a reflecting wall applied per axis: the coordinate is
/// clamped to the bound and that velocity component negated, so a corner
/// hit reflects both axes. Heading is re-derived from the new velocity only
/// above a small squared-speed threshold; below it the previous heading is
/// held so a near-stationary boid does not spin in place.
pub fn integrate(boid: &Boid, force: Vec2, dt: f32, cfg: &FlockConfig) -> Boid {
    let mut velocity = boid.velocity + force * dt;

    let speed_sq = velocity.length_squared();
    let max_sq = cfg.max_speed * cfg.max_speed;
    let floor = cfg.min_speed * 0.5;
    if speed_sq > max_sq {
        velocity = velocity / speed_sq.sqrt() * cfg.max_speed;
    } else if speed_sq < floor * floor {
        velocity = velocity.normalize_or(Vec2::X) * floor;
    }

    let mut position = boid.position + velocity * dt;
    if position.x > cfg.bounds_max.x {
        position.x = cfg.bounds_max.x;
        velocity.x = -velocity.x;
    }
    if position.x < cfg.bounds_min.x {
        position.x = cfg.bounds_min.x;
        velocity.x = -velocity.x;
    }
    if position.y > cfg.bounds_max.y {
        position.y = cfg.bounds_max.y;
        velocity.y = -velocity.y;
    }
    if position.y < cfg.bounds_min.y {
        position.y = cfg.bounds_min.y;
        velocity.y = -velocity.y;
    }

    let heading = if velocity.length_squared() > HEADING_EPSILON {
        velocity.normalize()
    } else {
        boid.heading
    };

    Boid {
        id: boid.id,
        position,
        velocity,
        heading,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> FlockConfig {
        FlockConfig {
            min_speed: 2.0,
            max_speed: 5.0,
            bounds_min: Vec2::new(-50.0, -50.0),
            bounds_max: Vec2::new(50.0, 50.0),
            ..FlockConfig::default()
        }
    }

    #[test]
    fn overspeed_is_rescaled_to_exactly_max_preserving_direction() {
        let boid = Boid::with_velocity(0, Vec2::ZERO, Vec2::new(30.0, 40.0));
        let next = integrate(&boid, Vec2::ZERO, 0.02, &cfg());
        assert!((next.speed() - cfg().max_speed).abs() < 1e-4);
        // Direction preserved: cross product with the old velocity vanishes.
        let cross = next.velocity.x * 40.0 - next.velocity.y * 30.0;
        assert!(cross.abs() < 1e-3);
        assert!(next.velocity.x > 0.0 && next.velocity.y > 0.0);
    }

    #[test]
    fn slow_boid_is_lifted_to_the_half_min_speed_floor() {
        let boid = Boid::with_velocity(0, Vec2::ZERO, Vec2::new(0.0, 0.1));
        let next = integrate(&boid, Vec2::ZERO, 0.02, &cfg());
        assert!((next.speed() - cfg().min_speed * 0.5).abs() < 1e-5);
        assert!(next.velocity.y > 0.0, "direction preserved while rescaling up");
    }

    #[test]
    fn zero_velocity_floors_along_reference_direction() {
        let boid = Boid::new(0, Vec2::ZERO);
        let next = integrate(&boid, Vec2::ZERO, 0.02, &cfg());
        assert_eq!(next.velocity, Vec2::X * cfg().min_speed * 0.5);
    }

    #[test]
    fn in_range_speed_is_untouched() {
        let velocity = Vec2::new(3.0, 0.0);
        let boid = Boid::with_velocity(0, Vec2::ZERO, velocity);
        let next = integrate(&boid, Vec2::ZERO, 0.02, &cfg());
        assert_eq!(next.velocity, velocity);
        assert!((next.position - Vec2::new(0.06, 0.0)).length() < 1e-6);
    }

    #[test]
    fn wall_hit_clamps_position_and_reflects_velocity() {
        let boid = Boid::with_velocity(0, Vec2::new(49.99, 0.0), Vec2::new(5.0, 0.0));
        let next = integrate(&boid, Vec2::ZERO, 0.1, &cfg());
        assert_eq!(next.position.x, 50.0);
        assert!(next.velocity.x < 0.0);
        assert_eq!(next.velocity.y, 0.0);
    }

    #[test]
    fn corner_hit_reflects_both_axes() {
        let boid = Boid::with_velocity(0, Vec2::new(-49.99, -49.99), Vec2::new(-4.0, -3.0));
        let next = integrate(&boid, Vec2::ZERO, 0.1, &cfg());
        assert_eq!(next.position, Vec2::new(-50.0, -50.0));
        assert!(next.velocity.x > 0.0);
        assert!(next.velocity.y > 0.0);
    }

    #[test]
    fn heading_follows_velocity_when_moving() {
        let boid = Boid::with_velocity(0, Vec2::ZERO, Vec2::new(0.0, 3.0));
        let next = integrate(&boid, Vec2::ZERO, 0.02, &cfg());
        assert!((next.heading - Vec2::Y).length() < 1e-6);
    }

    #[test]
    fn heading_is_held_below_the_spin_threshold() {
        // min_speed 0.1 puts the floor speed at 0.05, whose square is below
        // the heading threshold, so the old heading must survive.
        let cfg = FlockConfig {
            min_speed: 0.1,
            ..cfg()
        };
        let mut boid = Boid::new(0, Vec2::ZERO);
        boid.heading = Vec2::Y;
        let next = integrate(&boid, Vec2::ZERO, 0.02, &cfg);
        assert_eq!(next.heading, Vec2::Y);
    }

    #[test]
    fn integration_applies_force_before_clamping() {
        let boid = Boid::with_velocity(0, Vec2::ZERO, Vec2::new(3.0, 0.0));
        let next = integrate(&boid, Vec2::new(0.0, 10.0), 0.1, &cfg());
        assert!((next.velocity - Vec2::new(3.0, 1.0)).length() < 1e-5);
    }
}
