use super::*;
use crate::config::{NeighborIndexKind, ScanPolicy};
use crate::obstacle::OpenField;
use crate::spawn::spawn_flock;
use glam::Vec2;

fn make_config(num_boids: usize) -> FlockConfig {
    FlockConfig {
        num_boids,
        ..FlockConfig::default()
    }
}

fn make_flock(num_boids: usize) -> Flock {
    let config = make_config(num_boids);
    Flock::new(spawn_flock(&config), config).unwrap()
}

#[test]
fn speeds_stay_inside_the_clamp_band_over_many_ticks() {
    let mut flock = make_flock(64);
    for _ in 0..200 {
        flock.step(&OpenField);
    }
    let cfg = flock.config().clone();
    for boid in &flock.boids {
        let speed = boid.speed();
        assert!(
            speed >= cfg.min_speed * 0.5 - 1e-4,
            "boid {} below floor: {speed}",
            boid.id
        );
        assert!(
            speed <= cfg.max_speed + 1e-4,
            "boid {} above ceiling: {speed}",
            boid.id
        );
    }
}

#[test]
fn positions_stay_inside_the_arena() {
    let mut flock = make_flock(64);
    for _ in 0..200 {
        flock.step(&OpenField);
    }
    let cfg = flock.config().clone();
    for boid in &flock.boids {
        assert!(boid.position.x >= cfg.bounds_min.x && boid.position.x <= cfg.bounds_max.x);
        assert!(boid.position.y >= cfg.bounds_min.y && boid.position.y <= cfg.bounds_max.y);
    }
}

#[test]
fn headings_stay_unit_length() {
    let mut flock = make_flock(32);
    for _ in 0..50 {
        flock.step(&OpenField);
    }
    for boid in &flock.boids {
        assert!((boid.heading.length() - 1.0).abs() < 1e-4);
    }
}

#[test]
fn shuffled_population_produces_the_same_next_state() {
    let config = make_config(40);
    let boids = spawn_flock(&config);

    let mut shuffled = boids.clone();
    // Deterministic shuffle; ids travel with their boids.
    shuffled.reverse();
    shuffled.swap(3, 17);
    shuffled.swap(8, 31);

    let mut a = Flock::new(boids, config.clone()).unwrap();
    let mut b = Flock::new(shuffled, config).unwrap();
    a.step(&OpenField);
    b.step(&OpenField);

    let mut left = a.boids.clone();
    let mut right = b.boids.clone();
    left.sort_by_key(|boid| boid.id);
    right.sort_by_key(|boid| boid.id);
    for (x, y) in left.iter().zip(&right) {
        assert_eq!(x.id, y.id);
        // Summation order differs, so allow floating-point slack only.
        assert!(
            (x.position - y.position).length() < 1e-3,
            "boid {} diverged: {:?} vs {:?}",
            x.id,
            x.position,
            y.position
        );
        assert!((x.velocity - y.velocity).length() < 1e-3);
    }
}

#[test]
fn rtree_index_matches_exhaustive_stepping() {
    let exhaustive_cfg = make_config(48);
    let rtree_cfg = FlockConfig {
        neighbor_index: NeighborIndexKind::RTree,
        ..exhaustive_cfg.clone()
    };
    let boids = spawn_flock(&exhaustive_cfg);
    let mut a = Flock::new(boids.clone(), exhaustive_cfg).unwrap();
    let mut b = Flock::new(boids, rtree_cfg).unwrap();
    for _ in 0..10 {
        a.step(&OpenField);
        b.step(&OpenField);
    }
    for (x, y) in a.boids.iter().zip(&b.boids) {
        assert!((x.position - y.position).length() < 1e-2);
        assert!((x.velocity - y.velocity).length() < 1e-2);
    }
}

#[test]
fn isolated_boid_flies_straight() {
    let config = make_config(1);
    let boid = Boid::with_velocity(0, Vec2::ZERO, Vec2::new(3.0, 0.0));
    let mut flock = Flock::new(vec![boid], config.clone()).unwrap();
    flock.step(&OpenField);
    let next = flock.boids[0];
    // No neighbors and no obstacles: zero force, pure drift.
    assert!((next.velocity - Vec2::new(3.0, 0.0)).length() < 1e-6);
    assert!((next.position - Vec2::new(3.0 * config.dt, 0.0)).length() < 1e-6);
}

#[test]
fn crowded_pair_is_pushed_apart() {
    // Two boids 0.5 apart, inside avoidance radius 1.0, with identical
    // velocities: the separation force must grow their distance in one tick.
    let config = FlockConfig {
        num_boids: 2,
        avoidance_radius: 1.0,
        ..FlockConfig::default()
    };
    let v = Vec2::new(0.0, 3.0);
    let boids = vec![
        Boid::with_velocity(0, Vec2::new(-0.25, 0.0), v),
        Boid::with_velocity(1, Vec2::new(0.25, 0.0), v),
    ];
    let before = boids[0].position.distance(boids[1].position);
    let mut flock = Flock::new(boids, config).unwrap();
    flock.step(&OpenField);
    let after = flock.boids[0].position.distance(flock.boids[1].position);
    assert!(
        after > before,
        "separation failed to push the pair apart: {before} -> {after}"
    );
}

#[test]
fn blocked_boid_turns_toward_the_first_clear_fan_candidate() {
    let config = FlockConfig {
        num_boids: 1,
        scan_policy: ScanPolicy::FanScan,
        ..FlockConfig::default()
    };
    let boid = Boid::with_velocity(0, Vec2::ZERO, Vec2::new(3.0, 0.0));
    let mut flock = Flock::new(vec![boid], config).unwrap();

    // Forward, ±15° and ±35° blocked; +60° is the first clear candidate.
    let clear = crate::steering::rotated(Vec2::X, 60f32.to_radians());
    let query = move |_o: Vec2, d: Vec2, _m: f32| d.normalize_or_zero().dot(clear) < 0.9998;
    flock.step(&query);

    let next = flock.boids[0];
    // The avoidance force steers toward +60°, so velocity must have gained
    // a positive y component while keeping positive x.
    assert!(next.velocity.y > 0.0, "velocity: {:?}", next.velocity);
    assert!(next.velocity.x > 0.0);
}

#[test]
fn fully_walled_in_boid_brakes_hard() {
    let config = FlockConfig {
        num_boids: 1,
        ..FlockConfig::default()
    };
    let boid = Boid::with_velocity(0, Vec2::ZERO, Vec2::new(5.0, 0.0));
    let mut flock = Flock::new(vec![boid], config).unwrap();
    let walled = |_o: Vec2, _d: Vec2, _m: f32| true;
    flock.step(&walled);
    let next = flock.boids[0];
    assert!(
        next.velocity.x < 5.0,
        "reversal thrust must reduce forward speed"
    );
}

#[test]
fn new_rejects_population_mismatch() {
    let config = make_config(3);
    let boids = vec![Boid::new(0, Vec2::ZERO)];
    assert_eq!(
        Flock::new(boids, config).unwrap_err(),
        FlockInitError::PopulationMismatch {
            expected: 3,
            actual: 1
        }
    );
}

#[test]
fn new_rejects_duplicate_ids() {
    let config = make_config(2);
    let boids = vec![Boid::new(5, Vec2::ZERO), Boid::new(5, Vec2::new(1.0, 0.0))];
    assert_eq!(
        Flock::new(boids, config).unwrap_err(),
        FlockInitError::DuplicateBoidId { id: 5 }
    );
}

#[test]
fn new_rejects_invalid_config() {
    let config = FlockConfig {
        num_boids: 1,
        dt: 0.0,
        ..FlockConfig::default()
    };
    assert!(matches!(
        Flock::new(vec![Boid::new(0, Vec2::ZERO)], config).unwrap_err(),
        FlockInitError::Config(FlockConfigError::InvalidDt)
    ));
}

#[test]
fn set_config_keeps_population_fixed() {
    let mut flock = make_flock(8);
    let grown = FlockConfig {
        num_boids: 9,
        ..flock.config().clone()
    };
    assert!(matches!(
        flock.set_config(grown),
        Err(FlockInitError::PopulationMismatch { .. })
    ));
}

#[test]
fn step_respects_config_dt_for_position_update() {
    let mut config = make_config(1);
    config.dt = 0.5;
    let boid = Boid::with_velocity(0, Vec2::ZERO, Vec2::new(1.0, 0.0));
    let mut flock = Flock::new(vec![boid], config).unwrap();
    flock.step(&OpenField);
    assert!(
        (flock.boids[0].position.x - 0.5).abs() < 1e-6,
        "expected x to advance by dt-scaled velocity"
    );
}

#[test]
fn experiment_rejects_zero_sample_interval() {
    let mut flock = make_flock(4);
    assert_eq!(
        flock.try_run_experiment(10, 0, &OpenField).unwrap_err(),
        ExperimentError::InvalidSampleEvery
    );
}

#[test]
fn experiment_rejects_excessive_steps() {
    let mut flock = make_flock(4);
    assert!(matches!(
        flock
            .try_run_experiment(Flock::MAX_EXPERIMENT_STEPS + 1, 1, &OpenField)
            .unwrap_err(),
        ExperimentError::TooManySteps { .. }
    ));
}

#[test]
fn experiment_samples_at_the_requested_cadence() {
    let mut flock = make_flock(4);
    let summary = flock.try_run_experiment(10, 4, &OpenField).unwrap();
    // Steps 4, 8 and the final step 10.
    assert_eq!(summary.samples.len(), 3);
    assert_eq!(summary.samples.last().unwrap().step, 10);
    assert_eq!(flock.step_index(), 10);
}

#[test]
fn step_metrics_report_neighbor_density() {
    let config = FlockConfig {
        num_boids: 2,
        perception_radius: 5.0,
        ..FlockConfig::default()
    };
    let v = Vec2::new(0.0, 3.0);
    let boids = vec![
        Boid::with_velocity(0, Vec2::new(-1.0, 0.0), v),
        Boid::with_velocity(1, Vec2::new(1.0, 0.0), v),
    ];
    let mut flock = Flock::new(boids, config).unwrap();
    flock.step(&OpenField);
    assert_eq!(flock.neighbors_last_step(), 2);
    let metrics = flock.step_metrics();
    assert!((metrics.mean_neighbor_count - 1.0).abs() < 1e-6);
    assert!(metrics.polarization > 0.9);
}

#[test]
fn timings_are_populated() {
    let mut flock = make_flock(16);
    let timings = flock.step(&OpenField);
    assert!(timings.total_us >= timings.force_us);
}
