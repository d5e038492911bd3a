use crate::boid::Boid;
use serde::{Deserialize, Serialize};

/// Aggregate flock statistics sampled at a single step.
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StepMetrics {
    pub step: usize,
    pub mean_speed: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    /// Magnitude of the mean normalized velocity: 1.0 when the whole flock
    /// travels in lockstep, near 0.0 for incoherent motion.
    pub polarization: f32,
    pub mean_neighbor_count: f32,
}

fn default_schema_version() -> u32 {
    1
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunSummary {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub steps: usize,
    pub sample_every: usize,
    pub samples: Vec<StepMetrics>,
}

pub fn collect_step_metrics(step: usize, boids: &[Boid], mean_neighbor_count: f32) -> StepMetrics {
    if boids.is_empty() {
        return StepMetrics {
            step,
            ..StepMetrics::default()
        };
    }

    let mut speed_sum = 0.0f32;
    let mut min_speed = f32::INFINITY;
    let mut max_speed = 0.0f32;
    let mut direction_sum = glam::Vec2::ZERO;

    for boid in boids {
        let speed = boid.speed();
        speed_sum += speed;
        min_speed = min_speed.min(speed);
        max_speed = max_speed.max(speed);
        direction_sum += boid.velocity.normalize_or_zero();
    }

    let n = boids.len() as f32;
    StepMetrics {
        step,
        mean_speed: speed_sum / n,
        min_speed,
        max_speed,
        polarization: direction_sum.length() / n,
        mean_neighbor_count,
    }
}
