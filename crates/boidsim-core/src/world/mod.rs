use crate::boid::Boid;
use crate::config::{FlockConfig, FlockConfigError};
use crate::metrics::{collect_step_metrics, RunSummary, StepMetrics};
use crate::obstacle::ObstacleQuery;
use crate::spatial::NeighborIndex;
use glam::Vec2;
use std::collections::HashSet;
use std::time::Instant;
use std::{error::Error, fmt};

/// Per-phase wall-clock breakdown of one tick.
#[derive(Clone, Debug)]
pub struct StepTimings {
    pub spatial_build_us: u64,
    pub force_us: u64,
    pub integrate_us: u64,
    pub total_us: u64,
}

/// Per-boid scratch produced by the force phase and consumed by the
/// integrate phase within the same tick.
#[derive(Clone, Copy, Debug, Default)]
pub(in crate::world) struct ForceSample {
    pub force: Vec2,
    pub neighbors: u32,
}

/// The simulation orchestrator.
///
/// Owns the committed population snapshot plus a back buffer. Each tick
/// reads exclusively from the committed snapshot, computes every boid's
/// steering force and next state independently (in parallel), and commits
/// the tick with a single buffer swap — so results never depend on boid
/// iteration or thread scheduling order, and a partially computed tick is
/// never observable.
#[derive(Debug)]
pub struct Flock {
    pub boids: Vec<Boid>,
    config: FlockConfig,
    step_index: usize,
    neighbors_last_step: usize,
    force_samples: Vec<ForceSample>,
    back_buffer: Vec<Boid>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FlockInitError {
    Config(FlockConfigError),
    PopulationMismatch { expected: usize, actual: usize },
    DuplicateBoidId { id: u32 },
}

impl fmt::Display for FlockInitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlockInitError::Config(e) => write!(f, "{}", e),
            FlockInitError::PopulationMismatch { expected, actual } => write!(
                f,
                "boids.len() ({actual}) must match config.num_boids ({expected})"
            ),
            FlockInitError::DuplicateBoidId { id } => {
                write!(f, "boid id {id} appears more than once")
            }
        }
    }
}

impl From<FlockConfigError> for FlockInitError {
    fn from(err: FlockConfigError) -> Self {
        FlockInitError::Config(err)
    }
}

impl Error for FlockInitError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            FlockInitError::Config(e) => Some(e),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExperimentError {
    InvalidSampleEvery,
    TooManySteps { max: usize, actual: usize },
    TooManySamples { max: usize, actual: usize },
}

impl fmt::Display for ExperimentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExperimentError::InvalidSampleEvery => write!(f, "sample_every must be positive"),
            ExperimentError::TooManySteps { max, actual } => {
                write!(f, "steps ({actual}) exceed supported maximum ({max})")
            }
            ExperimentError::TooManySamples { max, actual } => {
                write!(
                    f,
                    "sample count ({actual}) exceeds supported maximum ({max})"
                )
            }
        }
    }
}

impl Error for ExperimentError {}

impl Flock {
    pub const MAX_EXPERIMENT_STEPS: usize = 1_000_000;
    pub const MAX_EXPERIMENT_SAMPLES: usize = 50_000;

    pub fn new(boids: Vec<Boid>, config: FlockConfig) -> Result<Self, FlockInitError> {
        config.validate()?;
        if boids.len() != config.num_boids {
            return Err(FlockInitError::PopulationMismatch {
                expected: config.num_boids,
                actual: boids.len(),
            });
        }
        let mut seen = HashSet::with_capacity(boids.len());
        for boid in &boids {
            if !seen.insert(boid.id) {
                return Err(FlockInitError::DuplicateBoidId { id: boid.id });
            }
        }

        let population = boids.len();
        Ok(Self {
            boids,
            config,
            step_index: 0,
            neighbors_last_step: 0,
            force_samples: Vec::with_capacity(population),
            back_buffer: Vec::with_capacity(population),
        })
    }

    pub fn config(&self) -> &FlockConfig {
        &self.config
    }

    /// Swap in a new configuration between ticks. The population size is
    /// fixed for the lifetime of a flock.
    pub fn set_config(&mut self, config: FlockConfig) -> Result<(), FlockInitError> {
        config.validate()?;
        if config.num_boids != self.boids.len() {
            return Err(FlockInitError::PopulationMismatch {
                expected: config.num_boids,
                actual: self.boids.len(),
            });
        }
        self.config = config;
        Ok(())
    }

    pub fn step_index(&self) -> usize {
        self.step_index
    }

    /// Total neighbor pairings perceived during the most recent tick.
    pub fn neighbors_last_step(&self) -> usize {
        self.neighbors_last_step
    }

    /// Advance the whole flock by one tick of `config.dt` seconds.
    pub fn step<Q: ObstacleQuery>(&mut self, query: &Q) -> StepTimings {
        let total_start = Instant::now();
        self.step_index = self.step_index.saturating_add(1);

        let t0 = Instant::now();
        let index = NeighborIndex::build(self.config.neighbor_index, &self.boids);
        let spatial_build_us = t0.elapsed().as_micros() as u64;

        let t1 = Instant::now();
        self.step_force_phase(&index, query);
        let force_us = t1.elapsed().as_micros() as u64;

        let t2 = Instant::now();
        self.step_integrate_phase();
        let integrate_us = t2.elapsed().as_micros() as u64;

        StepTimings {
            spatial_build_us,
            force_us,
            integrate_us,
            total_us: total_start.elapsed().as_micros() as u64,
        }
    }

    /// Flock statistics for the current committed state.
    pub fn step_metrics(&self) -> StepMetrics {
        let mean_neighbors = if self.boids.is_empty() {
            0.0
        } else {
            self.neighbors_last_step as f32 / self.boids.len() as f32
        };
        collect_step_metrics(self.step_index, &self.boids, mean_neighbors)
    }

    /// Run `steps` ticks against `query`, sampling metrics every
    /// `sample_every` ticks (plus the final tick).
    pub fn try_run_experiment<Q: ObstacleQuery>(
        &mut self,
        steps: usize,
        sample_every: usize,
        query: &Q,
    ) -> Result<RunSummary, ExperimentError> {
        if sample_every == 0 {
            return Err(ExperimentError::InvalidSampleEvery);
        }
        if steps > Self::MAX_EXPERIMENT_STEPS {
            return Err(ExperimentError::TooManySteps {
                max: Self::MAX_EXPERIMENT_STEPS,
                actual: steps,
            });
        }
        let estimated_samples = if steps == 0 {
            0
        } else {
            ((steps - 1) / sample_every) + 1
        };
        if estimated_samples > Self::MAX_EXPERIMENT_SAMPLES {
            return Err(ExperimentError::TooManySamples {
                max: Self::MAX_EXPERIMENT_SAMPLES,
                actual: estimated_samples,
            });
        }

        let mut samples = Vec::with_capacity(estimated_samples);
        for step in 1..=steps {
            self.step(query);
            if step % sample_every == 0 || step == steps {
                samples.push(self.step_metrics());
            }
        }
        Ok(RunSummary {
            schema_version: 1,
            steps,
            sample_every,
            samples,
        })
    }
}

mod phases;
#[cfg(test)]
mod tests;
