use super::super::{Flock, ForceSample};
use crate::forces::compute_steering;
use crate::obstacle::{scan_for_clear_heading, ObstacleQuery};
use crate::perception::perceive;
use crate::spatial::NeighborIndex;
use rayon::prelude::*;

impl Flock {
    /// Compute every boid's steering force from the committed snapshot.
    ///
    /// Embarrassingly data-parallel: each boid reads only the immutable
    /// snapshot, the tick-local neighbor index, and the obstacle query, and
    /// writes its own slot of the sample buffer.
    pub(in crate::world) fn step_force_phase<Q: ObstacleQuery>(
        &mut self,
        index: &NeighborIndex,
        query: &Q,
    ) {
        let boids = &self.boids;
        let config = &self.config;
        let samples = &mut self.force_samples;

        boids
            .par_iter()
            .enumerate()
            .map(|(i, boid)| {
                let perception = perceive(i, boids, config, index);
                let avoidance =
                    scan_for_clear_heading(boid.position, boid.heading, config, query);
                ForceSample {
                    force: compute_steering(boid, &perception, &avoidance, config),
                    neighbors: perception.neighbor_count as u32,
                }
            })
            .collect_into_vec(samples);

        self.neighbors_last_step = samples.iter().map(|s| s.neighbors as usize).sum();
    }
}
