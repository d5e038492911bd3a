use super::super::Flock;
use crate::integrate::integrate;
use rayon::prelude::*;
use std::mem;

impl Flock {
    /// Integrate every boid into the back buffer, then commit the tick with
    /// a single swap. Readers of `boids` never observe a partial tick.
    pub(in crate::world) fn step_integrate_phase(&mut self) {
        let boids = &self.boids;
        let config = &self.config;
        let samples = &self.force_samples;
        let back = &mut self.back_buffer;

        boids
            .par_iter()
            .zip(samples.par_iter())
            .map(|(boid, sample)| integrate(boid, sample.force, config.dt, config))
            .collect_into_vec(back);

        mem::swap(&mut self.boids, &mut self.back_buffer);
    }
}
