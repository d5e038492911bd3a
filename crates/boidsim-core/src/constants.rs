/// Largest valid arena extent per axis (world units). Prevents degenerate
/// envelopes in the spatial index.
pub const MAX_ARENA_EXTENT: f32 = 2048.0;

/// Hard cap on population size accepted by [`crate::world::Flock::new`].
pub const MAX_TOTAL_BOIDS: usize = 100_000;

/// Squared-length guard below which a vector counts as zero.
pub const VEC_EPSILON: f32 = 1.0e-6;

/// Squared-speed threshold below which a boid keeps its previous heading
/// instead of re-deriving it, so near-stationary boids do not spin in place.
pub const HEADING_EPSILON: f32 = 0.01;

/// Multiplier on the reverse thrust applied when every scanned candidate
/// heading is blocked.
pub const REVERSAL_FACTOR: f32 = 2.0;
