//! Deterministic flocking ("boid") simulation core.
//!
//! The crate owns the per-tick algorithm only: neighbor perception,
//! steering-force blending (separation, alignment, cohesion), obstacle
//! avoidance through an injected [`obstacle::ObstacleQuery`] capability, and
//! velocity/position integration against a bounded arena. Everything the
//! surrounding host engine owns (spawning UI, rendering, the raycast engine
//! itself) stays outside; the host hands in a population snapshot plus a
//! [`config::FlockConfig`] and reads back the committed next-tick state.

pub mod boid;
pub mod config;
pub mod constants;
pub mod forces;
pub mod integrate;
pub mod metrics;
pub mod obstacle;
pub mod perception;
pub mod rng;
pub mod spatial;
pub mod spawn;
pub mod steering;
pub mod world;

pub use boid::Boid;
pub use config::{FlockConfig, FlockConfigError, NeighborIndexKind, ScanPolicy, SeparationModel};
pub use metrics::{RunSummary, StepMetrics};
pub use obstacle::{Avoidance, ObstacleQuery, OpenField};
pub use world::{ExperimentError, Flock, FlockInitError, StepTimings};
