use glam::Vec2;
use serde::{Deserialize, Serialize};

/// How the separation push accumulated from too-close neighbors is weighted.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SeparationModel {
    /// Push scaled by the inverse squared distance; close neighbors dominate.
    #[default]
    InverseSquare,
    /// Push scaled linearly from full strength at contact to zero at the
    /// avoidance radius.
    LinearRamp,
}

/// Candidate-heading sampling used when the forward path is blocked.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ScanPolicy {
    /// Fixed fan of headings at ±15°, ±35°, ±60°, ±90°, smallest deviation
    /// first, so an existing exit is taken with minimal path deviation.
    #[default]
    FanScan,
    /// 32 headings stepped by the golden angle for near-uniform angular
    /// cover at higher resolution.
    GoldenAngle,
}

/// Neighbor lookup strategy used by the perception pass.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NeighborIndexKind {
    /// Full O(n) population scan per boid. Exact and allocation-free;
    /// adequate at hundreds of boids.
    #[default]
    Exhaustive,
    /// R*-tree rebuilt each tick. Same perception contract, sub-linear
    /// queries at larger populations.
    RTree,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FlockConfig {
    /// Population size. Fixed for the lifetime of a flock.
    pub num_boids: usize,
    /// Deterministic seed for spawn placement.
    pub seed: u64,
    /// Simulation timestep in seconds.
    pub dt: f32,
    /// Distance within which another boid counts as a neighbor for
    /// alignment and cohesion.
    pub perception_radius: f32,
    /// Tighter distance triggering the separation push. Never exceeds
    /// `perception_radius`.
    pub avoidance_radius: f32,
    /// Speed floor; the integrator never lets speed fall below half of it.
    pub min_speed: f32,
    /// Speed ceiling enforced after every integration.
    pub max_speed: f32,
    /// Magnitude bound on every individual steering force.
    pub max_steer_force: f32,
    pub alignment_weight: f32,
    pub cohesion_weight: f32,
    pub separation_weight: f32,
    /// Weight of the obstacle-avoidance force. Deliberately large relative
    /// to the flocking weights so walls win over flockmates.
    pub obstacle_weight: f32,
    /// Forward probe distance for obstacle raycasts.
    pub obstacle_view_distance: f32,
    /// Physical radius of a boid. The host's obstacle query is expected to
    /// account for it (e.g. by inflating obstacles before ray tests).
    pub collision_radius: f32,
    /// Lower corner of the arena.
    pub bounds_min: Vec2,
    /// Upper corner of the arena. Must exceed `bounds_min` on both axes.
    pub bounds_max: Vec2,
    pub separation_model: SeparationModel,
    pub scan_policy: ScanPolicy,
    pub neighbor_index: NeighborIndexKind,
}

impl Default for FlockConfig {
    fn default() -> Self {
        Self {
            num_boids: 256,
            seed: 42,
            dt: 0.02,
            perception_radius: 2.5,
            avoidance_radius: 1.0,
            min_speed: 2.0,
            max_speed: 5.0,
            max_steer_force: 3.0,
            alignment_weight: 1.0,
            cohesion_weight: 1.0,
            separation_weight: 1.0,
            obstacle_weight: 10.0,
            obstacle_view_distance: 5.0,
            collision_radius: 0.27,
            bounds_min: Vec2::new(-50.0, -50.0),
            bounds_max: Vec2::new(50.0, 50.0),
            separation_model: SeparationModel::InverseSquare,
            scan_policy: ScanPolicy::FanScan,
            neighbor_index: NeighborIndexKind::Exhaustive,
        }
    }
}

macro_rules! define_flock_config_error {
    (
        $(
            $variant:ident $( { $($field:ident : $type:ty),* } )? => $fmt:literal $(, $arg:expr)*
        );* $(;)?
    ) => {
        #[derive(Debug, Clone, PartialEq)]
        pub enum FlockConfigError {
            $(
                $variant $( { $($field : $type),* } )?,
            )*
        }

        impl std::fmt::Display for FlockConfigError {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(
                        Self::$variant $( { $($field),* } )? => write!(f, $fmt $(, $arg)*),
                    )*
                }
            }
        }
    };
}

define_flock_config_error! {
    InvalidNumBoids => "num_boids must be greater than 0";
    TooManyBoids { max: usize, actual: usize } => "num_boids ({}) exceeds supported maximum ({})", actual, max;
    InvalidDt => "dt must be positive and finite";
    InvalidMinSpeed => "min_speed must be positive and finite";
    InvalidMaxSpeed => "max_speed must be positive and finite";
    SpeedBoundsReversed => "min_speed must not exceed max_speed";
    InvalidMaxSteerForce => "max_steer_force must be positive and finite";
    InvalidPerceptionRadius => "perception_radius must be non-negative and finite";
    InvalidAvoidanceRadius => "avoidance_radius must be non-negative and finite";
    AvoidanceExceedsPerception => "avoidance_radius must not exceed perception_radius";
    InvalidAlignmentWeight => "alignment_weight must be non-negative and finite";
    InvalidCohesionWeight => "cohesion_weight must be non-negative and finite";
    InvalidSeparationWeight => "separation_weight must be non-negative and finite";
    InvalidObstacleWeight => "obstacle_weight must be non-negative and finite";
    InvalidObstacleViewDistance => "obstacle_view_distance must be non-negative and finite";
    InvalidCollisionRadius => "collision_radius must be non-negative and finite";
    InvalidBounds => "bounds must be finite with bounds_min strictly below bounds_max on both axes";
    ArenaTooLarge { max: f32, actual: f32 } => "arena extent ({}) exceeds supported maximum ({})", actual, max;
}

impl std::error::Error for FlockConfigError {}

impl FlockConfig {
    pub const MAX_ARENA_EXTENT: f32 = crate::constants::MAX_ARENA_EXTENT;

    pub const MAX_TOTAL_BOIDS: usize = crate::constants::MAX_TOTAL_BOIDS;

    pub fn validate(&self) -> Result<(), FlockConfigError> {
        self.validate_population()?;
        self.validate_motion()?;
        self.validate_perception()?;
        self.validate_obstacles()?;
        self.validate_bounds()?;
        Ok(())
    }

    fn validate_population(&self) -> Result<(), FlockConfigError> {
        if self.num_boids == 0 {
            return Err(FlockConfigError::InvalidNumBoids);
        }
        if self.num_boids > Self::MAX_TOTAL_BOIDS {
            return Err(FlockConfigError::TooManyBoids {
                max: Self::MAX_TOTAL_BOIDS,
                actual: self.num_boids,
            });
        }
        Ok(())
    }

    fn validate_motion(&self) -> Result<(), FlockConfigError> {
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(FlockConfigError::InvalidDt);
        }
        if !(self.min_speed.is_finite() && self.min_speed > 0.0) {
            return Err(FlockConfigError::InvalidMinSpeed);
        }
        if !(self.max_speed.is_finite() && self.max_speed > 0.0) {
            return Err(FlockConfigError::InvalidMaxSpeed);
        }
        if self.min_speed > self.max_speed {
            return Err(FlockConfigError::SpeedBoundsReversed);
        }
        if !(self.max_steer_force.is_finite() && self.max_steer_force > 0.0) {
            return Err(FlockConfigError::InvalidMaxSteerForce);
        }
        Ok(())
    }

    fn validate_perception(&self) -> Result<(), FlockConfigError> {
        if !(self.perception_radius.is_finite() && self.perception_radius >= 0.0) {
            return Err(FlockConfigError::InvalidPerceptionRadius);
        }
        if !(self.avoidance_radius.is_finite() && self.avoidance_radius >= 0.0) {
            return Err(FlockConfigError::InvalidAvoidanceRadius);
        }
        if self.avoidance_radius > self.perception_radius {
            return Err(FlockConfigError::AvoidanceExceedsPerception);
        }
        let weights = [
            (self.alignment_weight, FlockConfigError::InvalidAlignmentWeight),
            (self.cohesion_weight, FlockConfigError::InvalidCohesionWeight),
            (
                self.separation_weight,
                FlockConfigError::InvalidSeparationWeight,
            ),
        ];
        for (weight, err) in weights {
            if !(weight.is_finite() && weight >= 0.0) {
                return Err(err);
            }
        }
        Ok(())
    }

    fn validate_obstacles(&self) -> Result<(), FlockConfigError> {
        if !(self.obstacle_weight.is_finite() && self.obstacle_weight >= 0.0) {
            return Err(FlockConfigError::InvalidObstacleWeight);
        }
        if !(self.obstacle_view_distance.is_finite() && self.obstacle_view_distance >= 0.0) {
            return Err(FlockConfigError::InvalidObstacleViewDistance);
        }
        if !(self.collision_radius.is_finite() && self.collision_radius >= 0.0) {
            return Err(FlockConfigError::InvalidCollisionRadius);
        }
        Ok(())
    }

    fn validate_bounds(&self) -> Result<(), FlockConfigError> {
        let min = self.bounds_min;
        let max = self.bounds_max;
        if !(min.is_finite() && max.is_finite() && min.x < max.x && min.y < max.y) {
            return Err(FlockConfigError::InvalidBounds);
        }
        let extent = (max - min).max_element();
        if extent > Self::MAX_ARENA_EXTENT {
            return Err(FlockConfigError::ArenaTooLarge {
                max: Self::MAX_ARENA_EXTENT,
                actual: extent,
            });
        }
        Ok(())
    }
}
