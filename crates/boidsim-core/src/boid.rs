use glam::Vec2;

/// State of a single simulated agent.
///
/// A boid is mutated only by the integrator at the end of a tick; every read
/// during a tick sees the previous tick's committed state. `heading` is
/// unit-length (or the `+X` reference direction for a freshly spawned,
/// motionless boid) and lags velocity by at most one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Boid {
    /// Stable identifier, unique within a flock.
    pub id: u32,
    pub position: Vec2,
    pub velocity: Vec2,
    pub heading: Vec2,
}

impl Boid {
    /// Create a motionless boid facing the `+X` reference direction.
    pub fn new(id: u32, position: Vec2) -> Self {
        Self {
            id,
            position,
            velocity: Vec2::ZERO,
            heading: Vec2::X,
        }
    }

    /// Create a boid with an initial velocity; heading is derived from it.
    pub fn with_velocity(id: u32, position: Vec2, velocity: Vec2) -> Self {
        Self {
            id,
            position,
            velocity,
            heading: velocity.normalize_or(Vec2::X),
        }
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }
}
