use boidsim_core::ObstacleQuery;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A circular obstacle in the arena.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

/// A static set of circles, each inflated by the boid collision radius so a
/// ray probe answers "would a boid of that size collide", not "would a point".
pub struct CircleField {
    circles: Vec<Circle>,
}

impl CircleField {
    pub fn new(circles: Vec<Circle>, padding: f32) -> Self {
        let circles = circles
            .into_iter()
            .map(|c| Circle {
                center: c.center,
                radius: c.radius + padding,
            })
            .collect();
        Self { circles }
    }

}

impl ObstacleQuery for CircleField {
    fn blocked(&self, origin: Vec2, direction: Vec2, max_distance: f32) -> bool {
        self.circles
            .iter()
            .any(|c| ray_hits_circle(origin, direction, max_distance, c))
    }
}

/// Closest-approach test for a unit-direction ray segment against a circle.
fn ray_hits_circle(origin: Vec2, direction: Vec2, max_distance: f32, circle: &Circle) -> bool {
    let to_center = circle.center - origin;
    let closest = to_center.dot(direction).clamp(0.0, max_distance);
    let offset = to_center - direction * closest;
    offset.length_squared() <= circle.radius * circle.radius
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(circles: Vec<Circle>) -> CircleField {
        CircleField::new(circles, 0.0)
    }

    #[test]
    fn ray_through_circle_is_blocked() {
        let f = field(vec![Circle {
            center: Vec2::new(3.0, 0.0),
            radius: 1.0,
        }]);
        assert!(f.blocked(Vec2::ZERO, Vec2::X, 10.0));
    }

    #[test]
    fn ray_pointing_away_is_clear() {
        let f = field(vec![Circle {
            center: Vec2::new(3.0, 0.0),
            radius: 1.0,
        }]);
        assert!(!f.blocked(Vec2::ZERO, -Vec2::X, 10.0));
    }

    #[test]
    fn circle_beyond_probe_range_is_clear() {
        let f = field(vec![Circle {
            center: Vec2::new(20.0, 0.0),
            radius: 1.0,
        }]);
        assert!(!f.blocked(Vec2::ZERO, Vec2::X, 5.0));
    }

    #[test]
    fn grazing_ray_misses_but_padded_ray_hits() {
        let circle = Circle {
            center: Vec2::new(5.0, 1.5),
            radius: 1.0,
        };
        assert!(!field(vec![circle]).blocked(Vec2::ZERO, Vec2::X, 10.0));
        // Inflating by the collision radius turns the near miss into a hit.
        let padded = CircleField::new(vec![circle], 0.6);
        assert!(padded.blocked(Vec2::ZERO, Vec2::X, 10.0));
    }

    #[test]
    fn origin_inside_circle_is_blocked_in_every_direction() {
        let f = field(vec![Circle {
            center: Vec2::ZERO,
            radius: 2.0,
        }]);
        for dir in [Vec2::X, -Vec2::X, Vec2::Y, -Vec2::Y] {
            assert!(f.blocked(Vec2::new(0.5, 0.5), dir, 10.0));
        }
    }

    #[test]
    fn empty_field_never_blocks() {
        let f = field(Vec::new());
        assert!(!f.blocked(Vec2::ZERO, Vec2::X, 10.0));
    }

    #[test]
    fn diagonal_unit_ray_projects_correctly() {
        // Circle centred on the diagonal at distance 2*sqrt(2): hit along
        // the diagonal, miss along +X.
        let f = field(vec![Circle {
            center: Vec2::new(2.0, 2.0),
            radius: 0.5,
        }]);
        let diagonal = Vec2::new(1.0, 1.0).normalize();
        assert!(f.blocked(Vec2::ZERO, diagonal, 10.0));
        assert!(!f.blocked(Vec2::ZERO, Vec2::X, 10.0));
    }
}
