use crate::boid::Boid;
use crate::config::NeighborIndexKind;
use glam::Vec2;
use rstar::{RTree, RTreeObject, AABB};

/// Lightweight position-only record for spatial indexing, to avoid cloning
/// full boids into the tree.
#[derive(Clone, Debug)]
pub struct BoidLocation {
    /// Index into the population slice the index was built from.
    pub index: usize,
    pub position: [f32; 2],
}

impl RTreeObject for BoidLocation {
    type Envelope = AABB<[f32; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.position)
    }
}

/// Neighbor lookup capability consumed by the perception pass.
///
/// Both variants yield a superset of the boids within `radius` of a query
/// point; the caller filters by exact squared distance. Rebuilt from the
/// committed population snapshot at the start of every tick and read-only
/// for the tick's duration, so concurrent per-boid queries are safe.
pub enum NeighborIndex {
    Exhaustive { population: usize },
    RTree(RTree<BoidLocation>),
}

impl NeighborIndex {
    pub fn build(kind: NeighborIndexKind, boids: &[Boid]) -> Self {
        match kind {
            NeighborIndexKind::Exhaustive => Self::Exhaustive {
                population: boids.len(),
            },
            NeighborIndexKind::RTree => {
                let locations: Vec<BoidLocation> = boids
                    .iter()
                    .enumerate()
                    .map(|(index, b)| BoidLocation {
                        index,
                        position: [b.position.x, b.position.y],
                    })
                    .collect();
                Self::RTree(RTree::bulk_load(locations))
            }
        }
    }

    /// Visit the indices of every candidate neighbor around `center`. May
    /// include the querying boid itself and boids just outside `radius`.
    pub fn for_each_candidate(&self, center: Vec2, radius: f32, mut visit: impl FnMut(usize)) {
        match self {
            Self::Exhaustive { population } => {
                for index in 0..*population {
                    visit(index);
                }
            }
            Self::RTree(tree) => {
                let envelope = AABB::from_corners(
                    [center.x - radius, center.y - radius],
                    [center.x + radius, center.y + radius],
                );
                for location in tree.locate_in_envelope(&envelope) {
                    visit(location.index);
                }
            }
        }
    }
}
