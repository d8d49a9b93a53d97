//! Radius queries over a fixed set of agent positions.
//!
//! An R-tree (via `rstar`) is bulk-loaded from the snapshot's positions.
//! Bulk loading is O(N log N) and the tree is immutable afterwards, so the
//! same index can be queried from many threads at once.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use tj_core::{AgentId, Vec2};

// ── R-tree entry ──────────────────────────────────────────────────────────────

/// Entry stored in the R-tree: a 2-D `[x, y]` point with its agent.
#[derive(Clone, Debug)]
struct AgentEntry {
    point: [f32; 2],
    id:    AgentId,
}

impl RTreeObject for AgentEntry {
    type Envelope = AABB<[f32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for AgentEntry {
    /// Squared Euclidean distance in field units.
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── Neighbor ──────────────────────────────────────────────────────────────────

/// One result of a radius query.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Neighbor {
    pub id:       AgentId,
    pub distance: f32,
}

// ── NeighborIndex ─────────────────────────────────────────────────────────────

/// Immutable spatial index over agent positions.
#[derive(Clone, Debug)]
pub struct NeighborIndex {
    tree: RTree<AgentEntry>,
}

impl NeighborIndex {
    /// Bulk-load the index from `(id, position)` pairs.
    pub fn build<I>(positions: I) -> Self
    where
        I: IntoIterator<Item = (AgentId, Vec2)>,
    {
        let entries: Vec<AgentEntry> = positions
            .into_iter()
            .map(|(id, p)| AgentEntry { point: [p.x, p.y], id })
            .collect();
        Self { tree: RTree::bulk_load(entries) }
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Every indexed agent whose distance to `center` is `<= radius`,
    /// sorted by ascending distance and then ascending id.
    ///
    /// The R-tree's own iteration order is not part of the result: sorting
    /// makes the output independent of how the tree happened to be packed.
    pub fn within(&self, center: Vec2, radius: f32) -> Vec<Neighbor> {
        if !(radius >= 0.0) {
            return Vec::new();
        }
        let mut found: Vec<Neighbor> = self
            .tree
            .locate_within_distance([center.x, center.y], radius * radius)
            .map(|e| Neighbor {
                id:       e.id,
                distance: center.distance(Vec2::new(e.point[0], e.point[1])),
            })
            .collect();
        found.sort_by(|a, b| a.distance.total_cmp(&b.distance).then(a.id.cmp(&b.id)));
        found
    }
}
