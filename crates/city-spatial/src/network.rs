//! Road lattice representation and builder.
//!
//! # Data layout
//!
//! Roads are stored once each, in a flat `Vec<Road>` indexed by `RoadId`.
//! Each road is a directed `(from, to)` pair, but lookup is orientation
//! agnostic: the FxHash index is keyed on the *normalized* endpoint pair
//! (smaller `GridPoint` first), so `find_road(a, b) == find_road(b, a)`.
//!
//! Road geometry never changes after construction; only `status` does,
//! so the lookup table and the R-tree over road midpoints are built once and
//! shared behind `Arc`.  Cloning a `RoadNetwork` copies the status vector
//! only.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) maps road midpoints to `RoadId`s.  Event
//! application uses it to find every road within the event radius without
//! scanning the full lattice.

use std::sync::Arc;

use rstar::{AABB, PointDistance, RTree, RTreeObject};
use rustc_hash::FxHashMap;

use city_core::{GridPoint, Position, RoadId};

use crate::{SpatialError, SpatialResult};

// ── RoadStatus ────────────────────────────────────────────────────────────────

/// Traffic condition of a road.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum RoadStatus {
    #[default]
    Open,
    Congested,
    Blocked,
}

impl RoadStatus {
    /// Traversal cost used as the A* edge weight.
    ///
    /// | Status      | Cost |
    /// |-------------|------|
    /// | `Open`      | 1    |
    /// | `Congested` | 3    |
    /// | `Blocked`   | 999  |
    ///
    /// Blocked roads are prohibitively expensive but never impassable, so a
    /// connected lattice always yields *some* route.
    #[inline]
    pub fn cost(self) -> u32 {
        match self {
            RoadStatus::Open      => 1,
            RoadStatus::Congested => 3,
            RoadStatus::Blocked   => 999,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RoadStatus::Open      => "open",
            RoadStatus::Congested => "congested",
            RoadStatus::Blocked   => "blocked",
        }
    }
}

impl std::fmt::Display for RoadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Road ──────────────────────────────────────────────────────────────────────

/// A road segment between two adjacent intersections.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Road {
    pub from:   GridPoint,
    pub to:     GridPoint,
    pub status: RoadStatus,
}

impl Road {
    /// Geometric midpoint of the segment.
    #[inline]
    pub fn midpoint(&self) -> Position {
        Position::new(
            (self.from.x + self.to.x) as f32 * 0.5,
            (self.from.y + self.to.y) as f32 * 0.5,
        )
    }
}

/// Orientation-independent lookup key.
#[inline]
fn road_key(a: GridPoint, b: GridPoint) -> (GridPoint, GridPoint) {
    if a <= b { (a, b) } else { (b, a) }
}

// ── R-tree midpoint entry ─────────────────────────────────────────────────────

/// Entry stored in the R-tree spatial index: a road midpoint with its id.
#[derive(Clone, Debug)]
struct MidpointEntry {
    point: [f32; 2], // [x, y]
    id:    RoadId,
}

impl RTreeObject for MidpointEntry {
    type Envelope = AABB<[f32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for MidpointEntry {
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── RoadNetwork ───────────────────────────────────────────────────────────────

/// The city's road graph: a (normally complete) 4-connected lattice.
///
/// Do not construct directly; use [`RoadNetwork::lattice`] or
/// [`RoadNetworkBuilder`].
#[derive(Clone, Debug)]
pub struct RoadNetwork {
    grid_size: u32,
    roads:     Vec<Road>,
    lookup:    Arc<FxHashMap<(GridPoint, GridPoint), RoadId>>,
    midpoints: Arc<RTree<MidpointEntry>>,
}

impl RoadNetwork {
    /// The full `grid_size × grid_size` lattice with every road `Open`.
    ///
    /// Roads are emitted column by column: for each `(x, y)` the horizontal
    /// road to `(x + 1, y)` first, then the vertical road to `(x, y + 1)`.
    pub fn lattice(grid_size: u32) -> Self {
        let n = grid_size as i32;
        let mut b = RoadNetworkBuilder::with_capacity(grid_size, lattice_road_count(grid_size));
        for x in 0..n {
            for y in 0..n {
                let here = GridPoint::new(x, y);
                if x < n - 1 {
                    b.push_unchecked(here, GridPoint::new(x + 1, y));
                }
                if y < n - 1 {
                    b.push_unchecked(here, GridPoint::new(x, y + 1));
                }
            }
        }
        b.build()
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn grid_size(&self) -> u32 {
        self.grid_size
    }

    pub fn road_count(&self) -> usize {
        self.roads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roads.is_empty()
    }

    /// `true` if every adjacent pair of intersections has a road.
    pub fn is_complete_lattice(&self) -> bool {
        self.roads.len() == lattice_road_count(self.grid_size)
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    pub fn roads(&self) -> &[Road] {
        &self.roads
    }

    #[inline]
    pub fn road(&self, id: RoadId) -> &Road {
        &self.roads[id.index()]
    }

    /// The road joining `a` and `b`, in either orientation.
    #[inline]
    pub fn find_road(&self, a: GridPoint, b: GridPoint) -> Option<RoadId> {
        self.lookup.get(&road_key(a, b)).copied()
    }

    /// Traversal cost from `a` to `b`, or `None` if no road joins them.
    #[inline]
    pub fn edge_cost(&self, a: GridPoint, b: GridPoint) -> Option<u32> {
        self.find_road(a, b).map(|id| self.roads[id.index()].status.cost())
    }

    /// Iterator over every road whose status is not `Open`.
    pub fn disrupted(&self) -> impl Iterator<Item = (RoadId, &Road)> + '_ {
        self.roads
            .iter()
            .enumerate()
            .filter(|(_, r)| r.status != RoadStatus::Open)
            .map(|(i, r)| (RoadId(i as u32), r))
    }

    /// Number of roads currently in `status`.
    pub fn count_with_status(&self, status: RoadStatus) -> usize {
        self.roads.iter().filter(|r| r.status == status).count()
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// Every road whose midpoint lies *strictly* closer than `radius` to
    /// `center`.  Ordered by `RoadId`.
    pub fn roads_within(&self, center: Position, radius: f32) -> Vec<RoadId> {
        if !center.is_finite() || radius <= 0.0 {
            return Vec::new();
        }
        let r2 = radius * radius;
        let mut ids: Vec<RoadId> = self
            .midpoints
            .locate_within_distance([center.x, center.y], r2)
            .filter(|e| e.distance_2(&[center.x, center.y]) < r2)
            .map(|e| e.id)
            .collect();
        ids.sort_unstable();
        ids
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Override the status of one road.  Geometry is immutable.
    #[inline]
    pub fn set_status(&mut self, id: RoadId, status: RoadStatus) {
        self.roads[id.index()].status = status;
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for RoadNetwork {
    /// Snapshots carry the flat road list; indexes are rebuilt on load.
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.roads.serialize(serializer)
    }
}

/// Road count of a complete `n × n` lattice: `2·n·(n−1)`.
#[inline]
pub fn lattice_road_count(grid_size: u32) -> usize {
    let n = grid_size as usize;
    2 * n * n.saturating_sub(1)
}

// ── RoadNetworkBuilder ────────────────────────────────────────────────────────

/// Construct a [`RoadNetwork`] incrementally, then call [`build`](Self::build).
///
/// Useful for partial networks (corridors, islands) in tests and scenario
/// setups; the generated city always uses [`RoadNetwork::lattice`].
///
/// # Example
///
/// ```
/// use city_core::GridPoint;
/// use city_spatial::{RoadNetworkBuilder, RoadStatus};
///
/// let mut b = RoadNetworkBuilder::new(3);
/// b.add_road(GridPoint::new(0, 0), GridPoint::new(1, 0), RoadStatus::Open).unwrap();
/// b.add_road(GridPoint::new(1, 0), GridPoint::new(2, 0), RoadStatus::Congested).unwrap();
/// let net = b.build();
/// assert_eq!(net.road_count(), 2);
/// assert_eq!(net.edge_cost(GridPoint::new(1, 0), GridPoint::new(0, 0)), Some(1));
/// ```
pub struct RoadNetworkBuilder {
    grid_size: u32,
    roads:     Vec<Road>,
    lookup:    FxHashMap<(GridPoint, GridPoint), RoadId>,
}

impl RoadNetworkBuilder {
    pub fn new(grid_size: u32) -> Self {
        Self::with_capacity(grid_size, 0)
    }

    /// Pre-allocate for the expected number of roads.
    pub fn with_capacity(grid_size: u32, roads: usize) -> Self {
        let mut lookup = FxHashMap::default();
        lookup.reserve(roads);
        Self {
            grid_size,
            roads: Vec::with_capacity(roads),
            lookup,
        }
    }

    /// Add a road between two adjacent in-bounds intersections.
    ///
    /// Fails if either endpoint is out of bounds, the endpoints are not
    /// 4-adjacent, or a road already joins them (in either orientation).
    pub fn add_road(
        &mut self,
        from:   GridPoint,
        to:     GridPoint,
        status: RoadStatus,
    ) -> SpatialResult<RoadId> {
        for point in [from, to] {
            if !point.in_bounds(self.grid_size) {
                return Err(SpatialError::OutOfBounds { point, grid_size: self.grid_size });
            }
        }
        if from.manhattan(to) != 1 {
            return Err(SpatialError::NotAdjacent { from, to });
        }
        if self.lookup.contains_key(&road_key(from, to)) {
            return Err(SpatialError::DuplicateRoad { from, to });
        }
        let id = self.push_unchecked(from, to);
        self.roads[id.index()].status = status;
        Ok(id)
    }

    /// Append an `Open` road without validation (lattice construction).
    fn push_unchecked(&mut self, from: GridPoint, to: GridPoint) -> RoadId {
        let id = RoadId(self.roads.len() as u32);
        self.roads.push(Road { from, to, status: RoadStatus::Open });
        self.lookup.insert(road_key(from, to), id);
        id
    }

    pub fn road_count(&self) -> usize {
        self.roads.len()
    }

    /// Consume the builder and produce a [`RoadNetwork`].
    ///
    /// Bulk-loads the midpoint R-tree: O(R log R) for R roads.
    pub fn build(self) -> RoadNetwork {
        let entries: Vec<MidpointEntry> = self
            .roads
            .iter()
            .enumerate()
            .map(|(i, road)| {
                let m = road.midpoint();
                MidpointEntry { point: [m.x, m.y], id: RoadId(i as u32) }
            })
            .collect();

        RoadNetwork {
            grid_size: self.grid_size,
            roads:     self.roads,
            lookup:    Arc::new(self.lookup),
            midpoints: Arc::new(RTree::bulk_load(entries)),
        }
    }
}
