//! Routing trait and default A* implementation.
//!
//! # Pluggability
//!
//! The motion model calls routing through the [`Router`] trait, so hosts can
//! swap in a different search (cached routes, bidirectional search) without
//! touching agent movement.  [`AStarRouter`] is the default.
//!
//! # Cost units
//!
//! Costs are the dimensionless road weights from [`RoadStatus::cost`]:
//! 1 per open road, 3 per congested road, 999 per blocked road.
//!
//! [`RoadStatus::cost`]: crate::RoadStatus::cost

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use city_core::{GridPoint, Position};

use crate::network::RoadNetwork;

// ── Route ─────────────────────────────────────────────────────────────────────

/// The result of a routing query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Intersections to visit in order.  The first entry is the start, the
    /// last is the goal.  A trivial route is `[goal]`.
    pub waypoints: Vec<GridPoint>,
    /// Sum of road costs along the route.
    pub total_cost: u32,
}

impl Route {
    /// `true` if the start and goal round to the same intersection.
    pub fn is_trivial(&self) -> bool {
        self.waypoints.len() <= 1
    }

    pub fn into_waypoints(self) -> Vec<GridPoint> {
        self.waypoints
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable routing engine.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so a host may share one router
/// across worker threads.
pub trait Router: Send + Sync {
    /// Compute a route from `start` to `goal`.
    ///
    /// Both positions are rounded to the nearest intersection first.
    /// Returns `None` if either rounded point lies outside the grid or the
    /// goal is unreachable.  `start == goal` yields the single-waypoint route
    /// `[goal]`, never `None`.
    fn route(&self, network: &RoadNetwork, start: Position, goal: Position) -> Option<Route>;
}

// ── AStarRouter ───────────────────────────────────────────────────────────────

/// A* over the road lattice with the Manhattan-distance heuristic.
///
/// Every road costs at least 1, so Manhattan distance never overestimates
/// and the returned route is minimum-cost.  Among equal-`f` frontier entries
/// the one with the smaller heuristic is expanded first, then the one pushed
/// first.
///
/// Search state lives in dense per-call vectors indexed by
/// `GridPoint::index`: O(n²) memory for an `n × n` grid, with no hashing on
/// the hot path except the road lookup.
#[derive(Debug, Default, Clone, Copy)]
pub struct AStarRouter;

impl Router for AStarRouter {
    fn route(&self, network: &RoadNetwork, start: Position, goal: Position) -> Option<Route> {
        if !start.is_finite() || !goal.is_finite() {
            return None;
        }
        astar(network, start.round(), goal.round())
    }
}

const NO_PARENT: u32 = u32::MAX;

/// Frontier entry: `(f, h, seq, cell)`.  `seq` breaks remaining ties in push
/// order so the search is fully deterministic.
type Frontier = Reverse<(u32, u32, u32, u32)>;

fn astar(network: &RoadNetwork, start: GridPoint, goal: GridPoint) -> Option<Route> {
    let n = network.grid_size();
    if !start.in_bounds(n) || !goal.in_bounds(n) {
        return None;
    }
    if start == goal {
        return Some(Route { waypoints: vec![goal], total_cost: 0 });
    }

    let cells = n as usize * n as usize;
    let mut g_score = vec![u32::MAX; cells];
    let mut parent  = vec![NO_PARENT; cells];
    let mut closed  = vec![false; cells];
    let mut open: BinaryHeap<Frontier> = BinaryHeap::new();
    let mut seq: u32 = 0;

    let s = start.index(n);
    let h0 = start.manhattan(goal);
    g_score[s] = 0;
    open.push(Reverse((h0, h0, seq, s as u32)));

    while let Some(Reverse((_, _, _, cell))) = open.pop() {
        let idx = cell as usize;
        if closed[idx] {
            continue; // stale entry
        }
        let current = GridPoint::from_index(idx, n);
        if current == goal {
            return Some(reconstruct(&parent, idx, n, g_score[idx]));
        }
        closed[idx] = true;

        for next in current.neighbors() {
            if !next.in_bounds(n) {
                continue;
            }
            let ni = next.index(n);
            if closed[ni] {
                continue;
            }
            let Some(cost) = network.edge_cost(current, next) else {
                continue;
            };
            let tentative = g_score[idx].saturating_add(cost);
            if tentative < g_score[ni] {
                g_score[ni] = tentative;
                parent[ni] = idx as u32;
                let h = next.manhattan(goal);
                seq = seq.wrapping_add(1);
                open.push(Reverse((tentative.saturating_add(h), h, seq, ni as u32)));
            }
        }
    }

    None
}

fn reconstruct(parent: &[u32], goal_idx: usize, n: u32, total_cost: u32) -> Route {
    let mut waypoints = Vec::new();
    let mut cur = goal_idx as u32;
    loop {
        waypoints.push(GridPoint::from_index(cur as usize, n));
        let p = parent[cur as usize];
        if p == NO_PARENT {
            break;
        }
        cur = p;
    }
    waypoints.reverse();
    Route { waypoints, total_cost }
}

/// Total cost of walking `waypoints` in order, or `None` if any consecutive
/// pair is not joined by a road.
pub fn path_cost(network: &RoadNetwork, waypoints: &[GridPoint]) -> Option<u32> {
    waypoints
        .windows(2)
        .try_fold(0u32, |acc, w| network.edge_cost(w[0], w[1]).map(|c| acc + c))
}
