//! Lattice geometry: continuous `Position`s and integer `GridPoint`s.
//!
//! The city is a `grid_size × grid_size` lattice whose intersections sit on
//! integer coordinates in `[0, grid_size)`.  Agents move continuously
//! between intersections (`Position`, `f32`), while routing and road lookup
//! work on the integer lattice (`GridPoint`, `i32`).
//!
//! `f32` is plenty for a city of a few hundred cells and halves snapshot
//! size compared with `f64`.

use std::fmt;

// ── Position ─────────────────────────────────────────────────────────────────

/// A continuous point on the city plane.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance.
    #[inline]
    pub fn distance(self, other: Position) -> f32 {
        self.distance_sq(other).sqrt()
    }

    /// Squared Euclidean distance, for threshold comparisons.
    #[inline]
    pub fn distance_sq(self, other: Position) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }

    /// Nearest lattice point.  Halves round towards +∞ on both axes so that
    /// `-0.5` snaps to `0` rather than `-1`.
    #[inline]
    pub fn round(self) -> GridPoint {
        GridPoint::new((self.x + 0.5).floor() as i32, (self.y + 0.5).floor() as i32)
    }

    /// `true` if both coordinates are neither NaN nor infinite.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// `true` if the point lies inside `[0, grid_size - 1]` on both axes.
    pub fn in_grid(self, grid_size: u32) -> bool {
        let max = grid_size.saturating_sub(1) as f32;
        self.is_finite() && (0.0..=max).contains(&self.x) && (0.0..=max).contains(&self.y)
    }

    /// Clamp onto `[0, grid_size - 1]` on both axes.
    pub fn clamp_to_grid(self, grid_size: u32) -> Position {
        let max = grid_size.saturating_sub(1) as f32;
        Position::new(self.x.clamp(0.0, max), self.y.clamp(0.0, max))
    }

    /// Per-axis closeness test used for waypoint matching.
    ///
    /// Inclusive: a point exactly halfway between two lattice points is near
    /// both, so an agent on a road is always standing on some waypoint.
    #[inline]
    pub fn near(self, other: Position, tolerance: f32) -> bool {
        (self.x - other.x).abs() <= tolerance && (self.y - other.y).abs() <= tolerance
    }
}

impl From<GridPoint> for Position {
    #[inline]
    fn from(p: GridPoint) -> Self {
        Position::new(p.x as f32, p.y as f32)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}

// ── GridPoint ────────────────────────────────────────────────────────────────

/// An integer lattice point (an intersection).
///
/// Ordering is lexicographic on `(x, y)`; the road index relies on it to
/// store each undirected road under a single normalized key.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridPoint {
    pub x: i32,
    pub y: i32,
}

impl GridPoint {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan (L1) distance: the A* heuristic on a 4-connected lattice.
    #[inline]
    pub fn manhattan(self, other: GridPoint) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// `true` if the point lies in `[0, grid_size)` on both axes.
    #[inline]
    pub fn in_bounds(self, grid_size: u32) -> bool {
        let n = grid_size as i64;
        (0..n).contains(&(self.x as i64)) && (0..n).contains(&(self.y as i64))
    }

    /// The four axis-aligned neighbours: up, right, down, left.  No bounds
    /// check.
    #[inline]
    pub fn neighbors(self) -> [GridPoint; 4] {
        [
            GridPoint::new(self.x, self.y + 1),
            GridPoint::new(self.x + 1, self.y),
            GridPoint::new(self.x, self.y - 1),
            GridPoint::new(self.x - 1, self.y),
        ]
    }

    /// Row-major index into a dense `grid_size²` array.  Only meaningful for
    /// in-bounds points.
    #[inline]
    pub fn index(self, grid_size: u32) -> usize {
        self.y as usize * grid_size as usize + self.x as usize
    }

    /// Inverse of [`index`](Self::index).
    #[inline]
    pub fn from_index(index: usize, grid_size: u32) -> GridPoint {
        let n = grid_size as usize;
        GridPoint::new((index % n) as i32, (index / n) as i32)
    }
}

impl fmt::Display for GridPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
