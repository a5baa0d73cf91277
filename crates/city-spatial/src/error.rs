//! Spatial-subsystem error type.
//!
//! Only network *construction* can fail.  An unreachable goal is an
//! expected routing outcome and is reported as `None` by [`Router`], never
//! as an error.
//!
//! [`Router`]: crate::Router

use thiserror::Error;

use city_core::GridPoint;

/// Errors produced by `city-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("road endpoint {point} lies outside a {grid_size}x{grid_size} grid")]
    OutOfBounds { point: GridPoint, grid_size: u32 },

    #[error("road {from} → {to} does not join adjacent intersections")]
    NotAdjacent { from: GridPoint, to: GridPoint },

    #[error("duplicate road between {from} and {to}")]
    DuplicateRoad { from: GridPoint, to: GridPoint },
}

pub type SpatialResult<T> = Result<T, SpatialError>;
