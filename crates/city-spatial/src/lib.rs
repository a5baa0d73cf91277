//! `city-spatial`: road lattice, cost model, spatial indexing, and routing.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`network`] | `RoadNetwork`, `RoadNetworkBuilder`, `Road`, `RoadStatus`   |
//! | [`router`]  | `Router` trait, `Route`, `AStarRouter`, `path_cost`         |
//! | [`error`]   | `SpatialError`, `SpatialResult<T>`                          |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod error;
pub mod network;
pub mod router;

#[cfg(test)]
mod tests;

pub use error::{SpatialError, SpatialResult};
pub use network::{Road, RoadNetwork, RoadNetworkBuilder, RoadStatus};
pub use router::{AStarRouter, Route, Router, path_cost};
