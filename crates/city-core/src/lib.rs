//! `city-core`: foundational types for the gridcity simulation engine.
//!
//! This crate is a dependency of every other `city-*` crate.  It has no
//! `city-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                                   |
//! |------------|------------------------------------------------------------|
//! | [`ids`]    | `AgentId`, `RoadId`, `BuildingId`, `EventId`, `AssetId`    |
//! | [`geo`]    | `Position`, `GridPoint`, lattice helpers                   |
//! | [`kind`]   | `AgentKind` enum                                           |
//! | [`time`]   | `Tick`, `SimClock`                                         |
//! | [`config`] | `WorldConfig`, `SimConfig`                                 |
//! | [`rng`]    | `SimRng`                                                   |
//! | [`error`]  | `CityError`, `CityResult`                                  |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |
//!           | Required for snapshots and TOML configuration.             |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod kind;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{SimConfig, WorldConfig};
pub use error::{CityError, CityResult};
pub use geo::{GridPoint, Position};
pub use ids::{AgentId, AssetId, BuildingId, EventId, RoadId};
pub use kind::AgentKind;
pub use rng::SimRng;
pub use time::{SimClock, Tick};
