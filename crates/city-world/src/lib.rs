//! `city-world`: the authoritative world snapshot and everything that
//! transforms it.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`state`]     | `WorldState` and its snapshot-to-snapshot transformations  |
//! | [`event`]     | `SimulationEvent`, `EventKind`                             |
//! | [`asset`]     | `Asset`, `AssetKind`, `AssetOp`, `AssetFilter`             |
//! | [`effects`]   | `WorldEffects` (shake countdown)                           |
//! | [`building`]  | `Building`, `BuildingKind`                                 |
//! | [`plan`]      | `DirectorPlan`: one validated planner response             |
//! | [`generator`] | `WorldGenerator`: procedural city                          |
//!
//! # Snapshot discipline
//!
//! Every transformation takes `self` by value and returns the next snapshot.
//! The host keeps exactly one current snapshot and replaces it with the
//! result, so there is no shared mutable world and no interior mutability.
//!
//! ```ignore
//! world = world.apply_event(event);
//! world = world.step(&motion);
//! ```

pub mod asset;
pub mod building;
pub mod effects;
pub mod event;
pub mod generator;
pub mod plan;
pub mod state;


pub use asset::{Asset, AssetFilter, AssetKind, AssetOp, DEFAULT_ASSET_TTL, DEFAULT_REMOVE_RADIUS};
pub use building::{Building, BuildingKind};
pub use effects::{SHAKE_DURATION_TICKS, WorldEffects};
pub use event::{EVENT_RADIUS, EventKind, SimulationEvent};
pub use generator::WorldGenerator;
pub use plan::DirectorPlan;
pub use state::WorldState;
