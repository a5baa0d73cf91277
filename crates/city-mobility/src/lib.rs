//! `city-mobility`: the per-tick agent motion model.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                      |
//! |-------------|---------------------------------------------------------------|
//! | [`engine`]  | `MotionModel<R>`: one motion step for one agent               |
//! | [`outcome`] | `StepOutcome`: what that step did, for logging and stats      |
//!
//! # Movement model (continuous waypoint following)
//!
//! Each tick, every agent runs through:
//!
//! 1. `stopped` agents are returned untouched.
//! 2. Agents without a destination go `idle`.
//! 3. An empty cached path is replaced by a fresh [`Router`] query; no route
//!    stops the agent.
//! 4. The next target is the waypoint after the one the agent stands on
//!    (within half a cell per axis), or the first waypoint if it stands on
//!    none.  No next waypoint means arrival.
//! 5. The agent moves `speed × 0.1` toward the target, snapping onto it
//!    rather than overshooting, clamped to the grid.
//! 6. Landing within 0.2 of the target consumes it from the path.
//!
//! Paths are only recomputed once exhausted or cleared by a directive; a
//! road that becomes congested mid-trip does not reroute agents already
//! committed to it.
//!
//! [`Router`]: city_spatial::Router

pub mod engine;
pub mod outcome;

#[cfg(test)]
mod tests;

pub use engine::MotionModel;
pub use outcome::{StepOutcome, StepTally};
