//! `city-sim`: host runner for the gridcity engine.
//!
//! The engine crates are pure snapshot transformations.  This crate owns
//! the single mutable register holding the current [`WorldState`] and
//! drives it:
//!
//! ```text
//! every tick:
//!   ① Director  : when due and idle: request → planner → parse → apply
//!                 (skip the slot if a request is still in flight)
//!   ② Motion    : WorldState::step_tallied (agents, asset TTLs, shake)
//!   ③ Snapshot  : observer.on_snapshot every `snapshot_interval_ticks`
//! ```
//!
//! The first Director slot is tick 0; later ones follow every
//! `director_interval_ticks`.  Director replies are stamped with the epoch they were issued in.
//! [`Sim::reset`] bumps the epoch, so a reply that lands after a reset, or
//! while paused, is discarded rather than applied to the wrong city.
//!
//! # Crate layout
//!
//! | Module       | Contents                                              |
//! |--------------|-------------------------------------------------------|
//! | [`sim`]      | `Sim<R>`: tick loop, events, pause/resume/reset        |
//! | [`builder`]  | `SimBuilder`                                          |
//! | [`gate`]     | `DirectorGate`, `Ticket`: cadence and in-flight slot  |
//! | [`observer`] | `SimObserver`, `NoopObserver`                         |
//! | [`config`]   | `load_config`: TOML → validated `SimConfig`           |
//! | [`error`]    | `SimError`, `SimResult<T>`                            |
//!
//! [`WorldState`]: city_world::WorldState

pub mod builder;
pub mod config;
pub mod error;
pub mod gate;
pub mod observer;
pub mod sim;


pub use builder::SimBuilder;
pub use config::{load_config, parse_config};
pub use error::{SimError, SimResult};
pub use gate::{DirectorGate, GateDecision, Ticket};
pub use observer::{NoopObserver, SimObserver};
pub use sim::Sim;
