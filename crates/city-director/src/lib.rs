//! `city-director`: the boundary between the engine and the external
//! planner (the "Director").
//!
//! The planner is a loosely typed collaborator, usually a language model
//! behind some transport this crate knows nothing about.  Everything that
//! crosses the boundary is validated here into closed engine types before it
//! reaches [`WorldState::apply_plan`].
//!
//! # Crate layout
//!
//! | Module       | Contents                                                    |
//! |--------------|-------------------------------------------------------------|
//! | [`request`]  | `DirectorRequest`, `WorldSummary`: what the planner sees    |
//! | [`wire`]     | Raw serde shapes of planner responses                       |
//! | [`parse`]    | `parse_response`: text → validated `DirectorPlan`           |
//! | [`fallback`] | `fallback_plan`: keep-going plan when parsing fails         |
//! | [`planner`]  | `Planner` trait, `ScriptedPlanner`                          |
//! | [`error`]    | `DirectorError`, `DirectorResult<T>`                        |
//!
//! [`WorldState::apply_plan`]: city_world::WorldState::apply_plan

pub mod error;
pub mod fallback;
pub mod parse;
pub mod planner;
pub mod request;
pub mod wire;

#[cfg(test)]
mod tests;

pub use error::{DirectorError, DirectorResult};
pub use fallback::{FALLBACK_REASONING, fallback_plan};
pub use parse::{extract_json, parse_response, strip_code_fences};
pub use planner::{Planner, ScriptedPlanner};
pub use request::{
    AgentSummary, AssetSummary, DirectorRequest, EventSummary, RoadSummary, SYSTEM_PROMPT,
    WorldSummary, summarize,
};
