//! `city-agent`: moving entities and the instructions that steer them.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`agent`]     | `Agent`, `AgentStatus`                                    |
//! | [`directive`] | `Directive`, `DirectiveAction`, `Priority`                |
//! | [`profile`]   | `KindProfile` (speed range, palette, trip length)         |
//! | [`builder`]   | `AgentBuilder` (fluent construction)                      |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` (camelCase) on all types.  |

pub mod agent;
pub mod builder;
pub mod directive;
pub mod profile;


pub use agent::{Agent, AgentStatus};
pub use builder::AgentBuilder;
pub use directive::{Directive, DirectiveAction, EMERGENCY_SPEED_MULTIPLIER, Priority};
pub use profile::{CAR_COLORS, KindProfile, NPC_COLORS};
