//! The plan used when a planner reply cannot be parsed.
//!
//! Every agent keeps going: moving agents get `move`, everyone else
//! `patrol`, toward their current destination or a random intersection.

use city_agent::{AgentStatus, Directive, DirectiveAction, Priority};
use city_core::{Position, SimRng};
use city_world::{DirectorPlan, WorldState};

pub const FALLBACK_REASONING: &str = "Fallback instruction due to parsing error";

pub fn fallback_plan(world: &WorldState, rng: &mut SimRng) -> DirectorPlan {
    let n = world.grid_size as f32;
    let directives = world
        .agents
        .iter()
        .map(|agent| {
            let action = if agent.status == AgentStatus::Moving {
                DirectiveAction::Move
            } else {
                DirectiveAction::Patrol
            };
            let target = agent.destination.unwrap_or_else(|| {
                Position::new(
                    (rng.random::<f32>() * n).floor().min(n - 1.0),
                    (rng.random::<f32>() * n).floor().min(n - 1.0),
                )
            });
            Directive::new(agent.id, action)
                .with_target(target)
                .with_priority(Priority::Low)
                .with_reasoning(FALLBACK_REASONING)
        })
        .collect();

    DirectorPlan {
        directives,
        asset_ops: Vec::new(),
        shake: false,
        strategy: Some("Continue normal operations with fallback instructions".into()),
    }
}
