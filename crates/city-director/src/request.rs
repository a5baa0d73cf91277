//! What the planner gets to see.
//!
//! A full snapshot of a 100×100 city is far too large for a prompt, so the
//! request carries a [`WorldSummary`]: a stride sample of agents, every
//! active event and asset, and only the roads that are not open.

use serde::Serialize;

use city_agent::{AgentStatus, Directive};
use city_core::{AgentId, AgentKind, GridPoint, Position, Tick};
use city_spatial::RoadStatus;
use city_world::{AssetKind, EventKind, WorldState};

/// System prompt describing the reply format the parser accepts.
pub const SYSTEM_PROMPT: &str = r#"You are the Director of a grid-city traffic simulation. You coordinate cars and pedestrians in response to incidents.

Reply with a single JSON object and nothing else:
{
  "instructions": [
    {
      "agentId": "car-12",
      "action": "move|stop|reroute|emergency_response|patrol",
      "target": {"x": number, "y": number},
      "priority": "low|medium|high",
      "reasoning": "short explanation"
    }
  ],
  "assetOps": [
    {"op": "add", "kind": "fire|destroyed_building|police_barrier|traffic_cone|ambulance|repair_crane", "position": {"x": number, "y": number}, "ttl": ticks},
    {"op": "remove", "kind": "optional kind", "position": {"x": number, "y": number}, "radius": number}
  ],
  "shake": false,
  "globalStrategy": "one-sentence coordination plan"
}

Rules:
- Blocked roads: reroute vehicles around them.
- Accidents: stop nearby vehicles, place barriers or cones.
- Congestion: spread traffic over alternative routes.
- Emergencies: send the nearest agents with emergency_response.
- Idle agents: patrol.
- Targets must lie inside the grid."#;

// ── Summary types ─────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentSummary {
    pub id:          AgentId,
    #[serde(rename = "type")]
    pub kind:        AgentKind,
    pub position:    Position,
    pub destination: Option<Position>,
    pub status:      AgentStatus,
    pub speed:       f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instruction: Option<Directive>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSummary {
    #[serde(rename = "type")]
    pub kind:        EventKind,
    pub position:    Position,
    pub timestamp:   Tick,
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RoadSummary {
    pub from:   GridPoint,
    pub to:     GridPoint,
    pub status: RoadStatus,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AssetSummary {
    pub kind:     AssetKind,
    pub position: Position,
    pub ttl:      Option<u32>,
}

/// The planner's view of the world.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldSummary {
    pub tick:            Tick,
    pub grid_size:       u32,
    /// Total agents in the world, sampled or not.
    pub agent_count:     usize,
    pub agents:          Vec<AgentSummary>,
    pub events:          Vec<EventSummary>,
    pub disrupted_roads: Vec<RoadSummary>,
    pub assets:          Vec<AssetSummary>,
}

/// One planner round's input.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectorRequest {
    pub world_state: WorldSummary,
    pub user_prompt: String,
}

impl DirectorRequest {
    pub fn new(world: &WorldState, max_agents: usize, prompt: impl Into<String>) -> Self {
        Self {
            world_state: summarize(world, max_agents),
            user_prompt: prompt.into(),
        }
    }

    /// JSON body for transports that forward the request verbatim.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Human-readable user message listing agents, events, and road status.
    pub fn render_user_message(&self) -> String {
        let s = &self.world_state;
        let mut out = String::from("Current city state:\n\nAGENTS:\n");
        for a in &s.agents {
            out.push_str(&format!(
                "- {} ({}): at ({:.1}, {:.1}), status: {}, ",
                a.id, a.kind, a.position.x, a.position.y, a.status
            ));
            match a.destination {
                Some(d) => out.push_str(&format!("going to ({}, {})\n", d.x, d.y)),
                None => out.push_str("no destination\n"),
            }
        }
        if s.agents.len() < s.agent_count {
            out.push_str(&format!("({} of {} agents shown)\n", s.agents.len(), s.agent_count));
        }

        out.push_str("\nACTIVE EVENTS:\n");
        if s.events.is_empty() {
            out.push_str("No active events\n");
        }
        for e in &s.events {
            out.push_str(&format!(
                "- {} at ({}, {}): {}\n",
                e.kind, e.position.x, e.position.y, e.description
            ));
        }

        out.push_str("\nROAD STATUS:\n");
        if s.disrupted_roads.is_empty() {
            out.push_str("All roads open\n");
        }
        for r in &s.disrupted_roads {
            out.push_str(&format!("- Road from {} to {}: {}\n", r.from, r.to, r.status));
        }

        if !s.assets.is_empty() {
            out.push_str("\nASSETS:\n");
            for a in &s.assets {
                out.push_str(&format!("- {} at ({}, {})\n", a.kind, a.position.x, a.position.y));
            }
        }

        if !self.user_prompt.trim().is_empty() {
            out.push_str(&format!("\nSCENARIO:\n{}\n", self.user_prompt.trim()));
        }
        out.push_str(
            "\nAnalyze the situation and provide instructions for the listed agents \
             to optimize city flow and respond to events.",
        );
        out
    }
}

/// Summarize `world`, sampling at most `max_agents` agents evenly across
/// the agent list so both cars and pedestrians are represented.
pub fn summarize(world: &WorldState, max_agents: usize) -> WorldSummary {
    let total = world.agents.len();
    let stride = if max_agents == 0 { 1 } else { total.div_ceil(max_agents).max(1) };
    let agents = world
        .agents
        .iter()
        .step_by(stride)
        .take(max_agents)
        .map(|a| AgentSummary {
            id:          a.id,
            kind:        a.kind,
            position:    a.position,
            destination: a.destination,
            status:      a.status,
            speed:       a.speed(),
            instruction: a.current_instruction.clone(),
        })
        .collect();

    let events = world
        .events
        .iter()
        .map(|e| EventSummary {
            kind:        e.kind,
            position:    e.position,
            timestamp:   e.timestamp,
            description: e.description.clone(),
        })
        .collect();

    let disrupted_roads = world
        .roads
        .disrupted()
        .map(|(_, r)| RoadSummary { from: r.from, to: r.to, status: r.status })
        .collect();

    let assets = world
        .assets
        .iter()
        .map(|a| AssetSummary { kind: a.kind, position: a.position, ttl: a.ttl })
        .collect();

    WorldSummary {
        tick: world.tick,
        grid_size: world.grid_size,
        agent_count: total,
        agents,
        events,
        disrupted_roads,
        assets,
    }
}
