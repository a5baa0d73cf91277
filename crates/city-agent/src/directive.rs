//! Director instructions and how they land on an agent.
//!
//! Directives arrive already validated: the `action` is a closed enum and the
//! agent id parsed.  What is left to decide here is the per-agent effect.

use city_core::{AgentId, Position};

use crate::{Agent, AgentStatus};

/// Speed multiplier granted by `emergency_response`.
pub const EMERGENCY_SPEED_MULTIPLIER: f32 = 1.5;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DirectiveAction {
    Move,
    Stop,
    Reroute,
    EmergencyResponse,
    Patrol,
}

impl DirectiveAction {
    pub const ALL: [DirectiveAction; 5] = [
        DirectiveAction::Move,
        DirectiveAction::Stop,
        DirectiveAction::Reroute,
        DirectiveAction::EmergencyResponse,
        DirectiveAction::Patrol,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DirectiveAction::Move              => "move",
            DirectiveAction::Stop              => "stop",
            DirectiveAction::Reroute           => "reroute",
            DirectiveAction::EmergencyResponse => "emergency_response",
            DirectiveAction::Patrol            => "patrol",
        }
    }

    /// `false` only for `stop`, which ignores any target it carries.
    pub fn uses_target(self) -> bool {
        self != DirectiveAction::Stop
    }

    /// Parse the wire name.  `None` for anything unrecognised.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.as_str() == name)
    }
}

impl std::fmt::Display for DirectiveAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low    => "low",
            Priority::Medium => "medium",
            Priority::High   => "high",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "low"    => Some(Priority::Low),
            "medium" => Some(Priority::Medium),
            "high"   => Some(Priority::High),
            _        => None,
        }
    }
}

/// One per-agent instruction from the Director.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Directive {
    pub agent_id:  AgentId,
    pub action:    DirectiveAction,
    pub target:    Option<Position>,
    pub priority:  Option<Priority>,
    pub reasoning: Option<String>,
}

impl Directive {
    pub fn new(agent_id: AgentId, action: DirectiveAction) -> Self {
        Self { agent_id, action, target: None, priority: None, reasoning: None }
    }

    pub fn with_target(mut self, target: Position) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_reasoning(mut self, reasoning: impl Into<String>) -> Self {
        self.reasoning = Some(reasoning.into());
        self
    }
}

impl Agent {
    /// Apply `directive` to this agent.
    ///
    /// Returns `false` (and leaves the agent untouched) when an action that
    /// moves the agent targets a point outside a `grid_size × grid_size`
    /// grid.  Otherwise the directive is recorded as `current_instruction`,
    /// even when a missing target makes it a motion no-op.
    pub fn apply_directive(&mut self, directive: &Directive, grid_size: u32) -> bool {
        if let Some(target) = directive.target {
            if directive.action.uses_target() && !target.in_grid(grid_size) {
                return false;
            }
        }
        self.current_instruction = Some(directive.clone());

        match (directive.action, directive.target) {
            (DirectiveAction::Stop, _) => {
                self.stop();
                self.speed_multiplier = 1.0;
            }
            (DirectiveAction::EmergencyResponse, Some(target)) => {
                self.head_to(target, AgentStatus::Emergency);
                self.speed_multiplier = EMERGENCY_SPEED_MULTIPLIER;
            }
            (DirectiveAction::Move | DirectiveAction::Reroute | DirectiveAction::Patrol, Some(target)) => {
                self.head_to(target, AgentStatus::Moving);
                self.speed_multiplier = 1.0;
            }
            (_, None) => {}
        }
        true
    }
}
