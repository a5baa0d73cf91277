//! The `Agent` record and its status machine.
//!
//! # Status transitions
//!
//! ```text
//!            directive w/ target            arrival
//!   idle ───────────────────────► moving ───────────► idle
//!    ▲                              │ ▲
//!    │        no route / stop       │ │ next motion step
//!    │       ┌──────────────────────┘ │
//!    │       ▼                        │
//!    └── stopped ◄── accident    emergency (directive)
//! ```
//!
//! `stopped` is sticky: the motion model leaves a stopped agent untouched
//! until a directive with a target moves it again.

use city_core::{AgentId, AgentKind, GridPoint, Position};

use crate::Directive;

// ── AgentStatus ───────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum AgentStatus {
    #[default]
    Idle,
    Moving,
    Stopped,
    Emergency,
}

impl AgentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AgentStatus::Idle      => "idle",
            AgentStatus::Moving    => "moving",
            AgentStatus::Stopped   => "stopped",
            AgentStatus::Emergency => "emergency",
        }
    }
}

impl std::fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Agent ─────────────────────────────────────────────────────────────────────

/// A car or pedestrian moving through the city.
///
/// Effective speed is `base_speed × speed_multiplier`; the multiplier is the
/// only thing an emergency directive changes, so boosts never compound.
/// Snapshots carry the effective value as `speed`; it is ignored on input.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Agent {
    pub id:                  AgentId,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind:                AgentKind,
    pub position:            Position,
    pub destination:         Option<Position>,
    pub status:              AgentStatus,
    pub base_speed:          f32,
    pub speed_multiplier:    f32,
    pub color:               String,
    /// Cached route.  Empty means "no route yet".
    pub path:                Vec<GridPoint>,
    pub current_instruction: Option<Directive>,
}

#[cfg(feature = "serde")]
impl serde::Serialize for Agent {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut s = serializer.serialize_struct("Agent", 11)?;
        s.serialize_field("id", &self.id)?;
        s.serialize_field("type", &self.kind)?;
        s.serialize_field("position", &self.position)?;
        s.serialize_field("destination", &self.destination)?;
        s.serialize_field("status", &self.status)?;
        s.serialize_field("speed", &self.speed())?;
        s.serialize_field("baseSpeed", &self.base_speed)?;
        s.serialize_field("speedMultiplier", &self.speed_multiplier)?;
        s.serialize_field("color", &self.color)?;
        s.serialize_field("path", &self.path)?;
        s.serialize_field("currentInstruction", &self.current_instruction)?;
        s.end()
    }
}

impl Agent {
    /// Per-tick speed factor used by the motion model.
    #[inline]
    pub fn speed(&self) -> f32 {
        self.base_speed * self.speed_multiplier
    }

    /// `true` if the motion model must leave this agent untouched.
    #[inline]
    pub fn is_frozen(&self) -> bool {
        self.status == AgentStatus::Stopped
    }

    /// Halt in place and forget the trip.
    pub fn stop(&mut self) {
        self.status = AgentStatus::Stopped;
        self.destination = None;
        self.path.clear();
    }

    /// Snap to the destination and go idle.  Keeps the speed multiplier.
    pub fn arrive(&mut self) {
        if let Some(dest) = self.destination.take() {
            self.position = dest;
        }
        self.status = AgentStatus::Idle;
        self.path.clear();
    }

    /// Start a new trip toward `target` with a fresh route.
    pub fn head_to(&mut self, target: Position, status: AgentStatus) {
        self.destination = Some(target);
        self.status = status;
        self.path.clear();
    }
}
