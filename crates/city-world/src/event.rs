//! Exogenous incidents and their effect radius.

use city_core::{EventId, Position, Tick};
use city_spatial::RoadStatus;

/// Roads and agents strictly closer than this to an event are affected.
pub const EVENT_RADIUS: f32 = 1.5;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum EventKind {
    Accident,
    Congestion,
    Emergency,
}

impl EventKind {
    pub const ALL: [EventKind; 3] = [EventKind::Accident, EventKind::Congestion, EventKind::Emergency];

    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Accident   => "accident",
            EventKind::Congestion => "congestion",
            EventKind::Emergency  => "emergency",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == name)
    }

    /// Status forced onto nearby roads, if any.
    pub fn road_effect(self) -> Option<RoadStatus> {
        match self {
            EventKind::Accident   => Some(RoadStatus::Blocked),
            EventKind::Congestion => Some(RoadStatus::Congested),
            EventKind::Emergency  => None,
        }
    }

    /// `true` if nearby agents are halted.
    pub fn stops_agents(self) -> bool {
        self == EventKind::Accident
    }

    /// Default log line for a manually triggered event.
    pub fn describe(self, at: Position) -> String {
        let what = match self {
            EventKind::Accident   => "Vehicle collision",
            EventKind::Congestion => "Heavy traffic detected",
            EventKind::Emergency  => "Emergency response needed",
        };
        format!("{what} at ({}, {})", at.x, at.y)
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the append-only event log.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SimulationEvent {
    pub id:          EventId,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind:        EventKind,
    pub position:    Position,
    /// Tick at which the event was applied.
    pub timestamp:   Tick,
    pub description: String,
}
