//! Agent kind enum shared by every crate that touches agents.
//!
//! The kind determines an agent's speed range, colour palette, and minimum
//! trip length (see `city-agent`), and forms the prefix of its [`AgentId`]
//! label.
//!
//! [`AgentId`]: crate::AgentId

use std::str::FromStr;

use crate::CityError;

/// What an agent is: a vehicle or a pedestrian.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum AgentKind {
    /// Private vehicle.
    Car,
    /// Pedestrian.
    Npc,
}

impl AgentKind {
    pub const ALL: [AgentKind; 2] = [AgentKind::Car, AgentKind::Npc];

    /// Lowercase label, used as the `AgentId` prefix and in snapshots.
    pub fn as_str(self) -> &'static str {
        match self {
            AgentKind::Car => "car",
            AgentKind::Npc => "npc",
        }
    }
}

impl std::fmt::Display for AgentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AgentKind {
    type Err = CityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "car" => Ok(AgentKind::Car),
            "npc" => Ok(AgentKind::Npc),
            other => Err(CityError::UnknownAgentKind(other.to_owned())),
        }
    }
}
