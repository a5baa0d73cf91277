//! Strongly typed identifier wrappers.
//!
//! Numeric IDs (`RoadId`, `BuildingId`, `EventId`, `AssetId`) are
//! `Copy + Ord + Hash` wrappers around a primitive integer.  `AgentId` is
//! different: the Director addresses agents by their human-readable label
//! (`car-12`, `npc-3`), so the ID carries its kind and sequence number and
//! round-trips through that label via `Display` / `FromStr`.

use std::fmt;
use std::str::FromStr;

use crate::{AgentKind, CityError};

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            /// The ID after this one, used by the world's ID counters.
            #[inline]
            pub fn next(self) -> $name {
                $name(self.0 + 1)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

typed_id! {
    /// Index of a road in the lattice's road list.
    pub struct RoadId(u32);
}

typed_id! {
    /// Identifier of a static building.
    pub struct BuildingId(u32);
}

typed_id! {
    /// Identifier of a logged simulation event.  `u64` because the log is
    /// append-only and never compacted.
    pub struct EventId(u64);
}

typed_id! {
    /// Identifier of a transient world asset (fire, barrier, …).
    pub struct AssetId(u32);
}

// ── AgentId ──────────────────────────────────────────────────────────────────

/// Stable identity of an agent for the lifetime of a simulation run.
///
/// Displays as `<kind>-<seq>`, e.g. `car-1`.  Sequence numbers start at 1
/// within each kind.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct AgentId {
    pub kind: AgentKind,
    pub seq:  u32,
}

impl AgentId {
    #[inline]
    pub const fn new(kind: AgentKind, seq: u32) -> Self {
        Self { kind, seq }
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.kind, self.seq)
    }
}

impl FromStr for AgentId {
    type Err = CityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CityError::InvalidAgentId(s.to_owned());
        let (kind, seq) = s.trim().rsplit_once('-').ok_or_else(invalid)?;
        let kind: AgentKind = kind.parse().map_err(|_| invalid())?;
        let seq: u32 = seq.parse().map_err(|_| invalid())?;
        Ok(AgentId::new(kind, seq))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for AgentId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for AgentId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
