//! Transient world objects placed and cleared by the Director.
//!
//! Asset operations arrive as a batch of [`AssetOp`]s.  `Add` always
//! succeeds (with a fresh id); `Remove` deletes every asset matched by its
//! [`AssetFilter`].

use city_core::{AssetId, Position};

/// Lifetime of an added asset when the operation names none.
pub const DEFAULT_ASSET_TTL: u32 = 300;

/// Radius of a positional remove when the operation names none.
pub const DEFAULT_REMOVE_RADIUS: f32 = 5.0;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AssetKind {
    Fire,
    DestroyedBuilding,
    PoliceBarrier,
    TrafficCone,
    Ambulance,
    RepairCrane,
}

impl AssetKind {
    pub const ALL: [AssetKind; 6] = [
        AssetKind::Fire,
        AssetKind::DestroyedBuilding,
        AssetKind::PoliceBarrier,
        AssetKind::TrafficCone,
        AssetKind::Ambulance,
        AssetKind::RepairCrane,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AssetKind::Fire              => "fire",
            AssetKind::DestroyedBuilding => "destroyed_building",
            AssetKind::PoliceBarrier     => "police_barrier",
            AssetKind::TrafficCone       => "traffic_cone",
            AssetKind::Ambulance         => "ambulance",
            AssetKind::RepairCrane       => "repair_crane",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == name)
    }
}

impl std::fmt::Display for AssetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Asset {
    pub id:       AssetId,
    pub kind:     AssetKind,
    pub position: Position,
    /// Ticks until expiry.  `None` never expires.
    pub ttl:      Option<u32>,
}

/// Which assets a remove operation deletes.
///
/// Both criteria must hold when both are given.  A filter with neither
/// matches nothing.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct AssetFilter {
    pub kind:   Option<AssetKind>,
    pub near:   Option<Position>,
    /// Inclusive; defaults to [`DEFAULT_REMOVE_RADIUS`].
    pub radius: Option<f32>,
}

impl AssetFilter {
    pub fn by_kind(kind: AssetKind) -> Self {
        Self { kind: Some(kind), ..Self::default() }
    }

    pub fn near(position: Position) -> Self {
        Self { near: Some(position), ..Self::default() }
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = Some(radius);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.kind.is_none() && self.near.is_none()
    }

    pub fn matches(&self, asset: &Asset) -> bool {
        if self.is_empty() {
            return false;
        }
        let kind_ok = self.kind.is_none_or(|k| asset.kind == k);
        let radius = self.radius.unwrap_or(DEFAULT_REMOVE_RADIUS);
        let near_ok = self.near.is_none_or(|p| asset.position.distance(p) <= radius);
        kind_ok && near_ok
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum AssetOp {
    Add {
        kind:     AssetKind,
        position: Position,
        ttl:      Option<u32>,
    },
    Remove(AssetFilter),
}
