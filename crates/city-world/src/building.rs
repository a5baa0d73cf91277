//! Static city buildings.

use city_core::{BuildingId, Position};

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum BuildingKind {
    Residential,
    Commercial,
    Industrial,
    Park,
    Hospital,
    School,
}

impl BuildingKind {
    /// Archetype cycle used by the generator.
    pub const ALL: [BuildingKind; 6] = [
        BuildingKind::Residential,
        BuildingKind::Commercial,
        BuildingKind::Industrial,
        BuildingKind::Park,
        BuildingKind::Hospital,
        BuildingKind::School,
    ];

    pub fn color(self) -> &'static str {
        match self {
            BuildingKind::Residential => "#A8E6CF",
            BuildingKind::Commercial  => "#FFD3B6",
            BuildingKind::Industrial  => "#FFAAA5",
            BuildingKind::Park        => "#88DD88",
            BuildingKind::Hospital    => "#FF6B6B",
            BuildingKind::School      => "#4ECDC4",
        }
    }

    /// The `i`-th archetype in the generator's cycle.
    pub fn cycle(i: usize) -> Self {
        Self::ALL[i % Self::ALL.len()]
    }
}

/// Immutable after generation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Building {
    pub id:       BuildingId,
    pub position: Position,
    /// Footprint scale in `[0.3, 1.0)`.
    pub size:     f32,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind:     BuildingKind,
    pub color:    String,
}
