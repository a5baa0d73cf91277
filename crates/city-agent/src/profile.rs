//! Per-kind generation parameters.

use std::ops::Range;

use city_core::AgentKind;

pub const CAR_COLORS: [&str; 8] = [
    "#00D9FF", "#00FFB3", "#FF006E", "#FFBE0B", "#FB5607", "#8338EC", "#3A86FF", "#06FFA5",
];

pub const NPC_COLORS: [&str; 6] = [
    "#FFD60A", "#FFC300", "#FF9500", "#FF006E", "#FB5607", "#8338EC",
];

/// How agents of one kind are seeded by the world generator.
#[derive(Clone, Debug, PartialEq)]
pub struct KindProfile {
    /// Base speed is drawn uniformly from this range.
    pub speed_range:       Range<f32>,
    /// Colors are assigned round-robin by sequence number.
    pub palette:           &'static [&'static str],
    /// Destinations closer than this (straight line) are redrawn.
    pub min_trip_distance: f32,
}

impl KindProfile {
    pub fn for_kind(kind: AgentKind) -> Self {
        match kind {
            AgentKind::Car => Self {
                speed_range:       0.5..1.0,
                palette:           &CAR_COLORS,
                min_trip_distance: 20.0,
            },
            AgentKind::Npc => Self {
                speed_range:       0.2..0.5,
                palette:           &NPC_COLORS,
                min_trip_distance: 15.0,
            },
        }
    }

    /// Palette entry for the `seq`-th agent of this kind.
    pub fn color(&self, seq: u32) -> &'static str {
        self.palette[seq as usize % self.palette.len()]
    }
}
