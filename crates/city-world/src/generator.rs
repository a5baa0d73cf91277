//! Procedural city generation.
//!
//! # Algorithm
//!
//! 1. **Buildings**: `building_count` placement attempts.  Each attempt
//!    samples a position and redraws up to 5 times while it sits within 3
//!    units of an already placed building; an attempt that still collides is
//!    skipped.  Kinds and colors cycle through [`BuildingKind::ALL`].
//! 2. **Agents**: cars then pedestrians, each at a position redrawn up to 5
//!    times while within 1.5 units of a building (best effort), with a
//!    destination redrawn up to 10 times while closer than the kind's
//!    minimum trip distance.  All start `moving`.
//! 3. **Roads**: the full open lattice.
//!
//! Separation checks go through an R-tree of placed building positions, so
//! placement stays O(n log n) however dense the city gets.

use rstar::RTree;
use tracing::info;

use city_agent::{Agent, AgentBuilder, AgentStatus, KindProfile};
use city_core::{AgentKind, BuildingId, Position, SimRng, WorldConfig};
use city_spatial::RoadNetwork;

use crate::{Building, BuildingKind, WorldState};

const BUILDING_SEPARATION: f32 = 3.0;
const BUILDING_RETRIES: usize = 5;
const AGENT_CLEARANCE: f32 = 1.5;
const AGENT_RETRIES: usize = 5;
const DESTINATION_RETRIES: usize = 10;

/// Builds a fresh [`WorldState`] from a [`WorldConfig`].
#[derive(Clone, Debug)]
pub struct WorldGenerator {
    pub config: WorldConfig,
}

impl WorldGenerator {
    pub fn new(config: WorldConfig) -> Self {
        Self { config }
    }

    /// Generate a city.  Reproducible only if `rng` was seeded.
    pub fn generate(&self, rng: &mut SimRng) -> WorldState {
        let (buildings, footprint) = self.place_buildings(rng);

        let mut agents = Vec::with_capacity(self.config.agent_count());
        for (kind, count) in [
            (AgentKind::Car, self.config.car_count),
            (AgentKind::Npc, self.config.npc_count),
        ] {
            let profile = KindProfile::for_kind(kind);
            for i in 0..count {
                agents.push(self.spawn_agent(kind, i, &profile, &footprint, rng));
            }
        }

        info!(
            grid_size = self.config.grid_size,
            buildings = buildings.len(),
            agents = agents.len(),
            "world generated"
        );
        WorldState::new(RoadNetwork::lattice(self.config.grid_size), buildings, agents)
    }

    fn place_buildings(&self, rng: &mut SimRng) -> (Vec<Building>, RTree<[f32; 2]>) {
        let mut buildings = Vec::with_capacity(self.config.building_count);
        let mut footprint: RTree<[f32; 2]> = RTree::new();

        for i in 0..self.config.building_count {
            let mut pos = self.random_position(rng);
            let mut attempts = 0;
            while is_crowded(&footprint, pos, BUILDING_SEPARATION) && attempts < BUILDING_RETRIES {
                pos = self.random_position(rng);
                attempts += 1;
            }
            if is_crowded(&footprint, pos, BUILDING_SEPARATION) {
                continue;
            }

            let kind = BuildingKind::cycle(i);
            footprint.insert([pos.x, pos.y]);
            buildings.push(Building {
                id:       BuildingId(i as u32 + 1),
                position: pos,
                size:     0.3 + rng.random::<f32>() * 0.7,
                kind,
                color:    kind.color().to_owned(),
            });
        }
        (buildings, footprint)
    }

    fn spawn_agent(
        &self,
        kind:      AgentKind,
        i:         usize,
        profile:   &KindProfile,
        footprint: &RTree<[f32; 2]>,
        rng:       &mut SimRng,
    ) -> Agent {
        let mut start = self.random_position(rng);
        let mut attempts = 0;
        while is_crowded(footprint, start, AGENT_CLEARANCE) && attempts < AGENT_RETRIES {
            start = self.random_position(rng);
            attempts += 1;
        }

        let destination = self.random_destination(start, profile.min_trip_distance, rng);
        let speed = rng.gen_range(profile.speed_range.clone());

        AgentBuilder::new(kind, i as u32 + 1)
            .at(start)
            .heading_to(destination)
            .speed(speed)
            .color(profile.color(i as u32))
            .status(AgentStatus::Moving)
            .build()
    }

    /// A destination at least `min_distance` away, best effort.
    fn random_destination(&self, from: Position, min_distance: f32, rng: &mut SimRng) -> Position {
        let mut dest = self.random_position(rng);
        let mut attempts = 1;
        while from.distance(dest) < min_distance && attempts < DESTINATION_RETRIES {
            dest = self.random_position(rng);
            attempts += 1;
        }
        dest
    }

    /// Uniform over `[0, grid_size - 1)` on both axes.
    fn random_position(&self, rng: &mut SimRng) -> Position {
        let max = self.config.grid_size.saturating_sub(1) as f32;
        Position::new(rng.random::<f32>() * max, rng.random::<f32>() * max)
    }
}

/// `true` if any placed point lies strictly within `radius` of `pos`.
fn is_crowded(tree: &RTree<[f32; 2]>, pos: Position, radius: f32) -> bool {
    let r2 = radius * radius;
    tree.locate_within_distance([pos.x, pos.y], r2)
        .any(|p| pos.distance_sq(Position::new(p[0], p[1])) < r2)
}
