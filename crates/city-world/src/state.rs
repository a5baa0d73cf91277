//! `WorldState` and its transformations.
//!
//! Each operation consumes the current snapshot and returns the next one.
//! Operations never fail: malformed per-item input (unknown agent ids,
//! out-of-grid targets, non-finite positions) is skipped and logged.

use rustc_hash::FxHashMap;
use tracing::{debug, info, warn};

use city_agent::{Agent, AgentStatus, Directive};
use city_core::{AgentId, AssetId, EventId, Position, SimRng, Tick};
use city_mobility::{MotionModel, StepTally};
use city_spatial::{RoadNetwork, Router};

use crate::{
    Asset, AssetKind, AssetOp, Building, DEFAULT_ASSET_TTL, DirectorPlan, EVENT_RADIUS, EventKind,
    SimulationEvent, WorldEffects,
};

/// The complete simulation snapshot.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct WorldState {
    pub tick:      Tick,
    pub grid_size: u32,
    pub agents:    Vec<Agent>,
    pub roads:     RoadNetwork,
    pub buildings: Vec<Building>,
    /// Append-only.
    pub events:    Vec<SimulationEvent>,
    pub assets:    Vec<Asset>,
    pub effects:   WorldEffects,

    #[cfg_attr(feature = "serde", serde(skip))]
    next_event: EventId,
    #[cfg_attr(feature = "serde", serde(skip))]
    next_asset: AssetId,
}

impl WorldState {
    /// A world over an existing road network.
    pub fn new(roads: RoadNetwork, buildings: Vec<Building>, agents: Vec<Agent>) -> Self {
        Self {
            tick: Tick::ZERO,
            grid_size: roads.grid_size(),
            agents,
            roads,
            buildings,
            events: Vec::new(),
            assets: Vec::new(),
            effects: WorldEffects::default(),
            next_event: EventId(0),
            next_asset: AssetId(0),
        }
    }

    /// An open lattice with nothing on it.
    pub fn empty(grid_size: u32) -> Self {
        Self::new(RoadNetwork::lattice(grid_size), Vec::new(), Vec::new())
    }

    pub fn with_agents(mut self, agents: impl IntoIterator<Item = Agent>) -> Self {
        self.agents.extend(agents);
        self
    }

    // ── Queries ───────────────────────────────────────────────────────────

    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents.iter().find(|a| a.id == id)
    }

    pub fn count_status(&self, status: AgentStatus) -> usize {
        self.agents.iter().filter(|a| a.status == status).count()
    }

    // ── Tick ──────────────────────────────────────────────────────────────

    /// Advance every agent by one motion step, then age assets and effects.
    pub fn step<R: Router>(self, motion: &MotionModel<R>) -> Self {
        self.step_tallied(motion).0
    }

    /// [`step`](Self::step), also reporting what each agent did.
    pub fn step_tallied<R: Router>(mut self, motion: &MotionModel<R>) -> (Self, StepTally) {
        let mut tally = StepTally::default();
        let roads = &self.roads;
        let agents = std::mem::take(&mut self.agents);
        self.agents = agents
            .into_iter()
            .map(|agent| {
                let (agent, outcome) = motion.advance(agent, roads);
                tally.record(outcome);
                agent
            })
            .collect();

        let before = self.assets.len();
        self.assets.retain_mut(|asset| match asset.ttl.as_mut() {
            Some(ttl) => {
                *ttl = ttl.saturating_sub(1);
                *ttl > 0
            }
            None => true,
        });
        let expired = before - self.assets.len();

        self.effects.decay();
        self.tick = self.tick + 1;

        debug!(
            tick = self.tick.0,
            moving = tally.in_motion(),
            arrived = tally.arrived,
            no_route = tally.no_route,
            expired,
            "world stepped"
        );
        (self, tally)
    }

    // ── Events ────────────────────────────────────────────────────────────

    /// Build an event stamped with the current tick and the next free id.
    ///
    /// Without a description the kind's default text is used.
    pub fn new_event(
        &mut self,
        kind:        EventKind,
        position:    Position,
        description: Option<String>,
    ) -> SimulationEvent {
        let id = self.next_event;
        self.next_event = id.next();
        SimulationEvent {
            id,
            kind,
            position,
            timestamp: self.tick,
            description: description.unwrap_or_else(|| kind.describe(position)),
        }
    }

    /// Apply `event` to roads and agents, then append it to the log.
    ///
    /// Roads whose midpoint lies strictly within [`EVENT_RADIUS`] take the
    /// kind's road status.  Accidents also stop agents within the radius.
    /// Events at non-finite positions are dropped entirely.
    pub fn apply_event(mut self, event: SimulationEvent) -> Self {
        if !event.position.is_finite() {
            warn!(kind = %event.kind, "dropping event with non-finite position");
            return self;
        }

        let mut roads_hit = 0;
        if let Some(status) = event.kind.road_effect() {
            for id in self.roads.roads_within(event.position, EVENT_RADIUS) {
                self.roads.set_status(id, status);
                roads_hit += 1;
            }
        }

        let mut agents_hit = 0;
        if event.kind.stops_agents() {
            for agent in &mut self.agents {
                if agent.position.distance(event.position) < EVENT_RADIUS {
                    agent.status = AgentStatus::Stopped;
                    agents_hit += 1;
                }
            }
        }

        debug!(
            id = event.id.0,
            kind = %event.kind,
            at = %event.position,
            roads_hit,
            agents_hit,
            "event applied"
        );
        if event.id.0 >= self.next_event.0 {
            self.next_event = event.id.next();
        }
        self.events.push(event);
        self
    }

    /// Synthesize and apply an event.  Without a position one is drawn
    /// uniformly from the lattice intersections.
    pub fn trigger_event(mut self, kind: EventKind, at: Option<Position>, rng: &mut SimRng) -> Self {
        let position = at.unwrap_or_else(|| {
            let n = self.grid_size as f32;
            Position::new(
                (rng.random::<f32>() * n).floor().min(n - 1.0),
                (rng.random::<f32>() * n).floor().min(n - 1.0),
            )
        });
        let event = self.new_event(kind, position, None);
        self.apply_event(event)
    }

    // ── Directives ────────────────────────────────────────────────────────

    /// Apply Director instructions.  When several target the same agent the
    /// last one wins; directives for unknown agents are ignored.
    pub fn apply_directives(mut self, directives: &[Directive]) -> Self {
        if directives.is_empty() {
            return self;
        }
        let mut latest: FxHashMap<AgentId, &Directive> = FxHashMap::default();
        for d in directives {
            latest.insert(d.agent_id, d);
        }

        let grid_size = self.grid_size;
        let mut applied = 0;
        let mut rejected = 0;
        for agent in &mut self.agents {
            if let Some(d) = latest.remove(&agent.id) {
                if agent.apply_directive(d, grid_size) {
                    applied += 1;
                } else {
                    rejected += 1;
                    debug!(agent = %agent.id, action = %d.action, "directive target outside grid");
                }
            }
        }
        debug!(applied, rejected, unknown = latest.len(), "directives applied");
        self
    }

    // ── Assets ────────────────────────────────────────────────────────────

    /// Place one asset and return its id.  `ttl: None` never expires.
    pub fn spawn_asset(&mut self, kind: AssetKind, position: Position, ttl: Option<u32>) -> AssetId {
        let id = self.next_asset;
        self.next_asset = id.next();
        self.assets.push(Asset { id, kind, position, ttl });
        id
    }

    /// Apply a batch of asset operations in order.
    pub fn apply_asset_ops(mut self, ops: &[AssetOp]) -> Self {
        for op in ops {
            match op {
                AssetOp::Add { kind, position, ttl } => {
                    if !position.in_grid(self.grid_size) {
                        warn!(%kind, x = position.x, y = position.y, "dropping asset outside the grid");
                        continue;
                    }
                    let id = self.spawn_asset(*kind, *position, Some(ttl.unwrap_or(DEFAULT_ASSET_TTL)));
                    debug!(id = id.0, %kind, at = %position, "asset added");
                }
                AssetOp::Remove(filter) => {
                    let before = self.assets.len();
                    self.assets.retain(|a| !filter.matches(a));
                    debug!(removed = before - self.assets.len(), "assets removed");
                }
            }
        }
        self
    }

    // ── Effects ───────────────────────────────────────────────────────────

    pub fn trigger_shake(mut self) -> Self {
        self.effects.trigger_shake();
        debug!(ticks = self.effects.shake, "world shake triggered");
        self
    }

    // ── Director ──────────────────────────────────────────────────────────

    /// Apply one planner round: directives, then asset operations, then the
    /// shake trigger.
    pub fn apply_plan(self, plan: &DirectorPlan) -> Self {
        if let Some(strategy) = &plan.strategy {
            info!(tick = self.tick.0, %strategy, "director strategy");
        }
        let world = self.apply_directives(&plan.directives).apply_asset_ops(&plan.asset_ops);
        if plan.shake { world.trigger_shake() } else { world }
    }
}
