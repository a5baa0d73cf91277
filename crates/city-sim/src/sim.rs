//! The `Sim` runner and its tick loop.

use tracing::{debug, info, warn};

use city_core::{Position, SimClock, SimConfig, SimRng};
use city_director::{DirectorRequest, Planner, fallback_plan, parse_response};
use city_mobility::{MotionModel, StepTally};
use city_spatial::Router;
use city_world::{DirectorPlan, EventKind, WorldGenerator, WorldState};

use crate::{DirectorGate, GateDecision, SimObserver, SimResult, Ticket};

/// The host-side simulation runner.
///
/// `Sim<R>` owns the single current [`WorldState`] and replaces it on every
/// transition.  Each [`tick`](Self::tick):
///
/// 1. **Motion**: [`WorldState::step_tallied`] moves agents, ages assets,
///    decays the shake.
/// 2. **Snapshot**: every `snapshot_interval_ticks`, observers see the world.
/// 3. **Director**: when the cadence is due and no request is outstanding,
///    the attached [`Planner`] is consulted and its reply applied.
///
/// Hosts whose planner is asynchronous leave the planner unset and drive
/// the Director through [`request_plan`](Self::request_plan) and
/// [`deliver_reply`](Self::deliver_reply) instead.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<R: Router> {
    pub config: SimConfig,

    /// Tick counter and host-time conversion.
    pub clock: SimClock,

    pub(crate) world:    WorldState,
    pub(crate) motion:   MotionModel<R>,
    pub(crate) rng:      SimRng,
    pub(crate) gate:     DirectorGate,
    pub(crate) planner:  Option<Box<dyn Planner>>,
    pub(crate) scenario: String,
    pub(crate) fallback: bool,
    pub(crate) paused:   bool,
    pub(crate) epoch:    u64,
}

impl<R: Router> Sim<R> {
    // ── Queries ───────────────────────────────────────────────────────────

    pub fn world(&self) -> &WorldState {
        &self.world
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Incremented by every [`reset`](Self::reset).
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn gate(&self) -> &DirectorGate {
        &self.gate
    }

    /// The world serialized for a renderer: camelCase JSON.
    pub fn snapshot_json(&self) -> SimResult<String> {
        Ok(serde_json::to_string(&self.world)?)
    }

    // ── Control ───────────────────────────────────────────────────────────

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Regenerate the city from `config.world` and start a new epoch.
    ///
    /// Plans still in flight from the previous epoch are discarded on
    /// delivery.
    pub fn reset<O: SimObserver>(&mut self, observer: &mut O) {
        let world = WorldGenerator::new(self.config.world.clone()).generate(&mut self.rng);
        self.reset_with(world, observer);
    }

    /// Start a new epoch from a caller-supplied world.
    pub fn reset_with<O: SimObserver>(&mut self, world: WorldState, observer: &mut O) {
        self.world = world;
        self.epoch += 1;
        self.clock = self.config.make_clock();
        self.gate.reset(self.clock.current_tick);
        info!(epoch = self.epoch, agents = self.world.agents.len(), "world reset");
        observer.on_reset(&self.world);
    }

    // ── Tick loop ─────────────────────────────────────────────────────────

    /// Run one tick.  Returns `None` while paused.
    pub fn tick<O: SimObserver>(&mut self, observer: &mut O) -> Option<StepTally> {
        if self.paused {
            return None;
        }
        let now = self.clock.current_tick;
        observer.on_tick_start(now);

        if self.config.director_enabled && self.planner.is_some() {
            self.consult_planner(observer);
        }

        let (world, tally) = self.take_world().step_tallied(&self.motion);
        self.world = world;
        self.clock.advance();
        observer.on_tick_end(now, &tally);

        let every = self.config.snapshot_interval_ticks;
        if every > 0 && self.world.tick.0.is_multiple_of(every) {
            observer.on_snapshot(self.world.tick, &self.world);
        }
        Some(tally)
    }

    /// Run `n` ticks.  Paused ticks count toward `n` but do nothing.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) {
        for _ in 0..n {
            self.tick(observer);
        }
    }

    // ── Manual events ─────────────────────────────────────────────────────

    /// Synthesize and apply one event.  Without `at` a random intersection
    /// is used.
    pub fn trigger_event<O: SimObserver>(
        &mut self,
        kind:     EventKind,
        at:       Option<Position>,
        observer: &mut O,
    ) {
        let before = self.world.events.len();
        self.world = self.take_world().trigger_event(kind, at, &mut self.rng);
        if let Some(event) = self.world.events.get(before) {
            info!(id = event.id.0, kind = %event.kind, at = %event.position, "event triggered");
            observer.on_event(event);
        }
    }

    // ── Director ──────────────────────────────────────────────────────────

    /// Ask the gate for a request slot.  Returns the ticket and the request
    /// to send, or `None` if the Director is disabled, paused, not due, or
    /// still busy.
    pub fn request_plan(&mut self) -> Option<(Ticket, DirectorRequest)> {
        if self.paused || !self.config.director_enabled {
            return None;
        }
        match self.gate.poll(self.clock.current_tick, self.epoch) {
            GateDecision::Wait => None,
            GateDecision::Skipped => {
                debug!(tick = self.clock.current_tick.0, "director busy, skipping slot");
                None
            }
            GateDecision::Issue(ticket) => {
                let request = DirectorRequest::new(
                    &self.world,
                    self.config.director_agent_sample,
                    self.scenario.as_str(),
                );
                Some((ticket, request))
            }
        }
    }

    /// Parse a raw planner reply and deliver it.
    ///
    /// An unparsable reply becomes the fallback plan when fallback is
    /// enabled; otherwise the slot is released and the error returned.
    pub fn deliver_reply<O: SimObserver>(
        &mut self,
        ticket:   Ticket,
        reply:    &str,
        observer: &mut O,
    ) -> SimResult<bool> {
        let plan = match parse_response(reply) {
            Ok(plan) => plan,
            Err(e) if self.fallback => {
                warn!(error = %e, "unparsable director reply, using fallback plan");
                fallback_plan(&self.world, &mut self.rng)
            }
            Err(e) => {
                self.gate.complete(ticket);
                return Err(e.into());
            }
        };
        Ok(self.deliver_plan(ticket, &plan, observer))
    }

    /// Apply `plan` unless it belongs to an earlier epoch or the runner is
    /// paused.  Returns whether it was applied.
    pub fn deliver_plan<O: SimObserver>(
        &mut self,
        ticket:   Ticket,
        plan:     &DirectorPlan,
        observer: &mut O,
    ) -> bool {
        self.gate.complete(ticket);
        if ticket.epoch != self.epoch || self.paused {
            info!(
                issued = ticket.issued_at.0,
                epoch = ticket.epoch,
                current = self.epoch,
                paused = self.paused,
                "discarding director plan"
            );
            observer.on_plan_discarded(ticket);
            return false;
        }
        self.world = self.take_world().apply_plan(plan);
        observer.on_plan_applied(self.world.tick, plan);
        true
    }

    /// Release a slot whose request failed in transport.
    pub fn abandon_plan(&mut self, ticket: Ticket) {
        if self.gate.complete(ticket) {
            debug!(issued = ticket.issued_at.0, "director request abandoned");
        }
    }

    fn consult_planner<O: SimObserver>(&mut self, observer: &mut O) {
        let Some((ticket, request)) = self.request_plan() else {
            return;
        };
        let Some(planner) = self.planner.as_mut() else {
            self.abandon_plan(ticket);
            return;
        };
        match planner.complete(&request) {
            Ok(reply) => {
                if let Err(e) = self.deliver_reply(ticket, &reply, observer) {
                    warn!(error = %e, "director reply dropped");
                }
            }
            Err(e) => {
                warn!(error = %e, "director unavailable");
                self.abandon_plan(ticket);
            }
        }
    }

    /// Move the world out of its register for a consuming transition.
    fn take_world(&mut self) -> WorldState {
        std::mem::replace(&mut self.world, WorldState::empty(0))
    }
}

impl<R: Router> std::fmt::Debug for Sim<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sim")
            .field("clock", &self.clock)
            .field("epoch", &self.epoch)
            .field("paused", &self.paused)
            .field("agents", &self.world.agents.len())
            .field("events", &self.world.events.len())
            .finish_non_exhaustive()
    }
}
