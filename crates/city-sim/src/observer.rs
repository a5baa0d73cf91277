//! Simulation observer trait for progress reporting and data collection.

use city_core::Tick;
use city_mobility::StepTally;
use city_world::{DirectorPlan, SimulationEvent, WorldState};

use crate::Ticket;

/// Callbacks invoked by [`Sim`][crate::Sim] at key points of its lifecycle.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: arrival counter
///
/// ```rust,ignore
/// struct Arrivals(usize);
///
/// impl SimObserver for Arrivals {
///     fn on_tick_end(&mut self, _tick: Tick, tally: &StepTally) {
///         self.0 += tally.arrived;
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called before the motion pass of each tick.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called after the motion pass, with what every agent did.
    fn on_tick_end(&mut self, _tick: Tick, _tally: &StepTally) {}

    /// Called every `config.snapshot_interval_ticks` ticks with the full
    /// world, for renderers and recorders.
    fn on_snapshot(&mut self, _tick: Tick, _world: &WorldState) {}

    /// Called after a manually triggered event has been applied.
    fn on_event(&mut self, _event: &SimulationEvent) {}

    /// Called after a Director plan has been applied.
    fn on_plan_applied(&mut self, _tick: Tick, _plan: &DirectorPlan) {}

    /// Called when a plan arrives for a stale epoch or while paused.
    fn on_plan_discarded(&mut self, _ticket: Ticket) {}

    /// Called after the world has been regenerated.
    fn on_reset(&mut self, _world: &WorldState) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
