//! Per-agent step results and their per-tick tally.

/// What one motion step did to one agent.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum StepOutcome {
    /// Agent was `stopped`; nothing changed.
    Frozen,
    /// No destination; agent set `idle`.
    Idle,
    /// Routing failed; agent set `stopped`.
    NoRoute,
    /// Agent snapped to its destination and went `idle`.
    Arrived,
    /// Agent moved and consumed a waypoint.
    ReachedWaypoint,
    /// Agent moved toward its next waypoint.
    Moved,
}

/// Counts of [`StepOutcome`]s across one tick.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct StepTally {
    pub frozen:    usize,
    pub idle:      usize,
    pub no_route:  usize,
    pub arrived:   usize,
    pub waypoints: usize,
    pub moved:     usize,
}

impl StepTally {
    pub fn record(&mut self, outcome: StepOutcome) {
        match outcome {
            StepOutcome::Frozen          => self.frozen += 1,
            StepOutcome::Idle            => self.idle += 1,
            StepOutcome::NoRoute         => self.no_route += 1,
            StepOutcome::Arrived         => self.arrived += 1,
            StepOutcome::ReachedWaypoint => self.waypoints += 1,
            StepOutcome::Moved           => self.moved += 1,
        }
    }

    /// Agents that changed position this tick.
    pub fn in_motion(&self) -> usize {
        self.waypoints + self.moved
    }
}
