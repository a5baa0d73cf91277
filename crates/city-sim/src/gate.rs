//! Director cadence and in-flight bookkeeping.
//!
//! At most one planner request is outstanding.  A slot that comes due while
//! one is in flight is skipped rather than queued, and the cadence moves on.
//! Every request carries a [`Ticket`] stamped with the runner's epoch so a
//! reply that arrives after a reset can be recognised and dropped.

use city_core::Tick;

/// Identifies one issued planner request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Ticket {
    /// Runner epoch at issue time.  Bumped by every reset.
    pub epoch:     u64,
    pub issued_at: Tick,
}

/// What [`DirectorGate::poll`] decided for the current tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateDecision {
    /// Not due yet.
    Wait,
    /// Due, but a request is still outstanding.
    Skipped,
    /// Due and free: a new request may go out under this ticket.
    Issue(Ticket),
}

#[derive(Clone, Debug)]
pub struct DirectorGate {
    interval:  u64,
    next_due:  Tick,
    in_flight: Option<Ticket>,
}

impl DirectorGate {
    /// A gate that fires on its first poll, then every `interval_ticks`.
    pub fn new(interval_ticks: u64) -> Self {
        Self { interval: interval_ticks.max(1), next_due: Tick::ZERO, in_flight: None }
    }

    pub fn interval_ticks(&self) -> u64 {
        self.interval
    }

    pub fn next_due(&self) -> Tick {
        self.next_due
    }

    pub fn in_flight(&self) -> Option<Ticket> {
        self.in_flight
    }

    pub fn poll(&mut self, now: Tick, epoch: u64) -> GateDecision {
        if now < self.next_due {
            return GateDecision::Wait;
        }
        self.next_due = now + self.interval;
        if self.in_flight.is_some() {
            return GateDecision::Skipped;
        }
        let ticket = Ticket { epoch, issued_at: now };
        self.in_flight = Some(ticket);
        GateDecision::Issue(ticket)
    }

    /// Release the slot held by `ticket`.  Returns `false` if `ticket` was
    /// not the outstanding request (already released, or superseded).
    pub fn complete(&mut self, ticket: Ticket) -> bool {
        if self.in_flight == Some(ticket) {
            self.in_flight = None;
            true
        } else {
            false
        }
    }

    /// Forget any outstanding request and fire again on the next poll.
    pub fn reset(&mut self, now: Tick) {
        self.in_flight = None;
        self.next_due = now;
    }
}
