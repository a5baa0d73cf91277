//! Simulation time model.
//!
//! # Design
//!
//! Time is a monotonically increasing `Tick` counter, advanced once per
//! whole-world motion update.  The host decides how often that happens; the
//! mapping to wall-clock time is held in `SimClock`:
//!
//!   elapsed_ms = tick * tick_interval_ms
//!
//! Event timestamps, asset TTLs, and the shake countdown are all expressed
//! in ticks, so the engine never reads a wall clock.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ─────────────────────────────────────────────────────────────────

/// Converts between tick counts and host wall-clock milliseconds.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// How many milliseconds of host time one tick represents.
    pub tick_interval_ms: u32,
    /// The current tick, advanced by `SimClock::advance()` each iteration.
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new(tick_interval_ms: u32) -> Self {
        Self {
            tick_interval_ms,
            current_tick: Tick::ZERO,
        }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Host milliseconds elapsed since tick 0.
    #[inline]
    pub fn elapsed_ms(&self) -> u64 {
        self.current_tick.0 * self.tick_interval_ms as u64
    }

    /// How many ticks span `ms` milliseconds? (rounds up, minimum 1)
    #[inline]
    pub fn ticks_for_ms(&self, ms: u64) -> u64 {
        ms.div_ceil(self.tick_interval_ms.max(1) as u64).max(1)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.elapsed_ms() as f64 / 1000.0;
        write!(f, "{} ({secs:.1} s)", self.current_tick)
    }
}
