//! World-generation and host configuration.
//!
//! Typically loaded from a TOML file by the host (`city_sim::load_config`)
//! and passed to the world generator and the simulation runner.  Every
//! field has a default, so a config file only needs to mention what it
//! overrides.

use crate::time::SimClock;
use crate::{CityError, CityResult};

// ── WorldConfig ──────────────────────────────────────────────────────────────

/// Parameters of the procedurally generated city.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WorldConfig {
    /// Lattice side length.  Intersections occupy `[0, grid_size)` on both
    /// axes.
    pub grid_size: u32,

    /// Building placement attempts.  Attempts that cannot find a free spot
    /// are skipped, so the final count may be lower.
    pub building_count: usize,

    /// Number of cars seeded at generation.
    pub car_count: usize,

    /// Number of pedestrians seeded at generation.
    pub npc_count: usize,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            grid_size:      100,
            building_count: 400,
            car_count:      200,
            npc_count:      300,
        }
    }
}

impl WorldConfig {
    pub fn agent_count(&self) -> usize {
        self.car_count + self.npc_count
    }
}

// ── SimConfig ────────────────────────────────────────────────────────────────

/// Top-level host configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Generated-world parameters.
    pub world: WorldConfig,

    /// Host milliseconds between motion ticks.  50–100 ms keeps a few
    /// hundred agents responsive; not a correctness requirement.
    pub tick_interval_ms: u32,

    /// Host milliseconds between Director planning requests.
    pub director_interval_ms: u32,

    /// Whether the Director is consulted at all.
    pub director_enabled: bool,

    /// Maximum number of agents included in a Director request.
    pub director_agent_sample: usize,

    /// Master RNG seed.  `None` seeds from OS entropy (non-reproducible).
    pub seed: Option<u64>,

    /// Emit an observer snapshot every N ticks.  0 disables snapshots.
    pub snapshot_interval_ticks: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            world:                   WorldConfig::default(),
            tick_interval_ms:        100,
            director_interval_ms:    5_000,
            director_enabled:        true,
            director_agent_sample:   100,
            seed:                    None,
            snapshot_interval_ticks: 0,
        }
    }
}

impl SimConfig {
    /// Reject configurations the engine cannot run.
    pub fn validate(&self) -> CityResult<()> {
        if self.world.grid_size < 2 {
            return Err(CityError::Config(format!(
                "grid_size must be at least 2, got {}",
                self.world.grid_size
            )));
        }
        if self.world.grid_size > 4_096 {
            return Err(CityError::Config(format!(
                "grid_size {} exceeds the supported maximum of 4096",
                self.world.grid_size
            )));
        }
        if self.tick_interval_ms == 0 {
            return Err(CityError::Config("tick_interval_ms must be non-zero".into()));
        }
        if self.director_enabled && self.director_interval_ms < self.tick_interval_ms {
            return Err(CityError::Config(format!(
                "director_interval_ms ({}) must not be shorter than tick_interval_ms ({})",
                self.director_interval_ms, self.tick_interval_ms
            )));
        }
        Ok(())
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.tick_interval_ms)
    }

    /// Director cadence expressed in ticks (at least 1).
    pub fn director_interval_ticks(&self) -> u64 {
        self.make_clock().ticks_for_ms(self.director_interval_ms as u64)
    }
}
