//! Fluent builder for constructing a [`Sim`].

use city_core::{SimConfig, SimRng};
use city_director::Planner;
use city_mobility::MotionModel;
use city_spatial::Router;
use city_world::{WorldGenerator, WorldState};

use crate::{DirectorGate, Sim, SimResult};

/// Fluent builder for [`Sim<R>`].
///
/// # Optional inputs (have defaults)
///
/// | Method              | Default                                        |
/// |---------------------|------------------------------------------------|
/// | `.world(w)`         | Generated from `config.world` and the seed     |
/// | `.planner(p)`       | None: drive the Director externally            |
/// | `.scenario(s)`      | Empty                                          |
/// | `.fallback(b)`      | `true`: unparsable replies use the fallback    |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, AStarRouter)
///     .planner(ScriptedPlanner::new(replies))
///     .scenario("rush hour downtown")
///     .build()?;
/// sim.run_ticks(600, &mut NoopObserver);
/// ```
pub struct SimBuilder<R: Router> {
    config:   SimConfig,
    router:   R,
    world:    Option<WorldState>,
    planner:  Option<Box<dyn Planner>>,
    scenario: String,
    fallback: bool,
}

impl<R: Router> SimBuilder<R> {
    pub fn new(config: SimConfig, router: R) -> Self {
        Self {
            config,
            router,
            world:    None,
            planner:  None,
            scenario: String::new(),
            fallback: true,
        }
    }

    /// Start from a prepared world instead of generating one.
    pub fn world(mut self, world: WorldState) -> Self {
        self.world = Some(world);
        self
    }

    /// Consult `planner` synchronously whenever the Director cadence is due.
    pub fn planner(mut self, planner: impl Planner + 'static) -> Self {
        self.planner = Some(Box::new(planner));
        self
    }

    pub fn scenario(mut self, scenario: impl Into<String>) -> Self {
        self.scenario = scenario.into();
        self
    }

    pub fn fallback(mut self, enabled: bool) -> Self {
        self.fallback = enabled;
        self
    }

    /// Validate the config, generate the world if none was supplied, and
    /// return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<R>> {
        self.config.validate()?;

        let mut rng = SimRng::from_seed_opt(self.config.seed);
        let world = match self.world {
            Some(w) => w,
            None => WorldGenerator::new(self.config.world.clone()).generate(&mut rng),
        };

        Ok(Sim {
            clock:    self.config.make_clock(),
            gate:     DirectorGate::new(self.config.director_interval_ticks()),
            config:   self.config,
            world,
            motion:   MotionModel::new(self.router),
            rng,
            planner:  self.planner,
            scenario: self.scenario,
            fallback: self.fallback,
            paused:   false,
            epoch:    0,
        })
    }
}
