//! downtown: a scripted incident drill for the gridcity engine.
//!
//! Generates a city, lets traffic settle, then fires an accident and an
//! emergency downtown.  The Director is played by a scripted planner whose
//! replies react to both incidents; any tick where the script runs dry just
//! keeps the previous orders.
//!
//! ```text
//! RUST_LOG=info cargo run -p downtown -- --ticks 900 --seed 7
//! ```

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use city_core::{Position, SimConfig, Tick};
use city_director::ScriptedPlanner;
use city_mobility::StepTally;
use city_sim::{SimBuilder, SimObserver, Ticket, load_config};
use city_spatial::{AStarRouter, RoadStatus};
use city_world::{DirectorPlan, EventKind, SimulationEvent, WorldState};

#[derive(Debug, Parser)]
#[command(name = "downtown", about = "Run a scripted incident drill on a generated grid city")]
struct Args {
    /// TOML config file.  Defaults are used when absent.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Ticks to simulate.
    #[arg(long, default_value_t = 600)]
    ticks: u64,

    /// Override the config seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Override the grid size.
    #[arg(long)]
    grid: Option<u32>,

    /// Scenario text forwarded to the Director.
    #[arg(long, default_value = "Evening rush hour downtown")]
    prompt: String,

    /// Write the final world snapshot as JSON to this path.
    #[arg(long)]
    snapshot: Option<PathBuf>,
}

// ── Scripted Director ─────────────────────────────────────────────────────────

/// One reply per Director slot.  The first slots come before any incident,
/// so they only set the tone; later ones react to the accident.
fn director_script(accident: Position, grid_size: u32) -> Vec<String> {
    let (x, y) = (accident.x, accident.y);
    let detour = (x + 3.0).min(grid_size.saturating_sub(1) as f32);
    vec![
        r#"{"globalStrategy": "Normal flow, keep patrols moving", "instructions": []}"#.into(),
        r#"{"globalStrategy": "Normal flow"}"#.into(),
        format!(
            r#"```json
{{
  "instructions": [
    {{"agentId": "car-1", "action": "reroute", "target": {{"x": {detour}, "y": {y}}}, "priority": "high",
      "reasoning": "avoid the blocked junction"}},
    {{"agentId": "car-2", "action": "emergency_response", "target": {{"x": {x}, "y": {y}}}, "priority": "high"}},
    {{"agentId": "npc-1", "action": "stop", "priority": "medium"}}
  ],
  "assetOps": [
    {{"op": "add", "kind": "police_barrier", "position": {{"x": {x}, "y": {y}}}, "ttl": 200}},
    {{"op": "add", "kind": "ambulance", "position": {{"x": {x}, "y": {y}}}}}
  ],
  "worldShake": true,
  "globalStrategy": "Seal the crash site and route traffic around it"
}}
```"#
        ),
        // Unparsable on purpose: the runner falls back to keep-going orders.
        "Sorry, I lost track of the city.".into(),
        format!(
            r#"{{"assetOps": [{{"op": "remove", "kind": "police_barrier"}},
                              {{"op": "add", "kind": "repair_crane", "position": {{"x": {x}, "y": {y}}}, "ttl": 150}}],
                "globalStrategy": "Clear the barrier and start repairs"}}"#
        ),
    ]
}

// ── Observer ──────────────────────────────────────────────────────────────────

#[derive(Default)]
struct DrillReport {
    arrivals:    usize,
    no_route:    usize,
    peak_moving: usize,
    plans:       usize,
    directives:  usize,
    discarded:   usize,
    events:      Vec<SimulationEvent>,
    last_tick:   Tick,
}

impl SimObserver for DrillReport {
    fn on_tick_end(&mut self, tick: Tick, tally: &StepTally) {
        self.arrivals += tally.arrived;
        self.no_route += tally.no_route;
        self.peak_moving = self.peak_moving.max(tally.in_motion());
        self.last_tick = tick;
    }

    fn on_event(&mut self, event: &SimulationEvent) {
        self.events.push(event.clone());
    }

    fn on_plan_applied(&mut self, tick: Tick, plan: &DirectorPlan) {
        self.plans += 1;
        self.directives += plan.directives.len();
        info!(%tick, directives = plan.directives.len(), assets = plan.asset_ops.len(), "plan applied");
    }

    fn on_plan_discarded(&mut self, _ticket: Ticket) {
        self.discarded += 1;
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => SimConfig { seed: Some(42), ..SimConfig::default() },
    };
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(grid) = args.grid {
        config.world.grid_size = grid;
    }

    let grid_size = config.world.grid_size;
    let centre = (grid_size / 2) as f32;
    let accident = Position::new(centre, centre);

    println!("=== downtown: gridcity incident drill ===");
    println!(
        "Grid: {0}×{0}  |  Cars: {1}  |  NPCs: {2}  |  Ticks: {3}  |  Seed: {4:?}",
        config.world.grid_size,
        config.world.car_count,
        config.world.npc_count,
        args.ticks,
        config.seed,
    );

    let mut sim = SimBuilder::new(config, AStarRouter)
        .planner(ScriptedPlanner::new(director_script(accident, grid_size)))
        .scenario(args.prompt.as_str())
        .build()?;
    println!(
        "World: {} agents, {} buildings, {} roads",
        sim.world().agents.len(),
        sim.world().buildings.len(),
        sim.world().roads.road_count(),
    );

    let mut report = DrillReport::default();
    let accident_at = args.ticks / 6;
    let emergency_at = args.ticks / 2;

    let started = Instant::now();
    for t in 0..args.ticks {
        if t == accident_at {
            sim.trigger_event(EventKind::Accident, Some(accident), &mut report);
        }
        if t == emergency_at {
            sim.trigger_event(EventKind::Emergency, None, &mut report);
        }
        sim.tick(&mut report);
    }
    let elapsed = started.elapsed();

    let world: &WorldState = sim.world();
    println!();
    println!("Simulated {} ticks in {:.2?} ({})", args.ticks, elapsed, sim.clock);
    println!("Last tick        : {}", report.last_tick);
    println!("Arrivals         : {}", report.arrivals);
    println!("No-route stops   : {}", report.no_route);
    println!("Peak in motion   : {}", report.peak_moving);
    println!(
        "Director         : {} plans applied, {} directives, {} discarded",
        report.plans, report.directives, report.discarded
    );
    println!(
        "Roads            : {} blocked, {} congested",
        world.roads.count_with_status(RoadStatus::Blocked),
        world.roads.count_with_status(RoadStatus::Congested),
    );
    println!("Assets on map    : {}", world.assets.len());
    for e in &report.events {
        println!("Event {:>3}        : {} at {}", e.id.0, e.description, e.timestamp);
    }

    if let Some(path) = &args.snapshot {
        std::fs::write(path, sim.snapshot_json()?)?;
        println!("Snapshot written : {}", path.display());
    }
    Ok(())
}
