//! `MotionModel`: advances one agent by one tick.

use city_agent::{Agent, AgentStatus};
use city_core::{GridPoint, Position};
use city_spatial::{RoadNetwork, Router};

use crate::StepOutcome;

/// Wraps a [`Router`] with the motion constants used every tick.
///
/// # Type parameter
///
/// `R` must implement [`Router`] (e.g. [`city_spatial::AStarRouter`]).  Swap
/// it at compile time for a different search with no runtime overhead.
#[derive(Clone, Debug)]
pub struct MotionModel<R: Router> {
    /// The routing algorithm.
    pub router: R,

    /// Distance covered per tick per unit of speed.
    pub step_scale: f32,

    /// A waypoint closer than this after a move is consumed.
    pub arrival_threshold: f32,

    /// Per-axis tolerance for "standing on" a waypoint.
    pub waypoint_tolerance: f32,
}

impl<R: Router> MotionModel<R> {
    pub fn new(router: R) -> Self {
        Self {
            router,
            step_scale:         0.1,
            arrival_threshold:  0.2,
            waypoint_tolerance: 0.5,
        }
    }

    /// Advance `agent` by one tick over `network`.
    ///
    /// The network is read-only: road status only changes between ticks.
    pub fn advance(&self, mut agent: Agent, network: &RoadNetwork) -> (Agent, StepOutcome) {
        if agent.is_frozen() {
            return (agent, StepOutcome::Frozen);
        }

        let Some(destination) = agent.destination else {
            agent.status = AgentStatus::Idle;
            return (agent, StepOutcome::Idle);
        };

        if agent.path.is_empty() {
            match self.router.route(network, agent.position, destination) {
                Some(route) => agent.path = route.into_waypoints(),
                None => {
                    agent.status = AgentStatus::Stopped;
                    agent.path.clear();
                    return (agent, StepOutcome::NoRoute);
                }
            }
        }

        let Some(target) = self.next_target(&agent.path, agent.position) else {
            agent.arrive();
            return (agent, StepOutcome::Arrived);
        };

        let grid_size = network.grid_size();
        let step = agent.speed() * self.step_scale;
        agent.position = step_toward(agent.position, target, step, grid_size);
        agent.status = AgentStatus::Moving;

        if agent.position.distance(target) < self.arrival_threshold {
            let reached = self.waypoint_index(&agent.path, target);
            match reached {
                Some(i) if i + 1 < agent.path.len() => {
                    agent.path.drain(..=i);
                }
                _ => agent.path.clear(),
            }
            return (agent, StepOutcome::ReachedWaypoint);
        }

        (agent, StepOutcome::Moved)
    }

    /// The waypoint the agent should head for, or `None` once the last
    /// waypoint is underfoot.
    pub fn next_target(&self, path: &[GridPoint], position: Position) -> Option<Position> {
        match self.waypoint_index(path, position) {
            None => path.first().map(|&w| Position::from(w)),
            Some(i) => path.get(i + 1).map(|&w| Position::from(w)),
        }
    }

    /// Index of the first waypoint within tolerance of `position`.
    fn waypoint_index(&self, path: &[GridPoint], position: Position) -> Option<usize> {
        path.iter()
            .position(|&w| position.near(Position::from(w), self.waypoint_tolerance))
    }
}

/// Move `from` toward `to` by `step`, snapping when within one step.
fn step_toward(from: Position, to: Position, step: f32, grid_size: u32) -> Position {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let dist_sq = dx * dx + dy * dy;
    if dist_sq == 0.0 || dist_sq < step * step {
        return to;
    }
    let dist = dist_sq.sqrt();
    Position::new(from.x + dx / dist * step, from.y + dy / dist * step).clamp_to_grid(grid_size)
}
