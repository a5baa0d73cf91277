//! Unit tests for city-mobility.

use city_agent::{Agent, AgentBuilder, AgentStatus};
use city_core::{AgentKind, GridPoint, Position};
use city_spatial::{AStarRouter, RoadNetwork};

use crate::{MotionModel, StepOutcome, StepTally};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn model() -> MotionModel<AStarRouter> {
    MotionModel::new(AStarRouter)
}

fn car(from: (f32, f32), to: (f32, f32), speed: f32) -> Agent {
    AgentBuilder::new(AgentKind::Car, 0)
        .at(Position::new(from.0, from.1))
        .heading_to(Position::new(to.0, to.1))
        .speed(speed)
        .build()
}

fn run(model: &MotionModel<AStarRouter>, mut agent: Agent, net: &RoadNetwork, ticks: usize) -> Agent {
    for _ in 0..ticks {
        agent = model.advance(agent, net).0;
    }
    agent
}

// ── Status handling ───────────────────────────────────────────────────────────

#[cfg(test)]
mod status {
    use super::*;

    #[test]
    fn stopped_agent_is_frozen() {
        let net = RoadNetwork::lattice(10);
        let mut a = car((1.3, 2.7), (8.0, 8.0), 1.0);
        a.status = AgentStatus::Stopped;
        a.path = vec![GridPoint::new(1, 3), GridPoint::new(2, 3)];
        let (after, outcome) = model().advance(a.clone(), &net);
        assert_eq!(outcome, StepOutcome::Frozen);
        assert_eq!(after, a);
    }

    #[test]
    fn no_destination_goes_idle() {
        let net = RoadNetwork::lattice(10);
        let mut a = car((1.0, 1.0), (2.0, 2.0), 1.0);
        a.destination = None;
        let (after, outcome) = model().advance(a, &net);
        assert_eq!(outcome, StepOutcome::Idle);
        assert_eq!(after.status, AgentStatus::Idle);
        assert_eq!(after.position, Position::new(1.0, 1.0));
    }

    #[test]
    fn unreachable_destination_stops_agent() {
        let net = RoadNetwork::lattice(10);
        let a = car((1.0, 1.0), (15.0, 2.0), 1.0);
        let (after, outcome) = model().advance(a, &net);
        assert_eq!(outcome, StepOutcome::NoRoute);
        assert_eq!(after.status, AgentStatus::Stopped);
        assert!(after.path.is_empty());
    }

    #[test]
    fn already_at_destination_arrives_in_one_tick() {
        let net = RoadNetwork::lattice(10);
        let a = car((3.0, 3.0), (3.0, 3.0), 0.5);
        let (after, outcome) = model().advance(a, &net);
        assert_eq!(outcome, StepOutcome::Arrived);
        assert_eq!(after.status, AgentStatus::Idle);
        assert!(after.destination.is_none());
        assert!(after.path.is_empty());
        assert_eq!(after.position, Position::new(3.0, 3.0));
    }

    #[test]
    fn emergency_agent_reports_moving_after_a_step() {
        let net = RoadNetwork::lattice(10);
        let mut a = car((0.0, 0.0), (0.0, 5.0), 1.0);
        a.status = AgentStatus::Emergency;
        a.speed_multiplier = 1.5;
        let (after, _) = model().advance(a, &net);
        assert_eq!(after.status, AgentStatus::Moving);
        assert_eq!(after.speed_multiplier, 1.5);
    }
}

// ── Stepping ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod stepping {
    use super::*;

    #[test]
    fn first_step_computes_path_and_moves() {
        let net = RoadNetwork::lattice(10);
        let a = car((0.0, 0.0), (0.0, 9.0), 1.0);
        let (after, outcome) = model().advance(a, &net);
        assert_eq!(outcome, StepOutcome::Moved);
        assert_eq!(after.path.len(), 10);
        assert_eq!(after.position.x, 0.0);
        assert!((after.position.y - 0.1).abs() < 1e-6);
        assert_eq!(after.status, AgentStatus::Moving);
    }

    #[test]
    fn speed_scales_step() {
        let net = RoadNetwork::lattice(10);
        let slow = model().advance(car((0.0, 0.0), (0.0, 9.0), 0.5), &net).0;
        assert!((slow.position.y - 0.05).abs() < 1e-6);
    }

    #[test]
    fn off_path_agent_heads_for_first_waypoint() {
        let m = model();
        let path = vec![GridPoint::new(4, 4), GridPoint::new(5, 4)];
        assert_eq!(m.next_target(&path, Position::new(1.0, 1.0)), Some(Position::new(4.0, 4.0)));
        assert_eq!(m.next_target(&path, Position::new(4.3, 3.8)), Some(Position::new(5.0, 4.0)));
        assert_eq!(m.next_target(&path, Position::new(5.0, 4.2)), None);
    }

    #[test]
    fn standing_on_waypoint_targets_the_next() {
        let net = RoadNetwork::lattice(10);
        let mut a = car((0.0, 0.95), (0.0, 9.0), 1.0);
        a.path = vec![GridPoint::new(0, 0), GridPoint::new(0, 1), GridPoint::new(0, 2)];
        let (after, outcome) = model().advance(a, &net);
        assert_eq!(outcome, StepOutcome::Moved);
        assert!((after.position.y - 1.05).abs() < 1e-5);
        assert_eq!(after.path.len(), 3);
    }

    #[test]
    fn halfway_point_keeps_moving_forward() {
        let net = RoadNetwork::lattice(10);
        let mut a = car((0.0, 0.5), (0.0, 9.0), 1.0);
        a.path = vec![GridPoint::new(0, 0), GridPoint::new(0, 1), GridPoint::new(0, 2)];
        let (after, _) = model().advance(a, &net);
        assert!(after.position.y > 0.5);
    }

    #[test]
    fn off_path_agent_snaps_onto_close_waypoint() {
        let net = RoadNetwork::lattice(10);
        let mut a = car((3.0, 2.45), (3.0, 9.0), 10.0);
        a.path = vec![GridPoint::new(3, 3), GridPoint::new(3, 4)];
        let (after, outcome) = model().advance(a, &net);
        assert_eq!(outcome, StepOutcome::ReachedWaypoint);
        assert_eq!(after.position, Position::new(3.0, 3.0));
        assert_eq!(after.path, vec![GridPoint::new(3, 4)]);
    }

    #[test]
    fn consuming_waypoint_truncates_path() {
        let net = RoadNetwork::lattice(10);
        let mut a = car((0.0, 0.4), (0.0, 9.0), 7.0);
        a.path = vec![GridPoint::new(0, 0), GridPoint::new(0, 1), GridPoint::new(0, 2)];
        let (after, outcome) = model().advance(a, &net);
        assert_eq!(outcome, StepOutcome::ReachedWaypoint);
        assert_eq!(after.position, Position::new(0.0, 1.0));
        assert_eq!(after.path, vec![GridPoint::new(0, 2)]);
    }

    #[test]
    fn consuming_last_waypoint_clears_path() {
        let net = RoadNetwork::lattice(10);
        let mut a = car((0.0, 1.4), (0.0, 9.0), 7.0);
        a.path = vec![GridPoint::new(0, 1), GridPoint::new(0, 2)];
        let (after, _) = model().advance(a, &net);
        assert_eq!(after.position, Position::new(0.0, 2.0));
        assert!(after.path.is_empty());
        assert_eq!(after.status, AgentStatus::Moving);

        // Next tick re-plans from (0,2).
        let (after, _) = model().advance(after, &net);
        assert_eq!(after.path.first(), Some(&GridPoint::new(0, 2)));
        assert_eq!(after.path.last(), Some(&GridPoint::new(0, 9)));
    }

    #[test]
    fn position_stays_clamped() {
        let net = RoadNetwork::lattice(10);
        let a = car((0.0, 0.0), (9.0, 9.0), 1.0);
        let after = run(&model(), a, &net, 50);
        assert!(after.position.in_grid(10));
    }
}

// ── End to end ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod trip {
    use super::*;

    #[test]
    fn straight_trip_ends_idle_at_destination() {
        let net = RoadNetwork::lattice(10);
        let a = car((0.0, 0.0), (0.0, 9.0), 1.0);
        let after = run(&model(), a, &net, 200);
        assert_eq!(after.status, AgentStatus::Idle);
        assert_eq!(after.position, Position::new(0.0, 9.0));
        assert!(after.destination.is_none());
        assert!(after.path.is_empty());
    }

    #[test]
    fn diagonal_trip_with_slow_walker() {
        let net = RoadNetwork::lattice(8);
        let mut a = car((1.0, 1.0), (6.0, 4.0), 0.3);
        a.kind = AgentKind::Npc;
        let after = run(&model(), a, &net, 1_000);
        assert_eq!(after.status, AgentStatus::Idle);
        assert_eq!(after.position, Position::new(6.0, 4.0));
    }

    #[test]
    fn tally_counts_outcomes() {
        let net = RoadNetwork::lattice(10);
        let m = model();
        let mut tally = StepTally::default();
        let mut frozen = car((1.0, 1.0), (5.0, 5.0), 1.0);
        frozen.status = AgentStatus::Stopped;
        for a in [frozen, car((0.0, 0.0), (0.0, 9.0), 1.0), car((2.0, 2.0), (2.0, 2.0), 1.0)] {
            tally.record(m.advance(a, &net).1);
        }
        assert_eq!(tally.frozen, 1);
        assert_eq!(tally.moved, 1);
        assert_eq!(tally.arrived, 1);
        assert_eq!(tally.in_motion(), 1);
    }
}
