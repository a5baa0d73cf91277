//! Unit tests for city-spatial.

#[cfg(test)]
mod helpers {
    use city_core::GridPoint;

    use crate::{RoadNetwork, RoadNetworkBuilder, RoadStatus};

    pub fn gp(x: i32, y: i32) -> GridPoint {
        GridPoint::new(x, y)
    }

    /// A single horizontal corridor along y = 0 on a `len × len` grid.
    pub fn corridor(len: i32) -> RoadNetwork {
        let mut b = RoadNetworkBuilder::new(len as u32);
        for x in 0..len - 1 {
            b.add_road(gp(x, 0), gp(x + 1, 0), RoadStatus::Open).unwrap();
        }
        b.build()
    }
}

#[cfg(test)]
mod network {
    use city_core::Position;

    use super::helpers::gp;
    use crate::{RoadNetwork, RoadNetworkBuilder, RoadStatus, SpatialError};

    #[test]
    fn lattice_road_count() {
        let net = RoadNetwork::lattice(10);
        assert_eq!(net.road_count(), 2 * 10 * 9);
        assert!(net.is_complete_lattice());
        assert_eq!(net.count_with_status(RoadStatus::Open), 180);
    }

    #[test]
    fn lattice_first_roads_in_emission_order() {
        let net = RoadNetwork::lattice(3);
        let r0 = net.roads()[0];
        let r1 = net.roads()[1];
        assert_eq!((r0.from, r0.to), (gp(0, 0), gp(1, 0)));
        assert_eq!((r1.from, r1.to), (gp(0, 0), gp(0, 1)));
    }

    #[test]
    fn find_road_either_orientation() {
        let net = RoadNetwork::lattice(5);
        let ab = net.find_road(gp(2, 2), gp(3, 2));
        assert!(ab.is_some());
        assert_eq!(ab, net.find_road(gp(3, 2), gp(2, 2)));
        assert!(net.find_road(gp(2, 2), gp(3, 3)).is_none());
    }

    #[test]
    fn cost_model() {
        assert_eq!(RoadStatus::Open.cost(), 1);
        assert_eq!(RoadStatus::Congested.cost(), 3);
        assert_eq!(RoadStatus::Blocked.cost(), 999);
    }

    #[test]
    fn set_status_changes_cost() {
        let mut net = RoadNetwork::lattice(4);
        let id = net.find_road(gp(1, 1), gp(1, 2)).unwrap();
        net.set_status(id, RoadStatus::Congested);
        assert_eq!(net.edge_cost(gp(1, 2), gp(1, 1)), Some(3));
        assert_eq!(net.disrupted().count(), 1);
    }

    #[test]
    fn clone_keeps_statuses_independent() {
        let net = RoadNetwork::lattice(4);
        let mut copy = net.clone();
        let id = copy.find_road(gp(0, 0), gp(1, 0)).unwrap();
        copy.set_status(id, RoadStatus::Blocked);
        assert_eq!(net.road(id).status, RoadStatus::Open);
        assert_eq!(copy.road(id).status, RoadStatus::Blocked);
    }

    #[test]
    fn roads_within_is_strict() {
        let net = RoadNetwork::lattice(10);
        // Midpoint of (5,5)-(6,5) is (5.5, 5).
        let id = net.find_road(gp(5, 5), gp(6, 5)).unwrap();
        assert!(net.roads_within(Position::new(5.5, 6.4), 1.5).contains(&id));
        assert!(!net.roads_within(Position::new(5.5, 6.6), 1.5).contains(&id));
        assert!(!net.roads_within(Position::new(5.5, 6.5), 1.5).contains(&id));
    }

    #[test]
    fn roads_within_around_intersection() {
        let net = RoadNetwork::lattice(10);
        // Four incident roads at 0.5; diagonal-adjacent midpoints at ~1.118.
        let hits = net.roads_within(Position::new(5.0, 5.0), 1.5);
        assert_eq!(hits.len(), 12);
        let hits = net.roads_within(Position::new(5.0, 5.0), 0.6);
        assert_eq!(hits.len(), 4);
    }

    #[test]
    fn roads_within_rejects_nan() {
        let net = RoadNetwork::lattice(4);
        assert!(net.roads_within(Position::new(f32::NAN, 1.0), 1.5).is_empty());
    }

    #[test]
    fn builder_validation() {
        let mut b = RoadNetworkBuilder::new(3);
        assert!(matches!(
            b.add_road(gp(0, 0), gp(1, 1), RoadStatus::Open),
            Err(SpatialError::NotAdjacent { .. })
        ));
        assert!(matches!(
            b.add_road(gp(2, 0), gp(3, 0), RoadStatus::Open),
            Err(SpatialError::OutOfBounds { .. })
        ));
        b.add_road(gp(0, 0), gp(1, 0), RoadStatus::Open).unwrap();
        assert!(matches!(
            b.add_road(gp(1, 0), gp(0, 0), RoadStatus::Open),
            Err(SpatialError::DuplicateRoad { .. })
        ));
        let net = b.build();
        assert_eq!(net.road_count(), 1);
        assert!(!net.is_complete_lattice());
    }
}

#[cfg(test)]
mod routing {
    use city_core::{Position, RoadId};

    use super::helpers::{corridor, gp};
    use crate::{AStarRouter, Router, RoadNetwork, RoadStatus, path_cost};

    fn pos(x: f32, y: f32) -> Position {
        Position::new(x, y)
    }

    #[test]
    fn trivial_same_point() {
        let net = RoadNetwork::lattice(5);
        let route = AStarRouter.route(&net, pos(2.0, 2.0), pos(2.2, 1.9)).unwrap();
        assert_eq!(route.waypoints, vec![gp(2, 2)]);
        assert_eq!(route.total_cost, 0);
        assert!(route.is_trivial());
    }

    #[test]
    fn straight_route_on_open_lattice() {
        let net = RoadNetwork::lattice(10);
        let route = AStarRouter.route(&net, pos(0.0, 0.0), pos(0.0, 9.0)).unwrap();
        assert_eq!(route.waypoints.len(), 10);
        assert_eq!(route.total_cost, 9);
        assert_eq!(route.waypoints.first(), Some(&gp(0, 0)));
        assert_eq!(route.waypoints.last(), Some(&gp(0, 9)));
    }

    #[test]
    fn positions_are_rounded() {
        let net = RoadNetwork::lattice(5);
        let route = AStarRouter.route(&net, pos(0.4, 0.6), pos(2.5, 0.0)).unwrap();
        assert_eq!(route.waypoints.first(), Some(&gp(0, 1)));
        assert_eq!(route.waypoints.last(), Some(&gp(3, 0)));
        assert_eq!(route.total_cost, 4);
    }

    #[test]
    fn out_of_bounds_goal_is_none() {
        let net = RoadNetwork::lattice(5);
        assert!(AStarRouter.route(&net, pos(0.0, 0.0), pos(7.0, 0.0)).is_none());
        assert!(AStarRouter.route(&net, pos(-3.0, 0.0), pos(1.0, 0.0)).is_none());
        assert!(AStarRouter.route(&net, pos(f32::NAN, 0.0), pos(1.0, 0.0)).is_none());
    }

    #[test]
    fn disconnected_goal_is_none() {
        let net = corridor(4);
        assert!(AStarRouter.route(&net, pos(0.0, 0.0), pos(0.0, 2.0)).is_none());
    }

    #[test]
    fn blocked_road_avoided_when_equal_alternative_exists() {
        let mut net = RoadNetwork::lattice(5);
        let id = net.find_road(gp(0, 0), gp(1, 0)).unwrap();
        net.set_status(id, RoadStatus::Blocked);
        let route = AStarRouter.route(&net, pos(0.0, 0.0), pos(2.0, 2.0)).unwrap();
        assert_eq!(route.total_cost, 4);
        assert_eq!(route.waypoints[1], gp(0, 1));
    }

    #[test]
    fn blocked_road_forces_detour() {
        let mut net = RoadNetwork::lattice(5);
        let id = net.find_road(gp(1, 0), gp(2, 0)).unwrap();
        net.set_status(id, RoadStatus::Blocked);
        let route = AStarRouter.route(&net, pos(0.0, 0.0), pos(4.0, 0.0)).unwrap();
        assert_eq!(route.total_cost, 6);
        assert!(route.waypoints.windows(2).all(|w| !(
            (w[0] == gp(1, 0) && w[1] == gp(2, 0)) || (w[0] == gp(2, 0) && w[1] == gp(1, 0))
        )));
    }

    #[test]
    fn blocked_is_still_passable() {
        let mut net = corridor(3);
        let id = net.find_road(gp(1, 0), gp(2, 0)).unwrap();
        net.set_status(id, RoadStatus::Blocked);
        let route = AStarRouter.route(&net, pos(0.0, 0.0), pos(2.0, 0.0)).unwrap();
        assert_eq!(route.total_cost, 1000);
        assert_eq!(route.waypoints.len(), 3);
    }

    #[test]
    fn congestion_raises_cost_on_sole_route() {
        let mut net = corridor(4);
        let open = AStarRouter.route(&net, pos(0.0, 0.0), pos(3.0, 0.0)).unwrap();
        for i in 0..net.road_count() {
            net.set_status(RoadId(i as u32), RoadStatus::Congested);
        }
        let jammed = AStarRouter.route(&net, pos(0.0, 0.0), pos(3.0, 0.0)).unwrap();
        assert!(jammed.total_cost > open.total_cost);
        assert_eq!(jammed.total_cost, 9);
        assert_eq!(jammed.waypoints.len(), open.waypoints.len());
    }

    #[test]
    fn congestion_prefers_cheaper_detour() {
        let mut net = RoadNetwork::lattice(4);
        for x in 0..3 {
            let id = net.find_road(gp(x, 0), gp(x + 1, 0)).unwrap();
            net.set_status(id, RoadStatus::Congested);
        }
        let route = AStarRouter.route(&net, pos(0.0, 0.0), pos(3.0, 0.0)).unwrap();
        assert_eq!(route.total_cost, 5);
        assert_eq!(route.waypoints.len(), 6);
    }

    #[test]
    fn path_cost_matches_route() {
        let net = RoadNetwork::lattice(6);
        let route = AStarRouter.route(&net, pos(1.0, 1.0), pos(4.0, 5.0)).unwrap();
        assert_eq!(path_cost(&net, &route.waypoints), Some(route.total_cost));
        assert_eq!(path_cost(&net, &[gp(0, 0), gp(2, 0)]), None);
    }

    #[test]
    fn routing_is_deterministic() {
        let net = RoadNetwork::lattice(12);
        let a = AStarRouter.route(&net, pos(1.0, 2.0), pos(10.0, 9.0)).unwrap();
        let b = AStarRouter.route(&net, pos(1.0, 2.0), pos(10.0, 9.0)).unwrap();
        assert_eq!(a, b);
    }
}

#[cfg(test)]
mod properties {
    use proptest::prelude::*;

    use city_core::Position;

    use crate::{AStarRouter, Router, RoadNetwork};

    proptest! {
        #[test]
        fn open_lattice_routes_are_manhattan_optimal(
            sx in 0i32..12, sy in 0i32..12, gx in 0i32..12, gy in 0i32..12,
        ) {
            let net = RoadNetwork::lattice(12);
            let start = Position::new(sx as f32, sy as f32);
            let goal  = Position::new(gx as f32, gy as f32);
            let route = AStarRouter.route(&net, start, goal).unwrap();
            let manhattan = start.round().manhattan(goal.round());
            prop_assert_eq!(route.total_cost, manhattan);
            prop_assert_eq!(route.waypoints.len() as u32, manhattan + 1);
            prop_assert!(route.waypoints.windows(2).all(|w| w[0].manhattan(w[1]) == 1));
        }
    }
}
