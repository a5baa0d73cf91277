//! Unit tests for city-core primitives.

#[cfg(test)]
mod ids {
    use crate::{AgentId, AgentKind, AssetId, EventId, RoadId};

    #[test]
    fn index_roundtrip() {
        let id = RoadId(42);
        assert_eq!(id.index(), 42);
    }

    #[test]
    fn next_increments() {
        assert_eq!(AssetId(0).next(), AssetId(1));
        assert_eq!(EventId(9).next(), EventId(10));
    }

    #[test]
    fn agent_id_label_roundtrip() {
        let id = AgentId::new(AgentKind::Car, 12);
        assert_eq!(id.to_string(), "car-12");
        assert_eq!("car-12".parse::<AgentId>().unwrap(), id);
        assert_eq!(
            "npc-3".parse::<AgentId>().unwrap(),
            AgentId::new(AgentKind::Npc, 3)
        );
    }

    #[test]
    fn agent_id_rejects_garbage() {
        assert!("drone-1".parse::<AgentId>().is_err());
        assert!("car".parse::<AgentId>().is_err());
        assert!("car-x".parse::<AgentId>().is_err());
        assert!("".parse::<AgentId>().is_err());
    }

    #[test]
    fn agent_ids_order_by_kind_then_seq() {
        assert!(AgentId::new(AgentKind::Car, 9) < AgentId::new(AgentKind::Npc, 1));
        assert!(AgentId::new(AgentKind::Car, 1) < AgentId::new(AgentKind::Car, 2));
    }
}

#[cfg(test)]
mod geo {
    use crate::{GridPoint, Position};

    #[test]
    fn zero_distance() {
        let p = Position::new(3.5, 7.25);
        assert_eq!(p.distance(p), 0.0);
    }

    #[test]
    fn pythagorean_distance() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(3.0, 4.0);
        assert!((a.distance(b) - 5.0).abs() < 1e-6);
        assert!((a.distance_sq(b) - 25.0).abs() < 1e-6);
    }

    #[test]
    fn round_half_goes_up() {
        assert_eq!(Position::new(2.5, 3.49).round(), GridPoint::new(3, 3));
        assert_eq!(Position::new(-0.5, 0.2).round(), GridPoint::new(0, 0));
        assert_eq!(Position::new(9.7, 0.51).round(), GridPoint::new(10, 1));
    }

    #[test]
    fn in_grid_and_clamp() {
        assert!(Position::new(0.0, 9.0).in_grid(10));
        assert!(!Position::new(9.01, 0.0).in_grid(10));
        assert!(!Position::new(f32::NAN, 1.0).in_grid(10));
        assert_eq!(
            Position::new(-2.0, 14.0).clamp_to_grid(10),
            Position::new(0.0, 9.0)
        );
    }

    #[test]
    fn near_is_per_axis() {
        let a = Position::new(1.0, 1.0);
        assert!(a.near(Position::new(1.4, 0.6), 0.5));
        assert!(a.near(Position::new(1.5, 1.0), 0.5));
        assert!(!a.near(Position::new(1.51, 1.0), 0.5));
    }

    #[test]
    fn manhattan_and_bounds() {
        let a = GridPoint::new(0, 0);
        let b = GridPoint::new(3, 4);
        assert_eq!(a.manhattan(b), 7);
        assert!(b.in_bounds(5));
        assert!(!b.in_bounds(4));
        assert!(!GridPoint::new(-1, 0).in_bounds(10));
    }

    #[test]
    fn index_roundtrip() {
        let p = GridPoint::new(7, 3);
        assert_eq!(p.index(10), 37);
        assert_eq!(GridPoint::from_index(37, 10), p);
    }

    #[test]
    fn neighbors_are_axis_aligned() {
        let n = GridPoint::new(5, 5).neighbors();
        assert!(n.iter().all(|q| q.manhattan(GridPoint::new(5, 5)) == 1));
    }
}

#[cfg(test)]
mod time {
    use crate::{SimClock, Tick};

    #[test]
    fn tick_arithmetic() {
        let t = Tick(10);
        assert_eq!(t + 5, Tick(15));
    }

    #[test]
    fn clock_elapsed() {
        let mut clock = SimClock::new(100);
        assert_eq!(clock.elapsed_ms(), 0);
        clock.advance();
        clock.advance();
        assert_eq!(clock.elapsed_ms(), 200);
    }

    #[test]
    fn ticks_for_ms_rounds_up() {
        let clock = SimClock::new(100);
        assert_eq!(clock.ticks_for_ms(5_000), 50);
        assert_eq!(clock.ticks_for_ms(1), 1);
        assert_eq!(clock.ticks_for_ms(0), 1);
    }
}

#[cfg(test)]
mod config {
    use crate::SimConfig;

    #[test]
    fn defaults_validate() {
        let cfg = SimConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.world.grid_size, 100);
        assert_eq!(cfg.world.agent_count(), 500);
        assert_eq!(cfg.director_interval_ticks(), 50);
    }

    #[test]
    fn tiny_grid_rejected() {
        let mut cfg = SimConfig::default();
        cfg.world.grid_size = 1;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn zero_tick_interval_rejected() {
        let cfg = SimConfig { tick_interval_ms: 0, ..SimConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn director_faster_than_ticks_rejected() {
        let cfg = SimConfig {
            tick_interval_ms: 100,
            director_interval_ms: 50,
            ..SimConfig::default()
        };
        assert!(cfg.validate().is_err());

        let disabled = SimConfig { director_enabled: false, ..cfg };
        assert!(disabled.validate().is_ok());
    }
}

#[cfg(test)]
mod rng {
    use crate::SimRng;

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = SimRng::new(12345);
        let mut r2 = SimRng::new(12345);
        for _ in 0..100 {
            let a: f32 = r1.random();
            let b: f32 = r2.random();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn gen_range_in_bounds() {
        let mut rng = SimRng::new(0);
        for _ in 0..1000 {
            let v = rng.gen_range(0.0f32..99.0);
            assert!((0.0..99.0).contains(&v));
        }
    }
}

#[cfg(test)]
mod kind {
    use crate::AgentKind;

    #[test]
    fn display_and_parse() {
        assert_eq!(AgentKind::Car.to_string(), "car");
        assert_eq!("npc".parse::<AgentKind>().unwrap(), AgentKind::Npc);
        assert!("drone".parse::<AgentKind>().is_err());
    }
}
