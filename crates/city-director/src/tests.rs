//! Unit tests for city-director.

#[cfg(test)]
mod helpers {
    use city_agent::{AgentBuilder, AgentStatus};
    use city_core::{AgentKind, Position};
    use city_world::WorldState;

    /// Three cars and three pedestrians on a 10×10 lattice.
    pub fn small_world() -> WorldState {
        let mut agents = Vec::new();
        for i in 1..=3 {
            agents.push(
                AgentBuilder::new(AgentKind::Car, i)
                    .at(Position::new(i as f32, 0.0))
                    .heading_to(Position::new(i as f32, 9.0))
                    .build(),
            );
        }
        for i in 1..=3 {
            agents.push(
                AgentBuilder::new(AgentKind::Npc, i)
                    .at(Position::new(0.0, i as f32))
                    .status(AgentStatus::Idle)
                    .build(),
            );
        }
        WorldState::empty(10).with_agents(agents)
    }
}

#[cfg(test)]
mod parsing {
    use city_agent::{DirectiveAction, Priority};
    use city_core::{AgentId, AgentKind, Position};
    use city_world::{AssetFilter, AssetKind, AssetOp};

    use crate::{DirectorError, extract_json, parse_response, strip_code_fences};

    const FULL: &str = r#"{
        "instructions": [
            {"agentId": "car-1", "action": "reroute", "target": {"x": 4, "y": 5},
             "priority": "high", "reasoning": "avoid the crash"},
            {"agentId": "npc-2", "action": "stop"}
        ],
        "assetOps": [
            {"op": "add", "kind": "police_barrier", "position": {"x": 2.5, "y": 3}, "ttl": 120},
            {"op": "remove", "kind": "fire"}
        ],
        "shake": true,
        "globalStrategy": "Clear the intersection"
    }"#;

    #[test]
    fn full_response() {
        let plan = parse_response(FULL).unwrap();
        assert_eq!(plan.directives.len(), 2);

        let d = &plan.directives[0];
        assert_eq!(d.agent_id, AgentId::new(AgentKind::Car, 1));
        assert_eq!(d.action, DirectiveAction::Reroute);
        assert_eq!(d.target, Some(Position::new(4.0, 5.0)));
        assert_eq!(d.priority, Some(Priority::High));
        assert_eq!(d.reasoning.as_deref(), Some("avoid the crash"));

        assert_eq!(plan.directives[1].action, DirectiveAction::Stop);
        assert!(plan.directives[1].target.is_none());

        assert_eq!(
            plan.asset_ops,
            vec![
                AssetOp::Add {
                    kind:     AssetKind::PoliceBarrier,
                    position: Position::new(2.5, 3.0),
                    ttl:      Some(120),
                },
                AssetOp::Remove(AssetFilter::by_kind(AssetKind::Fire)),
            ]
        );
        assert!(plan.shake);
        assert_eq!(plan.strategy.as_deref(), Some("Clear the intersection"));
    }

    #[test]
    fn fenced_and_chatty_reply() {
        let text = format!("Here is the plan:\n```json\n{FULL}\n```\nGood luck!");
        let plan = parse_response(&text).unwrap();
        assert_eq!(plan.directives.len(), 2);
        assert!(plan.shake);
    }

    #[test]
    fn aliases_are_accepted() {
        let text = r#"{"assetsOps": [{"action": "add", "kind": "fire", "position": {"x": 1, "y": 1}}],
                       "worldShake": 1, "strategy": "burn"}"#;
        let plan = parse_response(text).unwrap();
        assert_eq!(plan.asset_ops.len(), 1);
        assert!(plan.shake);
        assert_eq!(plan.strategy.as_deref(), Some("burn"));
        assert!(plan.directives.is_empty());
    }

    #[test]
    fn absent_fields_are_empty() {
        let plan = parse_response("{}").unwrap();
        assert!(plan.is_empty());
        assert!(plan.strategy.is_none());

        let plan = parse_response(r#"{"instructions": null, "assetOps": null}"#).unwrap();
        assert!(plan.is_empty());
    }

    #[test]
    fn bad_items_are_dropped_individually() {
        let text = r#"{"instructions": [
            {"agentId": "car-1", "action": "teleport", "target": {"x": 1, "y": 1}},
            {"agentId": "drone-4", "action": "move", "target": {"x": 1, "y": 1}},
            {"action": "stop"},
            {"agentId": "car-2", "action": "patrol", "target": {"x": "far", "y": 1}},
            "not an object",
            {"agentId": "car-3", "action": "patrol", "priority": "urgent"}
        ]}"#;
        let plan = parse_response(text).unwrap();
        assert_eq!(plan.directives.len(), 1);
        assert_eq!(plan.directives[0].agent_id, AgentId::new(AgentKind::Car, 3));
        assert!(plan.directives[0].priority.is_none());
    }

    #[test]
    fn asset_op_validation() {
        let text = r#"{"assetOps": [
            {"op": "add", "kind": "fire"},
            {"op": "add", "kind": "volcano", "position": {"x": 1, "y": 1}},
            {"op": "explode", "kind": "fire"},
            {"op": "remove", "position": {"x": 3, "y": 3}, "radius": 2},
            {"op": "remove"}
        ]}"#;
        let plan = parse_response(text).unwrap();
        assert_eq!(
            plan.asset_ops,
            vec![
                AssetOp::Remove(AssetFilter::near(Position::new(3.0, 3.0)).with_radius(2.0)),
                AssetOp::Remove(AssetFilter::default()),
            ]
        );
    }

    #[test]
    fn shake_variants() {
        assert!(!parse_response(r#"{"shake": false}"#).unwrap().shake);
        assert!(!parse_response(r#"{"shake": 0}"#).unwrap().shake);
        assert!(parse_response(r#"{"shake": "yes"}"#).unwrap().shake);
        assert!(!parse_response(r#"{"shake": null}"#).unwrap().shake);
    }

    #[test]
    fn unrecoverable_payloads_are_errors() {
        assert!(matches!(parse_response("no plan today"), Err(DirectorError::NoJson)));
        assert!(matches!(parse_response("} backwards {"), Err(DirectorError::NoJson)));
        assert!(matches!(
            parse_response(r#"{"instructions": [}"#),
            Err(DirectorError::Malformed(_))
        ));
    }

    #[test]
    fn helpers() {
        assert_eq!(strip_code_fences("```json\n{}\n```"), "{}");
        assert_eq!(extract_json("abc {\"a\": {}} xyz").unwrap(), "{\"a\": {}}");
    }
}

#[cfg(test)]
mod fallback {
    use city_agent::{DirectiveAction, Priority};
    use city_core::{Position, SimRng};

    use super::helpers::small_world;
    use crate::{FALLBACK_REASONING, fallback_plan};

    #[test]
    fn every_agent_gets_an_instruction() {
        let world = small_world();
        let plan = fallback_plan(&world, &mut SimRng::new(5));
        assert_eq!(plan.directives.len(), world.agents.len());
        assert!(plan.directives.iter().all(|d| d.priority == Some(Priority::Low)));
        assert!(plan.directives.iter().all(|d| d.reasoning.as_deref() == Some(FALLBACK_REASONING)));
        assert!(plan.strategy.is_some());
        assert!(plan.asset_ops.is_empty() && !plan.shake);
    }

    #[test]
    fn moving_agents_keep_course_and_idle_ones_patrol() {
        let world = small_world();
        let plan = fallback_plan(&world, &mut SimRng::new(5));

        let car = &plan.directives[0];
        assert_eq!(car.action, DirectiveAction::Move);
        assert_eq!(car.target, Some(Position::new(1.0, 9.0)));

        for d in &plan.directives[3..] {
            assert_eq!(d.action, DirectiveAction::Patrol);
            let t = d.target.unwrap();
            assert!(t.in_grid(10));
            assert_eq!(t.x.fract(), 0.0);
        }
    }
}

#[cfg(test)]
mod request {
    use city_core::{Position, SimRng};
    use city_world::EventKind;

    use super::helpers::small_world;
    use crate::{DirectorRequest, summarize};

    #[test]
    fn sampling_spreads_over_kinds() {
        let world = small_world();
        let summary = summarize(&world, 3);
        assert_eq!(summary.agent_count, 6);
        assert_eq!(summary.agents.len(), 3);
        let ids: Vec<String> = summary.agents.iter().map(|a| a.id.to_string()).collect();
        assert_eq!(ids, vec!["car-1", "car-3", "npc-2"]);
    }

    #[test]
    fn sample_larger_than_world_takes_all() {
        let summary = summarize(&small_world(), 100);
        assert_eq!(summary.agents.len(), 6);
    }

    #[test]
    fn disrupted_roads_and_events_listed() {
        let world = small_world().trigger_event(
            EventKind::Accident,
            Some(Position::new(5.0, 5.0)),
            &mut SimRng::new(1),
        );
        let summary = summarize(&world, 10);
        assert_eq!(summary.events.len(), 1);
        assert_eq!(summary.disrupted_roads.len(), 12);
    }

    #[test]
    fn rendered_message_for_quiet_city() {
        let req = DirectorRequest::new(&small_world(), 10, "");
        let msg = req.render_user_message();
        assert!(msg.starts_with("Current city state:"));
        assert!(msg.contains("- car-1 (car): at (1.0, 0.0), status: moving, going to (1, 9)"));
        assert!(msg.contains("- npc-1 (npc): at (0.0, 1.0), status: idle, no destination"));
        assert!(msg.contains("No active events"));
        assert!(msg.contains("All roads open"));
        assert!(!msg.contains("SCENARIO"));
    }

    #[test]
    fn rendered_message_with_incident_and_prompt() {
        let world = small_world().trigger_event(
            EventKind::Congestion,
            Some(Position::new(2.0, 2.0)),
            &mut SimRng::new(1),
        );
        let msg = DirectorRequest::new(&world, 2, "rush hour").render_user_message();
        assert!(msg.contains("- congestion at (2, 2): Heavy traffic detected at (2, 2)"));
        assert!(msg.contains(": congested"));
        assert!(msg.contains("(2 of 6 agents shown)"));
        assert!(msg.contains("SCENARIO:\nrush hour"));
    }

    #[test]
    fn json_body_is_camel_case() {
        let json = DirectorRequest::new(&small_world(), 2, "hello").to_json().unwrap();
        assert!(json.contains("\"worldState\""));
        assert!(json.contains("\"userPrompt\":\"hello\""));
        assert!(json.contains("\"gridSize\":10"));
        assert!(json.contains("\"id\":\"car-1\""));
    }
}

#[cfg(test)]
mod planner {
    use super::helpers::small_world;
    use crate::{DirectorError, DirectorRequest, Planner, ScriptedPlanner};

    #[test]
    fn scripted_replies_in_order_then_unavailable() {
        let req = DirectorRequest::new(&small_world(), 10, "");
        let mut p = ScriptedPlanner::new(["{}", "{\"shake\": true}"]);
        assert_eq!(p.complete(&req).unwrap(), "{}");
        assert_eq!(p.complete(&req).unwrap(), "{\"shake\": true}");
        assert!(matches!(p.complete(&req), Err(DirectorError::Unavailable(_))));
        assert_eq!(p.calls, 3);
        assert_eq!(p.remaining(), 0);
    }
}
