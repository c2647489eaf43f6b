//! Unit tests for `cs-behavior`: condition evaluation, registry ordering,
//! and the scheduler's dispatch algorithm.

use std::collections::HashMap;

use cs_core::{AgentRng, Config, GridPoint, Phase, StringInterner, TagSet};
use cs_world::agent::{AgentLocation, AgentStatus, Employment, Needs, ShiftState, Stats};
use cs_world::{Agent, Building, Location, Params, Priority, World};

use crate::condition::{Condition, NeedKind};
use crate::definition::{BehaviorDef, BehaviorRegistry};
use crate::executor::ExecutorRegistry;
use crate::scheduler::dispatch_agent;

fn test_config() -> Config {
    Config::test_fixture()
}

fn make_world() -> (World, cs_world::LocationId) {
    let mut world = World::new();
    let building = world.push_building(|id| Building {
        id,
        grid: GridPoint::new(0, 0),
        floors: 1,
        units_per_floor: 4,
        allowed_tags: TagSet::new(),
    });
    let loc = world.push_location(|id| Location {
        id,
        building,
        floor: Some(0),
        unit: Some(0),
        tags: TagSet::new(),
        owner: None,
        for_sale: false,
        opening_cost: 0.0,
        employees: Vec::new(),
        employee_slots: 2,
        inventory: HashMap::new(),
        inventory_capacity: 100.0,
        residency: None,
    });
    (world, loc)
}

fn make_agent_at(world: &mut World, loc: cs_world::LocationId) -> cs_world::AgentId {
    world.push_agent(|id| Agent {
        id,
        name: "a".into(),
        age: 20.0,
        template: "default".into(),
        tags: TagSet::new(),
        stats: Stats::default(),
        needs: Needs::default(),
        wallet: 0.0,
        inventory: HashMap::new(),
        inventory_capacity: 5.0,
        employment: Employment::default(),
        location: Some(AgentLocation::At(loc)),
        residence: None,
        current_task: None,
        work_shift: ShiftState::default(),
        delivery_shift: ShiftState::default(),
        corpse_shift: ShiftState::default(),
        status: AgentStatus::Alive,
    })
}

// ── condition evaluation ────────────────────────────────────────────────

#[test]
fn needs_above_and_below_are_strict() {
    let config = test_config();
    let interner = StringInterner::new();
    let (mut world, loc) = make_world();
    let agent = make_agent_at(&mut world, loc);
    world.agent_mut(agent).needs.hunger = 80.0;

    let cond = Condition::NeedsAbove { need: NeedKind::Hunger, value: 80.0 };
    assert!(!crate::condition::eval(&cond, &world, &interner, &config, agent, Phase(0), None));

    let cond = Condition::NeedsAbove { need: NeedKind::Hunger, value: 79.9 };
    assert!(crate::condition::eval(&cond, &world, &interner, &config, agent, Phase(0), None));
}

#[test]
fn or_clause_is_any_branch() {
    let config = test_config();
    let interner = StringInterner::new();
    let (mut world, loc) = make_world();
    let agent = make_agent_at(&mut world, loc);

    let cond = Condition::Or {
        clauses: vec![Condition::Never, Condition::HasCredits, Condition::Never],
    };
    assert!(!crate::condition::eval(&cond, &world, &interner, &config, agent, Phase(0), None));

    world.agent_mut(agent).wallet = 5.0;
    assert!(crate::condition::eval(&cond, &world, &interner, &config, agent, Phase(0), None));
}

#[test]
fn never_is_always_false() {
    let config = test_config();
    let interner = StringInterner::new();
    let (world, loc) = make_world();
    let mut world = world;
    let agent = make_agent_at(&mut world, loc);
    assert!(!crate::condition::eval(&Condition::Never, &world, &interner, &config, agent, Phase(0), None));
}

// ── behavior registry ───────────────────────────────────────────────────

fn def(id: &str, priority: Priority) -> BehaviorDef {
    BehaviorDef {
        id: id.into(),
        conditions: Vec::new(),
        completion_conditions: vec![Condition::Never],
        priority,
        executor: "travel".into(),
        params: Params::new(),
    }
}

#[test]
fn registry_preserves_declaration_order_within_priority() {
    let defs = vec![
        def("a", Priority::Normal),
        def("b", Priority::High),
        def("c", Priority::Normal),
        def("d", Priority::High),
    ];
    let registry = BehaviorRegistry::from_defs(defs).unwrap();
    assert_eq!(registry.ids_at(Priority::Normal), &["a".to_string(), "c".to_string()]);
    assert_eq!(registry.ids_at(Priority::High), &["b".to_string(), "d".to_string()]);
    assert_eq!(registry.len(), 4);
}

#[test]
fn registry_rejects_empty_id() {
    let defs = vec![def("", Priority::Idle)];
    assert!(BehaviorRegistry::from_defs(defs).is_err());
}

// ── scheduler dispatch ──────────────────────────────────────────────────

/// A trivial behavior set: `go_to_work` (high) fires whenever the agent
/// is employed and never completes on its own (the `work` executor's
/// shift countdown is what ends it); `idle_wander` (idle) always fires
/// and completes immediately (its executor is `wander`, which returns
/// `true` at a public location with nowhere to go — the fixture world
/// has none).
fn trivial_registry() -> BehaviorRegistry {
    let high = BehaviorDef {
        id: "go_to_work".into(),
        conditions: vec![Condition::HasEmployment],
        completion_conditions: vec![Condition::Unemployed],
        priority: Priority::High,
        executor: "work".into(),
        params: Params::new(),
    };
    let idle = BehaviorDef {
        id: "idle_wander".into(),
        conditions: Vec::new(),
        completion_conditions: vec![Condition::Never],
        priority: Priority::Idle,
        executor: "wander".into(),
        params: Params::new(),
    };
    BehaviorRegistry::from_defs(vec![high, idle]).unwrap()
}

fn employ_agent_at_own_location(world: &mut World, agent: cs_world::AgentId, loc: cs_world::LocationId) {
    let org_id = world.push_org(|id| cs_world::Org {
        id,
        leader: agent,
        wallet: 0.0,
        locations: vec![loc],
        weekly_phase_offset: 0,
        tags: TagSet::new(),
    });
    world.agent_mut(agent).employment = Employment { employer: Some(org_id), employed_at: Some(loc), salary: 10.0 };
}

#[test]
fn dead_agent_is_never_dispatched() {
    let config = test_config();
    let interner = StringInterner::new();
    let registry = trivial_registry();
    let executors = ExecutorRegistry::standard();
    let (mut world, loc) = make_world();
    let agent = make_agent_at(&mut world, loc);
    world.agent_mut(agent).status = AgentStatus::Dead { destroyed_phase: Phase(0) };
    let mut rng = AgentRng::new(1, agent);

    dispatch_agent(&registry, &executors, &mut world, &config, &interner, agent, Phase(1), &mut rng);
    assert!(world.agent(agent).current_task.is_none());
}

#[test]
fn idle_behavior_starts_when_nothing_else_matches() {
    let config = test_config();
    let interner = StringInterner::new();
    let registry = trivial_registry();
    let executors = ExecutorRegistry::standard();
    let (mut world, loc) = make_world();
    let agent = make_agent_at(&mut world, loc);
    let mut rng = AgentRng::new(1, agent);

    dispatch_agent(&registry, &executors, &mut world, &config, &interner, agent, Phase(1), &mut rng);
    // `wander`'s executor completes immediately when there is no public
    // location to travel to, so no task persists — but it was the one
    // selected and run this phase.
    assert!(world.agent(agent).current_task.is_none());
}

#[test]
fn high_priority_behavior_preempts_idle_and_persists() {
    let config = test_config();
    let interner = StringInterner::new();
    let registry = trivial_registry();
    let executors = ExecutorRegistry::standard();
    let (mut world, loc) = make_world();
    let agent = make_agent_at(&mut world, loc);
    employ_agent_at_own_location(&mut world, agent, loc);
    let mut rng = AgentRng::new(1, agent);

    dispatch_agent(&registry, &executors, &mut world, &config, &interner, agent, Phase(1), &mut rng);
    let task = world.agent(agent).current_task.as_ref().expect("go_to_work should be running");
    assert_eq!(task.behavior_id, "go_to_work");
    assert_eq!(task.priority, Priority::High);
}

#[test]
fn task_completes_once_completion_conditions_hold() {
    let config = test_config();
    let interner = StringInterner::new();
    let registry = trivial_registry();
    let executors = ExecutorRegistry::standard();
    let (mut world, loc) = make_world();
    let agent = make_agent_at(&mut world, loc);
    employ_agent_at_own_location(&mut world, agent, loc);
    let mut rng = AgentRng::new(1, agent);

    dispatch_agent(&registry, &executors, &mut world, &config, &interner, agent, Phase(1), &mut rng);
    assert!(world.agent(agent).current_task.is_some());

    // Losing employment makes the `unemployed` completion clause hold on
    // the next phase, ending the shift regardless of the work executor's
    // own countdown.
    world.agent_mut(agent).employment = Employment::default();
    dispatch_agent(&registry, &executors, &mut world, &config, &interner, agent, Phase(2), &mut rng);
    let task = &world.agent(agent).current_task;
    assert!(task.is_none() || task.as_ref().unwrap().behavior_id != "go_to_work");
}

#[test]
fn unregistered_executor_clears_task_instead_of_looping() {
    let config = test_config();
    let interner = StringInterner::new();
    let broken = BehaviorDef {
        id: "broken".into(),
        conditions: Vec::new(),
        completion_conditions: vec![Condition::Never],
        priority: Priority::Idle,
        executor: "does_not_exist".into(),
        params: Params::new(),
    };
    let registry = BehaviorRegistry::from_defs(vec![broken]).unwrap();
    let executors = ExecutorRegistry::standard();
    let (mut world, loc) = make_world();
    let agent = make_agent_at(&mut world, loc);
    let mut rng = AgentRng::new(1, agent);

    dispatch_agent(&registry, &executors, &mut world, &config, &interner, agent, Phase(1), &mut rng);
    assert!(world.agent(agent).current_task.is_none());
}
