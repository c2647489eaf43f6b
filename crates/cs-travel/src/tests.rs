//! Unit tests for `cs-travel`.

use std::collections::HashMap;

use cs_core::{Config, GridPoint, TagSet};
use cs_world::agent::{AgentLocation, AgentStatus, Employment, Needs, ShiftState, Stats};
use cs_world::{Agent, Building, Location, VehicleOwner, World};

use crate::*;

fn test_config() -> Config {
    Config::test_fixture()
}

fn make_world_with_buildings(distance: i32) -> (World, cs_world::LocationId, cs_world::LocationId) {
    let mut world = World::new();
    let b1 = world.push_building(|id| Building {
        id,
        grid: GridPoint::new(0, 0),
        floors: 1,
        units_per_floor: 4,
        allowed_tags: TagSet::new(),
    });
    let b2 = world.push_building(|id| Building {
        id,
        grid: GridPoint::new(distance, 0),
        floors: 1,
        units_per_floor: 4,
        allowed_tags: TagSet::new(),
    });
    let loc_a = world.push_location(|id| Location {
        id,
        building: b1,
        floor: Some(0),
        unit: Some(0),
        tags: TagSet::new(),
        owner: None,
        for_sale: true,
        opening_cost: 0.0,
        employees: Vec::new(),
        employee_slots: 0,
        inventory: HashMap::new(),
        inventory_capacity: 100.0,
        residency: None,
    });
    let loc_b = world.push_location(|id| Location {
        id,
        building: b2,
        floor: Some(0),
        unit: Some(0),
        tags: TagSet::new(),
        owner: None,
        for_sale: true,
        opening_cost: 0.0,
        employees: Vec::new(),
        employee_slots: 0,
        inventory: HashMap::new(),
        inventory_capacity: 100.0,
        residency: None,
    });
    (world, loc_a, loc_b)
}

fn make_agent_at(world: &mut World, loc: cs_world::LocationId) -> cs_world::AgentId {
    let agent = world.push_agent(|id| Agent {
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
    });
    agent
}

#[test]
fn start_travel_sets_triple_and_arrives_after_phases() {
    let config = test_config();
    let (mut world, a, b) = make_world_with_buildings(10);
    let agent = make_agent_at(&mut world, a);

    start_travel(&mut world, &config, agent, b).unwrap();
    assert!(world.agent(agent).is_traveling());

    let mut arrived = false;
    for _ in 0..50 {
        if tick_agent_travel(&mut world, agent) {
            arrived = true;
            break;
        }
    }
    assert!(arrived);
    assert_eq!(world.agent(agent).current_location(), Some(b));
}

#[test]
fn same_building_distance_is_zero() {
    let (world, a, _b) = make_world_with_buildings(0);
    assert_eq!(location_distance(&world, a, a), 0);
}

#[test]
fn redirect_travel_replaces_destination_in_place() {
    let config = test_config();
    let (mut world, a, b) = make_world_with_buildings(20);
    let agent = make_agent_at(&mut world, a);
    start_travel(&mut world, &config, agent, b).unwrap();

    let c = world.push_location(|id| Location {
        id,
        building: world.location(a).building,
        floor: Some(0),
        unit: Some(1),
        tags: TagSet::new(),
        owner: None,
        for_sale: true,
        opening_cost: 0.0,
        employees: Vec::new(),
        employee_slots: 0,
        inventory: HashMap::new(),
        inventory_capacity: 100.0,
        residency: None,
    });

    redirect_travel(&mut world, &config, agent, c);
    match &world.agent(agent).location {
        Some(AgentLocation::Traveling { to, .. }) => assert_eq!(*to, c),
        other => panic!("expected traveling state, got {other:?}"),
    }
}

#[test]
fn find_nearest_location_breaks_ties_by_id() {
    let (mut world, a, b) = make_world_with_buildings(5);
    let _agent = make_agent_at(&mut world, a);
    let nearest = find_nearest_location(&world, a, |l| l.id != a);
    assert_eq!(nearest, Some(b));
}

#[test]
fn vehicle_travel_arrives_and_exit_is_explicit() {
    let config = test_config();
    let (mut world, a, b) = make_world_with_buildings(4);
    let building_a = world.location(a).building;
    let building_b = world.location(b).building;
    let vehicle = world.push_vehicle(|id| cs_world::Vehicle {
        id,
        owner: VehicleOwner::Org(cs_world::OrgId(0)),
        building: building_a,
        operator: None,
        passengers: Vec::new(),
        cargo: HashMap::new(),
        cargo_capacity: 100.0,
        traveling: None,
    });

    start_vehicle_travel(&mut world, &config, vehicle, building_b).unwrap();
    let mut arrived = false;
    for _ in 0..50 {
        let arrivals = tick_all_vehicles(&mut world);
        if arrivals.iter().any(|a| a.vehicle == vehicle) {
            arrived = true;
            break;
        }
    }
    assert!(arrived);
    assert_eq!(world.vehicle(vehicle).building, building_b);
    // Arrival never itself places an operator at a location.
    assert!(world.vehicle(vehicle).operator.is_none());
}
