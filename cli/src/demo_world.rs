//! A small hand-built city: one shop, one residence, a dozen citizens.
//!
//! Procedural city generation is an external collaborator this workspace
//! doesn't implement (it supplies an initial `World` snapshot from outside);
//! this module stands in for that generator so the CLI has something to run
//! without requiring a snapshot file on disk.

use std::collections::HashMap;

use cs_core::config::GoodConfig;
use cs_core::{Config, GridPoint, Range, StringInterner, TagSet};
use cs_world::agent::{AgentLocation, AgentStatus, Employment, Needs, ShiftState, Stats};
use cs_world::{Agent, Building, Location, Org, Residency, World};

const CITIZEN_COUNT: usize = 12;

/// Build the demo config: `Config::test_fixture` plus a "provisions" good,
/// since the default `purchase`/`emergency_food` executors shop for that
/// good by name.
pub fn demo_config() -> Config {
    let mut config = Config::test_fixture();
    config.economy.goods.insert(
        "provisions".to_string(),
        GoodConfig { retail_price: 4.0, wholesale_price: 2.0, size: 1.0 },
    );
    config.economy.salary_tiers.unskilled = Range { min: 15.0, max: 25.0 };
    config.simulation.population_floor = 10;
    config
}

/// Build the demo world: a shop, a residence, and a dozen citizens who
/// start homeless and unemployed so `seek_housing`/`seek_job` have
/// something to do.
pub fn build() -> (World, StringInterner) {
    let mut interner = StringInterner::new();
    let mut world = World::new();

    let retail_tag = tags(&mut interner, &["retail"]);
    let shop_building = world.push_building(|id| Building {
        id,
        grid: GridPoint::new(0, 0),
        floors: 1,
        units_per_floor: 1,
        allowed_tags: retail_tag.clone(),
    });
    let shop = world.push_location(|id| Location {
        id,
        building: shop_building,
        floor: Some(0),
        unit: Some(0),
        tags: retail_tag,
        owner: None,
        for_sale: false,
        opening_cost: 0.0,
        employees: Vec::new(),
        employee_slots: 3,
        inventory: HashMap::from([("provisions".to_string(), 500)]),
        inventory_capacity: 5_000.0,
        residency: None,
    });

    let residential_tag = tags(&mut interner, &["residential"]);
    let home_building = world.push_building(|id| Building {
        id,
        grid: GridPoint::new(8, 3),
        floors: 2,
        units_per_floor: 10,
        allowed_tags: residential_tag.clone(),
    });
    let home = world.push_location(|id| Location {
        id,
        building: home_building,
        floor: Some(0),
        unit: Some(0),
        tags: residential_tag,
        owner: None,
        for_sale: false,
        opening_cost: 0.0,
        employees: Vec::new(),
        employee_slots: 0,
        inventory: HashMap::new(),
        inventory_capacity: 0.0,
        residency: Some(Residency { residents: Vec::new(), rent_cost: 5.0, max_residents: CITIZEN_COUNT as u32 + 1 }),
    });

    let owner = world.push_agent(|id| citizen(id, "shopkeeper", shop, 150.0));
    let org = world.push_org(|id| Org {
        id,
        leader: owner,
        wallet: 2_000.0,
        locations: vec![shop],
        weekly_phase_offset: 0,
        tags: TagSet::new(),
    });
    world.location_mut(shop).owner = Some(org);
    world.agent_mut(owner).residence = Some(home);
    if let Some(residency) = world.location_mut(home).residency.as_mut() {
        residency.residents.push(owner);
    }

    for i in 0..CITIZEN_COUNT {
        let name = format!("citizen-{i}");
        world.push_agent(|id| citizen(id, &name, shop, 40.0));
    }

    (world, interner)
}

fn tags(interner: &mut StringInterner, names: &[&str]) -> TagSet {
    let mut set = TagSet::new();
    for name in names {
        set.insert(interner.intern(name));
    }
    set
}

fn citizen(id: cs_world::AgentId, name: &str, start: cs_world::LocationId, wallet: f64) -> Agent {
    Agent {
        id,
        name: name.to_string(),
        age: 30.0,
        template: "default".into(),
        tags: TagSet::new(),
        stats: Stats::default(),
        needs: Needs { hunger: 20.0, fatigue: 20.0, leisure: 20.0 },
        wallet,
        inventory: HashMap::new(),
        inventory_capacity: 10.0,
        employment: Employment::default(),
        location: Some(AgentLocation::At(start)),
        residence: None,
        current_task: None,
        work_shift: ShiftState::default(),
        delivery_shift: ShiftState::default(),
        corpse_shift: ShiftState::default(),
        status: AgentStatus::Alive,
    }
}
