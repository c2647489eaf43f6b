//! Unit tests for `cs-econ`.

use std::collections::HashMap;

use cs_core::{Config, GridPoint, Phase, TagSet};
use cs_world::agent::{AgentLocation, Employment, Needs, ShiftState, Stats};
use cs_world::{Agent, Building, Location, Order, OrderStatus, OrderType, Org, Residency, Urgency, World};

use crate::*;

fn config() -> Config {
    Config::test_fixture()
}

fn make_world() -> World {
    World::new()
}

fn make_building(world: &mut World, x: i32) -> cs_world::BuildingId {
    world.push_building(|id| Building {
        id,
        grid: GridPoint::new(x, 0),
        floors: 1,
        units_per_floor: 4,
        allowed_tags: TagSet::new(),
    })
}

fn make_org(world: &mut World, leader: cs_world::AgentId) -> cs_world::OrgId {
    world.push_org(|id| Org {
        id,
        leader,
        wallet: 1000.0,
        locations: Vec::new(),
        weekly_phase_offset: 0,
        tags: TagSet::new(),
    })
}

fn make_agent(world: &mut World, wallet: f64) -> cs_world::AgentId {
    world.push_agent(|id| Agent {
        id,
        name: "a".into(),
        age: 20.0,
        template: "default".into(),
        tags: TagSet::new(),
        stats: Stats::default(),
        needs: Needs::default(),
        wallet,
        inventory: HashMap::new(),
        inventory_capacity: 5.0,
        employment: Employment::default(),
        location: None,
        residence: None,
        current_task: None,
        work_shift: ShiftState::default(),
        delivery_shift: ShiftState::default(),
        corpse_shift: ShiftState::default(),
        status: cs_world::agent::AgentStatus::Alive,
    })
}

fn make_location(world: &mut World, building: cs_world::BuildingId, owner: Option<cs_world::OrgId>) -> cs_world::LocationId {
    world.push_location(|id| Location {
        id,
        building,
        floor: Some(0),
        unit: Some(0),
        tags: TagSet::new(),
        owner,
        for_sale: owner.is_none(),
        opening_cost: 0.0,
        employees: Vec::new(),
        employee_slots: 2,
        inventory: HashMap::new(),
        inventory_capacity: 1000.0,
        residency: None,
    })
}

#[test]
fn retail_sale_moves_money_and_goods_and_records_transaction() {
    let config = config();
    let mut world = make_world();
    let b = make_building(&mut world, 0);
    let buyer = make_agent(&mut world, 100.0);
    let seller_leader = make_agent(&mut world, 0.0);
    let org = make_org(&mut world, seller_leader);
    let shop = make_location(&mut world, b, Some(org));
    world.location_mut(shop).inventory.insert("bread".into(), 10);
    world.org_mut(org).locations.push(shop);

    retail_sale(&mut world, &config, Phase::ZERO, buyer, shop, org, "bread", 3).unwrap();

    assert_eq!(world.agent(buyer).inventory_qty("bread"), 3);
    assert_eq!(world.location(shop).inventory_qty("bread"), 7);
    assert_eq!(world.transactions.len(), 1);
}

#[test]
fn retail_sale_fails_on_insufficient_stock() {
    let config = config();
    let mut world = make_world();
    let b = make_building(&mut world, 0);
    let buyer = make_agent(&mut world, 100.0);
    let leader = make_agent(&mut world, 0.0);
    let org = make_org(&mut world, leader);
    let shop = make_location(&mut world, b, Some(org));
    world.location_mut(shop).inventory.insert("bread".into(), 1);

    let err = retail_sale(&mut world, &config, Phase::ZERO, buyer, shop, org, "bread", 5).unwrap_err();
    assert!(matches!(err, EconError::InsufficientStock { .. }));
    assert_eq!(world.transactions.len(), 0);
}

#[test]
fn transfer_credits_rejects_insufficient_funds_without_mutating() {
    let mut world = make_world();
    let a = make_agent(&mut world, 5.0);
    let leader = make_agent(&mut world, 0.0);
    let org = make_org(&mut world, leader);

    let err = transact::transfer_credits(
        &mut world,
        Phase::ZERO,
        cs_world::TransactionKind::Sale,
        cs_world::EntityRef::Agent(a),
        cs_world::EntityRef::Org(org),
        10.0,
        None,
        None,
    )
    .unwrap_err();
    assert!(matches!(err, EconError::InsufficientFunds { .. }));
    assert_eq!(world.agent(a).wallet, 5.0);
}

#[test]
fn weekly_cycle_pays_salary_dividend_and_rent() {
    let config = config();
    let mut world = make_world();
    let b = make_building(&mut world, 0);
    let leader = make_agent(&mut world, 0.0);
    let org = make_org(&mut world, leader);
    let workplace = make_location(&mut world, b, Some(org));
    let home = make_location(&mut world, b, Some(org));
    world.location_mut(home).residency = Some(Residency {
        residents: Vec::new(),
        rent_cost: 20.0,
        max_residents: 2,
    });
    world.org_mut(org).locations = vec![workplace, home];

    let employee = make_agent(&mut world, 0.0);
    cs_world::helpers::set_employment(&mut world, employee, workplace, org, 50.0, true);

    let resident = make_agent(&mut world, 100.0);
    world.agent_mut(resident).residence = Some(home);
    world.location_mut(home).residency.as_mut().unwrap().residents.push(resident);

    let outcome = weekly::run_weekly_cycle(&mut world, &config, Phase(168), org);

    assert_eq!(outcome.salaries_paid, 1);
    assert!(outcome.dividend_paid);
    assert_eq!(outcome.rents_paid, 1);
    assert!(!outcome.dissolved);
    assert_eq!(world.agent(employee).wallet, 50.0);
    assert_eq!(world.agent(resident).wallet, 80.0);
}

#[test]
fn weekly_cycle_releases_employee_on_payroll_shortfall() {
    let config = config();
    let mut world = make_world();
    let b = make_building(&mut world, 0);
    let leader = make_agent(&mut world, 0.0);
    let org = make_org(&mut world, leader);
    world.org_mut(org).wallet = 5.0;
    let workplace = make_location(&mut world, b, Some(org));
    world.org_mut(org).locations = vec![workplace];

    let employee = make_agent(&mut world, 0.0);
    cs_world::helpers::set_employment(&mut world, employee, workplace, org, 50.0, true);

    let outcome = weekly::run_weekly_cycle(&mut world, &config, Phase(168), org);

    assert_eq!(outcome.employees_released, 1);
    assert!(!world.agent(employee).employment.is_employed());
}

#[test]
fn weekly_cycle_dissolves_insolvent_org() {
    let config = config();
    let mut world = make_world();
    let b = make_building(&mut world, 0);
    let leader = make_agent(&mut world, 0.0);
    let org = make_org(&mut world, leader);
    world.org_mut(org).wallet = 1.0;
    let shop = make_location(&mut world, b, Some(org));
    world.org_mut(org).locations = vec![shop];

    let outcome = weekly::run_weekly_cycle(&mut world, &config, Phase(168), org);

    assert!(outcome.dissolved);
    assert!(world.location(shop).owner.is_none());
    assert!(world.location(shop).for_sale);
}

#[test]
fn sweep_promotes_pending_order_to_ready_and_spawns_logistics_child() {
    let config = config();
    let mut world = make_world();
    let b1 = make_building(&mut world, 0);
    let b2 = make_building(&mut world, 10);
    let leader = make_agent(&mut world, 0.0);
    let buyer_org = make_org(&mut world, leader);
    let seller_org = make_org(&mut world, leader);
    let shop = make_location(&mut world, b1, Some(buyer_org));
    let wholesaler = make_location(&mut world, b2, Some(seller_org));
    world.location_mut(wholesaler).inventory.insert("bread".into(), 50);

    let order_id = world.push_order(|id| Order {
        id,
        order_type: OrderType::Goods,
        status: OrderStatus::Pending,
        good: "bread".into(),
        quantity: 10,
        buyer_org,
        seller_org: Some(seller_org),
        pickup_location: wholesaler,
        delivery_location: shop,
        payment: 100.0,
        urgency: Urgency::Medium,
        parent_order_id: None,
        driver: None,
        vehicle: None,
        created_phase: Phase::ZERO,
    });

    orders::sweep_goods_orders(&mut world, &config, Phase(1));

    assert_eq!(world.order(order_id).status, OrderStatus::Ready);
    let child = world.orders.iter().find(|o| o.parent_order_id == Some(order_id)).unwrap();
    assert_eq!(child.order_type, OrderType::Logistics);
    assert_eq!(child.status, OrderStatus::Pending);
}

#[test]
fn sweep_cancels_pending_order_past_expiration() {
    let config = config();
    let mut world = make_world();
    let b1 = make_building(&mut world, 0);
    let b2 = make_building(&mut world, 10);
    let leader = make_agent(&mut world, 0.0);
    let buyer_org = make_org(&mut world, leader);
    let seller_org = make_org(&mut world, leader);
    let shop = make_location(&mut world, b1, Some(buyer_org));
    let wholesaler = make_location(&mut world, b2, Some(seller_org));

    let order_id = world.push_order(|id| Order {
        id,
        order_type: OrderType::Goods,
        status: OrderStatus::Pending,
        good: "bread".into(),
        quantity: 10,
        buyer_org,
        seller_org: Some(seller_org),
        pickup_location: wholesaler,
        delivery_location: shop,
        payment: 100.0,
        urgency: Urgency::Medium,
        parent_order_id: None,
        driver: None,
        vehicle: None,
        created_phase: Phase::ZERO,
    });

    let past_expiration = Phase(config.thresholds.order_expiration_phases as u64 + 1);
    orders::sweep_goods_orders(&mut world, &config, past_expiration);

    assert_eq!(world.order(order_id).status, OrderStatus::Cancelled);
}

#[test]
fn fail_delivery_with_parent_cancels_both() {
    let mut world = make_world();
    let b1 = make_building(&mut world, 0);
    let b2 = make_building(&mut world, 10);
    let leader = make_agent(&mut world, 0.0);
    let org = make_org(&mut world, leader);
    let shop = make_location(&mut world, b1, Some(org));
    let depot = make_location(&mut world, b2, Some(org));

    let parent = world.push_order(|id| Order {
        id,
        order_type: OrderType::Goods,
        status: OrderStatus::Ready,
        good: "bread".into(),
        quantity: 10,
        buyer_org: org,
        seller_org: Some(org),
        pickup_location: depot,
        delivery_location: shop,
        payment: 100.0,
        urgency: Urgency::Medium,
        parent_order_id: None,
        driver: None,
        vehicle: None,
        created_phase: Phase::ZERO,
    });
    let child = world.push_order(|id| Order {
        id,
        order_type: OrderType::Logistics,
        status: OrderStatus::InTransit,
        good: "bread".into(),
        quantity: 10,
        buyer_org: org,
        seller_org: None,
        pickup_location: depot,
        delivery_location: shop,
        payment: 15.0,
        urgency: Urgency::Medium,
        parent_order_id: Some(parent),
        driver: None,
        vehicle: None,
        created_phase: Phase::ZERO,
    });

    orders::fail_delivery_with_parent(&mut world, child);

    assert_eq!(world.order(child).status, OrderStatus::Failed);
    assert_eq!(world.order(parent).status, OrderStatus::Failed);
}

#[test]
fn place_goods_orders_deduplicates_per_shop_and_good() {
    let mut config = config();
    config.economy.goods.insert(
        "bread".into(),
        cs_core::config::GoodConfig { retail_price: 5.0, wholesale_price: 2.0, size: 1.0 },
    );
    let mut world = make_world();
    let b1 = make_building(&mut world, 0);
    let b2 = make_building(&mut world, 10);
    let leader = make_agent(&mut world, 0.0);
    let buyer_org = make_org(&mut world, leader);
    let seller_org = make_org(&mut world, leader);
    let shop = make_location(&mut world, b1, Some(buyer_org));
    let wholesaler = make_location(&mut world, b2, Some(seller_org));
    world.location_mut(wholesaler).inventory.insert("bread".into(), 100);
    world.org_mut(buyer_org).locations.push(shop);

    let first = orders::place_goods_orders(&mut world, &config, Phase::ZERO);
    let second = orders::place_goods_orders(&mut world, &config, Phase(1));

    assert_eq!(first, 1);
    assert_eq!(second, 0, "a pending order for the same shop+good should suppress a second placement");
}
