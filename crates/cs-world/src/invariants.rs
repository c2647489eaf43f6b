//! The §3/§8 invariant battery, run once per phase by an optional
//! validator. Each function returns the violations it finds (empty means
//! "holds"); the caller decides whether a violation is fatal (§7 category
//! 2) or merely logged as a warning (money conservation, per §3).

use cs_core::Config;

use crate::{AgentId, OrderStatus, OrderType, World};

#[derive(Debug, Clone)]
pub struct Violation {
    pub rule: &'static str,
    pub detail: String,
}

impl Violation {
    fn new(rule: &'static str, detail: impl Into<String>) -> Self {
        Self { rule, detail: detail.into() }
    }
}

/// Run every invariant check and collect violations. Money conservation is
/// checked separately by the caller (it needs the previous phase's total,
/// which this stateless pass does not have).
pub fn check_all(world: &World, config: &Config) -> Vec<Violation> {
    let mut out = Vec::new();
    check_location_xor(world, &mut out);
    check_travel_triple(world, &mut out);
    check_employment(world, &mut out);
    check_dead_agents_absent(world, &mut out);
    check_org_location_ownership(world, &mut out);
    check_inventory_capacity(world, config, &mut out);
    check_vehicle_cargo_capacity(world, config, &mut out);
    check_vehicle_occupants(world, &mut out);
    check_order_linkage(world, &mut out);
    out
}

fn check_location_xor(world: &World, out: &mut Vec<Violation>) {
    for a in &world.agents {
        if a.is_dead() {
            continue;
        }
        if a.location.is_none() {
            out.push(Violation::new(
                "location-xor",
                format!("agent {} is alive with no location state", a.id),
            ));
        }
    }
}

fn check_travel_triple(world: &World, out: &mut Vec<Violation>) {
    for a in &world.agents {
        if let Some(crate::agent::AgentLocation::Traveling { phases_remaining, .. }) = &a.location
        {
            if *phases_remaining == 0 {
                out.push(Violation::new(
                    "travel-triple",
                    format!("agent {} traveling with zero phases remaining", a.id),
                ));
            }
        }
    }
}

fn check_employment(world: &World, out: &mut Vec<Violation>) {
    for a in &world.agents {
        if a.employment.is_employed() && a.employment.salary < 0.0 {
            out.push(Violation::new(
                "employment-all-or-nothing",
                format!("agent {} employed with negative salary", a.id),
            ));
        }
        if let Some(loc) = a.employment.employed_at {
            let location = world.location(loc);
            if a.is_alive() && !location.employees.contains(&a.id) {
                // Owners (leader without a slot) are exempt: they are
                // `employed_at` a location they lead but never occupy a slot.
                let leads = world
                    .orgs
                    .iter()
                    .any(|o| o.leader == a.id && o.locations.contains(&loc));
                if !leads {
                    out.push(Violation::new(
                        "employment-roster",
                        format!("agent {} employed_at {} but absent from roster", a.id, loc),
                    ));
                }
            }
        }
    }
    for loc in &world.locations {
        for &agent in &loc.employees {
            let a = world.agent(agent);
            if a.employment.employed_at != Some(loc.id) {
                out.push(Violation::new(
                    "employment-roster",
                    format!("location {} roster lists {} but employed_at mismatches", loc.id, agent),
                ));
            }
        }
    }
}

fn check_dead_agents_absent(world: &World, out: &mut Vec<Violation>) {
    let dead: Vec<AgentId> = world.agents.iter().filter(|a| a.is_dead()).map(|a| a.id).collect();
    for loc in &world.locations {
        if loc.employees.iter().any(|a| dead.contains(a)) {
            out.push(Violation::new("dead-absent", format!("dead agent in employees of {}", loc.id)));
        }
        if let Some(r) = &loc.residency {
            if r.residents.iter().any(|a| dead.contains(a)) {
                out.push(Violation::new("dead-absent", format!("dead agent resident at {}", loc.id)));
            }
        }
    }
    for v in &world.vehicles {
        if v.operator.is_some_and(|a| dead.contains(&a)) || v.passengers.iter().any(|a| dead.contains(a)) {
            out.push(Violation::new("dead-absent", format!("dead agent aboard vehicle {}", v.id)));
        }
    }
}

fn check_org_location_ownership(world: &World, out: &mut Vec<Violation>) {
    for org in &world.orgs {
        for &loc in &org.locations {
            if world.location(loc).owner != Some(org.id) {
                out.push(Violation::new(
                    "org-ownership",
                    format!("org {} lists location {} not owned by it", org.id, loc),
                ));
            }
        }
    }
    for loc in &world.locations {
        if loc.owner.is_none() && !loc.for_sale {
            out.push(Violation::new(
                "orphan-for-sale",
                format!("location {} has no owner but for_sale is false", loc.id),
            ));
        }
    }
}

fn check_inventory_capacity(world: &World, config: &Config, out: &mut Vec<Violation>) {
    let size = |good: &str| config.economy.good(good).map(|g| g.size).unwrap_or(config.economy.default_goods_size);
    for a in &world.agents {
        if a.inventory_used(size) > a.inventory_capacity + 1e-6 {
            out.push(Violation::new("inventory-capacity", format!("agent {} over capacity", a.id)));
        }
    }
    for l in &world.locations {
        if l.inventory_used(size) > l.inventory_capacity + 1e-6 {
            out.push(Violation::new("inventory-capacity", format!("location {} over capacity", l.id)));
        }
    }
}

fn check_vehicle_cargo_capacity(world: &World, config: &Config, out: &mut Vec<Violation>) {
    let size = |good: &str| config.economy.good(good).map(|g| g.size).unwrap_or(config.economy.default_goods_size);
    for v in &world.vehicles {
        if v.cargo_used(size) > v.cargo_capacity + 1e-6 {
            out.push(Violation::new("cargo-capacity", format!("vehicle {} over capacity", v.id)));
        }
    }
}

fn check_vehicle_occupants(world: &World, out: &mut Vec<Violation>) {
    for v in &world.vehicles {
        for agent in v.all_occupants() {
            let a = world.agent(agent);
            if a.in_vehicle() != Some(v.id) || a.current_location().is_some() {
                out.push(Violation::new(
                    "vehicle-occupant",
                    format!("agent {} aboard {} but location state mismatches", agent, v.id),
                ));
            }
        }
    }
}

fn check_order_linkage(world: &World, out: &mut Vec<Violation>) {
    for order in &world.orders {
        if order.order_type != OrderType::Logistics {
            continue;
        }
        if let Some(parent) = order.parent_order_id {
            let Some(parent_order) = world.orders.iter().find(|o| o.id == parent) else {
                out.push(Violation::new(
                    "order-linkage",
                    format!("logistics order {} references missing parent {}", order.id, parent),
                ));
                continue;
            };
            let parent_ok = matches!(
                parent_order.status,
                OrderStatus::Ready | OrderStatus::InTransit | OrderStatus::Delivered
            );
            if !parent_ok {
                out.push(Violation::new(
                    "order-linkage",
                    format!("parent order {} in status not matching linked child", parent),
                ));
            }
        }
    }
}
