//! The typed, invariant-preserving mutators of §4.6.
//!
//! `set_employment`, `clear_employment`, `set_travel`, `set_location`,
//! `set_dead`, `board_vehicle`, `exit_vehicle`, and `dissolve_org` are the
//! only legal way to touch an agent's employment/travel/residence/vehicle
//! fields or an org's membership lists — direct field mutation on those
//! groups is forbidden (§2). Every executor in `cs-behavior` and every
//! system in `cs-econ` funnels through these.

use cs_core::{Phase, TravelMethod};

use crate::agent::AgentLocation;
use crate::{AgentId, LocationId, OrgId, VehicleId, VehicleOwner, World, WorldError, WorldResult};

/// Hire `agent` at `location`, owned by `org`, at `salary`.
///
/// `occupies_slot` is `false` only for the entrepreneur/owner case (§4.3
/// `entrepreneur`): the owner is `employed_at` the location they lead but
/// does not take one of its employee slots or appear in its roster.
pub fn set_employment(
    world: &mut World,
    agent: AgentId,
    location: LocationId,
    org: OrgId,
    salary: f64,
    occupies_slot: bool,
) {
    if occupies_slot {
        let loc = world.location_mut(location);
        if !loc.employees.contains(&agent) {
            loc.employees.push(agent);
        }
    }
    let a = world.agent_mut(agent);
    a.employment.employer = Some(org);
    a.employment.employed_at = Some(location);
    a.employment.salary = salary;
}

/// Release `agent` from whatever job they hold. No-op (idempotent) if
/// already unemployed, matching §8's "dissolve twice is a no-op" shape.
pub fn clear_employment(world: &mut World, agent: AgentId) {
    let employed_at = world.agent(agent).employment.employed_at;
    if let Some(loc) = employed_at {
        world.location_mut(loc).employees.retain(|&a| a != agent);
    }
    let a = world.agent_mut(agent);
    a.employment.employer = None;
    a.employment.employed_at = None;
    a.employment.salary = 0.0;
}

/// Put `agent` in transit between two locations (§4.5). Replaces whatever
/// location state the agent previously held.
pub fn set_travel(
    world: &mut World,
    agent: AgentId,
    from: LocationId,
    to: LocationId,
    method: TravelMethod,
    phases_remaining: u32,
) {
    world.agent_mut(agent).location = Some(AgentLocation::Traveling {
        from,
        to,
        method,
        phases_remaining,
    });
}

/// Place `agent` at a concrete location, clearing any travel/vehicle state.
pub fn set_location(world: &mut World, agent: AgentId, location: LocationId) {
    world.agent_mut(agent).location = Some(AgentLocation::At(location));
}

/// Terminate `agent`: clears employment, travel, residence, vehicle
/// occupancy, personal inventory, and wallet in one atomic step (§4.1
/// step 2). Idempotent — calling this on an already-dead agent is a no-op.
pub fn set_dead(world: &mut World, agent: AgentId, phase: Phase) {
    if world.agent(agent).is_dead() {
        return;
    }
    clear_employment(world, agent);

    if let Some(res) = world.agent(agent).residence {
        if let Some(residency) = world.location_mut(res).residency.as_mut() {
            residency.residents.retain(|&a| a != agent);
        }
    }

    if let Some(vehicle) = world.agent(agent).in_vehicle() {
        let v = world.vehicle_mut(vehicle);
        if v.operator == Some(agent) {
            v.operator = None;
        }
        v.passengers.retain(|&a| a != agent);
    }

    let a = world.agent_mut(agent);
    a.residence = None;
    a.location = None;
    a.current_task = None;
    a.inventory.clear();
    a.wallet = 0.0;
    a.status = crate::agent::AgentStatus::Dead { destroyed_phase: phase };
}

/// Board `agent` onto `vehicle`, as the operator if `as_operator` else as a
/// passenger. Clears any prior location state.
pub fn board_vehicle(
    world: &mut World,
    vehicle: VehicleId,
    agent: AgentId,
    as_operator: bool,
) -> WorldResult<()> {
    if world.agent(agent).in_vehicle().is_some() {
        return Err(WorldError::AlreadyBoarded(agent));
    }
    let v = world.vehicle_mut(vehicle);
    if as_operator {
        v.operator = Some(agent);
    } else if !v.passengers.contains(&agent) {
        v.passengers.push(agent);
    }
    world.agent_mut(agent).location = Some(AgentLocation::InVehicle(vehicle));
    Ok(())
}

/// Exit `agent` from `vehicle`, placing them at `destination`.
pub fn exit_vehicle(
    world: &mut World,
    vehicle: VehicleId,
    agent: AgentId,
    destination: LocationId,
) -> WorldResult<()> {
    if world.agent(agent).in_vehicle() != Some(vehicle) {
        return Err(WorldError::NotAboard(agent, vehicle));
    }
    let v = world.vehicle_mut(vehicle);
    if v.operator == Some(agent) {
        v.operator = None;
    }
    v.passengers.retain(|&a| a != agent);
    set_location(world, agent, destination);
    Ok(())
}

/// Evict `agent` from `location`'s residency roster, clearing their
/// `residence` field (§4.4 weekly rent step: a resident who can't pay is
/// evicted, not merely billed). No-op if the agent does not actually
/// reside at `location`.
pub fn evict_resident(world: &mut World, agent: AgentId, location: LocationId) {
    if let Some(residency) = world.location_mut(location).residency.as_mut() {
        residency.residents.retain(|&a| a != agent);
    }
    if world.agent(agent).residence == Some(location) {
        world.agent_mut(agent).residence = None;
    }
}

/// The first location found in `building`, used as an exit fallback when a
/// cascading dissolution must put a vehicle occupant somewhere concrete and
/// no more specific destination is known.
pub fn first_location_in_building(
    world: &World,
    building: cs_core::BuildingId,
) -> Option<LocationId> {
    world
        .locations
        .iter()
        .find(|l| l.building == building)
        .map(|l| l.id)
}

/// Dissolve `org` (§4.6 `onOrgDissolvedWithLocations`): releases employees,
/// orphans locations, evicts residents, exits vehicle occupants, and
/// cancels any in-flight order naming the org as buyer or seller — in that
/// fixed order, iterating agents in ID order. A second call on an
/// already-dissolved org (empty `locations`, no remaining employer
/// references) produces zero deltas.
pub fn dissolve_org(world: &mut World, org: OrgId) {
    let location_ids = world.org(org).locations.clone();

    // Employees (including owners tracked purely via `employer`).
    let mut ids: Vec<AgentId> = world.agents.iter().map(|a| a.id).collect();
    ids.sort_unstable();
    for agent in ids {
        if world.agent(agent).employment.employer == Some(org) {
            clear_employment(world, agent);
        }
    }

    // Residents of owned residential locations.
    for &loc in &location_ids {
        let residents = world
            .location(loc)
            .residency
            .as_ref()
            .map(|r| r.residents.clone())
            .unwrap_or_default();
        for agent in residents {
            if let Some(residency) = world.location_mut(loc).residency.as_mut() {
                residency.residents.retain(|&a| a != agent);
            }
            world.agent_mut(agent).residence = None;
        }
    }

    // Occupants of owned vehicles.
    let vehicle_ids: Vec<_> = world
        .vehicles
        .iter()
        .filter(|v| v.owner == VehicleOwner::Org(org))
        .map(|v| v.id)
        .collect();
    for vehicle in vehicle_ids {
        let building = world.vehicle(vehicle).building;
        let occupants: Vec<AgentId> = world.vehicle(vehicle).all_occupants().collect();
        if let Some(dest) = first_location_in_building(world, building) {
            for agent in occupants {
                let _ = exit_vehicle(world, vehicle, agent, dest);
            }
        }
    }

    // Orphan locations.
    for &loc in &location_ids {
        let l = world.location_mut(loc);
        l.owner = None;
        l.for_sale = true;
        l.employees.clear();
    }
    world.org_mut(org).locations.clear();

    // Cancel in-flight orders naming this org as buyer or seller.
    let mut cancelled = Vec::new();
    for order in world.orders.iter_mut() {
        if order.is_terminal() {
            continue;
        }
        if order.buyer_org == org || order.seller_org == Some(org) {
            order.status = crate::order::OrderStatus::Cancelled;
            cancelled.push(order.id);
        }
    }
    // A cancelled goods order takes its not-yet-terminal logistics child
    // down with it — the child's own buyer/seller fields don't necessarily
    // name this org (the logistics order's `seller_org` is always `None`).
    for order in world.orders.iter_mut() {
        if !order.is_terminal() && order.parent_order_id.is_some_and(|p| cancelled.contains(&p)) {
            order.status = crate::order::OrderStatus::Cancelled;
        }
    }
}
