//! Small helpers shared by several executors: tag resolution and the
//! travel-or-arrive pattern nearly every location-seeking behavior needs.

use cs_core::{Config, StringInterner};
use cs_world::{helpers, AgentId, BuildingId, LocationId, World};

/// Outcome of one [`travel_toward`] call.
pub enum Arrival {
    Arrived,
    EnRoute,
    Failed,
}

/// `true` if `loc` carries the interned tag `tag` (absent tag ⟹ `false`,
/// never a panic — an unconfigured tag string simply matches nothing).
pub fn location_has_tag(world: &World, interner: &StringInterner, loc: LocationId, tag: &str) -> bool {
    match interner.lookup(tag) {
        Some(sym) => world.location(loc).tags.has(sym),
        None => false,
    }
}

/// Move `agent` toward `destination`: arrives instantly for zero distance,
/// starts travel otherwise, or reports `EnRoute` if already mid-journey
/// (the scheduler's dispatch loop advances `travelPhasesRemaining`, not
/// this call — see §4.2 step 2c).
pub fn travel_toward(world: &mut World, config: &Config, agent: AgentId, destination: LocationId) -> Arrival {
    let Some(current) = world.agent(agent).current_location() else {
        return Arrival::Failed;
    };
    if current == destination {
        return Arrival::Arrived;
    }
    if world.agent(agent).is_traveling() {
        return Arrival::EnRoute;
    }
    if cs_travel::location_distance(world, current, destination) == 0 {
        helpers::set_location(world, agent, destination);
        return Arrival::Arrived;
    }
    match cs_travel::start_travel(world, config, agent, destination) {
        Ok(()) => Arrival::EnRoute,
        Err(_) => Arrival::Failed,
    }
}

/// First building allowing every tag in `required_tags` that has an open
/// unit (fewer existing locations than `floors * units_per_floor`) — the
/// placement search `entrepreneur`/`purchase_orphaned` need to site a new
/// location (§4.3).
pub fn find_placement(world: &World, interner: &StringInterner, required_tags: &[String]) -> Option<BuildingId> {
    let required: Vec<_> = required_tags.iter().filter_map(|t| interner.lookup(t)).collect();
    if required.len() != required_tags.len() {
        return None; // an unrecognized required tag can never be satisfied
    }
    world
        .buildings
        .iter()
        .filter(|b| required.iter().all(|&sym| b.allowed_tags.has(sym)))
        .find(|b| {
            let occupied = world.locations.iter().filter(|l| l.building == b.id).count() as u32;
            occupied < b.max_units()
        })
        .map(|b| b.id)
}
